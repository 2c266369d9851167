use anyhow::Result;

use crate::db::Database;
use crate::session::Session;

/// Execute the convert command: lead -> customer.
pub fn run_convert(db: &Database, id: &str) -> Result<()> {
    let session = Session::resolve(db)?;

    if db.convert_to_customer(id, &session.workspace_id)? {
        println!("Converted to customer.");
    } else {
        println!("No lead with ID {} in this workspace.", id);
    }

    Ok(())
}
