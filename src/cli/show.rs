use anyhow::Result;

use super::display::print_business_detail;
use crate::db::Database;
use crate::session::Session;

/// Execute the show command. A missing or foreign id renders a not-found
/// message rather than failing.
pub fn run_show(db: &Database, id: &str) -> Result<()> {
    let session = Session::resolve(db)?;

    match db.get_business(id, &session.workspace_id)? {
        Some(business) => print_business_detail(&business),
        None => println!("No business found with ID: {}", id),
    }

    Ok(())
}
