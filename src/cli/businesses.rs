use anyhow::Result;

use super::display::print_business_table;
use crate::db::Database;
use crate::models::Business;
use crate::session::Session;

/// Execute the customers command. With a query the fail-soft search runs;
/// without one the fail-loud listing does.
pub fn run_customers(db: &Database, query: Option<&str>, json: bool) -> Result<()> {
    let session = Session::resolve(db)?;

    let customers = match query {
        Some(q) if !q.trim().is_empty() => db.search_customers(&session.workspace_id, q),
        _ => db.list_customers(&session.workspace_id)?,
    };

    render(&customers, json)
}

/// Execute the leads command. Same shape as [`run_customers`] for stage=lead.
pub fn run_leads(db: &Database, query: Option<&str>, json: bool) -> Result<()> {
    let session = Session::resolve(db)?;

    let leads = match query {
        Some(q) if !q.trim().is_empty() => db.search_leads(&session.workspace_id, q),
        _ => db.list_leads(&session.workspace_id)?,
    };

    render(&leads, json)
}

fn render(businesses: &[Business], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(businesses)?);
    } else {
        print_business_table(businesses);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::setup::run_setup;
    use crate::models::Stage;

    fn signed_in_db() -> (Database, String) {
        let db = Database::open_memory().unwrap();
        run_setup(&db, "Acme", "kari@acme.no", None).unwrap();
        let workspace_id = Session::resolve(&db).unwrap().workspace_id;
        (db, workspace_id)
    }

    #[test]
    fn test_customers_listing_and_search_run() {
        let (db, workspace_id) = signed_in_db();

        let mut b = Business::new(&workspace_id, "Fjellheim AS");
        b.stage = Stage::Customer;
        db.insert_business(&b).unwrap();

        run_customers(&db, None, false).unwrap();
        run_customers(&db, Some("fjell"), true).unwrap();
        run_leads(&db, None, false).unwrap();
    }

    #[test]
    fn test_requires_session() {
        let db = Database::open_memory().unwrap();
        assert!(run_customers(&db, None, false).is_err());
    }
}
