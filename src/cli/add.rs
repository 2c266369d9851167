use anyhow::Result;

use super::AddArgs;
use crate::db::Database;
use crate::models::{Business, Stage};
use crate::session::Session;

/// Execute the add command
pub fn run_add(db: &Database, args: &AddArgs) -> Result<()> {
    let session = Session::resolve(db)?;

    let mut business = Business::new(&session.workspace_id, args.name.trim());
    business.org_number = args.org_number.clone();
    business.email = args.email.clone();
    business.phone = args.phone.clone();
    business.contact_person = args.contact_person.clone();
    if args.customer {
        business.stage = Stage::Customer;
    }

    db.insert_business(&business)?;

    println!("Created {} ({})", business.name, business.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::setup::run_setup;

    fn args(name: &str, customer: bool) -> AddArgs {
        AddArgs {
            name: name.to_string(),
            org_number: Some("987654321".to_string()),
            email: Some("post@fjellheim.no".to_string()),
            phone: None,
            contact_person: None,
            customer,
        }
    }

    #[test]
    fn test_add_defaults_to_lead() {
        let db = Database::open_memory().unwrap();
        run_setup(&db, "Acme", "kari@acme.no", None).unwrap();
        let workspace_id = Session::resolve(&db).unwrap().workspace_id;

        run_add(&db, &args("Fjellheim AS", false)).unwrap();

        let leads = db.list_leads(&workspace_id).unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].name, "Fjellheim AS");
        assert_eq!(leads[0].org_number.as_deref(), Some("987654321"));
        assert!(db.list_customers(&workspace_id).unwrap().is_empty());
    }

    #[test]
    fn test_add_customer_flag() {
        let db = Database::open_memory().unwrap();
        run_setup(&db, "Acme", "kari@acme.no", None).unwrap();
        let workspace_id = Session::resolve(&db).unwrap().workspace_id;

        run_add(&db, &args("Nordlys AS", true)).unwrap();

        assert_eq!(db.list_customers(&workspace_id).unwrap().len(), 1);
    }
}
