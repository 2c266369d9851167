use anyhow::Result;

use super::EditArgs;
use crate::db::Database;
use crate::session::Session;

/// Execute the edit command: apply the provided field flags to an existing
/// business. Missing ids render a not-found message.
pub fn run_edit(db: &Database, args: &EditArgs) -> Result<()> {
    let session = Session::resolve(db)?;

    let Some(mut business) = db.get_business(&args.id, &session.workspace_id)? else {
        println!("No business found with ID: {}", args.id);
        return Ok(());
    };

    if let Some(ref name) = args.name {
        business.name = name.clone();
    }
    if args.org_number.is_some() {
        business.org_number = args.org_number.clone();
    }
    if args.email.is_some() {
        business.email = args.email.clone();
    }
    if args.phone.is_some() {
        business.phone = args.phone.clone();
    }
    if args.contact_person.is_some() {
        business.contact_person = args.contact_person.clone();
    }
    if args.street_address.is_some() {
        business.street_address = args.street_address.clone();
    }
    if args.postal_code.is_some() {
        business.postal_code = args.postal_code.clone();
    }
    if args.postal_city.is_some() {
        business.postal_city = args.postal_city.clone();
    }

    db.update_business(&business)?;
    println!("Updated {}", business.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::setup::run_setup;
    use crate::models::Business;

    #[test]
    fn test_edit_applies_only_given_fields() {
        let db = Database::open_memory().unwrap();
        run_setup(&db, "Acme", "kari@acme.no", None).unwrap();
        let workspace_id = Session::resolve(&db).unwrap().workspace_id;

        let mut business = Business::new(&workspace_id, "Before AS");
        business.phone = Some("22334455".to_string());
        db.insert_business(&business).unwrap();

        let args = EditArgs {
            id: business.id.clone(),
            name: Some("After AS".to_string()),
            org_number: None,
            email: Some("ny@after.no".to_string()),
            phone: None,
            contact_person: None,
            street_address: None,
            postal_code: None,
            postal_city: None,
        };
        run_edit(&db, &args).unwrap();

        let fetched = db.get_business(&business.id, &workspace_id).unwrap().unwrap();
        assert_eq!(fetched.name, "After AS");
        assert_eq!(fetched.email.as_deref(), Some("ny@after.no"));
        // Untouched flag keeps the stored value
        assert_eq!(fetched.phone.as_deref(), Some("22334455"));
    }

    #[test]
    fn test_edit_unknown_id_renders_not_found() {
        let db = Database::open_memory().unwrap();
        run_setup(&db, "Acme", "kari@acme.no", None).unwrap();

        let args = EditArgs {
            id: "no-such-id".to_string(),
            name: Some("Whatever".to_string()),
            org_number: None,
            email: None,
            phone: None,
            contact_person: None,
            street_address: None,
            postal_code: None,
            postal_city: None,
        };
        run_edit(&db, &args).unwrap();
    }
}
