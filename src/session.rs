//! Workspace resolution for the CLI controllers.
//!
//! The active user's email lives in `app_settings`; resolving a session turns
//! that into a user record plus the workspace id every query takes explicitly.

use anyhow::{bail, Result};

use crate::db::Database;
use crate::models::User;

pub const ACTIVE_USER_KEY: &str = "active_user";

#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub workspace_id: String,
    pub workspace_name: String,
}

impl Session {
    /// Resolve the active session: signed-in user and their workspace.
    pub fn resolve(db: &Database) -> Result<Self> {
        let Some(email) = db.get_setting(ACTIVE_USER_KEY)? else {
            bail!("Not signed in. Run `kundebok setup` or `kundebok login <email>` first.");
        };

        let Some(user) = db.get_user_by_email(&email)? else {
            bail!("No user with email {}. Run `kundebok setup` to create one.", email);
        };

        let Some(workspace) = db.workspace_for_user(&user.id)? else {
            bail!("{} is not a member of any workspace.", user.email);
        };

        Ok(Self {
            user,
            workspace_id: workspace.id,
            workspace_name: workspace.name,
        })
    }
}

/// Mark a user as signed in. The user must already exist.
pub fn sign_in(db: &Database, email: &str) -> Result<User> {
    let Some(user) = db.get_user_by_email(email)? else {
        bail!("No user with email {}.", email);
    };
    db.set_setting(ACTIVE_USER_KEY, &user.email)?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MemberRole, Workspace, WorkspaceMember};

    #[test]
    fn test_resolve_without_active_user_fails() {
        let db = Database::open_memory().unwrap();
        assert!(Session::resolve(&db).is_err());
    }

    #[test]
    fn test_resolve_unknown_user_fails() {
        let db = Database::open_memory().unwrap();
        db.set_setting(ACTIVE_USER_KEY, "ghost@acme.no").unwrap();
        assert!(Session::resolve(&db).is_err());
    }

    #[test]
    fn test_resolve_user_without_membership_fails() {
        let db = Database::open_memory().unwrap();

        let user = User::new("Kari", "kari@acme.no");
        db.insert_user(&user).unwrap();
        db.set_setting(ACTIVE_USER_KEY, &user.email).unwrap();

        assert!(Session::resolve(&db).is_err());
    }

    #[test]
    fn test_resolve_full_session() {
        let db = Database::open_memory().unwrap();

        let workspace = Workspace::new("Acme");
        db.insert_workspace(&workspace).unwrap();
        let user = User::new("Kari", "kari@acme.no");
        db.insert_user(&user).unwrap();
        db.insert_member(&WorkspaceMember::new(&workspace.id, &user.id, MemberRole::Admin))
            .unwrap();
        db.set_setting(ACTIVE_USER_KEY, &user.email).unwrap();

        let session = Session::resolve(&db).unwrap();
        assert_eq!(session.user.id, user.id);
        assert_eq!(session.workspace_id, workspace.id);
        assert_eq!(session.workspace_name, "Acme");
    }

    #[test]
    fn test_sign_in_requires_existing_user() {
        let db = Database::open_memory().unwrap();
        assert!(sign_in(&db, "ghost@acme.no").is_err());

        let user = User::new("Kari", "kari@acme.no");
        db.insert_user(&user).unwrap();
        let signed = sign_in(&db, "kari@acme.no").unwrap();
        assert_eq!(signed.id, user.id);
        assert_eq!(
            db.get_setting(ACTIVE_USER_KEY).unwrap().as_deref(),
            Some("kari@acme.no")
        );
    }
}
