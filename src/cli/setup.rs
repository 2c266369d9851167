use anyhow::Result;

use crate::db::Database;
use crate::models::{MemberRole, User, Workspace, WorkspaceMember};
use crate::session::{self, Session};

/// Bootstrap: create a workspace, an admin user, the membership, and sign in.
/// An existing user with the same email is reused instead of recreated.
pub fn run_setup(db: &Database, workspace: &str, email: &str, name: Option<&str>) -> Result<()> {
    let ws = Workspace::new(workspace);
    db.insert_workspace(&ws)?;

    let user = match db.get_user_by_email(email)? {
        Some(existing) => existing,
        None => {
            let user = User::new(name.unwrap_or(email), email);
            db.insert_user(&user)?;
            user
        }
    };

    db.insert_member(&WorkspaceMember::new(&ws.id, &user.id, MemberRole::Admin))?;
    session::sign_in(db, &user.email)?;

    println!("Created workspace {} and signed in as {}", ws.name, user.email);
    Ok(())
}

pub fn run_login(db: &Database, email: &str) -> Result<()> {
    let user = session::sign_in(db, email)?;
    println!("Signed in as {}", user.email);
    Ok(())
}

pub fn run_whoami(db: &Database) -> Result<()> {
    let session = Session::resolve(db)?;
    println!("{} <{}>", session.user.name, session.user.email);
    println!("workspace: {}", session.workspace_name);
    Ok(())
}
