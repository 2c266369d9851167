use anyhow::Result;
use rusqlite::{params, Row};

use super::{parse_timestamp, Database};
use crate::models::{Workspace, WorkspaceMember};

impl Database {
    pub fn insert_workspace(&self, workspace: &Workspace) -> Result<()> {
        self.conn().execute(
            "INSERT INTO workspaces (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)",
            params![
                workspace.id,
                workspace.name,
                workspace.created_at.to_rfc3339(),
                workspace.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// The oldest workspace in the store. The import job targets this.
    pub fn first_workspace(&self) -> Result<Option<Workspace>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT * FROM workspaces ORDER BY created_at ASC LIMIT 1")?;

        let result = stmt.query_row([], row_to_workspace);

        match result {
            Ok(workspace) => Ok(Some(workspace)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn insert_member(&self, member: &WorkspaceMember) -> Result<()> {
        self.conn().execute(
            "INSERT INTO workspace_members (id, workspace_id, user_id, role, created_at)
             VALUES (?, ?, ?, ?, ?)",
            params![
                member.id,
                member.workspace_id,
                member.user_id,
                member.role.as_str(),
                member.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// The first workspace the user is a member of, by membership age.
    /// This is what the session resolver hands to the query layer.
    pub fn workspace_for_user(&self, user_id: &str) -> Result<Option<Workspace>> {
        let mut stmt = self.conn().prepare(
            "SELECT w.* FROM workspaces w
             JOIN workspace_members wm ON wm.workspace_id = w.id
             WHERE wm.user_id = ?
             ORDER BY wm.created_at ASC
             LIMIT 1",
        )?;

        let result = stmt.query_row([user_id], row_to_workspace);

        match result {
            Ok(workspace) => Ok(Some(workspace)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn row_to_workspace(row: &Row) -> rusqlite::Result<Workspace> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Workspace {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: parse_timestamp(&created_at),
        updated_at: parse_timestamp(&updated_at),
    })
}
