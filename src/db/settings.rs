use anyhow::Result;
use rusqlite::params;

use super::Database;

impl Database {
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO app_settings (key, value) VALUES (?, ?)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let result =
            self.conn()
                .query_row("SELECT value FROM app_settings WHERE key = ?", [key], |row| {
                    row.get(0)
                });

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_and_overwrite() {
        let db = Database::open_memory().unwrap();

        assert!(db.get_setting("active_user").unwrap().is_none());

        db.set_setting("active_user", "kari@acme.no").unwrap();
        assert_eq!(
            db.get_setting("active_user").unwrap().as_deref(),
            Some("kari@acme.no")
        );

        db.set_setting("active_user", "ola@acme.no").unwrap();
        assert_eq!(
            db.get_setting("active_user").unwrap().as_deref(),
            Some("ola@acme.no")
        );
    }
}
