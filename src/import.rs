//! Batch CSV import of businesses into the first workspace.
//!
//! Rows use the Brønnøysund-style Norwegian headers. The header row fixes the
//! column order; unrecognized columns are ignored. Reading stops at the line
//! limit or the first blank data line, and the first row failure aborts the
//! whole job.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::db::Database;
use crate::models::Business;

pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct ImportRow {
    /// Company name (required)
    #[serde(rename = "navn")]
    pub name: String,

    #[serde(rename = "organisasjonsnummer", default, deserialize_with = "empty_string_as_none")]
    pub org_number: Option<String>,

    #[serde(rename = "organisasjonsform", default, deserialize_with = "empty_string_as_none")]
    pub org_form: Option<String>,

    #[serde(rename = "naeringskode", default, deserialize_with = "empty_string_as_none")]
    pub industry_code: Option<String>,

    #[serde(rename = "naeringsbeskrivelse", default, deserialize_with = "empty_string_as_none")]
    pub industry_description: Option<String>,

    #[serde(rename = "epostadresse", default, deserialize_with = "empty_string_as_none")]
    pub email: Option<String>,

    #[serde(rename = "telefon", default, deserialize_with = "empty_string_as_none")]
    pub phone: Option<String>,

    #[serde(rename = "forretningsadresse", default, deserialize_with = "empty_string_as_none")]
    pub street_address: Option<String>,

    #[serde(rename = "poststed", default, deserialize_with = "empty_string_as_none")]
    pub postal_city: Option<String>,

    #[serde(rename = "postnummer", default, deserialize_with = "empty_string_as_none")]
    pub postal_code: Option<String>,
}

impl ImportRow {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("navn is required and cannot be empty");
        }
        Ok(())
    }

    fn into_business(self, workspace_id: &str) -> Business {
        let mut business = Business::new(workspace_id, self.name.trim());
        business.org_number = self.org_number;
        business.org_form = self.org_form;
        business.industry_code = self.industry_code;
        business.industry_description = self.industry_description;
        business.email = self.email;
        business.phone = self.phone;
        business.street_address = self.street_address;
        business.postal_city = self.postal_city;
        business.postal_code = self.postal_code;
        business
    }
}

/// Deserialize empty strings as None.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Run the import against the first workspace in the store. Returns the
/// number of businesses created.
pub fn run_import(db: &Database, file: &Path, limit: usize) -> Result<usize> {
    // The target workspace must exist before we touch the file.
    let Some(workspace) = db.first_workspace()? else {
        bail!("No workspace exists. Run `kundebok setup` first.");
    };

    if !file.exists() {
        bail!("File not found: {}", file.display());
    }

    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    // A blank data line terminates the file; nothing after it is parsed.
    let content = truncate_at_blank_line(&content);

    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let mut imported = 0usize;

    for result in reader.deserialize() {
        if imported >= limit {
            break;
        }

        let line = imported + 2; // 1-indexed, after the header
        let row: ImportRow =
            result.with_context(|| format!("Line {}: failed to parse row", line))?;
        row.validate()
            .with_context(|| format!("Line {}: invalid row", line))?;

        debug!(name = %row.name, line, "importing business");
        let business = row.into_business(&workspace.id);
        db.insert_business(&business)
            .with_context(|| format!("Line {}: failed to insert {}", line, business.name))?;

        imported += 1;
    }

    info!(imported, workspace = %workspace.name, "import finished");
    Ok(imported)
}

/// Cut the content at the first blank line after the header row.
fn truncate_at_blank_line(content: &str) -> String {
    let mut kept = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if idx > 0 && line.trim().is_empty() {
            break;
        }
        kept.push(line);
    }
    kept.join("\n")
}
