use chrono::Utc;
use rusqlite::{params, Row};
use tracing::warn;

use super::{parse_timestamp, require_workspace, search, Database, QueryError};
use crate::models::{Business, BusinessStatus, Stage};

/// Fields matched by the business free-text search.
const SEARCH_COLUMNS: [&str; 4] = ["b.name", "b.email", "b.contact_person", "b.org_number"];

impl Database {
    // ==================== BUSINESS CREATE ====================

    pub fn insert_business(&self, business: &Business) -> Result<(), QueryError> {
        require_workspace(&business.workspace_id)?;
        self.conn()
            .execute(
                r#"INSERT INTO businesses (
                    id, workspace_id, name, org_number, org_form, industry_code,
                    industry_description, email, phone, contact_person, street_address,
                    postal_code, postal_city, stage, status, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
                params![
                    business.id,
                    business.workspace_id,
                    business.name,
                    business.org_number,
                    business.org_form,
                    business.industry_code,
                    business.industry_description,
                    business.email,
                    business.phone,
                    business.contact_person,
                    business.street_address,
                    business.postal_code,
                    business.postal_city,
                    business.stage.as_str(),
                    business.status.as_str(),
                    business.created_at.to_rfc3339(),
                    business.updated_at.to_rfc3339(),
                ],
            )
            .map_err(QueryError::create("business"))?;
        Ok(())
    }

    // ==================== BUSINESS READ ====================

    /// Fetch one business. Both the id and the workspace must match, so a
    /// guessed id from another workspace comes back as `None`.
    pub fn get_business(&self, id: &str, workspace_id: &str) -> Result<Option<Business>, QueryError> {
        require_workspace(workspace_id)?;

        let mut stmt = self
            .conn()
            .prepare("SELECT * FROM businesses WHERE id = ?1 AND workspace_id = ?2")
            .map_err(QueryError::fetch("business"))?;

        let result = stmt.query_row(params![id, workspace_id], row_to_business);

        match result {
            Ok(business) => Ok(Some(business)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(QueryError::fetch("business")(e)),
        }
    }

    pub fn list_customers(&self, workspace_id: &str) -> Result<Vec<Business>, QueryError> {
        self.list_by_stage(workspace_id, Stage::Customer, "customers")
    }

    pub fn list_leads(&self, workspace_id: &str) -> Result<Vec<Business>, QueryError> {
        self.list_by_stage(workspace_id, Stage::Lead, "leads")
    }

    fn list_by_stage(
        &self,
        workspace_id: &str,
        stage: Stage,
        entity: &'static str,
    ) -> Result<Vec<Business>, QueryError> {
        require_workspace(workspace_id)?;

        let mut stmt = self
            .conn()
            .prepare(
                "SELECT * FROM businesses
                 WHERE workspace_id = ?1 AND stage = ?2
                 ORDER BY updated_at DESC",
            )
            .map_err(QueryError::fetch(entity))?;

        let businesses = stmt
            .query_map(params![workspace_id, stage.as_str()], row_to_business)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(QueryError::fetch(entity))?;

        Ok(businesses)
    }

    // ==================== BUSINESS SEARCH ====================

    /// Search customers by substring across name, email, contact person and
    /// org number. Never fails: errors are logged and collapse to an empty
    /// result, so "search failed" looks like "no matches" to the caller.
    pub fn search_customers(&self, workspace_id: &str, query: &str) -> Vec<Business> {
        match self.search_by_stage(workspace_id, Stage::Customer, query, "customers") {
            Ok(businesses) => businesses,
            Err(err) => {
                warn!(error = %err, "customer search failed");
                Vec::new()
            }
        }
    }

    /// Same contract as [`Database::search_customers`] for stage=lead.
    pub fn search_leads(&self, workspace_id: &str, query: &str) -> Vec<Business> {
        match self.search_by_stage(workspace_id, Stage::Lead, query, "leads") {
            Ok(businesses) => businesses,
            Err(err) => {
                warn!(error = %err, "lead search failed");
                Vec::new()
            }
        }
    }

    fn search_by_stage(
        &self,
        workspace_id: &str,
        stage: Stage,
        query: &str,
        entity: &'static str,
    ) -> Result<Vec<Business>, QueryError> {
        // An empty query is the full workspace-scoped listing.
        if query.trim().is_empty() {
            return self.list_by_stage(workspace_id, stage, entity);
        }

        require_workspace(workspace_id)?;

        let sql = format!(
            "SELECT * FROM businesses b
             WHERE b.workspace_id = ?1 AND b.stage = ?2 AND {}
             ORDER BY b.updated_at DESC",
            search::like_clause(&SEARCH_COLUMNS, 3)
        );

        let mut stmt = self
            .conn()
            .prepare(&sql)
            .map_err(QueryError::fetch(entity))?;

        let pattern = search::like_pattern(query);
        let businesses = stmt
            .query_map(params![workspace_id, stage.as_str(), pattern], row_to_business)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(QueryError::fetch(entity))?;

        Ok(businesses)
    }

    // ==================== BUSINESS UPDATE ====================

    /// Update a business in place. Bumps `updated_at`; the workspace scope of
    /// the WHERE clause keeps cross-tenant ids inert.
    pub fn update_business(&self, business: &Business) -> Result<bool, QueryError> {
        require_workspace(&business.workspace_id)?;

        let now = Utc::now();
        let rows = self
            .conn()
            .execute(
                r#"UPDATE businesses SET
                    name = ?, org_number = ?, org_form = ?, industry_code = ?,
                    industry_description = ?, email = ?, phone = ?, contact_person = ?,
                    street_address = ?, postal_code = ?, postal_city = ?,
                    stage = ?, status = ?, updated_at = ?
                   WHERE id = ? AND workspace_id = ?"#,
                params![
                    business.name,
                    business.org_number,
                    business.org_form,
                    business.industry_code,
                    business.industry_description,
                    business.email,
                    business.phone,
                    business.contact_person,
                    business.street_address,
                    business.postal_code,
                    business.postal_city,
                    business.stage.as_str(),
                    business.status.as_str(),
                    now.to_rfc3339(),
                    business.id,
                    business.workspace_id,
                ],
            )
            .map_err(QueryError::update("business"))?;

        Ok(rows > 0)
    }

    /// One-directional stage transition: lead -> customer. A business that is
    /// not currently a lead in this workspace is left untouched.
    pub fn convert_to_customer(&self, id: &str, workspace_id: &str) -> Result<bool, QueryError> {
        require_workspace(workspace_id)?;

        let now = Utc::now();
        let rows = self
            .conn()
            .execute(
                "UPDATE businesses SET stage = 'customer', updated_at = ?
                 WHERE id = ? AND workspace_id = ? AND stage = 'lead'",
                params![now.to_rfc3339(), id, workspace_id],
            )
            .map_err(QueryError::update("business"))?;

        Ok(rows > 0)
    }
}

fn row_to_business(row: &Row) -> rusqlite::Result<Business> {
    let stage: String = row.get("stage")?;
    let status: String = row.get("status")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Business {
        id: row.get("id")?,
        workspace_id: row.get("workspace_id")?,
        name: row.get("name")?,
        org_number: row.get("org_number")?,
        org_form: row.get("org_form")?,
        industry_code: row.get("industry_code")?,
        industry_description: row.get("industry_description")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        contact_person: row.get("contact_person")?,
        street_address: row.get("street_address")?,
        postal_code: row.get("postal_code")?,
        postal_city: row.get("postal_city")?,
        stage: Stage::parse(&stage),
        status: BusinessStatus::parse(&status),
        created_at: parse_timestamp(&created_at),
        updated_at: parse_timestamp(&updated_at),
    })
}
