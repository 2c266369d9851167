use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A company record, lifecycle-staged as lead or customer.
/// Always owned by exactly one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub org_number: Option<String>,
    pub org_form: Option<String>,
    pub industry_code: Option<String>,
    pub industry_description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub contact_person: Option<String>,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
    pub postal_city: Option<String>,
    pub stage: Stage,
    pub status: BusinessStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Lead,
    Customer,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Customer => "customer",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "customer" => Self::Customer,
            _ => Self::Lead,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStatus {
    #[default]
    Active,
    Inactive,
}

impl BusinessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "inactive" => Self::Inactive,
            _ => Self::Active,
        }
    }
}

impl Business {
    pub fn new(workspace_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            workspace_id: workspace_id.into(),
            name: name.into(),
            org_number: None,
            org_form: None,
            industry_code: None,
            industry_description: None,
            email: None,
            phone: None,
            contact_person: None,
            street_address: None,
            postal_code: None,
            postal_city: None,
            stage: Stage::default(),
            status: BusinessStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// "Postal code City" for compact display.
    pub fn postal_location(&self) -> Option<String> {
        match (&self.postal_code, &self.postal_city) {
            (Some(code), Some(city)) => Some(format!("{} {}", code, city)),
            (None, Some(city)) => Some(city.clone()),
            (Some(code), None) => Some(code.clone()),
            (None, None) => None,
        }
    }
}
