use thiserror::Error;

/// Errors from the workspace-scoped query layer.
///
/// The messages are user-facing: page controllers render them directly,
/// so the wording stays stable.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Workspace is required")]
    WorkspaceRequired,

    #[error("Failed to fetch {entity}")]
    Fetch {
        entity: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to create {entity}")]
    Create {
        entity: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to update {entity}")]
    Update {
        entity: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

impl QueryError {
    pub(crate) fn fetch(entity: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Fetch { entity, source }
    }

    pub(crate) fn create(entity: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Create { entity, source }
    }

    pub(crate) fn update(entity: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Update { entity, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(QueryError::WorkspaceRequired.to_string(), "Workspace is required");

        let err = QueryError::fetch("customers")(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.to_string(), "Failed to fetch customers");

        let err = QueryError::create("task")(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.to_string(), "Failed to create task");
    }
}
