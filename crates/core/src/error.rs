#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} '{key}'")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a `NotFound` keyed by a database id.
    pub fn not_found(entity: &'static str, id: crate::types::DbId) -> Self {
        CoreError::NotFound {
            entity,
            key: id.to_string(),
        }
    }
}
