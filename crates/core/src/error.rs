use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cannot {operation} {entity} in '{current}' status")]
    InvalidState {
        entity: &'static str,
        current: &'static str,
        operation: &'static str,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Operation partially applied: {step} failed: {detail}")]
    PartialFailure { step: &'static str, detail: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
