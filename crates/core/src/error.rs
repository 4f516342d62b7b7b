use std::collections::BTreeMap;

use crate::types::DbId;

/// Field name -> list of human-readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Validation failures attached to specific input fields.
    #[error("Validation failed: {message}")]
    InvalidFields { message: String, errors: FieldErrors },

    /// The request is well-formed but violates a business rule
    /// (e.g. deleting a category that is still referenced).
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build an [`CoreError::InvalidFields`] carrying a single field message.
    ///
    /// The top-level message repeats the field message, mirroring how the
    /// admin UI shows the first error in a toast.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.clone()]);
        CoreError::InvalidFields { message, errors }
    }
}
