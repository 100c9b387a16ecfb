use validator::ValidationErrors;

use crate::types::DbId;

/// Failure classification shared by every layer.
///
/// The HTTP boundary maps each kind to exactly one status code; nothing
/// below it needs to know about status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ValidationFailed,
    ConstraintViolation,
    Unexpected,
}

/// Errors raised by a [`ProjectStore`](crate::store::ProjectStore) backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// A write violated a data constraint (unique, not-null, check, FK).
    #[error("Data constraint violation: {message}")]
    Constraint {
        constraint: Option<String>,
        message: String,
    },

    /// Connectivity, protocol or any other backend failure.
    #[error("Store error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Constraint { .. } => ErrorKind::ConstraintViolation,
            StoreError::Backend(_) => ErrorKind::Unexpected,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Structural validation failure with one `"field: message"` entry per problem.
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Store failures pass through untouched.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::Validation(_) => ErrorKind::ValidationFailed,
            CoreError::Store(err) => err.kind(),
        }
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::Validation(validation_details(&errors))
    }
}

/// Flatten `validator` field errors into sorted `"field: message"` strings.
///
/// Errors without a custom message fall back to the validator code
/// (e.g. `"length"`).
pub fn validation_details(errors: &ValidationErrors) -> Vec<String> {
    let mut details: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{field}: {message}")
            })
        })
        .collect();
    details.sort();
    details
}
