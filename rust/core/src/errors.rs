use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    /// Request-level rejection that happens before any field is looked at
    /// (oversized body, broken UTF-8, malformed JSON).
    #[error("VALIDATION ERROR: {code} - {message}")]
    Validation { code: String, message: String },

    /// A schema was declared inconsistently. Raised while building the
    /// schema, never while validating input against it.
    #[error("SCHEMA ERROR: {code} - {message}")]
    Schema { code: String, message: String },

    #[error("FIELD ERRORS: {0}")]
    Fields(#[from] ValidationError),

    #[error("SYSTEM ERROR: {code} - {message}")]
    System { code: String, message: String },
}

impl ProjectError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &str {
        match self {
            ProjectError::Validation { code, .. }
            | ProjectError::Schema { code, .. }
            | ProjectError::System { code, .. } => code,
            ProjectError::Fields(_) => crate::validation::error_codes::FIELDS_INVALID,
        }
    }
}
