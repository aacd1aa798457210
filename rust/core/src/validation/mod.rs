//! # ITEMAPI VALIDATION MODULE
//!
//! **TYPED REQUEST VALIDATION WITH DATA-DRIVEN SCHEMAS**
//!
//! ## VALIDATION PIPELINE
//!
//! 1. **BODY VALIDATION** - Size limit and UTF-8 encoding of the raw body
//! 2. **FIELD RESOLUTION** - Lookup, default substitution, kind coercion
//! 3. **CONSTRAINTS** - Length, numeric bounds and enum membership, first failure per field
//! 4. **AGGREGATION** - Every failing field reported together, or a fully typed input
//!
//! ## USAGE
//!
//! ```rust
//! use itemapi::validation::{validate, FieldSpec, RawInput, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::builder()
//!     .field(FieldSpec::integer("item_id").required().gt(0.0).le(1000.0).in_path())
//!     .build()?;
//! let input = validate(&schema, &RawInput::new().with("item_id", json!("42")))?;
//! assert_eq!(input.get_i64("item_id"), Some(42));
//! # Ok::<(), itemapi::errors::ProjectError>(())
//! ```

use crate::errors::ProjectError;

pub mod error;
pub mod schema;
pub mod validators;
pub mod value;

pub use error::{FailureKind, FieldFailure, ValidationError, Violation};
pub use schema::{FieldKind, FieldSpec, ParamLocation, Schema, SchemaBuilder};
pub use validators::{coerce, BufferValidator, Constraint, Utf8Validator};
pub use value::{RawInput, SourcedInput, ValidatedInput, Value};

/// **CORE VALIDATOR TRAIT**
///
/// Implemented by everything that turns raw input into a checked value:
/// body validators and schemas alike.
///
/// **GUARANTEE**: MUST NOT panic. ALL error conditions MUST return ProjectError.
pub trait Validator<Input> {
    type Output;

    fn validate(&self, input: Input) -> Result<Self::Output, ProjectError>;
}

/// Validates `raw` against `schema`.
///
/// Pure: the same schema and input always produce the same result.
pub fn validate(schema: &Schema, raw: &RawInput) -> Result<ValidatedInput, ValidationError> {
    schema.check(raw)
}

/// Default body limit (10MB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10_485_760;

/// **VALIDATION CONTEXT**
///
/// Runtime knobs shared by every request. Front ends fill it from their own
/// configuration sources.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationContext {
    /// Bodies above this many bytes are rejected before parsing.
    pub max_body_bytes: usize,

    /// Reject raw keys that the schema does not declare.
    pub strict_mode: bool,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            strict_mode: false,
        }
    }
}

/// **VALIDATION ERROR CODES**
///
/// **MANDATE**: Use these standardized error codes for consistent error reporting.
pub mod error_codes {
    pub const BODY_TOO_LARGE: &str = "ITEMAPI_VALIDATION_BODY_TOO_LARGE";
    pub const INVALID_UTF8: &str = "ITEMAPI_VALIDATION_INVALID_UTF8";
    pub const INVALID_JSON: &str = "ITEMAPI_VALIDATION_INVALID_JSON";
    pub const BODY_NOT_OBJECT: &str = "ITEMAPI_VALIDATION_BODY_NOT_OBJECT";
    pub const ARITHMETIC_OVERFLOW: &str = "ITEMAPI_VALIDATION_ARITHMETIC_OVERFLOW";

    pub const FIELDS_INVALID: &str = "ITEMAPI_VALIDATION_FIELDS_INVALID";
    pub const MISSING_FIELD: &str = "ITEMAPI_VALIDATION_MISSING_FIELD";
    pub const TYPE_MISMATCH: &str = "ITEMAPI_VALIDATION_TYPE_MISMATCH";
    pub const CONSTRAINT_VIOLATION: &str = "ITEMAPI_VALIDATION_CONSTRAINT_VIOLATION";
    pub const UNKNOWN_ENUM_TOKEN: &str = "ITEMAPI_VALIDATION_UNKNOWN_ENUM_TOKEN";
    pub const UNEXPECTED_FIELD: &str = "ITEMAPI_VALIDATION_UNEXPECTED_FIELD";

    pub const SCHEMA_MISCONFIGURED: &str = "ITEMAPI_SCHEMA_MISCONFIGURED";
    pub const SCHEMA_DUPLICATE_FIELD: &str = "ITEMAPI_SCHEMA_DUPLICATE_FIELD";
    pub const FIELD_NOT_DECLARED: &str = "ITEMAPI_SCHEMA_FIELD_NOT_DECLARED";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_context_default() {
        let ctx = ValidationContext::default();
        assert_eq!(ctx.max_body_bytes, 10_485_760);
        assert!(!ctx.strict_mode);
    }

    #[test]
    fn test_error_codes_exist() {
        assert!(!error_codes::BODY_TOO_LARGE.is_empty());
        assert!(!error_codes::MISSING_FIELD.is_empty());
        assert!(!error_codes::SCHEMA_MISCONFIGURED.is_empty());
        assert_ne!(error_codes::TYPE_MISMATCH, error_codes::CONSTRAINT_VIOLATION);
    }
}
