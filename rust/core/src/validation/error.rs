//! # FIELD FAILURE TAXONOMY
//!
//! **PURPOSE**: Per-field failure records and their aggregate.
//! **GUARANTEE**: A `ValidationError` always names at least one field.

use super::error_codes;
use super::schema::{FieldKind, FieldSpec, ParamLocation};
use serde_json::{json, Value as JsonValue};
use std::fmt;
use thiserror::Error;

/// Which bound or length rule rejected a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    MinLength { min: usize, actual: usize },
    MaxLength { max: usize, actual: usize },
    /// Exclusive lower bound (`> bound`).
    GreaterThan { bound: f64 },
    /// Inclusive lower bound (`>= bound`).
    GreaterOrEqual { bound: f64 },
    /// Exclusive upper bound (`< bound`).
    LessThan { bound: f64 },
    /// Inclusive upper bound (`<= bound`).
    LessOrEqual { bound: f64 },
}

impl Violation {
    pub fn error_type(&self) -> &'static str {
        match self {
            Violation::MinLength { .. } => "value_error.any_str.min_length",
            Violation::MaxLength { .. } => "value_error.any_str.max_length",
            Violation::GreaterThan { .. } => "value_error.number.not_gt",
            Violation::GreaterOrEqual { .. } => "value_error.number.not_ge",
            Violation::LessThan { .. } => "value_error.number.not_lt",
            Violation::LessOrEqual { .. } => "value_error.number.not_le",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MinLength { min, .. } => {
                write!(f, "ensure this value has at least {} characters", min)
            }
            Violation::MaxLength { max, .. } => {
                write!(f, "ensure this value has at most {} characters", max)
            }
            Violation::GreaterThan { bound } => {
                write!(f, "ensure this value is greater than {}", bound)
            }
            Violation::GreaterOrEqual { bound } => {
                write!(f, "ensure this value is greater than or equal to {}", bound)
            }
            Violation::LessThan { bound } => write!(f, "ensure this value is less than {}", bound),
            Violation::LessOrEqual { bound } => {
                write!(f, "ensure this value is less than or equal to {}", bound)
            }
        }
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureKind {
    MissingRequiredField,
    TypeMismatch { expected: FieldKind },
    ConstraintViolation(Violation),
    UnknownEnumToken { allowed: Vec<String> },
    /// Only produced by strict schemas.
    UnexpectedField,
}

impl FailureKind {
    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::MissingRequiredField => error_codes::MISSING_FIELD,
            FailureKind::TypeMismatch { .. } => error_codes::TYPE_MISMATCH,
            FailureKind::ConstraintViolation(_) => error_codes::CONSTRAINT_VIOLATION,
            FailureKind::UnknownEnumToken { .. } => error_codes::UNKNOWN_ENUM_TOKEN,
            FailureKind::UnexpectedField => error_codes::UNEXPECTED_FIELD,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            FailureKind::MissingRequiredField => "value_error.missing",
            FailureKind::TypeMismatch { expected } => expected.error_type(),
            FailureKind::ConstraintViolation(violation) => violation.error_type(),
            FailureKind::UnknownEnumToken { .. } => "type_error.enum",
            FailureKind::UnexpectedField => "value_error.extra",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingRequiredField => f.write_str("field required"),
            FailureKind::TypeMismatch { expected } => {
                write!(f, "value is not a valid {}", expected)
            }
            FailureKind::ConstraintViolation(violation) => violation.fmt(f),
            FailureKind::UnknownEnumToken { allowed } => {
                let permitted: Vec<String> = allowed.iter().map(|t| format!("'{}'", t)).collect();
                write!(
                    f,
                    "value is not a valid enumeration member; permitted: {}",
                    permitted.join(", ")
                )
            }
            FailureKind::UnexpectedField => f.write_str("extra fields not permitted"),
        }
    }
}

/// One rejected field together with the raw value that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFailure {
    pub field: String,
    pub location: ParamLocation,
    pub kind: FailureKind,
    /// `None` when the field was absent.
    pub raw: Option<JsonValue>,
}

impl FieldFailure {
    pub(crate) fn for_spec(spec: &FieldSpec, kind: FailureKind, raw: Option<&JsonValue>) -> Self {
        Self {
            field: spec.name().to_string(),
            location: spec.location(),
            kind,
            raw: raw.cloned(),
        }
    }

    /// FastAPI-compatible `{"loc", "msg", "type"}` entry.
    pub fn to_detail(&self) -> JsonValue {
        json!({
            "loc": [self.location.as_str(), self.field],
            "msg": self.kind.to_string(),
            "type": self.kind.error_type(),
        })
    }
}

/// Aggregate of every failing field, in schema declaration order.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", summarize(.failures))]
pub struct ValidationError {
    failures: Vec<FieldFailure>,
}

fn summarize(failures: &[FieldFailure]) -> String {
    let parts: Vec<String> = failures
        .iter()
        .map(|failure| format!("{}: {}", failure.field, failure.kind))
        .collect();
    format!(
        "{} validation error{} ({})",
        failures.len(),
        if failures.len() == 1 { "" } else { "s" },
        parts.join("; ")
    )
}

impl ValidationError {
    /// Returns `None` for an empty failure list, so an empty error can never exist.
    pub(crate) fn from_failures(failures: Vec<FieldFailure>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self { failures })
        }
    }

    pub fn failures(&self) -> &[FieldFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|failure| failure.field.as_str())
    }

    pub fn failure_for(&self, field: &str) -> Option<&FieldFailure> {
        self.failures.iter().find(|failure| failure.field == field)
    }

    /// Response body for a 422 reply.
    pub fn to_detail(&self) -> JsonValue {
        let detail: Vec<JsonValue> = self.failures.iter().map(FieldFailure::to_detail).collect();
        json!({ "detail": detail })
    }
}
