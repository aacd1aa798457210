//! # CONCRETE VALIDATORS
//!
//! **BODY VALIDATORS**: size and UTF-8 checks applied to a request body before parsing.
//! **FIELD RULES**: kind coercion and per-field constraints consumed by `Schema`.

use super::error::{FailureKind, Violation};
use super::schema::FieldKind;
use super::value::Value;
use super::{error_codes, Validator};
use crate::errors::ProjectError;
use serde_json::Value as JsonValue;
use std::cmp::Ordering;

// ================================================================================================
// BUFFER VALIDATOR - Body size limit
// ================================================================================================

/// **BUFFER VALIDATOR**
///
/// **PURPOSE**: Rejects request bodies above a configured byte limit.
#[derive(Debug, Clone)]
pub struct BufferValidator {
    max_size: usize,
}

impl BufferValidator {
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }
}

impl<'a> Validator<&'a [u8]> for BufferValidator {
    type Output = &'a [u8];

    fn validate(&self, input: &'a [u8]) -> Result<Self::Output, ProjectError> {
        if input.len() > self.max_size {
            return Err(ProjectError::Validation {
                code: error_codes::BODY_TOO_LARGE.to_string(),
                message: format!(
                    "Body size {} exceeds maximum allowed size {}",
                    input.len(),
                    self.max_size
                ),
            });
        }
        Ok(input)
    }
}

// ================================================================================================
// UTF-8 VALIDATOR - Body encoding
// ================================================================================================

/// **UTF-8 VALIDATOR**
///
/// **PURPOSE**: Borrows a body as `&str` or reports where the encoding breaks.
#[derive(Debug, Clone, Default)]
pub struct Utf8Validator;

impl Utf8Validator {
    pub fn new() -> Self {
        Self
    }
}

impl<'a> Validator<&'a [u8]> for Utf8Validator {
    type Output = &'a str;

    fn validate(&self, input: &'a [u8]) -> Result<Self::Output, ProjectError> {
        std::str::from_utf8(input).map_err(|e| ProjectError::Validation {
            code: error_codes::INVALID_UTF8.to_string(),
            message: format!("Invalid UTF-8 sequence: {}", e),
        })
    }
}

// ================================================================================================
// COERCION - Raw JSON to declared kind
// ================================================================================================

/// Converts a raw value to `kind`, or `None` when it cannot be read as one.
///
/// Query and path values always arrive as strings, so numeric and boolean
/// kinds also accept their textual forms.
pub fn coerce(kind: FieldKind, raw: &JsonValue) -> Option<Value> {
    match (kind, raw) {
        (FieldKind::String, JsonValue::String(s)) => Some(Value::Str(s.clone())),
        (FieldKind::Enum, JsonValue::String(s)) => Some(Value::Enum(s.clone())),

        (FieldKind::Integer, JsonValue::Number(n)) => match n.as_i64() {
            Some(i) => Some(Value::Int(i)),
            None => n.as_f64().and_then(whole_f64_to_i64).map(Value::Int),
        },
        (FieldKind::Integer, JsonValue::String(s)) => s.trim().parse::<i64>().ok().map(Value::Int),

        (FieldKind::Float, JsonValue::Number(n)) => n.as_f64().map(Value::Float),
        (FieldKind::Float, JsonValue::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Float),

        (FieldKind::Boolean, JsonValue::Bool(b)) => Some(Value::Bool(*b)),
        (FieldKind::Boolean, JsonValue::String(s)) => parse_bool_token(s).map(Value::Bool),

        _ => None,
    }
}

fn whole_f64_to_i64(f: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; the exclusive upper bound keeps the cast exact.
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn parse_bool_token(token: &str) -> Option<bool> {
    match token.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ================================================================================================
// CONSTRAINTS - Declarative per-field rules
// ================================================================================================

/// A single declared rule on a field. Rules are checked in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    MinLength(usize),
    MaxLength(usize),
    Gt(f64),
    Ge(f64),
    Lt(f64),
    Le(f64),
    OneOf(Vec<String>),
}

impl Constraint {
    /// Whether this rule can be declared on a field of `kind`.
    pub fn applies_to(&self, kind: FieldKind) -> bool {
        match self {
            Constraint::MinLength(_) | Constraint::MaxLength(_) => {
                matches!(kind, FieldKind::String | FieldKind::Enum)
            }
            Constraint::Gt(_) | Constraint::Ge(_) | Constraint::Lt(_) | Constraint::Le(_) => {
                matches!(kind, FieldKind::Integer | FieldKind::Float)
            }
            Constraint::OneOf(_) => kind == FieldKind::Enum,
        }
    }

    /// Checks an already-coerced value. `Null` always passes.
    pub fn check(&self, value: &Value) -> Result<(), FailureKind> {
        match self {
            Constraint::MinLength(min) => match value.as_str().map(|s| s.chars().count()) {
                Some(actual) if actual < *min => Err(violation(Violation::MinLength {
                    min: *min,
                    actual,
                })),
                _ => Ok(()),
            },
            Constraint::MaxLength(max) => match value.as_str().map(|s| s.chars().count()) {
                Some(actual) if actual > *max => Err(violation(Violation::MaxLength {
                    max: *max,
                    actual,
                })),
                _ => Ok(()),
            },
            Constraint::Gt(bound) => check_bound(
                value,
                *bound,
                Ordering::is_gt,
                Violation::GreaterThan { bound: *bound },
            ),
            Constraint::Ge(bound) => check_bound(
                value,
                *bound,
                Ordering::is_ge,
                Violation::GreaterOrEqual { bound: *bound },
            ),
            Constraint::Lt(bound) => check_bound(
                value,
                *bound,
                Ordering::is_lt,
                Violation::LessThan { bound: *bound },
            ),
            Constraint::Le(bound) => check_bound(
                value,
                *bound,
                Ordering::is_le,
                Violation::LessOrEqual { bound: *bound },
            ),
            Constraint::OneOf(tokens) => match value.as_str() {
                Some(token) if !tokens.iter().any(|t| t == token) => {
                    Err(FailureKind::UnknownEnumToken {
                        allowed: tokens.clone(),
                    })
                }
                _ => Ok(()),
            },
        }
    }
}

fn violation(violation: Violation) -> FailureKind {
    FailureKind::ConstraintViolation(violation)
}

fn check_bound(
    value: &Value,
    bound: f64,
    holds: fn(Ordering) -> bool,
    on_fail: Violation,
) -> Result<(), FailureKind> {
    let ordering = match value {
        Value::Int(n) => compare_int(*n, bound),
        Value::Float(n) => n.partial_cmp(&bound),
        _ => return Ok(()),
    };
    match ordering {
        Some(ordering) if holds(ordering) => Ok(()),
        _ => Err(violation(on_fail)),
    }
}

/// Orders an integer against a float bound without widening the integer to `f64`.
fn compare_int(n: i64, bound: f64) -> Option<Ordering> {
    if bound.is_nan() {
        return None;
    }
    // i64::MAX as f64 rounds up to 2^63, which no i64 reaches.
    if bound >= i64::MAX as f64 {
        return Some(Ordering::Less);
    }
    if bound < i64::MIN as f64 {
        return Some(Ordering::Greater);
    }
    let floor = bound.floor();
    match n.cmp(&(floor as i64)) {
        Ordering::Equal if floor != bound => Some(Ordering::Less),
        ordering => Some(ordering),
    }
}

// ================================================================================================
// UNIT TESTS
// ================================================================================================
