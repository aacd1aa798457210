use super::{respond, validate_request};
use crate::errors::ProjectError;
use crate::request::RawRequest;
use crate::response::{status, HttpResponse};
use crate::validation::{error_codes, FieldSpec, Schema, ValidationContext};
use serde_json::{json, Value as JsonValue};

const SIGNATURE: &str = "Atte: Christos";

/// `GET /` with an optional `name` of at least 4 characters.
pub fn read_root(request: &RawRequest, ctx: &ValidationContext) -> HttpResponse {
    respond(status::OK, try_read_root(request, ctx))
}

fn try_read_root(request: &RawRequest, ctx: &ValidationContext) -> Result<JsonValue, ProjectError> {
    let schema = Schema::builder()
        .field(FieldSpec::string("name").min_length(4).in_query())
        .build()?;
    let input = validate_request(schema, request, ctx)?;

    let mensaje = match input.get_str("name").filter(|name| !name.is_empty()) {
        Some(name) => format!("Hola {}. {}", name, SIGNATURE),
        None => format!("Hola malditos. {}", SIGNATURE),
    };
    Ok(json!({ "mensaje": mensaje }))
}

/// `GET /sum` adding two optional integers. `sum` is `null` unless both are given.
pub fn add_numbers(request: &RawRequest, ctx: &ValidationContext) -> HttpResponse {
    respond(status::OK, try_add_numbers(request, ctx))
}

fn try_add_numbers(request: &RawRequest, ctx: &ValidationContext) -> Result<JsonValue, ProjectError> {
    let schema = Schema::builder()
        .field(FieldSpec::integer("a").in_query())
        .field(FieldSpec::integer("b").in_query())
        .build()?;
    let input = validate_request(schema, request, ctx)?;

    let a = input.get_i64("a");
    let b = input.get_i64("b");
    let sum = match (a, b) {
        (Some(a), Some(b)) => Some(a.checked_add(b).ok_or_else(|| ProjectError::Validation {
            code: error_codes::ARITHMETIC_OVERFLOW.to_string(),
            message: format!("{} + {} does not fit in a 64-bit integer", a, b),
        })?),
        _ => None,
    };
    Ok(json!({ "a": a, "b": b, "sum": sum }))
}
