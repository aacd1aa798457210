use super::{respond, validate_request};
use crate::errors::ProjectError;
use crate::records::{compose, item_schema, Item};
use crate::request::RawRequest;
use crate::response::{status, HttpResponse};
use crate::validation::{error_codes, FieldSpec, Schema, ValidationContext, Value};
use serde_json::{json, Value as JsonValue};

/// Read-only fixture served by `list_items`.
pub const FAKE_ITEMS_DB: [&str; 3] = ["Foo", "Bar", "Baz"];

const DEFAULT_LIMIT: i64 = 10;

/// `GET /items/{item_id}?q=...`
pub fn read_item(request: &RawRequest, ctx: &ValidationContext) -> HttpResponse {
    respond(status::OK, try_read_item(request, ctx))
}

fn try_read_item(request: &RawRequest, ctx: &ValidationContext) -> Result<JsonValue, ProjectError> {
    let schema = Schema::builder()
        .field(FieldSpec::integer("item_id").required().gt(0.0).le(1000.0).in_path())
        .field(FieldSpec::string("q").required().in_query())
        .build()?;
    let input = validate_request(schema, request, ctx)?;

    Ok(json!({ "item_id": input.get_i64("item_id") }))
}

/// `POST /items`, answering 201 with the composed item.
pub fn create_item(request: &RawRequest, ctx: &ValidationContext) -> HttpResponse {
    respond(status::CREATED, try_create_item(request, ctx))
}

fn try_create_item(request: &RawRequest, ctx: &ValidationContext) -> Result<JsonValue, ProjectError> {
    let input = validate_request(item_schema()?, request, ctx)?;
    let item = Item::from_validated(&input)?;
    log::debug!("Composing item '{}'", item.name);
    Ok(JsonValue::Object(compose(&item)))
}

/// `GET /items/?skip=0&limit=10` over [`FAKE_ITEMS_DB`].
pub fn list_items(request: &RawRequest, ctx: &ValidationContext) -> HttpResponse {
    respond(status::OK, try_list_items(request, ctx))
}

fn try_list_items(request: &RawRequest, ctx: &ValidationContext) -> Result<JsonValue, ProjectError> {
    let schema = Schema::builder()
        .field(FieldSpec::integer("skip").default_value(Value::Int(0)).ge(0.0).in_query())
        .field(
            FieldSpec::integer("limit")
                .default_value(Value::Int(DEFAULT_LIMIT))
                .ge(0.0)
                .in_query(),
        )
        .build()?;
    let input = validate_request(schema, request, ctx)?;

    let skip = count(input.get_i64("skip"), "skip")?;
    let limit = count(input.get_i64("limit"), "limit")?;
    let items: Vec<JsonValue> = FAKE_ITEMS_DB
        .iter()
        .skip(skip)
        .take(limit)
        .map(|name| json!({ "item_name": name }))
        .collect();
    Ok(JsonValue::Array(items))
}

fn count(value: Option<i64>, field: &str) -> Result<usize, ProjectError> {
    value
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| ProjectError::Schema {
            code: error_codes::FIELD_NOT_DECLARED.to_string(),
            message: format!("'{}' is not a non-negative integer", field),
        })
}
