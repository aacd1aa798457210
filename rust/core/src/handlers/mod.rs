//! # ENDPOINT HANDLERS
//!
//! Each handler declares its schema, validates the raw request against it
//! and composes a JSON reply. Handlers are plain functions with no shared
//! mutable state; binding them to a server is the caller's job.

use crate::errors::ProjectError;
use crate::request::RawRequest;
use crate::response::{error_response, json_response, HttpResponse};
use crate::validation::{Schema, ValidatedInput, ValidationContext};
use serde_json::Value as JsonValue;

pub mod items;
pub mod models;
pub mod root;

pub use items::{create_item, list_items, read_item, FAKE_ITEMS_DB};
pub use models::get_model;
pub use root::{add_numbers, read_root};

/// Signature shared by every handler.
pub type Handler = fn(&RawRequest, &ValidationContext) -> HttpResponse;

/// Validates the request against `schema`, reading each field from its
/// declared location and honoring the context's strict mode.
pub(crate) fn validate_request(
    schema: Schema,
    request: &RawRequest,
    ctx: &ValidationContext,
) -> Result<ValidatedInput, ProjectError> {
    let schema = schema.with_strict(ctx.strict_mode);
    Ok(schema.check_sourced(&request.sourced_input())?)
}

pub(crate) fn respond(status: u16, result: Result<JsonValue, ProjectError>) -> HttpResponse {
    match result {
        Ok(body) => json_response(status, body),
        Err(err) => {
            log::debug!("Request rejected: {}", err);
            error_response(&err)
        }
    }
}
