use super::{respond, validate_request};
use crate::errors::ProjectError;
use crate::records::{model_schema, ModelName};
use crate::request::RawRequest;
use crate::response::{status, HttpResponse};
use crate::validation::{error_codes, ValidationContext};
use serde_json::{json, Value as JsonValue};

/// `GET /models/{model_name}`.
pub fn get_model(request: &RawRequest, ctx: &ValidationContext) -> HttpResponse {
    respond(status::OK, try_get_model(request, ctx))
}

fn try_get_model(request: &RawRequest, ctx: &ValidationContext) -> Result<JsonValue, ProjectError> {
    let input = validate_request(model_schema()?, request, ctx)?;

    // The schema already restricted the token to the closed set.
    let model = input
        .get_str("model_name")
        .and_then(ModelName::parse)
        .ok_or_else(|| ProjectError::Schema {
            code: error_codes::SCHEMA_MISCONFIGURED.to_string(),
            message: "model_name accepted a token outside ModelName".to_string(),
        })?;

    Ok(json!({ "model_name": model.label() }))
}
