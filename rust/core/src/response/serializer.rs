use crate::errors::ProjectError;
use crate::response::types::{status, HttpResponse, ResponseBody};
use serde_json::json;
use std::collections::HashMap;

pub fn serialize_json_response(value: &serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_default()
}

pub fn create_response(status: u16, body: ResponseBody) -> HttpResponse {
    let mut headers = HashMap::new();

    match &body {
        ResponseBody::Json(_) => {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        ResponseBody::Empty => {}
    }

    HttpResponse {
        status_code: status,
        headers,
        body,
    }
}

pub fn json_response(status: u16, value: serde_json::Value) -> HttpResponse {
    create_response(status, ResponseBody::Json(value))
}

/// Maps an error onto its HTTP reply.
///
/// Field failures become 422 with a `detail` list, request-level rejections
/// 400, and schema or system faults 500.
pub fn error_response(error: &ProjectError) -> HttpResponse {
    match error {
        ProjectError::Fields(err) => json_response(status::UNPROCESSABLE_ENTITY, err.to_detail()),
        ProjectError::Validation { code, message } => json_response(
            status::BAD_REQUEST,
            json!({ "detail": message, "code": code }),
        ),
        ProjectError::Schema { code, .. } | ProjectError::System { code, .. } => {
            log::error!("Internal failure while handling request: {}", error);
            json_response(
                status::INTERNAL_SERVER_ERROR,
                json!({ "detail": "Internal Server Error", "code": code }),
            )
        }
    }
}

pub fn serialize_response_body(body: &ResponseBody) -> Vec<u8> {
    match body {
        ResponseBody::Empty => vec![],
        ResponseBody::Json(value) => serialize_json_response(value),
    }
}
