use crate::errors::ProjectError;
use crate::response::{
    create_response, error_response, json_response, serialize_response_body, status,
    ResponseBody,
};
use crate::validation::{FieldSpec, RawInput, Schema};
use serde_json::json;

// **JSON RESPONSE TESTS**
#[test]
fn test_create_json_response() {
    let response = json_response(status::CREATED, json!({"name": "Foo", "total": 12.0}));

    assert_eq!(response.status_code, 201);
    assert!(response.is_success());
    assert_eq!(
        response.headers.get("Content-Type"),
        Some(&"application/json".to_string())
    );
    assert_eq!(response.json().unwrap()["total"], 12.0);
}

#[test]
fn test_create_empty_response() {
    let response = create_response(204, ResponseBody::Empty);

    assert_eq!(response.status_code, 204);
    assert!(response.headers.get("Content-Type").is_none());
    assert!(response.json().is_none());
}

// **SERIALIZATION TESTS**
#[test]
fn test_serialize_response_body_json() {
    let body = ResponseBody::Json(json!({"key": "value"}));
    assert_eq!(serialize_response_body(&body), br#"{"key":"value"}"#);
}

#[test]
fn test_serialize_response_body_unicode() {
    let body = ResponseBody::Json(json!({"mensaje": "Hola 世界"}));
    let bytes = serialize_response_body(&body);

    let decoded: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(decoded["mensaje"], "Hola 世界");
}

#[test]
fn test_serialize_response_body_empty() {
    assert!(serialize_response_body(&ResponseBody::Empty).is_empty());
}

// **ERROR MAPPING TESTS**
#[test]
fn test_field_errors_map_to_422() {
    let schema = Schema::builder()
        .field(FieldSpec::string("q").required())
        .build()
        .unwrap();
    let err = schema.check(&RawInput::new()).unwrap_err();

    let response = error_response(&ProjectError::from(err));

    assert_eq!(response.status_code, status::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.json().unwrap(),
        &json!({
            "detail": [{
                "loc": ["query", "q"],
                "msg": "field required",
                "type": "value_error.missing",
            }]
        })
    );
}

#[test]
fn test_request_errors_map_to_400() {
    let response = error_response(&ProjectError::Validation {
        code: "ITEMAPI_VALIDATION_INVALID_JSON".to_string(),
        message: "Invalid JSON: expected value".to_string(),
    });

    assert_eq!(response.status_code, status::BAD_REQUEST);
    let body = response.json().unwrap();
    assert_eq!(body["code"], "ITEMAPI_VALIDATION_INVALID_JSON");
    assert_eq!(body["detail"], "Invalid JSON: expected value");
}

#[test]
fn test_schema_errors_hide_details() {
    let response = error_response(&ProjectError::Schema {
        code: "ITEMAPI_SCHEMA_MISCONFIGURED".to_string(),
        message: "Field 'limit': default violates its own constraints".to_string(),
    });

    assert_eq!(response.status_code, status::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json().unwrap()["detail"], "Internal Server Error");
}
