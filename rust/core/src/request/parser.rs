use crate::errors::ProjectError;
use crate::validation::{error_codes, BufferValidator, Utf8Validator, ValidationContext, Validator};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

/// Splits and percent-decodes a query string. `+` decodes to a space, a key
/// without `=` maps to an empty value, and a repeated key keeps its last value.
pub fn parse_query_string(query: &str) -> HashMap<String, String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Some((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|decoded| decoded.into_owned())
}

/// Parses a request body into a JSON object after the size and encoding checks.
pub fn parse_json_body(
    data: &[u8],
    ctx: &ValidationContext,
) -> Result<Map<String, JsonValue>, ProjectError> {
    let data = BufferValidator::new(ctx.max_body_bytes).validate(data)?;
    let text = Utf8Validator::new().validate(data)?;

    let value: JsonValue = serde_json::from_str(text).map_err(|e| ProjectError::Validation {
        code: error_codes::INVALID_JSON.to_string(),
        message: format!("Invalid JSON: {}", e),
    })?;

    match value {
        JsonValue::Object(map) => Ok(map),
        other => Err(ProjectError::Validation {
            code: error_codes::BODY_NOT_OBJECT.to_string(),
            message: format!("Expected a JSON object body, got {}", json_type_name(&other)),
        }),
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_string_simple() {
        let result = parse_query_string("key1=value1&key2=value2");
        assert_eq!(result.get("key1"), Some(&"value1".to_string()));
        assert_eq!(result.get("key2"), Some(&"value2".to_string()));
    }

    #[test]
    fn test_parse_query_string_encoded() {
        let result = parse_query_string("name=John%20Doe&city=New+York");
        assert_eq!(result.get("name"), Some(&"John Doe".to_string()));
        assert_eq!(result.get("city"), Some(&"New York".to_string()));
    }

    #[test]
    fn test_parse_query_string_edge_cases() {
        assert!(parse_query_string("").is_empty());

        let result = parse_query_string("?q&skip=1&skip=2");
        assert_eq!(result.get("q"), Some(&String::new()));
        assert_eq!(result.get("skip"), Some(&"2".to_string()));
    }

    #[test]
    fn test_parse_json_body_valid() {
        let map = parse_json_body(br#"{"name": "test", "price": 42}"#, &ValidationContext::default())
            .unwrap();
        assert_eq!(map["name"], "test");
        assert_eq!(map["price"], 42);
    }

    #[test]
    fn test_parse_json_body_invalid() {
        let result = parse_json_body(br#"{"name": "test", invalid}"#, &ValidationContext::default());
        match result {
            Err(ProjectError::Validation { code, .. }) => assert_eq!(code, error_codes::INVALID_JSON),
            other => panic!("Expected invalid JSON, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_json_body_not_object() {
        let result = parse_json_body(b"[1, 2]", &ValidationContext::default());
        match result {
            Err(ProjectError::Validation { code, message }) => {
                assert_eq!(code, error_codes::BODY_NOT_OBJECT);
                assert!(message.contains("array"));
            }
            other => panic!("Expected non-object rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_json_body_respects_limit() {
        let ctx = ValidationContext {
            max_body_bytes: 8,
            ..ValidationContext::default()
        };
        let result = parse_json_body(br#"{"name": "too long"}"#, &ctx);
        assert!(matches!(
            result,
            Err(ProjectError::Validation { ref code, .. }) if code == error_codes::BODY_TOO_LARGE
        ));
    }
}
