use super::parser::{parse_json_body, parse_query_string};
use crate::errors::ProjectError;
use crate::validation::{ParamLocation, RawInput, SourcedInput, ValidationContext};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

/// Untyped request as handed over by the serving layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRequest {
    pub path_params: HashMap<String, String>,
    pub query_params: HashMap<String, String>,
    pub body: RequestBody,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Map<String, JsonValue>),
}

impl RawRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    /// Merges a raw query string into the existing query parameters.
    pub fn with_query(mut self, query: &str) -> Self {
        self.query_params.extend(parse_query_string(query));
        self
    }

    pub fn with_json(mut self, body: Map<String, JsonValue>) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Parses and attaches a JSON body, enforcing the context's body limit.
    pub fn with_body_bytes(self, data: &[u8], ctx: &ValidationContext) -> Result<Self, ProjectError> {
        let body = parse_json_body(data, ctx)?;
        Ok(self.with_json(body))
    }

    /// Path params, query params and top-level body fields, each kept under
    /// the location it arrived in.
    pub fn sourced_input(&self) -> SourcedInput {
        let mut input = SourcedInput::new();
        for (name, value) in &self.path_params {
            input.insert(ParamLocation::Path, name.clone(), JsonValue::String(value.clone()));
        }
        for (name, value) in &self.query_params {
            input.insert(ParamLocation::Query, name.clone(), JsonValue::String(value.clone()));
        }
        if let RequestBody::Json(body) = &self.body {
            for (name, value) in body {
                input.insert(ParamLocation::Body, name.clone(), value.clone());
            }
        }
        input
    }

    /// Flattens path params, query params and top-level body fields into one
    /// name-keyed input. Later sources win on a name clash.
    pub fn raw_input(&self) -> RawInput {
        let mut raw = RawInput::new();
        for (name, value) in self.path_params.iter().chain(self.query_params.iter()) {
            raw.insert(name.clone(), JsonValue::String(value.clone()));
        }
        if let RequestBody::Json(body) = &self.body {
            for (name, value) in body {
                raw.insert(name.clone(), value.clone());
            }
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_input_merges_sources() {
        let request = RawRequest::new()
            .with_path_param("item_id", "5")
            .with_query("q=hello")
            .with_body_bytes(br#"{"price": 2.5}"#, &ValidationContext::default())
            .unwrap();

        let raw = request.raw_input();
        assert_eq!(raw.get("item_id"), Some(&json!("5")));
        assert_eq!(raw.get("q"), Some(&json!("hello")));
        assert_eq!(raw.get("price"), Some(&json!(2.5)));
    }

    #[test]
    fn test_body_wins_over_query() {
        let request = RawRequest::new()
            .with_query_param("name", "from-query")
            .with_json(json!({"name": "from-body"}).as_object().cloned().unwrap());

        assert_eq!(request.raw_input().get("name"), Some(&json!("from-body")));
    }

    #[test]
    fn test_empty_request_has_no_input() {
        assert!(RawRequest::new().raw_input().is_empty());
        assert!(RawRequest::new().sourced_input().is_empty());
    }

    #[test]
    fn test_sourced_input_keeps_each_location() {
        let request = RawRequest::new()
            .with_path_param("item_id", "5")
            .with_query("item_id=7&q=x")
            .with_json(json!({"item_id": 999}).as_object().cloned().unwrap());

        let input = request.sourced_input();
        assert_eq!(input.get(ParamLocation::Path, "item_id"), Some(&json!("5")));
        assert_eq!(input.get(ParamLocation::Query, "item_id"), Some(&json!("7")));
        assert_eq!(input.get(ParamLocation::Body, "item_id"), Some(&json!(999)));
        assert_eq!(input.get(ParamLocation::Body, "q"), None);
    }
}
