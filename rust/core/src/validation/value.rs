use super::schema::{FieldKind, ParamLocation};
use serde_json::{Map, Number, Value as JsonValue};
use std::collections::BTreeMap;

/// A typed, coerced field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Optional field that was absent and has no default.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Enum(String),
}

impl Value {
    pub fn matches_kind(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (Value::Null, _)
                | (Value::Bool(_), FieldKind::Boolean)
                | (Value::Int(_), FieldKind::Integer)
                | (Value::Float(_), FieldKind::Float)
                | (Value::Str(_), FieldKind::String)
                | (Value::Enum(_), FieldKind::Enum)
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(i) => JsonValue::Number((*i).into()),
            Value::Float(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
            Value::Str(s) | Value::Enum(s) => JsonValue::String(s.clone()),
        }
    }
}

/// Untyped input keyed by field name, before validation.
///
/// Path and query values are plain strings; body values keep whatever JSON
/// type the client sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInput {
    values: BTreeMap<String, JsonValue>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: JsonValue) {
        self.values.insert(name.into(), value);
    }

    pub fn with(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.values.get(name)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, JsonValue)> for RawInput {
    fn from_iter<I: IntoIterator<Item = (String, JsonValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<Map<String, JsonValue>> for RawInput {
    fn from(map: Map<String, JsonValue>) -> Self {
        map.into_iter().collect()
    }
}

/// Untyped input that keeps path, query and body values apart.
///
/// A name may arrive in several sources; none of them hides another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourcedInput {
    path: RawInput,
    query: RawInput,
    body: RawInput,
}

impl SourcedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self, location: ParamLocation) -> &RawInput {
        match location {
            ParamLocation::Path => &self.path,
            ParamLocation::Query => &self.query,
            ParamLocation::Body => &self.body,
        }
    }

    pub fn insert(&mut self, location: ParamLocation, name: impl Into<String>, value: JsonValue) {
        let source = match location {
            ParamLocation::Path => &mut self.path,
            ParamLocation::Query => &mut self.query,
            ParamLocation::Body => &mut self.body,
        };
        source.insert(name, value);
    }

    pub fn with(mut self, location: ParamLocation, name: impl Into<String>, value: JsonValue) -> Self {
        self.insert(location, name, value);
        self
    }

    pub fn get(&self, location: ParamLocation, name: &str) -> Option<&JsonValue> {
        self.source(location).get(name)
    }

    /// Every received value: path first, then query, then body, sorted by key within each.
    pub fn entries(&self) -> impl Iterator<Item = (ParamLocation, &str, &JsonValue)> {
        ParamLocation::ALL.into_iter().flat_map(move |location| {
            self.source(location)
                .iter()
                .map(move |(name, value)| (location, name, value))
        })
    }

    pub fn len(&self) -> usize {
        self.path.len() + self.query.len() + self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of a successful validation: one typed value per declared field,
/// in declaration order. There is no way to mutate it after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    entries: Vec<(String, Value)>,
}

impl ValidatedInput {
    pub(crate) fn new(entries: Vec<(String, Value)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(field, value)| (field.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> JsonValue {
        let map: Map<String, JsonValue> = self
            .entries
            .iter()
            .map(|(field, value)| (field.clone(), value.to_json()))
            .collect();
        JsonValue::Object(map)
    }
}
