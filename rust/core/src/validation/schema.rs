//! # DECLARATIVE FIELD SCHEMAS
//!
//! **PURPOSE**: Describe request fields as data (`FieldSpec`) and validate raw input
//! against the whole list with one generic routine.
//! **GUARANTEE**: Either every field validates or every failing field is reported.

use super::error::{FailureKind, FieldFailure, ValidationError};
use super::validators::{coerce, Constraint};
use super::value::{RawInput, SourcedInput, ValidatedInput, Value};
use super::{error_codes, Validator};
use crate::errors::ProjectError;
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use std::fmt;

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    Enum,
}

impl FieldKind {
    pub fn error_type(self) -> &'static str {
        match self {
            FieldKind::String => "type_error.str",
            FieldKind::Integer => "type_error.integer",
            FieldKind::Float => "type_error.float",
            FieldKind::Boolean => "type_error.bool",
            FieldKind::Enum => "type_error.enum",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::Enum => "enumeration member",
        })
    }
}

/// Where a field is read from. Also the first element of a failure's `loc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
    Body,
}

impl ParamLocation {
    pub const ALL: [ParamLocation; 3] = [
        ParamLocation::Path,
        ParamLocation::Query,
        ParamLocation::Body,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Body => "body",
        }
    }
}

/// **FIELD SPECIFICATION**
///
/// Built with chained calls; defaults to an optional query parameter with no rules.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
    required: bool,
    default: Option<Value>,
    constraints: Vec<Constraint>,
    location: ParamLocation,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            default: None,
            constraints: Vec::new(),
            location: ParamLocation::Query,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Float)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Closed set of string tokens. Membership is checked after coercion.
    pub fn enumeration<S: AsRef<str>>(name: impl Into<String>, tokens: &[S]) -> Self {
        let tokens = tokens.iter().map(|t| t.as_ref().to_string()).collect();
        Self::new(name, FieldKind::Enum).constraint(Constraint::OneOf(tokens))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn min_length(self, min: usize) -> Self {
        self.constraint(Constraint::MinLength(min))
    }

    pub fn max_length(self, max: usize) -> Self {
        self.constraint(Constraint::MaxLength(max))
    }

    pub fn gt(self, bound: f64) -> Self {
        self.constraint(Constraint::Gt(bound))
    }

    pub fn ge(self, bound: f64) -> Self {
        self.constraint(Constraint::Ge(bound))
    }

    pub fn lt(self, bound: f64) -> Self {
        self.constraint(Constraint::Lt(bound))
    }

    pub fn le(self, bound: f64) -> Self {
        self.constraint(Constraint::Le(bound))
    }

    pub fn in_path(mut self) -> Self {
        self.location = ParamLocation::Path;
        self
    }

    pub fn in_query(mut self) -> Self {
        self.location = ParamLocation::Query;
        self
    }

    pub fn in_body(mut self) -> Self {
        self.location = ParamLocation::Body;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn declared_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn location(&self) -> ParamLocation {
        self.location
    }

    /// Produces this field's typed value from its raw counterpart.
    fn resolve(&self, raw: Option<&JsonValue>) -> Result<Value, FailureKind> {
        let value = match raw {
            None | Some(JsonValue::Null) if !self.required => {
                self.default.clone().unwrap_or(Value::Null)
            }
            None => return Err(FailureKind::MissingRequiredField),
            Some(raw) => coerce(self.kind, raw)
                .ok_or(FailureKind::TypeMismatch { expected: self.kind })?,
        };
        self.check_constraints(&value)?;
        Ok(value)
    }

    fn check_constraints(&self, value: &Value) -> Result<(), FailureKind> {
        self.constraints
            .iter()
            .try_for_each(|constraint| constraint.check(value))
    }

    fn misconfigured(&self, message: impl fmt::Display) -> ProjectError {
        ProjectError::Schema {
            code: error_codes::SCHEMA_MISCONFIGURED.to_string(),
            message: format!("Field '{}': {}", self.name, message),
        }
    }

    fn check_declaration(&self) -> Result<(), ProjectError> {
        if let Some(constraint) = self
            .constraints
            .iter()
            .find(|constraint| !constraint.applies_to(self.kind))
        {
            return Err(self.misconfigured(format!(
                "constraint {:?} cannot apply to a {} field",
                constraint, self.kind
            )));
        }

        if self.kind == FieldKind::Enum {
            let has_tokens = self.constraints.iter().any(
                |constraint| matches!(constraint, Constraint::OneOf(tokens) if !tokens.is_empty()),
            );
            if !has_tokens {
                return Err(self.misconfigured("enumeration declares no tokens"));
            }
        }

        if let Some(default) = &self.default {
            if self.required {
                return Err(self.misconfigured("required field cannot declare a default"));
            }
            if default.is_null() || !default.matches_kind(self.kind) {
                return Err(self.misconfigured(format!(
                    "default {:?} is not a {}",
                    default, self.kind
                )));
            }
            if let Err(failure) = self.check_constraints(default) {
                return Err(self.misconfigured(format!(
                    "default {:?} violates its own constraints: {}",
                    default, failure
                )));
            }
        }

        Ok(())
    }
}

/// **SCHEMA BUILDER**
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldSpec>,
    strict: bool,
}

impl SchemaBuilder {
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Report raw keys that no field declares.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Checks every declaration. Misconfiguration surfaces here, never during `validate`.
    pub fn build(self) -> Result<Schema, ProjectError> {
        let mut seen = HashSet::new();
        for spec in &self.fields {
            if !seen.insert(spec.name.as_str()) {
                return Err(ProjectError::Schema {
                    code: error_codes::SCHEMA_DUPLICATE_FIELD.to_string(),
                    message: format!("Field '{}' declared more than once", spec.name),
                });
            }
            spec.check_declaration()?;
        }

        Ok(Schema {
            fields: self.fields,
            strict: self.strict,
        })
    }
}

/// **SCHEMA**
///
/// Ordered, immutable list of field declarations. Safe to share between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    strict: bool,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Same declarations with strict mode switched on or off.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validates `raw` against every declared field, in declaration order.
    ///
    /// Each field contributes at most one failure; unrelated fields keep being
    /// checked after one fails. `raw` carries no sources, so every field is
    /// looked up by name alone and undeclared keys are reported under `body`.
    pub fn check(&self, raw: &RawInput) -> Result<ValidatedInput, ValidationError> {
        self.check_with(
            |spec| raw.get(&spec.name),
            raw.iter().map(|(name, value)| (ParamLocation::Body, name, value)),
            |_, name| self.field(name).is_some(),
        )
    }

    /// Validates input whose sources are kept apart. Each field is read only
    /// from its declared location, and in strict mode a key is unexpected
    /// unless a field declares it at the location it arrived in.
    pub fn check_sourced(&self, input: &SourcedInput) -> Result<ValidatedInput, ValidationError> {
        self.check_with(
            |spec| input.get(spec.location, &spec.name),
            input.entries(),
            |location, name| self.field(name).is_some_and(|spec| spec.location == location),
        )
    }

    fn check_with<'r>(
        &self,
        lookup: impl Fn(&FieldSpec) -> Option<&'r JsonValue>,
        received: impl Iterator<Item = (ParamLocation, &'r str, &'r JsonValue)>,
        declared: impl Fn(ParamLocation, &str) -> bool,
    ) -> Result<ValidatedInput, ValidationError> {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut failures = Vec::new();

        for spec in &self.fields {
            let raw_value = lookup(spec);
            match spec.resolve(raw_value) {
                Ok(value) => values.push((spec.name.clone(), value)),
                Err(kind) => failures.push(FieldFailure::for_spec(spec, kind, raw_value)),
            }
        }

        if self.strict {
            for (location, name, value) in received {
                if declared(location, name) {
                    continue;
                }
                failures.push(FieldFailure {
                    field: name.to_string(),
                    location,
                    kind: FailureKind::UnexpectedField,
                    raw: Some(value.clone()),
                });
            }
        }

        match ValidationError::from_failures(failures) {
            Some(err) => {
                log::debug!("Schema rejected input: {}", err);
                Err(err)
            }
            None => Ok(ValidatedInput::new(values)),
        }
    }
}

impl<'a> Validator<&'a RawInput> for Schema {
    type Output = ValidatedInput;

    fn validate(&self, input: &'a RawInput) -> Result<Self::Output, ProjectError> {
        self.check(input).map_err(ProjectError::from)
    }
}

impl<'a> Validator<&'a SourcedInput> for Schema {
    type Output = ValidatedInput;

    fn validate(&self, input: &'a SourcedInput) -> Result<Self::Output, ProjectError> {
        self.check_sourced(input).map_err(ProjectError::from)
    }
}
