use super::DomainRecord;
use crate::errors::ProjectError;
use crate::validation::{error_codes, FieldSpec, RawInput, Schema, ValidatedInput};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

/// An item offered for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub tax: Option<f64>,
}

/// Body schema for creating an item.
pub fn item_schema() -> Result<Schema, ProjectError> {
    Schema::builder()
        .field(FieldSpec::string("name").required().min_length(3).in_body())
        .field(FieldSpec::string("description").min_length(3).in_body())
        .field(FieldSpec::float("price").required().gt(0.0).in_body())
        .field(FieldSpec::float("tax").gt(0.0).in_body())
        .build()
}

impl Item {
    /// Validates `raw` with [`item_schema`] and builds the record.
    pub fn parse(raw: &RawInput) -> Result<Self, ProjectError> {
        let input = item_schema()?.check(raw)?;
        Self::from_validated(&input)
    }

    pub fn from_validated(input: &ValidatedInput) -> Result<Self, ProjectError> {
        Ok(Self {
            name: input
                .get_str("name")
                .ok_or_else(|| undeclared("name"))?
                .to_string(),
            description: input.get_str("description").map(str::to_string),
            price: input.get_f64("price").ok_or_else(|| undeclared("price"))?,
            tax: input.get_f64("tax"),
        })
    }

    /// Price including tax. Follows the truthiness rule of `compose`:
    /// a zero tax counts as no tax.
    pub fn total(&self) -> Option<f64> {
        self.tax.filter(|tax| *tax != 0.0).map(|tax| self.price + tax)
    }
}

fn undeclared(field: &str) -> ProjectError {
    ProjectError::Schema {
        code: error_codes::FIELD_NOT_DECLARED.to_string(),
        message: format!("Validated input carries no '{}' field", field),
    }
}

impl DomainRecord for Item {
    fn declared_fields(&self) -> Map<String, JsonValue> {
        let mut out = Map::new();
        out.insert("name".to_string(), json!(self.name));
        out.insert("description".to_string(), json!(self.description));
        out.insert("price".to_string(), json!(self.price));
        out.insert("tax".to_string(), json!(self.tax));
        out
    }

    /// `total` is added only when tax is truthy. A tax of exactly 0 is
    /// present but falsy, so it suppresses `total`; this is the observed
    /// behavior of the service and callers rely on it.
    fn derived_fields(&self) -> Vec<(&'static str, JsonValue)> {
        self.total()
            .map(|total| vec![("total", json!(total))])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::compose;
    use crate::validation::{FailureKind, Violation};

    fn item(price: f64, tax: Option<f64>) -> Item {
        Item {
            name: "Foo".to_string(),
            description: None,
            price,
            tax,
        }
    }

    #[test]
    fn test_compose_adds_total_with_tax() {
        let out = compose(&item(10.0, Some(2.0)));
        assert_eq!(out["total"], json!(12.0));
        assert_eq!(out["tax"], json!(2.0));
    }

    #[test]
    fn test_compose_without_tax_has_no_total() {
        let out = compose(&item(10.0, None));
        assert!(!out.contains_key("total"));
        assert_eq!(out["tax"], JsonValue::Null);
        assert_eq!(out["description"], JsonValue::Null);
    }

    #[test]
    fn test_compose_zero_tax_has_no_total() {
        let out = compose(&item(10.0, Some(0.0)));
        assert!(!out.contains_key("total"));
        assert_eq!(out["tax"], json!(0.0));
    }

    #[test]
    fn test_record_never_stores_total() {
        let record = item(10.0, Some(2.0));
        let serialized = serde_json::to_value(&record).unwrap();
        assert!(serialized.get("total").is_none());
    }

    #[test]
    fn test_parse_valid_item() {
        let raw = RawInput::new()
            .with("name", json!("Foo"))
            .with("description", json!("A thing"))
            .with("price", json!(35.4))
            .with("tax", json!(3.2));

        let parsed = Item::parse(&raw).unwrap();
        assert_eq!(parsed.name, "Foo");
        assert_eq!(parsed.description.as_deref(), Some("A thing"));
        assert_eq!(parsed.tax, Some(3.2));
    }

    #[test]
    fn test_parse_rejects_zero_price() {
        let raw = RawInput::new().with("name", json!("Foo")).with("price", json!(0));

        match Item::parse(&raw) {
            Err(ProjectError::Fields(err)) => {
                assert_eq!(err.len(), 1);
                assert_eq!(
                    err.failure_for("price").unwrap().kind,
                    FailureKind::ConstraintViolation(Violation::GreaterThan { bound: 0.0 })
                );
            }
            other => panic!("Expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_name_length_boundary() {
        let short = RawInput::new().with("name", json!("ab")).with("price", json!(1));
        assert!(Item::parse(&short).is_err());

        let exact = RawInput::new().with("name", json!("abc")).with("price", json!(1));
        assert!(Item::parse(&exact).is_ok());
    }

    #[test]
    fn test_parse_short_description_rejected() {
        let raw = RawInput::new()
            .with("name", json!("Foo"))
            .with("description", json!("no"))
            .with("price", json!(1));
        assert!(Item::parse(&raw).is_err());
    }

    #[test]
    fn test_from_validated_requires_declared_fields() {
        let schema = Schema::builder()
            .field(FieldSpec::string("title"))
            .build()
            .unwrap();
        let input = schema.check(&RawInput::new()).unwrap();

        assert!(matches!(
            Item::from_validated(&input),
            Err(ProjectError::Schema { .. })
        ));
    }
}
