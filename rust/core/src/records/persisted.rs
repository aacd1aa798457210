//! Shapes of the `users` and `items` tables as they cross the API boundary.
//!
//! Storage itself lives elsewhere; these types only describe what a
//! persistence layer accepts and returns. Text columns are 50 characters wide.

use super::DomainRecord;
use crate::errors::ProjectError;
use crate::validation::{FieldSpec, RawInput, Schema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

pub const COLUMN_WIDTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCreate {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
    pub hashed_password: String,
}

/// Opaque bearer credential. Its contents are never inspected here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

impl Token {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    pub email: Option<String>,
}

pub fn item_create_schema() -> Result<Schema, ProjectError> {
    Schema::builder()
        .field(FieldSpec::string("title").required().max_length(COLUMN_WIDTH).in_body())
        .field(FieldSpec::string("description").max_length(COLUMN_WIDTH).in_body())
        .build()
}

pub fn user_create_schema() -> Result<Schema, ProjectError> {
    Schema::builder()
        .field(FieldSpec::string("email").required().max_length(COLUMN_WIDTH).in_body())
        .field(FieldSpec::string("password").required().in_body())
        .build()
}

impl ItemCreate {
    pub fn parse(raw: &RawInput) -> Result<Self, ProjectError> {
        let input = item_create_schema()?.check(raw)?;
        Ok(Self {
            title: input.get_str("title").unwrap_or_default().to_string(),
            description: input.get_str("description").map(str::to_string),
        })
    }
}

impl UserCreate {
    pub fn parse(raw: &RawInput) -> Result<Self, ProjectError> {
        let input = user_create_schema()?.check(raw)?;
        Ok(Self {
            email: input.get_str("email").unwrap_or_default().to_string(),
            password: input.get_str("password").unwrap_or_default().to_string(),
        })
    }
}

fn to_map<T: Serialize>(value: &T) -> Map<String, JsonValue> {
    match serde_json::to_value(value) {
        Ok(JsonValue::Object(map)) => map,
        _ => Map::new(),
    }
}

impl DomainRecord for ItemRecord {
    fn declared_fields(&self) -> Map<String, JsonValue> {
        to_map(self)
    }
}

impl DomainRecord for UserRecord {
    fn declared_fields(&self) -> Map<String, JsonValue> {
        to_map(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::compose;
    use crate::validation::{FailureKind, Violation};
    use serde_json::json;

    #[test]
    fn test_item_create_title_width() {
        let ok = RawInput::new().with("title", json!("Lamp"));
        assert_eq!(
            ItemCreate::parse(&ok).unwrap(),
            ItemCreate {
                title: "Lamp".to_string(),
                description: None
            }
        );

        let wide = RawInput::new().with("title", json!("x".repeat(51)));
        match ItemCreate::parse(&wide) {
            Err(ProjectError::Fields(err)) => assert_eq!(
                err.failure_for("title").unwrap().kind,
                FailureKind::ConstraintViolation(Violation::MaxLength {
                    max: 50,
                    actual: 51
                })
            ),
            other => panic!("Expected width violation, got {:?}", other),
        }
    }

    #[test]
    fn test_user_create_requires_email_and_password() {
        match UserCreate::parse(&RawInput::new()) {
            Err(ProjectError::Fields(err)) => {
                assert_eq!(err.fields().collect::<Vec<_>>(), vec!["email", "password"]);
            }
            other => panic!("Expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn test_user_record_composes_nested_items() {
        let user = UserRecord {
            id: 1,
            email: "a@example.com".to_string(),
            is_active: true,
            items: vec![ItemRecord {
                id: 7,
                title: "Lamp".to_string(),
                description: None,
                owner_id: 1,
            }],
            hashed_password: "x".to_string(),
        };

        let out = compose(&user);
        assert_eq!(out["items"][0]["owner_id"], 1);
        assert_eq!(out["is_active"], true);
    }

    #[test]
    fn test_user_record_items_default_empty() {
        let user: UserRecord = serde_json::from_value(json!({
            "id": 2,
            "email": "b@example.com",
            "is_active": false,
            "hashed_password": "h"
        }))
        .unwrap();
        assert!(user.items.is_empty());
    }

    #[test]
    fn test_bearer_token() {
        let token = Token::bearer("abc");
        assert_eq!(
            serde_json::to_value(&token).unwrap(),
            json!({"access_token": "abc", "token_type": "bearer"})
        );
        assert_eq!(TokenData::default().email, None);
    }
}
