//! # DOMAIN RECORDS
//!
//! **PURPOSE**: Business entities built from validated input, and the
//! composition of their outbound representation.
//! **GUARANTEE**: Derived fields exist only in composed output, never on a record.

use serde_json::{Map, Value as JsonValue};

pub mod item;
pub mod model;
pub mod persisted;

pub use item::{item_schema, Item};
pub use model::{model_schema, ModelName};
pub use persisted::{
    item_create_schema, user_create_schema, ItemCreate, ItemRecord, Token, TokenData,
    UserCreate, UserRecord,
};

/// A validated entity that can be rendered for a response.
pub trait DomainRecord {
    /// Every declared field, verbatim. Absent optionals appear as `null`.
    fn declared_fields(&self) -> Map<String, JsonValue>;

    /// Fields computed from declared ones at composition time.
    fn derived_fields(&self) -> Vec<(&'static str, JsonValue)> {
        Vec::new()
    }
}

/// Builds the outbound mapping: declared fields first, then derived ones.
pub fn compose<R: DomainRecord + ?Sized>(record: &R) -> Map<String, JsonValue> {
    let mut out = record.declared_fields();
    for (name, value) in record.derived_fields() {
        out.insert(name.to_string(), value);
    }
    out
}
