pub use crate::handlers::{
    add_numbers, create_item, get_model, list_items, read_item, read_root, Handler,
};
pub use crate::records::{compose, DomainRecord, Item, ModelName};
pub use crate::request::RawRequest;
pub use crate::response::{serialize_response_body, HttpResponse};
pub use crate::validation::{
    validate, FieldSpec, ParamLocation, RawInput, Schema, SourcedInput, ValidatedInput,
    ValidationContext, ValidationError,
};
