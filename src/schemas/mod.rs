//! JSON schemas for request bodies accepted by the API

pub mod schema;
pub mod validation;

pub use schema::{trip_form_schema, SchemaHandle};
pub use validation::{parse_payload, validate_payload};
