use jsonschema::{Draft, JSONSchema};
use schemars::{schema_for, JsonSchema};
use serde_json::Value;
use std::{any::type_name, fmt, sync::OnceLock};

use crate::error::{Result, TripMateError};
use crate::types::TripForm;

/// JSON schema generated for a request type, compiled once for validation.
pub struct SchemaHandle {
    schema_name: &'static str,
    type_name: &'static str,
    schema_json: Value,
    compiled: std::result::Result<JSONSchema, String>,
}

impl SchemaHandle {
    pub fn for_type<T: JsonSchema>(schema_name: &'static str) -> Self {
        let root = schema_for!(T);
        let schema_json = serde_json::to_value(root).unwrap_or_else(|err| {
            panic!("failed to serialize schema for {}: {}", type_name::<T>(), err)
        });
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_json)
            .map_err(|err| err.to_string());

        Self {
            schema_name,
            type_name: type_name::<T>(),
            schema_json,
            compiled,
        }
    }

    /// Compiled validator, or the reason the schema could not be compiled
    pub fn validator(&self) -> Result<&JSONSchema> {
        self.compiled.as_ref().map_err(|err| {
            TripMateError::Validation(format!(
                "Failed to prepare `{}` schema for validation: {}",
                self.schema_name, err
            ))
        })
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn schema_json(&self) -> &Value {
        &self.schema_json
    }
}

impl fmt::Debug for SchemaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaHandle")
            .field("schema_name", &self.schema_name)
            .field("type_name", &self.type_name)
            .field("compiled", &self.compiled.is_ok())
            .finish()
    }
}

static TRIP_FORM_SCHEMA: OnceLock<SchemaHandle> = OnceLock::new();

/// Schema accepted by the JSON plan endpoint
pub fn trip_form_schema() -> &'static SchemaHandle {
    TRIP_FORM_SCHEMA.get_or_init(|| SchemaHandle::for_type::<TripForm>("trip_form"))
}
