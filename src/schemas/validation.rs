use serde::de::DeserializeOwned;
use serde_json::Value;

use super::schema::SchemaHandle;
use crate::error::{Result, TripMateError};

const MAX_SCHEMA_ERRORS: usize = 3;

/// Check `payload` against the handle's compiled schema.
///
/// At most three problems are reported, each prefixed with the JSON pointer
/// of the offending value.
pub fn validate_payload(schema: &SchemaHandle, payload: &Value) -> Result<()> {
    let Err(errors) = schema.validator()?.validate(payload) else {
        return Ok(());
    };

    let mut problems: Vec<String> = errors
        .take(MAX_SCHEMA_ERRORS + 1)
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let pointer = if pointer.is_empty() { "<root>".to_string() } else { pointer };
            format!("{pointer}: {error}")
        })
        .collect();

    if problems.len() > MAX_SCHEMA_ERRORS {
        problems.truncate(MAX_SCHEMA_ERRORS);
        problems.push("additional errors truncated".to_string());
    }
    if problems.is_empty() {
        problems.push("payload failed schema validation".to_string());
    }

    Err(TripMateError::Validation(format!(
        "Request does not match `{}` schema: {}",
        schema.schema_name(),
        problems.join("; ")
    )))
}

/// Validate against `schema`, then deserialize with path-aware errors
pub fn parse_payload<T: DeserializeOwned>(schema: &SchemaHandle, payload: Value) -> Result<T> {
    validate_payload(schema, &payload)?;

    serde_path_to_error::deserialize(payload).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        TripMateError::Validation(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.into_inner()
        ))
    })
}
