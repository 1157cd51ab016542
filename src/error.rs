use thiserror::Error;

/// Text shown in the output region when a required field is left empty.
pub const MISSING_INPUT_MESSAGE: &str =
    "## Please fill in all required fields: From, To, Start Date, and End Date.";

/// Main error type for trip planning
#[derive(Error, Debug)]
pub enum TripMateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required fields: {}", fields.join(", "))]
    MissingInput { fields: Vec<&'static str> },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TripMateError>;

impl TripMateError {
    /// Map a reqwest failure onto the transport-level variants
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TripMateError::Timeout(err.to_string())
        } else {
            TripMateError::Request(err.to_string())
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            TripMateError::Config(_) => "CONFIG_ERROR",
            TripMateError::MissingInput { .. } => "MISSING_INPUT",
            TripMateError::Validation(_) => "VALIDATION_ERROR",
            TripMateError::Request(_) => "REQUEST_ERROR",
            TripMateError::Timeout(_) => "TIMEOUT_ERROR",
            TripMateError::Api { .. } => "API_ERROR",
            TripMateError::InvalidResponse(_) => "INVALID_RESPONSE",
            TripMateError::EmptyResponse(_) => "EMPTY_RESPONSE",
            TripMateError::Serialization(_) => "SERIALIZATION_ERROR",
            TripMateError::Template(_) => "TEMPLATE_ERROR",
        }
    }

    /// Text rendered in place of a plan
    pub fn user_message(&self) -> String {
        match self {
            TripMateError::MissingInput { .. } => MISSING_INPUT_MESSAGE.to_string(),
            other => format!("An error occurred: {}", other),
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string()
            }
        })
    }
}
