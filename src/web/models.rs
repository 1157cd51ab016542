use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::TripMateError, types::TripPlan};

use super::render::render_markdown;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Ok,
    MissingInput,
    Error,
}

/// Body returned by `POST /api/plan`
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanApiResponse {
    pub status: PlanStatus,
    /// Plan text, or the message shown in its place
    pub markdown: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl PlanApiResponse {
    pub fn from_plan(plan: TripPlan) -> Self {
        Self {
            status: PlanStatus::Ok,
            html: Some(render_markdown(&plan.markdown)),
            elapsed_ms: Some(plan.duration.as_millis() as u64),
            model: Some(plan.model),
            markdown: plan.markdown,
            error: None,
        }
    }

    pub fn from_error(err: &TripMateError) -> Self {
        let status = match err {
            TripMateError::MissingInput { .. } => PlanStatus::MissingInput,
            _ => PlanStatus::Error,
        };
        Self {
            status,
            markdown: err.user_message(),
            html: None,
            model: None,
            elapsed_ms: None,
            error: Some(err.to_error_payload()["error"].clone()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// HTTP status for a failed generation
pub fn status_for(err: &TripMateError) -> StatusCode {
    match err {
        TripMateError::MissingInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        TripMateError::Validation(_) => StatusCode::BAD_REQUEST,
        TripMateError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        TripMateError::Request(_)
        | TripMateError::Api { .. }
        | TripMateError::InvalidResponse(_)
        | TripMateError::EmptyResponse(_) => StatusCode::BAD_GATEWAY,
        TripMateError::Config(_)
        | TripMateError::Serialization(_)
        | TripMateError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
