use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde_json::Value;
use tracing::error;

use super::{
    models::{status_for, ErrorResponse, HealthResponse, PlanApiResponse},
    page::{render_page, OutputView},
    AppState,
};
use crate::{
    error::TripMateError,
    schemas::{parse_payload, trip_form_schema},
    types::TripForm,
};

pub async fn index(State(state): State<AppState>) -> Response {
    page_response(&state, &TripForm::default(), None)
}

/// Form submit: generate, then re-render the page with the result in place
pub async fn submit_plan(State(state): State<AppState>, Form(form): Form<TripForm>) -> Response {
    let outcome = state.generator.generate(&form).await;
    let output = OutputView::from_outcome(&form, &outcome);
    page_response(&state, &form, Some(&output))
}

pub async fn api_plan(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            return api_error(&TripMateError::Validation(format!(
                "Request body must be a JSON object: {}",
                rejection.body_text()
            )))
        }
    };

    let form: TripForm = match parse_payload(trip_form_schema(), body) {
        Ok(form) => form,
        Err(err) => return api_error(&err),
    };

    match state.generator.generate(&form).await {
        Ok(plan) => (StatusCode::OK, Json(PlanApiResponse::from_plan(plan))).into_response(),
        Err(err) => api_error(&err),
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        provider: state.generator.provider().to_string(),
        model: state.generator.model().to_string(),
    })
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "route not found".to_string(),
        }),
    )
        .into_response()
}

fn api_error(err: &TripMateError) -> Response {
    (status_for(err), Json(PlanApiResponse::from_error(err))).into_response()
}

fn page_response(state: &AppState, form: &TripForm, output: Option<&OutputView>) -> Response {
    let provider = state.generator.provider().to_string();
    match render_page(form, output, &provider, state.generator.model()) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!(code = err.error_code(), "failed to render page: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}
