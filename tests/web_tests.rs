use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::{body::Body, Router};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use trip_mate::{
    router, AppState, PlanGenerator, Provider, Result, TextGenerator, TripMateError,
};

#[derive(Debug)]
struct CannedBackend {
    reply: Option<String>,
    calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for CannedBackend {
    async fn generate_text(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().ok_or_else(|| TripMateError::Api {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        })
    }

    fn model(&self) -> &str {
        "canned-model"
    }

    fn provider(&self) -> Provider {
        Provider::Gemini
    }
}

fn test_app(reply: Option<&str>) -> (Router, Arc<CannedBackend>) {
    let backend = Arc::new(CannedBackend {
        reply: reply.map(str::to_string),
        calls: AtomicUsize::new(0),
    });
    let app = router(AppState::new(PlanGenerator::new(backend.clone())));
    (app, backend)
}

fn form_request(body: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri("/plan")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request(body: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri("/api/plan")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

const PARIS_FORM: &str = "origin=New+York%2C+USA&destination=Paris%2C+France&start_date=2025-06-01&end_date=2025-06-03&interests=";

#[tokio::test]
async fn test_index_serves_the_form() {
    let (app, _) = test_app(Some("unused"));
    let response = app
        .oneshot(
            axum::http::Request::builder()
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let html = body_string(response).await;
    assert!(html.contains(r#"<form id="trip-form" method="post" action="/plan">"#));
    assert!(html.contains("placeholder=\"e.g., Paris, France\""));
    assert!(html.contains("Your AI-Generated Itinerary"));
}

#[tokio::test]
async fn test_submit_renders_plan_markdown() {
    let (app, backend) = test_app(Some(
        "# Paris\n\n- **[Louvre Museum](https://www.google.com/maps/search/?api=1&query=Louvre+Museum)**",
    ));

    let response = app.oneshot(form_request(PARIS_FORM)).await.unwrap();

    assert_eq!(response.status(), 200);
    let html = body_string(response).await;
    assert!(html.contains("<h1>Paris</h1>"));
    assert!(html.contains("class=\"map-link\""));
    assert!(html.contains(r#"value="Paris, France""#));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_submit_with_missing_field_shows_message() {
    let (app, backend) = test_app(Some("unused"));

    let response = app
        .oneshot(form_request(
            "origin=New+York&destination=&start_date=2025-06-01&end_date=2025-06-03&interests=",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let html = body_string(response).await;
    assert!(html.contains("Please fill in all required fields: From, To, Start Date, and End Date."));
    assert!(html.contains(r#"class="missing_input""#));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_submit_shows_service_error_inline() {
    let (app, _) = test_app(None);

    let response = app.oneshot(form_request(PARIS_FORM)).await.unwrap();

    assert_eq!(response.status(), 200);
    let html = body_string(response).await;
    assert!(html.contains("An error occurred: API error (HTTP 429): Resource has been exhausted"));
    assert!(html.contains(r#"class="error""#));
}

#[tokio::test]
async fn test_api_plan_success() {
    let (app, _) = test_app(Some("## Day 1"));

    let response = app
        .oneshot(json_request(
            r#"{"origin":"Rome","destination":"Florence","start_date":"2025-04-01","end_date":"2025-04-02","interests":"art"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["markdown"], "## Day 1");
    assert_eq!(body["html"], "<h2>Day 1</h2>\n");
    assert_eq!(body["model"], "canned-model");
}

#[tokio::test]
async fn test_api_plan_missing_input() {
    let (app, backend) = test_app(Some("unused"));

    let response = app
        .oneshot(json_request(r#"{"origin":"Rome","destination":"Florence"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "missing_input");
    assert_eq!(body["markdown"], trip_mate::MISSING_INPUT_MESSAGE);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_api_plan_rejects_bad_schema() {
    let (app, backend) = test_app(Some("unused"));

    let response = app
        .oneshot(json_request(r#"{"origin":7,"destination":"Florence"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_api_plan_malformed_json_gets_structured_error() {
    let (app, backend) = test_app(Some("unused"));

    let response = app
        .clone()
        .oneshot(json_request(r#"{"origin":"Rome","#))
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/api/plan")
                .header("content-type", "text/plain")
                .body(Body::from(r#"{"origin":"Rome"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_api_plan_service_failure() {
    let (app, _) = test_app(None);

    let response = app
        .oneshot(json_request(
            r#"{"origin":"Rome","destination":"Florence","start_date":"2025-04-01","end_date":"2025-04-02"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], "API_ERROR");
}

#[tokio::test]
async fn test_health_and_fallback() {
    let (app, _) = test_app(Some("unused"));

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["model"], "canned-model");
    assert_eq!(body["provider"], "gemini");

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .uri("/itineraries")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}
