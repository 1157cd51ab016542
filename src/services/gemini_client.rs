use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::text_generator::{Provider, TextGenerator};
use crate::error::{Result, TripMateError};

#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TripMateError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: Provider::Gemini.default_base_url().to_string(),
            model: Provider::Gemini.default_model().to_string(),
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub async fn generate_content(&self, body: &Value) -> Result<Value> {
        let request_url = build_generate_url(&self.base_url, &self.model);
        debug!(url = %request_url, "calling generateContent");

        let response = self
            .http
            .post(&request_url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(TripMateError::from_transport)?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(TripMateError::from_transport)?;

        let parsed = serde_json::from_str::<Value>(&response_text);

        if !status.is_success() {
            let message = parsed
                .ok()
                .as_ref()
                .and_then(api_error_message)
                .unwrap_or(response_text);
            return Err(TripMateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response_json = parsed.map_err(|err| {
            TripMateError::InvalidResponse(format!("Failed to parse JSON: {err}"))
        })?;

        if let Some(message) = api_error_message(&response_json) {
            return Err(TripMateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response_json)
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest::new(prompt).into_value();
        let response = self.generate_content(&body).await?;
        extract_candidate_text(&response)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn provider(&self) -> Provider {
        Provider::Gemini
    }
}

fn build_generate_url(base_url: &str, model: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with(":generateContent") {
        trimmed.to_string()
    } else {
        let model = model.trim_start_matches("models/");
        format!("{}/models/{}:generateContent", trimmed, model)
    }
}

fn api_error_message(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    Some(
        error
            .get("message")
            .and_then(|value| value.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| error.to_string()),
    )
}

/// Join the text parts of the first candidate.
pub(crate) fn extract_candidate_text(response: &Value) -> Result<String> {
    let candidate = response
        .get("candidates")
        .and_then(|candidates| candidates.as_array())
        .and_then(|candidates| candidates.first());

    let Some(candidate) = candidate else {
        let reason = response
            .get("promptFeedback")
            .and_then(|feedback| feedback.get("blockReason"))
            .and_then(|reason| reason.as_str());
        return Err(TripMateError::EmptyResponse(match reason {
            Some(reason) => format!("prompt was blocked ({reason})"),
            None => "response contained no candidates".to_string(),
        }));
    };

    let text: String = candidate
        .get("content")
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|text| text.as_str()))
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        let finish_reason = candidate
            .get("finishReason")
            .and_then(|reason| reason.as_str())
            .unwrap_or("UNKNOWN");
        return Err(TripMateError::EmptyResponse(format!(
            "candidate contained no text (finish reason: {finish_reason})"
        )));
    }

    Ok(text)
}

/// Single-turn `generateContent` body; generation settings are left to the model defaults
#[derive(Clone, Debug)]
pub struct GenerateContentRequest {
    prompt: String,
}

impl GenerateContentRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    pub fn into_value(self) -> Value {
        json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": self.prompt }]
                }
            ]
        })
    }
}
