use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::text_generator::{Provider, TextGenerator};
use crate::error::{Result, TripMateError};

/// Client for OpenAI-compatible chat completion endpoints (OpenAI, OpenRouter, local gateways)
#[derive(Clone)]
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    model: String,
    http: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TripMateError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: Provider::OpenAi.default_base_url().to_string(),
            model: Provider::OpenAi.default_model().to_string(),
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

    pub async fn chat_completion(&self, body: &Value) -> Result<Value> {
        let request_url = build_chat_url(&self.base_url);
        debug!(url = %request_url, "calling chat completions");

        let response = self
            .http
            .post(&request_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("X-Title", "trip-mate")
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
            let api_message = parsed
                .ok()
                .as_ref()
                .and_then(|body| body.get("error"))
                .and_then(|error| error.get("message"))
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or(response_text);

            return Err(TripMateError::Api {
                status: status.as_u16(),
                message: api_message,
            });
        }

        let response_json = parsed.map_err(|err| {
            TripMateError::InvalidResponse(format!("Failed to parse JSON: {err}"))
        })?;

        if let Some(error) = response_json.get("error") {
            let error_message = error
                .get("message")
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(TripMateError::Api {
                status: status.as_u16(),
                message: error_message,
            });
        }

        Ok(response_json)
    }
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl TextGenerator for OpenAIClient {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let body = ChatCompletionRequest::new(
            self.model.clone(),
            vec![json!({ "role": "user", "content": prompt })],
        )
        .into_value();

        let response = self.chat_completion(&body).await?;
        extract_message_content(&response)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn provider(&self) -> Provider {
        Provider::OpenAi
    }
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

pub(crate) fn extract_message_content(response: &Value) -> Result<String> {
    let content = response
        .get("choices")
        .and_then(|choices| choices.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .unwrap_or_default();

    if content.is_empty() {
        return Err(TripMateError::EmptyResponse(
            "completion contained no message content".to_string(),
        ));
    }

    Ok(content.to_string())
}

#[derive(Clone, Debug)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Value>) -> Self {
        Self {
            model: model.into(),
            messages,
        }
    }

    pub fn into_value(self) -> Value {
        json!({
            "model": self.model,
            "messages": self.messages,
        })
    }
}
