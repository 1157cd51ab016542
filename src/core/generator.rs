use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::{debug, error, info, warn};

use super::prompt::build_trip_prompt;
use crate::{
    config::AppConfig,
    error::Result,
    services::{GeminiClient, OpenAIClient, Provider, TextGenerator},
    types::{TripForm, TripPlan, TripRequest},
};

/// Turns trip details into a Markdown itinerary.
///
/// Stateless apart from the backend handle, so one instance is shared by
/// every request.
#[derive(Debug, Clone)]
pub struct PlanGenerator {
    backend: Arc<dyn TextGenerator>,
}

impl PlanGenerator {
    pub fn new(backend: Arc<dyn TextGenerator>) -> Self {
        Self { backend }
    }

    /// Build the backend selected by `config`
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let backend: Arc<dyn TextGenerator> = match config.provider() {
            Provider::Gemini => Arc::new(
                GeminiClient::new(config.api_key(), config.timeout())?
                    .with_base_url(config.base_url())
                    .with_model(config.model()),
            ),
            Provider::OpenAi => Arc::new(
                OpenAIClient::new(config.api_key(), config.timeout())?
                    .with_base_url(config.base_url())
                    .with_model(config.model()),
            ),
        };
        Ok(Self::new(backend))
    }

    pub fn model(&self) -> &str {
        self.backend.model()
    }

    pub fn provider(&self) -> Provider {
        self.backend.provider()
    }

    /// Validate the submitted form and generate a plan.
    ///
    /// Missing required fields return [`MissingInput`](crate::error::TripMateError::MissingInput) without
    /// contacting the service.
    pub async fn generate(&self, form: &TripForm) -> Result<TripPlan> {
        let request = form.to_request().inspect_err(|err| {
            warn!(code = err.error_code(), "rejected trip form: {}", err);
        })?;
        self.generate_plan(&request).await
    }

    /// Generate a plan for an already validated request. One service call.
    pub async fn generate_plan(&self, request: &TripRequest) -> Result<TripPlan> {
        info!(
            origin = %request.origin,
            destination = %request.destination,
            days = request.days(),
            nights = request.nights(),
            model = self.model(),
            "generating trip plan"
        );

        let prompt = build_trip_prompt(request);
        debug!(prompt_len = prompt.len(), "prompt built");

        let started = Instant::now();
        match self.backend.generate_text(&prompt).await {
            Ok(markdown) => {
                let duration = started.elapsed();
                info!(
                    chars = markdown.len(),
                    elapsed_ms = elapsed_ms(duration),
                    "trip plan generated"
                );
                Ok(TripPlan::new(markdown, self.model(), duration))
            }
            Err(err) => {
                error!(
                    code = err.error_code(),
                    elapsed_ms = elapsed_ms(started.elapsed()),
                    "trip plan generation failed: {}",
                    err
                );
                Err(err)
            }
        }
    }

    /// Plan markdown, the fill-in-all-fields message, or `An error occurred: ...`
    pub async fn generate_text(&self, form: &TripForm) -> String {
        plan_text(self.generate(form).await)
    }
}

/// Render a generation outcome as the text shown in the output region
pub fn plan_text(outcome: Result<TripPlan>) -> String {
    match outcome {
        Ok(plan) => plan.into_markdown(),
        Err(err) => err.user_message(),
    }
}

fn elapsed_ms(duration: Duration) -> u64 {
    duration.as_millis() as u64
}
