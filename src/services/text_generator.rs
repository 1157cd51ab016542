use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::{Result, TripMateError};

/// Wire protocol spoken by the text-generation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    OpenAi,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-1.5-flash-latest",
            Provider::OpenAi => "gpt-4o-mini",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Provider::OpenAi => "https://api.openai.com/v1",
        }
    }

    /// Environment variables checked for the API key, in order
    pub fn api_key_vars(&self) -> &'static [&'static str] {
        match self {
            Provider::Gemini => &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
            Provider::OpenAi => &["OPENAI_API_KEY"],
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = TripMateError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Provider::Gemini),
            "openai" | "openrouter" => Ok(Provider::OpenAi),
            other => Err(TripMateError::Config(format!(
                "unknown provider `{}` (expected `gemini` or `openai`)",
                other
            ))),
        }
    }
}

/// A service that turns a prompt into generated text.
///
/// Implementations perform exactly one outbound request per call and never
/// retry; every failure comes back as a [`TripMateError`].
#[async_trait]
pub trait TextGenerator: Send + Sync + fmt::Debug {
    async fn generate_text(&self, prompt: &str) -> Result<String>;

    fn model(&self) -> &str;

    fn provider(&self) -> Provider;
}
