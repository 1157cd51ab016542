//! Text-generation backends

pub mod gemini_client;
pub mod openai_client;
pub mod text_generator;

pub use gemini_client::{GeminiClient, GenerateContentRequest};
pub use openai_client::{ChatCompletionRequest, OpenAIClient};
pub use text_generator::{Provider, TextGenerator};
