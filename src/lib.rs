//! trip-mate: a single-form travel planner backed by an LLM
//!
//! The form collects origin, destination, a date range and optional interests,
//! turns them into a fixed itinerary prompt, sends that prompt to a
//! text-generation service (Gemini by default) and renders the returned
//! Markdown back on the page.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_mate::{AppConfig, PlanGenerator, TripForm};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let generator = PlanGenerator::from_config(&config)?;
//!
//!     let form = TripForm::new("New York, USA", "Paris, France", "2025-06-01", "2025-06-03", "");
//!     println!("{}", generator.generate_text(&form).await);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub mod services;
pub mod types;
pub mod web;

pub use config::{AppConfig, ConfigOverrides};
pub use crate::core::{build_trip_prompt, maps, plan_text, PlanGenerator};
pub use error::{Result, TripMateError, MISSING_INPUT_MESSAGE};
pub use services::{GeminiClient, OpenAIClient, Provider, TextGenerator};
pub use types::{TripForm, TripPlan, TripRequest, DEFAULT_INTERESTS};
pub use web::{router, AppState};

#[cfg(feature = "cli")]
pub mod cli;
