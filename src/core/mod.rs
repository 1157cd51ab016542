pub mod generator;
pub mod maps;
pub mod prompt;

pub use generator::{plan_text, PlanGenerator};
pub use prompt::build_trip_prompt;
