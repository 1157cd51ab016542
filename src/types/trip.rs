use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, TripMateError};

/// Phrase used in the prompt when the traveller leaves interests blank.
pub const DEFAULT_INTERESTS: &str = "General sightseeing, food, and culture.";

/// Date format used by the date pickers and inside the prompt.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw values as submitted by the form. Any field may be empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TripForm {
    /// Where the trip starts (e.g., "New York, USA")
    #[serde(default)]
    pub origin: String,
    /// Where the trip goes (e.g., "Paris, France")
    #[serde(default)]
    pub destination: String,
    /// First day of the trip, `YYYY-MM-DD`
    #[serde(default)]
    pub start_date: String,
    /// Last day of the trip, `YYYY-MM-DD`
    #[serde(default)]
    pub end_date: String,
    /// Free-form interests (e.g., "nature, history, food, hiking")
    #[serde(default)]
    pub interests: String,
}

impl TripForm {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        interests: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            interests: interests.into(),
        }
    }

    /// Names of the required fields that are empty, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("origin", &self.origin),
            ("destination", &self.destination),
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Validate the form and convert it into a typed request.
    ///
    /// Text fields are carried over exactly as submitted; trimming only
    /// decides emptiness and date parsing.
    pub fn to_request(&self) -> Result<TripRequest> {
        let fields = self.missing_fields();
        if !fields.is_empty() {
            return Err(TripMateError::MissingInput { fields });
        }

        Ok(TripRequest {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            start_date: parse_date("start_date", &self.start_date)?,
            end_date: parse_date("end_date", &self.end_date)?,
            interests: (!self.interests.trim().is_empty()).then(|| self.interests.clone()),
        })
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|err| {
        TripMateError::Validation(format!(
            "{} must be a date in YYYY-MM-DD format, got `{}`: {}",
            field,
            value.trim(),
            err
        ))
    })
}

/// A validated trip request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interests: Option<String>,
}

impl TripRequest {
    pub fn interests_or_default(&self) -> &str {
        match self.interests.as_deref() {
            Some(interests) if !interests.trim().is_empty() => interests,
            _ => DEFAULT_INTERESTS,
        }
    }

    /// Calendar days covered, inclusive. Zero when the dates are reversed.
    pub fn days(&self) -> i64 {
        let span = (self.end_date - self.start_date).num_days();
        if span < 0 {
            0
        } else {
            span + 1
        }
    }

    pub fn nights(&self) -> i64 {
        (self.days() - 1).max(0)
    }

    pub fn formatted_dates(&self) -> (String, String) {
        (
            self.start_date.format(DATE_FORMAT).to_string(),
            self.end_date.format(DATE_FORMAT).to_string(),
        )
    }
}

/// Markdown itinerary returned by the text-generation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    /// Service text, unmodified
    pub markdown: String,
    /// Model that produced the text
    pub model: String,
    /// Time spent waiting on the service
    pub duration: Duration,
}

impl TripPlan {
    pub fn new(markdown: String, model: impl Into<String>, duration: Duration) -> Self {
        Self {
            markdown,
            model: model.into(),
            duration,
        }
    }

    pub fn as_markdown(&self) -> &str {
        &self.markdown
    }

    pub fn into_markdown(self) -> String {
        self.markdown
    }
}
