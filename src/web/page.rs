use minijinja::Environment;
use serde::Serialize;
use std::sync::OnceLock;

use super::render::render_markdown;
use crate::{
    error::{Result, TripMateError},
    types::{TripForm, TripPlan},
};

const INDEX_TEMPLATE: &str = "index.html";

static PAGES: OnceLock<Environment<'static>> = OnceLock::new();

fn environment() -> &'static Environment<'static> {
    PAGES.get_or_init(|| {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, include_str!("../../templates/index.html"))
            .unwrap_or_else(|err| panic!("failed to compile page template: {err}"));
        env
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Plan,
    MissingInput,
    Error,
}

/// Content of the output region
#[derive(Debug, Clone, Serialize)]
pub struct OutputView {
    pub kind: OutputKind,
    pub html: String,
    pub summary: Option<String>,
}

impl OutputView {
    pub fn from_outcome(form: &TripForm, outcome: &Result<TripPlan>) -> Self {
        match outcome {
            Ok(plan) => Self {
                kind: OutputKind::Plan,
                html: render_markdown(plan.as_markdown()),
                summary: trip_summary(form, plan),
            },
            Err(err @ TripMateError::MissingInput { .. }) => Self {
                kind: OutputKind::MissingInput,
                html: render_markdown(&err.user_message()),
                summary: None,
            },
            Err(err) => Self {
                kind: OutputKind::Error,
                html: render_markdown(&err.user_message()),
                summary: None,
            },
        }
    }
}

fn trip_summary(form: &TripForm, plan: &TripPlan) -> Option<String> {
    let request = form.to_request().ok()?;
    let days = request.days();
    let nights = request.nights();
    Some(format!(
        "{} to {} · {} day{} / {} night{} · generated in {:.1}s",
        request.origin.trim(),
        request.destination.trim(),
        days,
        if days == 1 { "" } else { "s" },
        nights,
        if nights == 1 { "" } else { "s" },
        plan.duration.as_secs_f64()
    ))
}

#[derive(Serialize)]
struct PageContext<'a> {
    form: &'a TripForm,
    output: Option<&'a OutputView>,
    model: &'a str,
    provider: &'a str,
}

/// Render the single page, optionally with a filled output region
pub fn render_page(
    form: &TripForm,
    output: Option<&OutputView>,
    provider: &str,
    model: &str,
) -> Result<String> {
    let ctx = PageContext {
        form,
        output,
        model,
        provider,
    };
    Ok(environment().get_template(INDEX_TEMPLATE)?.render(&ctx)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MISSING_INPUT_MESSAGE;
    use std::time::Duration;

    fn form() -> TripForm {
        TripForm::new("Lisbon", "Porto", "2025-09-10", "2025-09-12", "")
    }

    #[test]
    fn test_empty_page() {
        let html = render_page(&TripForm::default(), None, "gemini", "gemini-1.5-flash-latest")
            .unwrap();
        assert!(html.contains("TripMate AI"));
        assert!(html.contains(r#"name="origin""#));
        assert!(html.contains(r#"type="date" name="start_date""#));
        assert!(html.contains("Generate Trip Plan"));
        assert!(html.contains("gemini/gemini-1.5-flash-latest"));
    }

    #[test]
    fn test_form_values_are_escaped() {
        let mut form = form();
        form.interests = r#""><script>x</script>"#.to_string();
        let html = render_page(&form, None, "gemini", "m").unwrap();
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains(r#"value="Porto""#));
    }

    #[test]
    fn test_plan_output() {
        let plan = TripPlan::new("## Day 1\nPasteis".to_string(), "m", Duration::from_millis(1500));
        let view = OutputView::from_outcome(&form(), &Ok(plan));
        assert_eq!(view.kind, OutputKind::Plan);
        assert_eq!(
            view.summary.as_deref(),
            Some("Lisbon to Porto · 3 days / 2 nights · generated in 1.5s")
        );

        let html = render_page(&form(), Some(&view), "gemini", "m").unwrap();
        assert!(html.contains("<h2>Day 1</h2>"));
        assert!(html.contains(r#"class="plan""#));
    }

    #[test]
    fn test_summary_counts_nights() {
        let form = TripForm::new(" Lisbon ", "Porto", "2025-09-10", "2025-09-11", "");
        let plan = TripPlan::new("ok".to_string(), "m", Duration::from_millis(200));
        let view = OutputView::from_outcome(&form, &Ok(plan));
        assert_eq!(
            view.summary.as_deref(),
            Some("Lisbon to Porto · 2 days / 1 night · generated in 0.2s")
        );
    }

    #[test]
    fn test_missing_input_output() {
        let outcome = Err(TripMateError::MissingInput {
            fields: vec!["origin"],
        });
        let view = OutputView::from_outcome(&TripForm::default(), &outcome);
        assert_eq!(view.kind, OutputKind::MissingInput);
        assert_eq!(view.html, render_markdown(MISSING_INPUT_MESSAGE));
        assert!(view.html.contains("Please fill in all required fields"));
    }

    #[test]
    fn test_error_output() {
        let outcome = Err(TripMateError::Timeout("operation timed out".to_string()));
        let view = OutputView::from_outcome(&form(), &outcome);
        assert_eq!(view.kind, OutputKind::Error);
        assert!(view.html.contains("An error occurred: "));
    }
}
