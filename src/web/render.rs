//! Markdown to HTML for the output region.
//!
//! Model output is rendered as-is except that raw HTML is shown as text and
//! links with a scheme other than http, https or mailto point nowhere.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use url::Url;

use crate::core::maps;

pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = Parser::new_ext(markdown, options).map(sanitize_event);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            dest_url, title, ..
        }) if maps::is_search_url(&dest_url) => {
            Event::Html(CowStr::from(map_link_open_tag(&dest_url, &title)))
        }
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        other => other,
    }
}

/// Opening `<a>` for a maps search link; opens in a new tab.
fn map_link_open_tag(url: &str, title: &str) -> String {
    // Url serialisation percent-encodes quotes and angle brackets
    let href = Url::parse(url)
        .map(|parsed| parsed.to_string())
        .unwrap_or_else(|_| "#".to_string())
        .replace('&', "&amp;");
    let title = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_attribute(title))
    };
    format!(
        r#"<a href="{}"{} class="map-link" target="_blank" rel="noopener noreferrer">"#,
        href, title
    )
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}

pub(crate) fn is_safe_url(url: &str) -> bool {
    let url = url.trim();
    match url.split_once(':') {
        Some((scheme, _)) if !scheme.contains(['/', '?', '#']) => matches!(
            scheme.to_ascii_lowercase().as_str(),
            "http" | "https" | "mailto"
        ),
        _ => true,
    }
}
