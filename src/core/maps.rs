//! Google Maps search links in the form the itinerary prompt asks for.

use url::{form_urlencoded, Url};

pub const SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Form-urlencode a place name, joining words with `+`
pub fn search_query(name: &str) -> String {
    form_urlencoded::byte_serialize(name.trim().as_bytes()).collect()
}

pub fn search_url(name: &str) -> String {
    format!("{}{}", SEARCH_BASE, search_query(name))
}

/// Markdown link `[name](search url)`
pub fn link(name: &str) -> String {
    format!("[{}]({})", name.trim(), search_url(name))
}

/// Whether `url` is a maps search link with a non-empty query
pub fn is_search_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    if parsed.scheme() != "https"
        || parsed.host_str() != Some("www.google.com")
        || parsed.path() != "/maps/search/"
    {
        return false;
    }

    let mut api = false;
    let mut query = false;
    for (key, value) in parsed.query_pairs() {
        match key.as_ref() {
            "api" => api = value == "1",
            "query" => query = !value.trim().is_empty(),
            _ => {}
        }
    }
    api && query
}
