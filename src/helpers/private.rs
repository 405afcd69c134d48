use std::collections::HashMap;

use url::{form_urlencoded, Url};

use crate::types::{OpenIdError, OpenIdReturnType};

pub(crate) fn validate_url(url: &str) -> OpenIdReturnType<Url> {
    Url::parse(url).map_err(|_| {
        OpenIdError::new_handshake_error("only valid absolute URLs can be requested", None)
    })
}

/// Appends an already encoded query to `base`, keeping any query `base` has.
pub(crate) fn append_query(base: &str, query: &str) -> String {
    if query.is_empty() {
        return base.to_string();
    }

    let separator = match base.find('?') {
        Some(i) if i + 1 == base.len() || base.ends_with('&') => "",
        Some(_) => "&",
        None => "?",
    };

    format!("{base}{separator}{query}")
}

pub(crate) fn form_url_encoded_to_string_map(string: &str) -> HashMap<String, String> {
    form_urlencoded::parse(string.as_bytes())
        .map(|(x, y)| (x.to_string(), y.to_string()))
        .collect()
}

pub(crate) fn query_to_string_map(url: &Url) -> HashMap<String, String> {
    url.query()
        .map(form_url_encoded_to_string_map)
        .unwrap_or_default()
}
