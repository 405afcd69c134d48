//! # Wire Codec
//! The two OpenID 2.0 wire formats:
//!
//! - key-value text (`key:value\n` lines) used for direct responses and as the signing input
//! - namespaced url query (`openid.` prefixed keys) used for indirect messages

use std::collections::HashMap;

use url::form_urlencoded;

use crate::types::{OpenIdError, OpenIdReturnType};

/// Prefix of every protocol field in an url query
pub const NAMESPACE_PREFIX: &str = "openid.";

/// Encodes `fields` as an url query. Each key gets the `openid.` prefix and
/// keys and values are form encoded. Output order follows input order.
pub fn encode_request_fields<I, K, V>(fields: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for (k, v) in fields {
        serializer.append_pair(&format!("{NAMESPACE_PREFIX}{}", k.as_ref()), v.as_ref());
    }

    serializer.finish()
}

/// Strips the `openid.` prefix from already url decoded query keys.
/// Keys without the prefix are dropped.
pub fn decode_response_fields(query: &HashMap<String, String>) -> HashMap<String, String> {
    query
        .iter()
        .filter_map(|(k, v)| {
            k.strip_prefix(NAMESPACE_PREFIX)
                .map(|name| (name.to_string(), v.to_string()))
        })
        .collect()
}

/// Decodes a key-value body.
///
/// Every line must be `key:value` with a non-empty key. The value is
/// everything after the first `:`. Lines may end with `\r\n`, the `\r` is
/// not part of the value. Blank lines before the first and after the last pair
/// are ignored, a blank line in between is an error. Repeated keys are
/// rejected.
pub fn decode_key_value_body(body: &[u8]) -> OpenIdReturnType<HashMap<String, String>> {
    let text = std::str::from_utf8(body)
        .map_err(|_| OpenIdError::new_malformed_body_error("body is not valid utf-8"))?;

    let mut values = HashMap::new();

    let text = text.trim_matches(&['\n', '\r'][..]);

    for (index, line) in text.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if index == 0 && line.is_empty() {
            // body contained only newlines
            continue;
        }

        let (key, value) = line.split_once(':').ok_or_else(|| {
            OpenIdError::new_malformed_body_error(&format!("line {} has no ':' separator", index + 1))
        })?;

        if key.is_empty() {
            return Err(OpenIdError::new_malformed_body_error(&format!(
                "line {} has an empty key",
                index + 1
            )));
        }

        if values.insert(key.to_string(), value.to_string()).is_some() {
            return Err(OpenIdError::new_malformed_body_error(&format!(
                "duplicate key {key}"
            )));
        }
    }

    Ok(values)
}

/// Encodes `key:value\n` for each pair, in the given order, with no separator
/// between lines. Missing values are encoded as empty strings by the caller.
pub fn encode_key_value<I, K, V>(fields: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut out = String::new();

    for (k, v) in fields {
        out.push_str(k.as_ref());
        out.push(':');
        out.push_str(v.as_ref());
        out.push('\n');
    }

    out
}
