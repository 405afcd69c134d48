use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::types::{Association, AssociationType, OpenIdError, OpenIdReturnType};

/// Builds an [Association] from a decoded handshake response.
pub(crate) fn association_from_response(
    endpoint: &str,
    requested: AssociationType,
    values: &HashMap<String, String>,
    now: i64,
) -> OpenIdReturnType<Association> {
    let handle = required(values, "assoc_handle")?;

    let secret = STANDARD
        .decode(required(values, "mac_key")?)
        .map_err(|_| handshake_error("mac_key is not valid base64"))?;

    let assoc_type = required(values, "assoc_type")?
        .parse::<AssociationType>()
        .map_err(|e| handshake_error(&e))?;

    if assoc_type != requested {
        return Err(handshake_error(&format!(
            "requested {requested}, provider answered {assoc_type}"
        )));
    }

    let expires_in = required(values, "expires_in")?
        .parse::<u32>()
        .map_err(|_| handshake_error("expires_in is not a non negative integer"))?;

    Ok(Association::new(
        endpoint,
        handle,
        secret,
        assoc_type,
        now.saturating_add(i64::from(expires_in)),
    ))
}

fn required<'a>(values: &'a HashMap<String, String>, name: &str) -> OpenIdReturnType<&'a str> {
    match values.get(name) {
        Some(v) if !v.is_empty() => Ok(v.as_str()),
        _ => Err(handshake_error(&format!("{name} is missing in the response"))),
    }
}

#[inline]
fn handshake_error(message: &str) -> OpenIdError {
    OpenIdError::new_handshake_error(message, None)
}
