//! # Signature
//! HMAC-SHA256 over the key-value encoding of the signed fields.

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::{
    codec::encode_key_value,
    types::{OpenIdError, OpenIdReturnType},
};

type HmacSha256 = Hmac<Sha256>;

/// Splits the `signed` field into field names, preserving order.
pub fn parse_signed_list(signed: &str) -> Vec<String> {
    signed.split(',').map(|s| s.to_string()).collect()
}

/// Builds the signing input: `name:value\n` for every name in `order`, with
/// the value taken from `fields` or empty when absent.
pub fn signing_input(fields: &HashMap<String, String>, order: &[String]) -> String {
    encode_key_value(order.iter().map(|name| {
        (
            name.as_str(),
            fields.get(name).map(|v| v.as_str()).unwrap_or(""),
        )
    }))
}

/// Computes the base64 encoded HMAC-SHA256 of the signing input with `secret`.
pub fn sign(
    fields: &HashMap<String, String>,
    order: &[String],
    secret: &[u8],
) -> OpenIdReturnType<String> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| OpenIdError::new_verification_error(&format!("invalid mac key: {e}")))?;

    mac.update(signing_input(fields, order).as_bytes());

    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Constant time comparison of two encoded signatures. Different lengths never match.
pub(crate) fn signatures_match(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}
