use std::collections::HashMap;

use tracing::{debug, warn};
use url::Url;

use crate::{
    codec::{decode_key_value_body, decode_response_fields, encode_request_fields},
    helpers::{append_query, query_to_string_map, validate_url},
    http::request_async,
    signature::{parse_signed_list, sign, signatures_match},
    types::{
        Association, AssociationType, Claims, HttpRequest, OpenIdError, OpenIdHttpClient,
        OpenIdReturnType,
    },
};

use super::{
    consumer::{IDENTIFIER_SELECT, NAMESPACE, NS_SREG},
    helpers::association_from_response,
    Consumer,
};

impl<H: OpenIdHttpClient> Consumer<H> {
    /// # Associate
    /// Returns the live association for `endpoint`, performing the handshake
    /// when the cache has none.
    ///
    /// The handshake is a direct GET to `endpoint` with `openid.mode=associate`
    /// and `openid.assoc_type=hmac-sha256`, bounded by
    /// [crate::types::ConsumerOptions::handshake_timeout]. The response must be
    /// a 2xx key-value body with `assoc_handle`, `mac_key`, `assoc_type` and
    /// `expires_in`. Nothing is stored unless all of them are valid.
    ///
    /// Concurrent calls for the same endpoint may each perform a handshake,
    /// the last one stored wins. No retry is attempted.
    pub async fn associate_async(&self, endpoint: &str) -> OpenIdReturnType<Association> {
        if let Some(association) = self.store.get(endpoint) {
            debug!(endpoint, handle = association.handle(), "association cache hit");
            return Ok(association);
        }

        debug!(endpoint, "association cache miss, starting handshake");

        match self.handshake_async(endpoint).await {
            Ok(association) => {
                debug!(
                    endpoint,
                    handle = association.handle(),
                    expires_at = association.expires_at(),
                    "association established"
                );
                self.store.put(endpoint, association.clone());
                Ok(association)
            }
            Err(e) => {
                warn!(endpoint, error = %e, "association handshake failed");
                Err(e)
            }
        }
    }

    async fn handshake_async(&self, endpoint: &str) -> OpenIdReturnType<Association> {
        let assoc_type = AssociationType::HmacSha256;

        let query = encode_request_fields([
            ("mode", "associate"),
            ("assoc_type", assoc_type.as_str()),
        ]);

        let url = validate_url(&append_query(endpoint, &query))?;

        let req = HttpRequest::new(url).timeout(self.options.handshake_timeout);

        let res = request_async(req, &self.http_client).await?;

        let body = res.body.as_deref().unwrap_or_default();

        // the body may hold a mac_key, keep it out of the error
        let values = decode_key_value_body(body.as_bytes()).map_err(|e| {
            OpenIdError::new_handshake_error(
                &format!("invalid handshake response: {}", e.message()),
                None,
            )
        })?;

        association_from_response(endpoint, assoc_type, &values, self.store.now())
    }

    /// # Build Auth URL
    /// Builds the `checkid_setup` url the end user has to be redirected to.
    ///
    /// Associates with `endpoint` first (using the cache when possible).
    /// Performs no other I/O, issuing the redirect is up to the caller.
    pub async fn build_auth_url_async(
        &self,
        endpoint: &str,
        return_to: &str,
    ) -> OpenIdReturnType<String> {
        let association = self.associate_async(endpoint).await?;

        let sreg_required = self.options.sreg_required.join(",");
        let sreg_optional = self.options.sreg_optional.join(",");

        let mut fields: Vec<(&str, &str)> = vec![
            ("mode", "checkid_setup"),
            ("ns", NAMESPACE),
            ("assoc_handle", association.handle()),
            ("return_to", return_to),
            ("claimed_id", IDENTIFIER_SELECT),
            ("identity", IDENTIFIER_SELECT),
            ("ns.sreg", NS_SREG),
            ("sreg.required", sreg_required.as_str()),
        ];

        if !sreg_optional.is_empty() {
            fields.push(("sreg.optional", sreg_optional.as_str()));
        }

        if let Some(realm) = &self.options.realm {
            fields.push(("realm", realm.as_str()));
        }

        Ok(append_query(endpoint, &encode_request_fields(fields)))
    }

    /// # Verify
    /// Verifies the provider's callback.
    ///
    /// `callback_query` is the url decoded query of the callback, keys still
    /// carrying the `openid.` prefix. Fields outside `signed` are returned in
    /// the [Claims] but are not authenticated.
    pub fn verify(&self, callback_query: &HashMap<String, String>) -> OpenIdReturnType<Claims> {
        let result = self.verify_fields(callback_query);

        if let Err(e) = &result {
            warn!(
                kind = %e.kind(),
                op_endpoint = callback_query.get("openid.op_endpoint").map(|s| s.as_str()),
                "callback rejected"
            );
        }

        result
    }

    /// Same as [Consumer::verify], reading the query of the callback url
    pub fn verify_callback_url(&self, callback_url: &Url) -> OpenIdReturnType<Claims> {
        self.verify(&query_to_string_map(callback_url))
    }

    fn verify_fields(&self, callback_query: &HashMap<String, String>) -> OpenIdReturnType<Claims> {
        let fields = decode_response_fields(callback_query);

        let op_endpoint = required_callback_field(&fields, "op_endpoint")?;
        let signed = required_callback_field(&fields, "signed")?;
        let sig = required_callback_field(&fields, "sig")?;

        let association = self.store.get(op_endpoint).ok_or_else(|| {
            OpenIdError::new_unknown_association_error(&format!(
                "no association found for {op_endpoint}"
            ))
        })?;

        let signed = parse_signed_list(signed);

        let expected = sign(&fields, &signed, association.secret())?;

        if !signatures_match(&expected, sig) {
            return Err(OpenIdError::new_verification_error(&format!(
                "signature mismatch for {op_endpoint}"
            )));
        }

        debug!(op_endpoint, handle = association.handle(), "callback verified");

        Ok(Claims::new(fields, signed))
    }
}

fn required_callback_field<'a>(
    fields: &'a HashMap<String, String>,
    name: &str,
) -> OpenIdReturnType<&'a str> {
    fields.get(name).map(|v| v.as_str()).ok_or_else(|| {
        OpenIdError::new_malformed_callback_error(&format!("openid.{name} is missing"))
    })
}
