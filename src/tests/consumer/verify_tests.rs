use std::collections::HashMap;

use url::Url;

use crate::{
    tests::{
        helpers::{
            associated_consumer, consumer, default_callback_fields, signed_callback,
            DEFAULT_SIGNED, NOW, OP_ENDPOINT, SECRET,
        },
        test_http_client::TestHttpClient,
    },
    types::{Association, AssociationType, ErrorKind},
};

fn valid_callback() -> HashMap<String, String> {
    signed_callback(&default_callback_fields(), DEFAULT_SIGNED)
}

#[test]
fn accepts_a_valid_signed_callback() {
    let consumer = associated_consumer();

    let claims = consumer.verify(&valid_callback()).unwrap();

    assert_eq!(Some(OP_ENDPOINT), claims.op_endpoint());
    assert_eq!(Some("https://op.example/id/alice"), claims.claimed_id());
    assert_eq!(Some("https://op.example/id/alice"), claims.identity());
    assert_eq!(Some("alice"), claims.nickname());
    assert_eq!(Some("alice@example.com"), claims.email());
    assert_eq!(Some("Alice Example"), claims.fullname());
    assert_eq!(Some("id_res"), claims.get("mode"));
    assert_eq!(DEFAULT_SIGNED, claims.signed());
}

#[test]
fn returns_every_decoded_field() {
    let consumer = associated_consumer();
    let mut callback = valid_callback();
    callback.insert("state".to_string(), "not-openid".to_string());

    let fields = consumer.verify(&callback).unwrap().into_fields();

    // prefixless keys are dropped, `signed` and `sig` are kept
    assert_eq!(default_callback_fields().len() + 2, fields.len());
    assert!(fields.contains_key("sig"));
    assert!(!fields.contains_key("state"));
}

#[test]
fn unsigned_fields_are_not_authenticated() {
    let consumer = associated_consumer();
    let mut callback = valid_callback();
    callback.insert(
        "openid.sreg.country".to_string(),
        "unsigned-value".to_string(),
    );

    let claims = consumer.verify(&callback).unwrap();

    assert_eq!(Some("unsigned-value"), claims.get("sreg.country"));
    assert_eq!(None, claims.signed_value("sreg.country"));
    assert!(!claims.is_signed("mode"));
    assert_eq!(None, claims.signed_value("mode"));
}

#[test]
fn detects_tampering_with_any_signed_field() {
    let consumer = associated_consumer();

    for name in DEFAULT_SIGNED {
        let mut callback = valid_callback();
        let key = format!("openid.{name}");
        let mut value = callback[&key].clone();
        let last = value.pop().unwrap();
        value.push(if last == 'x' { 'y' } else { 'x' });
        callback.insert(key.clone(), value);

        let err = consumer.verify(&callback).unwrap_err();

        if *name == "op_endpoint" {
            // the tampered endpoint has no association at all
            assert_eq!(ErrorKind::UnknownAssociation, err.kind(), "{key}");
        } else {
            assert_eq!(ErrorKind::Verification, err.kind(), "{key}");
        }
    }
}

#[test]
fn detects_tampering_with_signed_order_or_sig() {
    let consumer = associated_consumer();

    let mut reordered = valid_callback();
    let mut names: Vec<&str> = DEFAULT_SIGNED.to_vec();
    names.swap(1, 2);
    reordered.insert("openid.signed".to_string(), names.join(","));
    assert_eq!(
        ErrorKind::Verification,
        consumer.verify(&reordered).unwrap_err().kind()
    );

    let mut truncated_sig = valid_callback();
    let sig = truncated_sig["openid.sig"].clone();
    truncated_sig.insert("openid.sig".to_string(), sig[..sig.len() - 1].to_string());
    assert_eq!(
        ErrorKind::Verification,
        consumer.verify(&truncated_sig).unwrap_err().kind()
    );

    let mut empty_sig = valid_callback();
    empty_sig.insert("openid.sig".to_string(), String::new());
    assert_eq!(
        ErrorKind::Verification,
        consumer.verify(&empty_sig).unwrap_err().kind()
    );
}

#[test]
fn removing_a_signed_field_breaks_the_signature() {
    let consumer = associated_consumer();
    let mut callback = valid_callback();
    callback.remove("openid.sreg.email");

    assert_eq!(
        ErrorKind::Verification,
        consumer.verify(&callback).unwrap_err().kind()
    );
}

#[test]
fn signed_names_without_values_sign_as_empty() {
    let consumer = associated_consumer();
    let fields = [("op_endpoint", OP_ENDPOINT), ("mode", "id_res")];

    let callback = signed_callback(&fields, &["op_endpoint", "missing", "mode"]);

    assert!(consumer.verify(&callback).is_ok());
}

#[test]
fn missing_required_fields_are_malformed() {
    let consumer = associated_consumer();

    for key in ["openid.op_endpoint", "openid.signed", "openid.sig"] {
        let mut callback = valid_callback();
        callback.remove(key);

        assert_eq!(
            ErrorKind::MalformedCallback,
            consumer.verify(&callback).unwrap_err().kind(),
            "{key}"
        );
    }

    assert_eq!(
        ErrorKind::MalformedCallback,
        consumer.verify(&HashMap::new()).unwrap_err().kind()
    );
}

#[test]
fn unknown_provider_is_rejected() {
    let consumer = consumer(TestHttpClient::new());

    assert_eq!(
        ErrorKind::UnknownAssociation,
        consumer.verify(&valid_callback()).unwrap_err().kind()
    );

    for endpoint in ["", "garbage", "\u{0}\u{ffff}", "https://evil.example/openid"] {
        let consumer = associated_consumer();
        let mut callback = valid_callback();
        callback.insert("openid.op_endpoint".to_string(), endpoint.to_string());

        assert_eq!(
            ErrorKind::UnknownAssociation,
            consumer.verify(&callback).unwrap_err().kind(),
            "{endpoint:?}"
        );
    }
}

#[test]
fn expired_association_is_unknown() {
    let consumer = consumer(TestHttpClient::new());
    consumer.association_store().put(
        OP_ENDPOINT,
        Association::new(
            OP_ENDPOINT,
            "AH1",
            SECRET.to_vec(),
            AssociationType::HmacSha256,
            NOW - 1,
        ),
    );

    assert_eq!(
        ErrorKind::UnknownAssociation,
        consumer.verify(&valid_callback()).unwrap_err().kind()
    );
}

#[test]
fn oversized_values_do_not_crash() {
    let consumer = associated_consumer();
    let big = "a".repeat(1 << 20);
    let fields: Vec<(&str, &str)> = default_callback_fields()
        .into_iter()
        .map(|(k, v)| if k == "sreg.fullname" { (k, big.as_str()) } else { (k, v) })
        .collect();

    let callback = signed_callback(&fields, DEFAULT_SIGNED);

    assert_eq!(
        Some(big.as_str()),
        consumer.verify(&callback).unwrap().fullname()
    );

    let mut garbage = callback.clone();
    garbage.insert("openid.signed".to_string(), ",".repeat(10_000));
    assert_eq!(
        ErrorKind::Verification,
        consumer.verify(&garbage).unwrap_err().kind()
    );
}

#[test]
fn verifies_callback_url() {
    let consumer = associated_consumer();
    let callback = valid_callback();

    let mut url = Url::parse("https://rp.example/openid/verify").unwrap();
    url.query_pairs_mut().extend_pairs(callback.iter());

    let claims = consumer.verify_callback_url(&url).unwrap();

    assert_eq!(Some("alice"), claims.nickname());

    let bare = Url::parse("https://rp.example/openid/verify").unwrap();
    assert_eq!(
        ErrorKind::MalformedCallback,
        consumer.verify_callback_url(&bare).unwrap_err().kind()
    );
}

#[test]
fn claims_round_trip_through_json() {
    let consumer = associated_consumer();
    let claims = consumer.verify(&valid_callback()).unwrap();

    let json = serde_json::to_string(&claims).unwrap();
    let restored: crate::types::Claims = serde_json::from_str(&json).unwrap();

    assert_eq!(claims, restored);
    assert_eq!(Some("alice@example.com"), restored.email());
}
