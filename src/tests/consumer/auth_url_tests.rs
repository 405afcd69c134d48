use crate::{
    consumer::{AssociationStore, Consumer, IDENTIFIER_SELECT, NAMESPACE, NS_SREG},
    tests::{
        helpers::{
            associate_url, associated_consumer, consumer, fixed_now, get_query, handshake,
            handshake_body, OP_ENDPOINT, RETURN_TO, SECRET,
        },
        test_http_client::{TestHttpClient, TestHttpReqRes},
    },
    types::{ConsumerOptions, ErrorKind},
};

#[tokio::test]
async fn builds_checkid_setup_url_with_cached_association() {
    let consumer = associated_consumer();

    let url = consumer
        .build_auth_url_async(OP_ENDPOINT, RETURN_TO)
        .await
        .unwrap();

    assert!(url.starts_with("https://op.example/openid?"));
    assert!(url.contains("openid.mode=checkid_setup"));
    assert!(url.contains("openid.assoc_handle=AH1"));
    assert!(url.contains("openid.return_to=https%3A%2F%2Frp.example%2Fverify"));
    assert_eq!(0, consumer.http_client.request_count());
}

#[tokio::test]
async fn carries_all_required_fields() {
    let consumer = associated_consumer();

    let url = consumer
        .build_auth_url_async(OP_ENDPOINT, RETURN_TO)
        .await
        .unwrap();

    assert_eq!(Some("checkid_setup".to_string()), get_query(&url, "openid.mode"));
    assert_eq!(Some(NAMESPACE.to_string()), get_query(&url, "openid.ns"));
    assert_eq!(Some("AH1".to_string()), get_query(&url, "openid.assoc_handle"));
    assert_eq!(Some(RETURN_TO.to_string()), get_query(&url, "openid.return_to"));
    assert_eq!(
        Some(IDENTIFIER_SELECT.to_string()),
        get_query(&url, "openid.claimed_id")
    );
    assert_eq!(
        Some(IDENTIFIER_SELECT.to_string()),
        get_query(&url, "openid.identity")
    );
    assert_eq!(Some(NS_SREG.to_string()), get_query(&url, "openid.ns.sreg"));
    assert_eq!(
        Some("nickname,email,fullname".to_string()),
        get_query(&url, "openid.sreg.required")
    );
    assert_eq!(None, get_query(&url, "openid.sreg.optional"));
    assert_eq!(None, get_query(&url, "openid.realm"));
}

#[tokio::test]
async fn associates_on_cache_miss() {
    let http_client = handshake(OP_ENDPOINT, "AH9", 3600).build();
    let consumer = consumer(http_client);

    let url = consumer
        .build_auth_url_async(OP_ENDPOINT, RETURN_TO)
        .await
        .unwrap();

    assert_eq!(Some("AH9".to_string()), get_query(&url, "openid.assoc_handle"));
    consumer.http_client.assert();
}

#[tokio::test]
async fn propagates_handshake_error() {
    let http_client = TestHttpReqRes::new(associate_url(OP_ENDPOINT))
        .set_response_status_code(500)
        .set_response_body("error:down\n")
        .build();
    let consumer = consumer(http_client);

    let err = consumer
        .build_auth_url_async(OP_ENDPOINT, RETURN_TO)
        .await
        .unwrap_err();

    assert_eq!(ErrorKind::Handshake, err.kind());
}

#[tokio::test]
async fn uses_configured_sreg_fields_and_realm() {
    let options = ConsumerOptions {
        sreg_required: vec!["email".to_string()],
        sreg_optional: vec!["nickname".to_string(), "country".to_string()],
        realm: Some("https://rp.example".to_string()),
        ..Default::default()
    };
    let consumer = Consumer::with_store(
        handshake(OP_ENDPOINT, "AH1", 3600).build(),
        options,
        AssociationStore::with_clock(fixed_now),
    );

    let url = consumer
        .build_auth_url_async(OP_ENDPOINT, RETURN_TO)
        .await
        .unwrap();

    assert_eq!(Some("email".to_string()), get_query(&url, "openid.sreg.required"));
    assert_eq!(
        Some("nickname,country".to_string()),
        get_query(&url, "openid.sreg.optional")
    );
    assert_eq!(
        Some("https://rp.example".to_string()),
        get_query(&url, "openid.realm")
    );
}

#[tokio::test]
async fn keeps_the_endpoint_query() {
    let endpoint = "https://op.example/openid?tenant=a";
    let http_client = TestHttpClient::new().add(
        TestHttpReqRes::new(
            "https://op.example/openid?tenant=a&openid.mode=associate&openid.assoc_type=hmac-sha256",
        )
        .set_response_body(handshake_body("AH1", SECRET, 60)),
    );
    let consumer = consumer(http_client);

    let url = consumer
        .build_auth_url_async(endpoint, RETURN_TO)
        .await
        .unwrap();

    assert!(url.starts_with("https://op.example/openid?tenant=a&openid.mode=checkid_setup"));
    assert_eq!(Some("a".to_string()), get_query(&url, "tenant"));
}

#[test]
fn options_deserialize_with_defaults() {
    let options: ConsumerOptions =
        serde_json::from_str(r#"{"handshake_timeout": 3, "realm": "https://rp.example"}"#)
            .unwrap();

    assert_eq!(std::time::Duration::from_secs(3), options.handshake_timeout);
    assert_eq!(Some("https://rp.example".to_string()), options.realm);
    assert_eq!(
        vec!["nickname", "email", "fullname"],
        options.sreg_required
    );
}
