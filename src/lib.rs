#![warn(missing_docs)]
//! # OpenID Consumer
//!
//! An OpenID 2.0 relying party (consumer): association with the provider,
//! the `checkid_setup` redirect url and verification of the signed callback.
//!
//! ## Consumer
//!
//! - [consumer::Consumer::associate_async]
//! - [consumer::Consumer::build_auth_url_async]
//! - [consumer::Consumer::verify]
//! - [consumer::Consumer::verify_callback_url]
//!
//! ## Login
//!
//! - [login::OpenIdLogin::handle_async]
//! - [login::get_user]
//!
//! ## Wire formats
//!
//! - [codec::encode_request_fields]
//! - [codec::decode_response_fields]
//! - [codec::decode_key_value_body]
//! - [signature::sign]
//!
//! A custom http client can be used by implementing [types::OpenIdHttpClient].
//! The default one ([http_client::DefaultHttpClient]) is behind the `http_client` feature.

pub mod codec;
pub mod consumer;
pub mod helpers;
mod http;
#[cfg(feature = "http_client")]
pub mod http_client;
pub mod login;
pub mod signature;
pub mod types;

/// Re exports from the crate
pub mod re_exports {
    pub use url;
}
