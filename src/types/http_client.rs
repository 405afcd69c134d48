//! # Http Client Interface for Custom Http Clients

use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

use url::Url;

/// # HttpRequest
/// A direct (server to server) GET request made by the consumer. The
/// OpenID fields are encoded in the query of `url`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Url of the request, including the encoded query
    pub url: Url,
    /// Headers that are sent in the request
    pub headers: HashMap<String, Vec<String>>,
    /// Maximum time the whole round trip may take. The client must fail the
    /// request once it elapses.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub(crate) fn new(url: Url) -> Self {
        Self {
            url,
            headers: HashMap::new(),
            timeout: None,
        }
    }

    pub(crate) fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    pub(crate) fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Represents an HTTP response received from a server.
///
/// The body of a handshake response may carry a `mac_key`, so [Debug] only
/// prints its length.
#[derive(Clone)]
pub struct HttpResponse {
    /// The HTTP status code of the response (e.g., 200 for success, 404 for Not Found).
    pub status_code: u16,
    /// The optional body content of the response. None if there is no body content (String).
    pub body: Option<String>,
}

impl Debug for HttpResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status_code", &self.status_code)
            .field("body_len", &self.body.as_ref().map(|b| b.len()))
            .finish()
    }
}

/// This trait defines the interface for making HTTP requests used by the OpenID library.
/// Users who need custom HTTP clients need to implement this trait.
pub trait OpenIdHttpClient {
    /// Makes an HTTP request using the provided HttpRequest object.
    ///
    /// The future resolves to either a `Result<HttpResponse, String>`.
    ///  * On success, the result is `Ok(HttpResponse)` containing the HTTP response, whatever its status.
    ///  * On error (connection, tls, timeout...), the result is `Err(String)` with an error message describing the failure.
    ///
    /// Implementations must honour [HttpRequest::timeout].
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, String>> + Send;
}
