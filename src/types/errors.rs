use std::fmt::Display;

use super::http_client::HttpResponse;

/// # ErrorKind
/// The failure kinds the protocol engine reports. Callers that only need to
/// decide between "retry later" and "deny" can branch on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Association handshake with the provider failed
    Handshake,
    /// Key-value body could not be decoded
    MalformedBody,
    /// Callback could not be decoded or misses a required field
    MalformedCallback,
    /// No live association for the claimed provider endpoint
    UnknownAssociation,
    /// Signature mismatch
    Verification,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Handshake => "HandshakeError",
            ErrorKind::MalformedBody => "MalformedBodyError",
            ErrorKind::MalformedCallback => "MalformedCallbackError",
            ErrorKind::UnknownAssociation => "UnknownAssociationError",
            ErrorKind::Verification => "VerificationError",
        };

        f.write_str(name)
    }
}

/// # OpenIdError
/// Error that will be returned to the user of this library.
///
/// Messages are diagnostic only. They never contain the association secret,
/// but they may contain provider supplied values, so do not show them to the
/// end user verbatim.
#[derive(Debug, thiserror::Error)]
pub enum OpenIdError {
    /// Network failure, non 2xx response or a malformed handshake response
    #[error("HandshakeError: {message}")]
    Handshake {
        /// Description
        message: String,
        /// Response from the provider, if the failure came after a response was received
        response: Option<HttpResponse>,
    },
    /// Key-value text that is not a list of `key:value` lines
    #[error("MalformedBodyError: {0}")]
    MalformedBody(String),
    /// Callback that cannot be decoded or lacks a required field
    #[error("MalformedCallbackError: {0}")]
    MalformedCallback(String),
    /// No live association for the callback's `op_endpoint`
    #[error("UnknownAssociationError: {0}")]
    UnknownAssociation(String),
    /// Recomputed signature does not match `sig`
    #[error("VerificationError: {0}")]
    Verification(String),
}

impl OpenIdError {
    pub(crate) fn new_handshake_error(message: &str, response: Option<HttpResponse>) -> Self {
        OpenIdError::Handshake {
            message: message.to_string(),
            response,
        }
    }

    pub(crate) fn new_malformed_body_error(message: &str) -> Self {
        OpenIdError::MalformedBody(message.to_string())
    }

    pub(crate) fn new_malformed_callback_error(message: &str) -> Self {
        OpenIdError::MalformedCallback(message.to_string())
    }

    pub(crate) fn new_unknown_association_error(message: &str) -> Self {
        OpenIdError::UnknownAssociation(message.to_string())
    }

    pub(crate) fn new_verification_error(message: &str) -> Self {
        OpenIdError::Verification(message.to_string())
    }

    /// Returns the [ErrorKind] of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            OpenIdError::Handshake { .. } => ErrorKind::Handshake,
            OpenIdError::MalformedBody(_) => ErrorKind::MalformedBody,
            OpenIdError::MalformedCallback(_) => ErrorKind::MalformedCallback,
            OpenIdError::UnknownAssociation(_) => ErrorKind::UnknownAssociation,
            OpenIdError::Verification(_) => ErrorKind::Verification,
        }
    }

    /// The provider response attached to a [OpenIdError::Handshake], if any
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            OpenIdError::Handshake { response, .. } => response.as_ref(),
            _ => None,
        }
    }

    /// Diagnostic message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            OpenIdError::Handshake { message, .. } => message,
            OpenIdError::MalformedBody(m)
            | OpenIdError::MalformedCallback(m)
            | OpenIdError::UnknownAssociation(m)
            | OpenIdError::Verification(m) => m,
        }
    }
}

/// Return type used by the library
pub type OpenIdReturnType<T> = Result<T, OpenIdError>;
