use std::{fmt, str::FromStr};

/// # AssociationType
/// Message authentication algorithm negotiated with the provider.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AssociationType {
    /// `hmac-sha256`
    #[default]
    HmacSha256,
}

impl AssociationType {
    /// Wire name of the algorithm
    pub fn as_str(&self) -> &'static str {
        match self {
            AssociationType::HmacSha256 => "hmac-sha256",
        }
    }
}

impl FromStr for AssociationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("hmac-sha256") {
            return Ok(AssociationType::HmacSha256);
        }

        Err(format!("unsupported assoc_type {s}"))
    }
}

impl fmt::Display for AssociationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// # Association
/// Shared secret negotiated with one provider endpoint.
///
/// Values are immutable. A new handshake produces a new [Association] which
/// replaces the old one in the store.
#[derive(Clone, PartialEq, Eq)]
pub struct Association {
    endpoint: String,
    handle: String,
    secret: Vec<u8>,
    assoc_type: AssociationType,
    expires_at: i64,
}

impl Association {
    /// Creates a new [Association]
    ///
    /// - `expires_at` - expiration timestamp, represented as the number of seconds since the epoch
    pub fn new(
        endpoint: impl Into<String>,
        handle: impl Into<String>,
        secret: Vec<u8>,
        assoc_type: AssociationType,
        expires_at: i64,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            handle: handle.into(),
            secret,
            assoc_type,
            expires_at,
        }
    }

    /// Provider endpoint this association belongs to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Opaque handle issued by the provider
    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub(crate) fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Negotiated algorithm
    pub fn assoc_type(&self) -> AssociationType {
        self.assoc_type
    }

    /// Expiration timestamp in seconds since the epoch
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// True once `now` has reached `expires_at`
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Debug for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Association")
            .field("endpoint", &self.endpoint)
            .field("handle", &self.handle)
            .field("secret", &"<redacted>")
            .field("assoc_type", &self.assoc_type)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
