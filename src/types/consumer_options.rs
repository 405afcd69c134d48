use std::time::Duration;

use serde::Deserialize;

/// # Consumer Options
/// Settings of a [crate::consumer::Consumer]. Deserializable so that it can
/// be read from the application's configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ConsumerOptions {
    /// Upper bound for the association handshake round trip
    #[serde(with = "duration_secs")]
    pub handshake_timeout: Duration,
    /// Registration extension fields the provider must return
    pub sreg_required: Vec<String>,
    /// Registration extension fields the provider may return
    pub sreg_optional: Vec<String>,
    /// Sent as `openid.realm` when set
    pub realm: Option<String>,
}

impl Default for ConsumerOptions {
    fn default() -> Self {
        Self {
            handshake_timeout: Duration::from_secs(10),
            sreg_required: vec![
                "nickname".to_string(),
                "email".to_string(),
                "fullname".to_string(),
            ],
            sreg_optional: vec![],
            realm: None,
        }
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
