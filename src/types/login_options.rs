use serde::Deserialize;

pub(crate) const DEFAULT_REDIRECT_KEY: &str = "redirect";

/// # Login Options
/// Settings of [crate::login::OpenIdLogin]
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoginOptions {
    /// Path prefix handled by the login layer, eg. `/openid`
    pub prefix: String,
    /// Local site, eg. `https://localhost`. Used to build `return_to` and as
    /// the fallback redirect target.
    pub realm: String,
    /// Provider endpoint, eg. `https://openidprovider.com/openid`
    pub endpoint: String,
    /// Query key carrying the page to return to after login. Defaults to `redirect`.
    #[serde(default)]
    pub redirect_key: Option<String>,
}

impl LoginOptions {
    pub(crate) fn redirect_key(&self) -> &str {
        match self.redirect_key.as_deref() {
            Some(k) if !k.is_empty() => k,
            _ => DEFAULT_REDIRECT_KEY,
        }
    }
}
