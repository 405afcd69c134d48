use tracing::{debug, warn};
use url::Url;

use crate::{
    consumer::Consumer,
    helpers::query_to_string_map,
    types::{ErrorKind, LoginOptions, OpenIdHttpClient},
};

use super::{
    route::Route,
    session::{set_user, take_redirect, Session, SESSION_KEY_REDIRECT, SESSION_KEY_USER},
};

/// # LoginOutcome
/// What the http layer has to answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Answer with a `302 Found` to this location
    Redirect(String),
    /// The login or the callback failed. Show a generic denial, the session is
    /// not authenticated.
    Denied(ErrorKind),
    /// Not handled here, call the next handler
    PassThrough,
}

/// # OpenIdLogin
/// Login, logout and callback handling on top of a [Consumer].
///
/// ```text
/// {prefix}/login?redirect=/page  -> provider  -> {prefix}/verify -> /page
/// {prefix}/logout                -> realm
/// ```
#[derive(Debug)]
pub struct OpenIdLogin<H: OpenIdHttpClient> {
    consumer: Consumer<H>,
    options: LoginOptions,
}

impl<H: OpenIdHttpClient> OpenIdLogin<H> {
    /// Creates a new [OpenIdLogin]
    pub fn new(consumer: Consumer<H>, options: LoginOptions) -> Self {
        Self { consumer, options }
    }

    /// The protocol engine
    pub fn consumer(&self) -> &Consumer<H> {
        &self.consumer
    }

    /// Absolute url the provider redirects back to
    pub fn return_to(&self) -> String {
        let verify_path = Route::Verify
            .path(&self.options.prefix)
            .unwrap_or_default();

        format!("{}{verify_path}", self.options.realm.trim_end_matches('/'))
    }

    /// Handles one request. `url` must be the full request url, the query
    /// included.
    pub async fn handle_async<S>(&self, method: &str, url: &Url, session: &mut S) -> LoginOutcome
    where
        S: Session + ?Sized,
    {
        let route = Route::from_request(&self.options.prefix, method, url.path());

        debug!(?route, path = url.path(), "openid login dispatch");

        match route {
            Route::Login => self.login_async(url, session).await,
            Route::Verify => self.verify(url, session),
            Route::Logout => self.logout(url, session),
            Route::PassThrough => LoginOutcome::PassThrough,
        }
    }

    async fn login_async<S: Session + ?Sized>(&self, url: &Url, session: &mut S) -> LoginOutcome {
        if let Some(redirect) = self.requested_redirect(url) {
            session.store(SESSION_KEY_REDIRECT, redirect);
        }

        match self
            .consumer
            .build_auth_url_async(&self.options.endpoint, &self.return_to())
            .await
        {
            Ok(auth_url) => LoginOutcome::Redirect(auth_url),
            Err(e) => {
                warn!(error = %e, "openid login failed");
                LoginOutcome::Denied(e.kind())
            }
        }
    }

    fn verify<S: Session + ?Sized>(&self, url: &Url, session: &mut S) -> LoginOutcome {
        let claims = match self.consumer.verify_callback_url(url) {
            Ok(claims) => claims,
            Err(e) => return LoginOutcome::Denied(e.kind()),
        };

        if !set_user(session, &claims) {
            warn!("verified user could not be stored in the session");
            return LoginOutcome::Denied(ErrorKind::Verification);
        }

        let target = take_redirect(session).unwrap_or_else(|| self.options.realm.clone());

        LoginOutcome::Redirect(target)
    }

    fn logout<S: Session + ?Sized>(&self, url: &Url, session: &mut S) -> LoginOutcome {
        session.delete(SESSION_KEY_USER);
        session.delete(SESSION_KEY_REDIRECT);

        let target = self
            .requested_redirect(url)
            .unwrap_or_else(|| self.options.realm.clone());

        LoginOutcome::Redirect(target)
    }

    /// The redirect query value, if it stays on this site: a local absolute
    /// path or an url under the realm.
    fn requested_redirect(&self, url: &Url) -> Option<String> {
        let redirect = query_to_string_map(url).remove(self.options.redirect_key())?;

        if stays_on_site(&self.options.realm, &redirect) {
            return Some(redirect);
        }

        warn!(redirect = %redirect.escape_debug(), "ignoring redirect outside of the realm");
        None
    }
}

/// Browsers drop tabs and newlines before resolving a `Location`, so the
/// value must also resolve to the realm's origin as a browser would see it.
fn stays_on_site(realm: &str, redirect: &str) -> bool {
    if redirect
        .chars()
        .any(|c| c.is_control() || c.is_whitespace())
    {
        return false;
    }

    let local_path =
        redirect.starts_with('/') && !redirect.starts_with("//") && !redirect.starts_with("/\\");
    let realm_prefix = realm.trim_end_matches('/');
    let under_realm = !realm_prefix.is_empty()
        && (redirect == realm_prefix || redirect.starts_with(&format!("{realm_prefix}/")));

    if !local_path && !under_realm {
        return false;
    }

    let realm = match Url::parse(realm) {
        Ok(realm) => realm,
        Err(_) => return false,
    };

    match realm.join(redirect) {
        Ok(target) => target.origin() == realm.origin(),
        Err(_) => false,
    }
}
