use crate::types::Claims;

/// Session key of the verified user
pub const SESSION_KEY_USER: &str = "openid_consumer/login.User";
/// Session key of the page to return to after verification
pub const SESSION_KEY_REDIRECT: &str = "openid_consumer/login.Redirect";

/// # Session
/// Per user session store provided by the application.
pub trait Session {
    /// Stores `value` under `key`, replacing any previous value
    fn store(&mut self, key: &str, value: String);

    /// Loads the value stored under `key`
    fn load(&self, key: &str) -> Option<String>;

    /// Removes `key`
    fn delete(&mut self, key: &str);
}

/// Gets the verified user of `session`.
///
/// Returns `None` when nobody logged in, or when the stored value is not a
/// [Claims] (eg. written by something else under the same key).
pub fn get_user<S: Session + ?Sized>(session: &S) -> Option<Claims> {
    session
        .load(SESSION_KEY_USER)
        .and_then(|json| serde_json::from_str(&json).ok())
}

pub(crate) fn set_user<S: Session + ?Sized>(session: &mut S, claims: &Claims) -> bool {
    match serde_json::to_string(claims) {
        Ok(json) => {
            session.store(SESSION_KEY_USER, json);
            true
        }
        Err(_) => false,
    }
}

pub(crate) fn take_redirect<S: Session + ?Sized>(session: &mut S) -> Option<String> {
    let redirect = session.load(SESSION_KEY_REDIRECT);
    if redirect.is_some() {
        session.delete(SESSION_KEY_REDIRECT);
    }
    redirect
}
