/// # Route
/// What the login layer does with an inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `{prefix}/login`: redirect to the provider
    Login,
    /// `{prefix}/logout`: forget the user
    Logout,
    /// `{prefix}/verify`: provider callback
    Verify,
    /// Anything else, hand over to the next handler
    PassThrough,
}

impl Route {
    /// Computes the route of a request. Only GET and HEAD requests under
    /// `prefix` are handled.
    pub fn from_request(prefix: &str, method: &str, path: &str) -> Self {
        if !method.eq_ignore_ascii_case("GET") && !method.eq_ignore_ascii_case("HEAD") {
            return Route::PassThrough;
        }

        let Some(rest) = path.strip_prefix(prefix) else {
            return Route::PassThrough;
        };

        match rest {
            "/login" => Route::Login,
            "/logout" => Route::Logout,
            "/verify" => Route::Verify,
            _ => Route::PassThrough,
        }
    }

    /// Path of `route` under `prefix`. [Route::PassThrough] has none.
    pub fn path(&self, prefix: &str) -> Option<String> {
        let suffix = match self {
            Route::Login => "login",
            Route::Logout => "logout",
            Route::Verify => "verify",
            Route::PassThrough => return None,
        };

        Some(format!("{prefix}/{suffix}"))
    }
}

