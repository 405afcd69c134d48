//! # Login module
//! Thin http boundary around the [crate::consumer::Consumer]: path routing
//! and session bookkeeping. Writing the http response is left to the
//! application's framework.

#[allow(clippy::module_inception)]
mod login;
mod route;
mod session;

pub use login::{LoginOutcome, OpenIdLogin};
pub use route::Route;
pub use session::{get_user, Session, SESSION_KEY_REDIRECT, SESSION_KEY_USER};
