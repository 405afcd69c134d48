//! # Types Module
//! All the types, response, request, error etc are in this module

mod association;
mod claims;
mod consumer_options;
mod errors;
pub mod http_client;
mod login_options;

pub use association::{Association, AssociationType};
pub use claims::Claims;
pub use consumer_options::ConsumerOptions;
pub use errors::{ErrorKind, OpenIdError, OpenIdReturnType};
pub use http_client::{HttpRequest, HttpResponse, OpenIdHttpClient};
pub use login_options::LoginOptions;
