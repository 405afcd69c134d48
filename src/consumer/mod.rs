//! # Consumer module
//! The protocol engine: association handshake and cache, auth request url
//! and callback verification.

mod association_store;
#[allow(clippy::module_inception)]
mod consumer;
mod consumer_impl;
mod helpers;

pub use association_store::AssociationStore;
pub use consumer::{Consumer, IDENTIFIER_SELECT, NAMESPACE, NS_SREG};
