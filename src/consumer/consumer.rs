use crate::types::{ConsumerOptions, OpenIdHttpClient};

use super::association_store::AssociationStore;

/// OpenID 2.0 protocol namespace, `openid.ns`
pub const NAMESPACE: &str = "http://specs.openid.net/auth/2.0";
/// Identifier select URI used for both `claimed_id` and `identity`
pub const IDENTIFIER_SELECT: &str = "http://specs.openid.net/auth/2.0/identifier_select";
/// Simple registration extension namespace, `openid.ns.sreg`
pub const NS_SREG: &str = "http://openid.net/extensions/sreg/1.1";

/// # Consumer
/// The relying party protocol engine. It owns the [AssociationStore] and the
/// http client used for direct requests.
///
/// Every operation takes `&self`, share it between request handlers with an
/// [std::sync::Arc].
#[derive(Debug)]
pub struct Consumer<H: OpenIdHttpClient> {
    pub(crate) http_client: H,
    pub(crate) options: ConsumerOptions,
    pub(crate) store: AssociationStore,
}

impl<H: OpenIdHttpClient> Consumer<H> {
    /// Creates a new [Consumer] with an empty [AssociationStore]
    pub fn new(http_client: H, options: ConsumerOptions) -> Self {
        Self::with_store(http_client, options, AssociationStore::new())
    }

    /// Creates a new [Consumer] around an existing [AssociationStore]
    pub fn with_store(http_client: H, options: ConsumerOptions, store: AssociationStore) -> Self {
        Self {
            http_client,
            options,
            store,
        }
    }

    /// The association cache of this consumer
    pub fn association_store(&self) -> &AssociationStore {
        &self.store
    }

    /// The options this consumer was created with
    pub fn options(&self) -> &ConsumerOptions {
        &self.options
    }
}
