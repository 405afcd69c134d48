use std::{
    collections::HashMap,
    fmt,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{helpers::now, types::Association};

/// # AssociationStore
/// Cache of live associations, one per provider endpoint.
///
/// Lookups never return an association whose `expires_at` has been reached.
/// Expired entries are not evicted, they are replaced by the next handshake
/// for the same endpoint.
pub struct AssociationStore {
    associations: RwLock<HashMap<String, Association>>,
    now: fn() -> i64,
}

impl AssociationStore {
    /// Creates an empty store using the system clock
    pub fn new() -> Self {
        Self::with_clock(now)
    }

    /// Creates an empty store with a custom clock returning unix seconds
    pub fn with_clock(now: fn() -> i64) -> Self {
        Self {
            associations: RwLock::new(HashMap::new()),
            now,
        }
    }

    /// Current time according to the store's clock
    pub fn now(&self) -> i64 {
        (self.now)()
    }

    /// Gets the live association for `endpoint`
    pub fn get(&self, endpoint: &str) -> Option<Association> {
        let now = self.now();

        self.read()
            .get(endpoint)
            .filter(|a| !a.is_expired(now))
            .cloned()
    }

    /// Stores `association` under `endpoint`, replacing any previous entry
    pub fn put(&self, endpoint: impl Into<String>, association: Association) {
        self.write().insert(endpoint.into(), association);
    }

    /// Number of entries, live or expired
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// True when nothing was ever stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // The map only holds immutable values, a panicking writer cannot leave it half updated.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Association>> {
        self.associations
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Association>> {
        self.associations
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for AssociationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AssociationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssociationStore")
            .field("associations", &self.len())
            .finish()
    }
}
