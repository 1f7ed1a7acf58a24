//! Cache-Aware Request Handler
//!
//! Serves a value from the store when fresh, otherwise fetches, stores and
//! returns it, telling the caller which of the two happened.

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{derive_key, CacheStore};
use crate::error::FetchError;
use crate::fetch::Fetcher;

// == Cache Status ==
/// Whether a value came from the store or from the fetch collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value annotated with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<V> {
    pub value: V,
    pub status: CacheStatus,
}

// == Handler ==
/// Fronts a [`Fetcher`] with a shared [`CacheStore`].
///
/// Concurrent misses on one key are not coalesced: each of them fetches, and
/// the last one to finish wins the slot.
pub struct CacheAwareHandler<V> {
    store: Arc<RwLock<CacheStore<V>>>,
    fetcher: Arc<dyn Fetcher<V>>,
}

impl<V> CacheAwareHandler<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(store: CacheStore<V>, fetcher: Arc<dyn Fetcher<V>>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            fetcher,
        }
    }

    /// Shared handle on the underlying store.
    pub fn store(&self) -> Arc<RwLock<CacheStore<V>>> {
        self.store.clone()
    }

    /// Resolves the value for `principal` / `scope`.
    ///
    /// Fetch failures are returned as-is and leave the store untouched.
    pub async fn handle(
        &self,
        principal: Option<&str>,
        scope: Option<&str>,
    ) -> Result<Cached<V>, FetchError> {
        // Blank parts mean "absent" for both the key and the fetch
        let principal = principal.filter(|p| !p.is_empty());
        let scope = scope.filter(|s| !s.is_empty());
        let key = derive_key(principal, scope);

        // Lock released before the fetch; misses may run concurrently
        let cached = self.store.write().await.get(&key);
        if let Some(value) = cached {
            debug!(key = %key, "Cache hit");
            return Ok(Cached {
                value,
                status: CacheStatus::Hit,
            });
        }

        debug!(key = %key, "Cache miss, fetching");
        let value = match self.fetcher.fetch(principal, scope).await {
            Ok(value) => value,
            Err(err) => {
                warn!(key = %key, error = %err, "Fetch failed");
                return Err(err);
            }
        };

        {
            let mut store = self.store.write().await;
            let ttl_ms = store.ttl_ms();
            store.set(key, value.clone(), ttl_ms);
        }

        Ok(Cached {
            value,
            status: CacheStatus::Miss,
        })
    }
}
