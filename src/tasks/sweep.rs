//! Expiry Sweep Task
//!
//! Background task that periodically drops expired entries so that keys
//! nobody reads again do not linger until evicted.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that purges expired entries every `interval_secs`.
///
/// Lookups already ignore stale entries, so the sweep only reclaims memory.
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_sweep_task(state.resources.store(), 60);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_sweep_task<V>(store: Arc<RwLock<CacheStore<V>>>, interval_secs: u64) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "Starting expiry sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.write().await.purge_expired();

            if removed > 0 {
                info!(removed, "Expiry sweep removed stale entries");
            } else {
                debug!("Expiry sweep found no stale entries");
            }
        }
    })
}
