//! Cache Store Module
//!
//! Insertion-ordered entry storage with TTL expiry and FIFO eviction.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock};
use crate::config::CacheConfig;

// == Cache Store ==
/// Bounded store whose oldest insertion is evicted first.
///
/// Reads never reorder entries; only `set` moves a key to the newest position.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Entries in insertion order, oldest first
    entries: IndexMap<String, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Fixed capacity and default lifetime
    config: CacheConfig,
    /// Time source for expiry
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a store driven by the system clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a store driven by the given clock.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: IndexMap::with_capacity(config.max_entries()),
            stats: CacheStats::new(),
            config,
            clock,
        }
    }

    // == Get ==
    /// Returns the value for `key` if present and fresh.
    ///
    /// A stale entry is removed as part of the lookup and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        let fresh = match self.entries.get(key) {
            Some(entry) => entry.is_fresh(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if !fresh {
            self.entries.shift_remove(key);
            self.stats.record_stale_read();
            self.stats.set_total_entries(self.entries.len());
            debug!(key, "Dropped stale cache entry");
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl_ms` milliseconds.
    ///
    /// A new key arriving at a full store evicts the earliest-inserted entry.
    /// An existing key is replaced and moved to the newest position without
    /// evicting anything.
    pub fn set(&mut self, key: String, value: V, ttl_ms: u64) {
        let entry = CacheEntry::new(value, self.clock.now_ms(), ttl_ms);

        if self.entries.shift_remove(&key).is_none()
            && self.entries.len() >= self.config.max_entries()
        {
            if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                self.stats.record_eviction();
                debug!(evicted = %evicted, "Evicted oldest cache entry");
            }
        }

        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Purge Expired ==
    /// Removes every stale entry, returning how many were dropped.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(now));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Checks for a key without touching freshness or stats.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in insertion order, oldest first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    // == Length ==
    /// Returns the number of stored entries, stale ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Config Accessors ==
    /// Lifetime applied by the handler on every insertion.
    pub fn ttl_ms(&self) -> u64 {
        self.config.ttl_ms()
    }

    /// Capacity beyond which the oldest insertion is evicted.
    pub fn max_entries(&self) -> usize {
        self.config.max_entries()
    }
}
