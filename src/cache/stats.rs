//! Cache Statistics Module
//!
//! Counters for the FIFO store: lookups served, lookups that went to the
//! fetcher, and the two ways an entry leaves the store (eviction or expiry).

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
///
/// `misses` counts every lookup that found nothing fresh, so a stale read
/// shows up in `misses`, `stale_reads` and `expirations` at once.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups served from the store
    pub hits: u64,
    /// Number of lookups that found nothing fresh
    pub misses: u64,
    /// Number of misses caused by an entry that had outlived its TTL
    pub stale_reads: u64,
    /// Number of oldest-inserted entries dropped to admit a new key
    pub evictions: u64,
    /// Number of stale entries removed, lazily or by the sweep
    pub expirations: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the fraction of lookups served without a fetch.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Counts a lookup answered by a fresh entry.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Counts a lookup for a key the store does not hold.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Stale Read ==
    /// Counts a lookup that found an expired entry and removed it.
    pub fn record_stale_read(&mut self) {
        self.misses += 1;
        self.stale_reads += 1;
        self.expirations += 1;
    }

    // == Record Eviction ==
    /// Counts an entry dropped from the front of the insertion order.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Expirations ==
    /// Counts stale entries removed in bulk by a purge.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    // == Update Entry Count ==
    /// Updates the current entry count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
