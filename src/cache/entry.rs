//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and the expiry policy.

// == Cache Entry ==
/// A cached payload together with its lifetime bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored payload
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry inserted at `now_ms` that lives for `ttl_ms`.
    pub fn new(value: V, now_ms: u64, ttl_ms: u64) -> Self {
        Self {
            value,
            created_at: now_ms,
            expires_at: now_ms.saturating_add(ttl_ms),
        }
    }

    // == Is Fresh ==
    /// Checks whether the entry may still be served at `now_ms`.
    ///
    /// The expiration instant itself is still fresh; the entry goes stale
    /// only once `now_ms` is strictly past `expires_at`.
    pub fn is_fresh(&self, now_ms: u64) -> bool {
        now_ms <= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining lifetime in milliseconds, 0 once stale.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at.saturating_sub(now_ms)
    }
}
