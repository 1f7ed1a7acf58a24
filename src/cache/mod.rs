//! Cache Module
//!
//! Principal-scoped response caching with TTL expiry and FIFO eviction.

mod clock;
mod entry;
mod handler;
mod key;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use handler::{CacheAwareHandler, CacheStatus, Cached};
pub use key::{derive_key, ALL_SCOPE, ANONYMOUS_PRINCIPAL};
pub use stats::CacheStats;
pub use store::CacheStore;
