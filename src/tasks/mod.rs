//! Background Tasks Module
//!
//! # Tasks
//! - Expiry sweep: purges stale cache entries at a configured interval

mod sweep;

pub use sweep::spawn_sweep_task;
