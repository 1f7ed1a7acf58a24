//! HotelEngPro response cache
//!
//! Shields the backend API from duplicate reads with a principal-scoped,
//! TTL-bounded, FIFO-evicting in-memory cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::{CacheConfig, Config};
pub use error::{CacheError, FetchError};
pub use tasks::spawn_sweep_task;
