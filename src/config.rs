//! Configuration Module
//!
//! Handles loading and validating service configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::error::{CacheError, Result};

/// Default entry lifetime in milliseconds
pub const DEFAULT_TTL_MS: u64 = 30_000;

/// Default store capacity
pub const DEFAULT_MAX_ENTRIES: usize = 200;

// == Cache Config ==
/// Store parameters, validated once and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    ttl_ms: u64,
    max_entries: usize,
}

impl CacheConfig {
    /// Builds a cache configuration, rejecting zero values.
    pub fn new(ttl_ms: u64, max_entries: usize) -> Result<Self> {
        if ttl_ms == 0 {
            return Err(CacheError::InvalidConfig(
                "ttl_ms must be positive".to_string(),
            ));
        }
        if max_entries == 0 {
            return Err(CacheError::InvalidConfig(
                "max_entries must be positive".to_string(),
            ));
        }
        Ok(Self {
            ttl_ms,
            max_entries,
        })
    }

    /// Lifetime of a freshly inserted entry, in milliseconds.
    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Maximum number of entries the store may hold.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

// == Service Config ==
/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store parameters
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the backend API
    pub backend_url: String,
    /// Path of the cached resource on the backend
    pub resource_path: String,
    /// Backend request timeout in seconds
    pub backend_timeout_secs: u64,
    /// Expiry sweep interval in seconds, 0 disables the sweep
    pub sweep_interval_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - Entry lifetime in milliseconds (default: 30000)
    /// - `CACHE_MAX_ENTRIES` - Store capacity (default: 200)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `BACKEND_URL` - Backend API base URL (default: http://localhost:8000)
    /// - `BACKEND_RESOURCE_PATH` - Cached resource path (default: /properties)
    /// - `BACKEND_TIMEOUT_SECS` - Backend request timeout (default: 30)
    /// - `SWEEP_INTERVAL_SECS` - Expiry sweep interval, 0 = off (default: 60)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    ///
    /// Missing variables fall back to defaults; present but malformed ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ttl_ms = parse_var(&lookup, "CACHE_TTL_MS", DEFAULT_TTL_MS)?;
        let max_entries = parse_var(&lookup, "CACHE_MAX_ENTRIES", DEFAULT_MAX_ENTRIES)?;
        let backend_timeout_secs = parse_var(&lookup, "BACKEND_TIMEOUT_SECS", 30u64)?;
        if backend_timeout_secs == 0 {
            return Err(CacheError::InvalidConfig(
                "BACKEND_TIMEOUT_SECS must be positive".to_string(),
            ));
        }

        let backend_url = lookup("BACKEND_URL")
            .unwrap_or_else(|| "http://localhost:8000".to_string())
            .trim_end_matches('/')
            .to_string();
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(CacheError::InvalidConfig(format!(
                "BACKEND_URL must be an http(s) URL, got '{}'",
                backend_url
            )));
        }

        let mut resource_path =
            lookup("BACKEND_RESOURCE_PATH").unwrap_or_else(|| "/properties".to_string());
        if !resource_path.starts_with('/') {
            resource_path.insert(0, '/');
        }

        Ok(Self {
            cache: CacheConfig::new(ttl_ms, max_entries)?,
            server_port: parse_var(&lookup, "SERVER_PORT", 3000u16)?,
            backend_url,
            resource_path,
            backend_timeout_secs,
            sweep_interval_secs: parse_var(&lookup, "SWEEP_INTERVAL_SECS", 60u64)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
            backend_url: "http://localhost:8000".to_string(),
            resource_path: "/properties".to_string(),
            backend_timeout_secs: 30,
            sweep_interval_secs: 60,
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            CacheError::InvalidConfig(format!("{} has an invalid value '{}'", name, raw))
        }),
    }
}
