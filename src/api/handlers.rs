//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::cache::{CacheAwareHandler, CacheStore};
use crate::config::Config;
use crate::error::Result;
use crate::fetch::{BackendFetcher, Fetcher, PRINCIPAL_HEADER};
use crate::models::{HealthResponse, ResourceQuery, StatsResponse};

/// Response header reporting `HIT` or `MISS`
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Application state shared across all handlers.
///
/// Holds the cache-aware handler for the backend resource.
#[derive(Clone)]
pub struct AppState {
    /// Cached access to the backend resource
    pub resources: Arc<CacheAwareHandler<Value>>,
}

impl AppState {
    /// Creates a new AppState around a store and fetch collaborator.
    pub fn new(store: CacheStore<Value>, fetcher: Arc<dyn Fetcher<Value>>) -> Self {
        Self {
            resources: Arc::new(CacheAwareHandler::new(store, fetcher)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wires the store to a [`BackendFetcher`] for the configured backend.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = BackendFetcher::from_config(config)?;
        Ok(Self::new(CacheStore::new(config.cache), Arc::new(fetcher)))
    }
}

/// Extracts the principal id, ignoring missing, empty or non-UTF-8 headers.
fn principal_from(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(PRINCIPAL_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Handler for GET /api/properties
///
/// Returns the backend payload verbatim, annotated with `x-cache`.
pub async fn resource_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ResourceQuery>,
) -> Result<Response> {
    let cached = state
        .resources
        .handle(principal_from(&headers), query.scope())
        .await?;

    Ok((
        [(CACHE_STATUS_HEADER, cached.status.as_str())],
        Json(cached.value),
    )
        .into_response())
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let store = state.resources.store();
    let store = store.read().await;

    Json(StatsResponse::new(
        &store.stats(),
        store.max_entries(),
        store.ttl_ms(),
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
