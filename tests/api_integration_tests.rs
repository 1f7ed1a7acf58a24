//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle of the cached resource route,
//! using an in-process fetcher as well as a mocked backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use hoteleng_cache::{
    api::{create_router, CACHE_STATUS_HEADER},
    cache::{CacheStore, ManualClock},
    fetch::{BackendFetcher, Fetcher, PRINCIPAL_HEADER},
    AppState, CacheConfig, FetchError,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// == Helper Types ==

/// Fetcher that numbers its responses and can be switched into failure mode.
#[derive(Default)]
struct ScriptedFetcher {
    calls: AtomicUsize,
    failing: std::sync::atomic::AtomicBool,
}

#[async_trait]
impl Fetcher<Value> for ScriptedFetcher {
    async fn fetch(&self, principal: Option<&str>, scope: Option<&str>) -> Result<Value, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::Status {
                status: 503,
                message: "maintenance window".to_string(),
            });
        }
        Ok(json!({ "principal": principal, "scope": scope, "call": call }))
    }
}

// == Helper Functions ==

fn create_test_app(
    ttl_ms: u64,
    max_entries: usize,
) -> (Router, Arc<ScriptedFetcher>, Arc<ManualClock>) {
    let fetcher = Arc::new(ScriptedFetcher::default());
    let clock = Arc::new(ManualClock::new(0));
    let config = CacheConfig::new(ttl_ms, max_entries).unwrap();
    let store = CacheStore::with_clock(config, clock.clone());
    let app = create_router(AppState::new(store, fetcher.clone()));
    (app, fetcher, clock)
}

fn resource_request(principal: Option<&str>, scope: Option<&str>) -> Request<Body> {
    let uri = match scope {
        Some(scope) => format!("/api/properties?propertyId={}", scope),
        None => "/api/properties".to_string(),
    };
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(principal) = principal {
        builder = builder.header(PRINCIPAL_HEADER, principal);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn cache_header(response: &axum::response::Response) -> Option<&str> {
    response
        .headers()
        .get(CACHE_STATUS_HEADER)
        .and_then(|v| v.to_str().ok())
}

// == Resource Endpoint Tests ==

#[tokio::test]
async fn test_miss_then_hit_returns_same_payload() {
    let (app, fetcher, _) = create_test_app(30_000, 200);

    let first = app
        .clone()
        .oneshot(resource_request(Some("user-42"), Some("prop-7")))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(cache_header(&first), Some("MISS"));
    let first_body = body_to_json(first.into_body()).await;
    assert_eq!(
        first_body,
        json!({ "principal": "user-42", "scope": "prop-7", "call": 1 })
    );

    let second = app
        .oneshot(resource_request(Some("user-42"), Some("prop-7")))
        .await
        .unwrap();
    assert_eq!(cache_header(&second), Some("HIT"));
    assert_eq!(body_to_json(second.into_body()).await, first_body);

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_anonymous_request_uses_sentinel_principal() {
    let (app, fetcher, _) = create_test_app(30_000, 200);

    let response = app
        .clone()
        .oneshot(resource_request(None, None))
        .await
        .unwrap();
    assert_eq!(cache_header(&response), Some("MISS"));

    let response = app.oneshot(resource_request(None, None)).await.unwrap();
    assert_eq!(cache_header(&response), Some("HIT"));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_ttl_expiry_triggers_refetch() {
    let (app, fetcher, clock) = create_test_app(30_000, 200);

    app.clone()
        .oneshot(resource_request(Some("u"), Some("X")))
        .await
        .unwrap();

    clock.set(29_999);
    let response = app
        .clone()
        .oneshot(resource_request(Some("u"), Some("X")))
        .await
        .unwrap();
    assert_eq!(cache_header(&response), Some("HIT"));

    clock.set(30_001);
    let response = app
        .oneshot(resource_request(Some("u"), Some("X")))
        .await
        .unwrap();
    assert_eq!(cache_header(&response), Some("MISS"));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_fifo_eviction_through_the_route() {
    let (app, fetcher, _) = create_test_app(1_000, 2);

    for scope in ["A", "B", "C"] {
        app.clone()
            .oneshot(resource_request(Some("u"), Some(scope)))
            .await
            .unwrap();
    }

    let b = app
        .clone()
        .oneshot(resource_request(Some("u"), Some("B")))
        .await
        .unwrap();
    assert_eq!(cache_header(&b), Some("HIT"));

    let a = app
        .clone()
        .oneshot(resource_request(Some("u"), Some("A")))
        .await
        .unwrap();
    assert_eq!(cache_header(&a), Some("MISS"));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 4);

    let stats = app
        .oneshot(
            Request::builder()
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_to_json(stats.into_body()).await;
    assert_eq!(json["total_entries"], 2);
    assert_eq!(json["evictions"], 2);
}

#[tokio::test]
async fn test_fetch_failure_is_propagated_and_not_cached() {
    let (app, fetcher, _) = create_test_app(30_000, 200);
    fetcher.failing.store(true, Ordering::SeqCst);

    let response = app
        .clone()
        .oneshot(resource_request(Some("u"), Some("p")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(cache_header(&response).is_none());
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("maintenance window"));

    // Backend recovers; the next call fetches rather than replaying the failure
    fetcher.failing.store(false, Ordering::SeqCst);
    let response = app
        .oneshot(resource_request(Some("u"), Some("p")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(cache_header(&response), Some("MISS"));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
}

// == Stats and Health Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_tracks_hits_and_misses() {
    let (app, _, _) = create_test_app(30_000, 200);

    for _ in 0..3 {
        app.clone()
            .oneshot(resource_request(Some("u"), Some("p")))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"], 2);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["max_entries"], 200);
    assert_eq!(json["ttl_ms"], 30_000);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _, _) = create_test_app(30_000, 200);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}

// == Backend Round Trip ==

#[tokio::test]
async fn test_backend_is_called_once_per_fresh_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/properties"))
        .and(query_param("propertyId", "prop-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "name": "Harbour View", "rooms": 84 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetcher =
        BackendFetcher::new(&server.uri(), "/properties", Duration::from_secs(5)).unwrap();
    let store = CacheStore::new(CacheConfig::default());
    let app = create_router(AppState::new(store, Arc::new(fetcher)));

    for expected in ["MISS", "HIT", "HIT"] {
        let response = app
            .clone()
            .oneshot(resource_request(Some("user-9"), Some("prop-1")))
            .await
            .unwrap();
        assert_eq!(cache_header(&response), Some(expected));
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["name"], "Harbour View");
    }

    // MockServer verifies `.expect(1)` on drop
}
