//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint, with the shared
//! components driven the way application code drives them.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use inventory_support::{api::create_router, cached_query, AppState, SupportError};
use serde_json::Value;
use tokio_test::{assert_err, assert_ok};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(state: &AppState) -> Router {
    create_router(state.clone())
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_to_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn load_inventory(state: &AppState, key: &str) -> Vec<String> {
    let result = cached_query(&state.cache, &state.monitor, key, || async {
        Ok::<_, String>(vec!["cement".to_string(), "rebar".to_string()])
    })
    .await;
    assert_ok!(result)
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_after_cached_queries() {
    let state = AppState::default();
    load_inventory(&state, "inventory_all").await;
    load_inventory(&state, "inventory_all").await;
    load_inventory(&state, "providers_all").await;

    let response = create_test_app(&state)
        .oneshot(request("GET", "/stats"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["cache"]["namespaces"]["inventory"], 1);
    assert_eq!(json["cache"]["namespaces"]["providers"], 1);
    assert_eq!(json["cache"]["total_entries"], 2);
    assert_eq!(json["cache"]["hits"], 1);
    assert_eq!(json["cache"]["misses"], 2);
    // Only the two misses were timed
    assert_eq!(json["samples"], 2);
    assert_eq!(json["slowest"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_stats_slowest_limit() {
    let state = AppState::default();
    state.monitor.add_metric("query_a", 10);
    state.monitor.add_metric("query_b", 300);
    state.monitor.add_metric("query_c", 90);

    let response = create_test_app(&state)
        .oneshot(request("GET", "/stats?slowest=1"))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    let slowest = json["slowest"].as_array().unwrap();
    assert_eq!(slowest.len(), 1);
    assert_eq!(slowest[0]["operation"], "query_b");
    assert_eq!(slowest[0]["average_ms"], 300);
}

#[tokio::test]
async fn test_stats_rejects_oversized_ranking() {
    let state = AppState::default();

    let response = create_test_app(&state)
        .oneshot(request("GET", "/stats?slowest=101"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("slowest"));
}

// == Report Endpoint Tests ==

#[tokio::test]
async fn test_report_lists_operations() {
    let state = AppState::default();
    state.monitor.add_metric("export_pdf", 650);
    state.monitor.add_metric("export_pdf", 350);
    state.monitor.add_metric("login", 40);

    let response = create_test_app(&state)
        .oneshot(request("GET", "/report"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let text = body_to_text(response.into_body()).await;
    assert!(text.contains("Total samples: 3"));
    assert!(text.contains("Average: 500ms"));
    assert!(text.contains("1. export_pdf: 500ms"));
    assert!(text.contains("2. login: 40ms"));
}

#[tokio::test]
async fn test_report_when_empty() {
    let state = AppState::default();

    let response = create_test_app(&state)
        .oneshot(request("GET", "/report"))
        .await
        .unwrap();

    let text = body_to_text(response.into_body()).await;
    assert_eq!(text, "No performance metrics available");
}

#[tokio::test]
async fn test_clear_metrics() {
    let state = AppState::default();
    state.monitor.add_metric("search", 12);
    state.monitor.add_metric("search", 18);

    let response = create_test_app(&state)
        .oneshot(request("DELETE", "/metrics"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["removed"], 2);
    assert!(state.monitor.is_empty());
}

// == Cache Endpoint Tests ==

#[tokio::test]
async fn test_invalidate_namespace() {
    let state = AppState::default();
    load_inventory(&state, "inventory_all").await;
    load_inventory(&state, "inventory_low_stock").await;
    load_inventory(&state, "transfers_pending").await;

    let response = create_test_app(&state)
        .oneshot(request("DELETE", "/cache/inventory"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["removed"], 2);
    assert!(!state.cache.has("inventory_all").await);
    assert!(state.cache.has("transfers_pending").await);
}

#[tokio::test]
async fn test_clear_cache() {
    let state = AppState::default();
    state.cache.put("totals_stock", 1200u64).await;
    state.cache.put("stats_dashboard", "ok".to_string()).await;

    let response = create_test_app(&state)
        .oneshot(request("DELETE", "/cache"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.cache.size().await, 0);
}

// == Rate Limit Endpoint Tests ==

#[tokio::test]
async fn test_login_rate_limited_after_quota() {
    let state = AppState::default();
    let app = create_test_app(&state);

    for remaining in (0..5).rev() {
        let response = app
            .clone()
            .oneshot(request("POST", "/limits/user-42/login"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["allowed"], true);
        assert_eq!(json["remaining"], remaining);
    }

    let response = app
        .oneshot(request("POST", "/limits/user-42/login"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("user-42"));

    // Other actors keep their own quota
    assert!(state.limiter.is_allowed("user-43", "login"));
}

#[tokio::test]
async fn test_limits_inspect_and_reset() {
    let state = AppState::default();
    for _ in 0..3 {
        assert!(state.limiter.is_allowed("ana", "create_material"));
    }
    assert!(state.limiter.is_allowed("ana", "search"));

    let response = create_test_app(&state)
        .oneshot(request("GET", "/limits/ana"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["actor"], "ana");
    assert_eq!(json["operations"]["create_material"], 3);
    assert_eq!(json["operations"]["search"], 1);

    let response = create_test_app(&state)
        .oneshot(request("DELETE", "/limits/ana"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.limiter.stats("ana").is_empty());
    assert_eq!(state.limiter.remaining_operations("ana", "create_material"), 20);
}

#[tokio::test]
async fn test_check_surfaces_rate_limited_error() {
    let state = AppState::default();

    for _ in 0..5 {
        assert_ok!(state.limiter.check("bob", "export_pdf"));
    }

    let err = assert_err!(state.limiter.check("bob", "export_pdf"));
    assert!(matches!(err, SupportError::RateLimited { .. }));
}

// == Live Server Test ==

#[tokio::test]
async fn test_health_over_tcp() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(AppState::default());

    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let response = reqwest::get(format!("http://{}/health", addr))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["status"], "healthy");

    server.abort();
}
