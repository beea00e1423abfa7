//! API Handlers
//!
//! HTTP request handlers for each diagnostics endpoint.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::cache::ExpiringCache;
use crate::config::Config;
use crate::error::{Result, SupportError};
use crate::limiter::RateLimiter;
use crate::models::{
    validate_identifier, ActionResponse, AdmissionResponse, HealthResponse, LimitsResponse,
    StatsQuery, StatsResponse,
};
use crate::monitor::PerformanceMonitor;

/// Application state shared across all handlers and background tasks.
///
/// The composition root of the process: one long-lived instance of each
/// component, handed to every consumer by cloning. Clones share state.
#[derive(Clone, Default)]
pub struct AppState {
    /// Expiring read-through cache
    pub cache: ExpiringCache,
    /// Per-actor admission control
    pub limiter: RateLimiter,
    /// Timing samples
    pub monitor: PerformanceMonitor,
}

impl AppState {
    /// Creates a new AppState from existing components.
    pub fn new(cache: ExpiringCache, limiter: RateLimiter, monitor: PerformanceMonitor) -> Self {
        Self {
            cache,
            limiter,
            monitor,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// TTL and rate-limit tables use their standard values.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ExpiringCache::new(),
            RateLimiter::default(),
            PerformanceMonitor::with_capacity(config.metrics_capacity),
        )
    }
}

fn require_identifier(field: &str, value: &str) -> Result<()> {
    match validate_identifier(field, value) {
        Some(message) => Err(SupportError::InvalidRequest(message)),
        None => Ok(()),
    }
}

/// Handler for GET /stats
///
/// Returns cache statistics and the slowest measured operations.
pub async fn stats_handler(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(SupportError::InvalidRequest(error_msg));
    }

    let cache = state.cache.stats().await;
    let slowest = state
        .monitor
        .slowest_operations(query.slowest_or_default());

    Ok(Json(StatsResponse::new(cache, state.monitor.len(), slowest)))
}

/// Handler for GET /report
///
/// Returns the performance report as plain text.
pub async fn report_handler(State(state): State<AppState>) -> String {
    state.monitor.generate_report()
}

/// Handler for DELETE /cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ActionResponse> {
    let removed = state.cache.size().await;
    state.cache.clear().await;

    Json(ActionResponse::new("Cache cleared").with_removed(removed))
}

/// Handler for DELETE /cache/:namespace
pub async fn invalidate_namespace_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
) -> Result<Json<ActionResponse>> {
    require_identifier("namespace", &namespace)?;

    let removed = state.cache.invalidate_namespace(&namespace).await;
    info!(namespace = %namespace, removed, "namespace invalidated via API");

    Ok(Json(
        ActionResponse::new(format!("Namespace '{}' invalidated", namespace))
            .with_removed(removed),
    ))
}

/// Handler for DELETE /metrics
pub async fn clear_metrics_handler(State(state): State<AppState>) -> Json<ActionResponse> {
    let removed = state.monitor.len();
    state.monitor.clear();
    info!(removed, "performance metrics cleared");

    Json(ActionResponse::new("Metrics cleared").with_removed(removed))
}

/// Handler for GET /limits/:actor
pub async fn limits_handler(
    State(state): State<AppState>,
    Path(actor): Path<String>,
) -> Result<Json<LimitsResponse>> {
    require_identifier("actor", &actor)?;

    let operations = state.limiter.stats(&actor);
    Ok(Json(LimitsResponse { actor, operations }))
}

/// Handler for DELETE /limits/:actor
pub async fn reset_limits_handler(
    State(state): State<AppState>,
    Path(actor): Path<String>,
) -> Result<Json<ActionResponse>> {
    require_identifier("actor", &actor)?;

    state.limiter.reset_user(&actor);
    Ok(Json(ActionResponse::new(format!(
        "Rate limits reset for '{}'",
        actor
    ))))
}

/// Handler for POST /limits/:actor/:operation
///
/// Runs an admission check; answers 429 once the quota is spent.
pub async fn admit_handler(
    State(state): State<AppState>,
    Path((actor, operation)): Path<(String, String)>,
) -> Result<Json<AdmissionResponse>> {
    require_identifier("actor", &actor)?;
    require_identifier("operation", &operation)?;

    let remaining = state.limiter.check(&actor, &operation)?;

    Ok(Json(AdmissionResponse {
        actor,
        operation,
        allowed: true,
        remaining,
    }))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
