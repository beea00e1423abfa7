//! Response DTOs for the diagnostics API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::CacheStats;

/// One entry of the slowest-operations ranking
#[derive(Debug, Clone, Serialize)]
pub struct SlowOperation {
    pub operation: String,
    pub average_ms: u64,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Cache occupancy and read counters
    pub cache: CacheStats,
    /// Cache hit rate (hits / (hits + misses))
    pub cache_hit_rate: f64,
    /// Number of timing samples retained
    pub samples: usize,
    /// Slowest operations by mean duration
    pub slowest: Vec<SlowOperation>,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache stats and the monitor ranking
    pub fn new(cache: CacheStats, samples: usize, slowest: Vec<(String, u64)>) -> Self {
        Self {
            cache_hit_rate: cache.hit_rate(),
            cache,
            samples,
            slowest: slowest
                .into_iter()
                .map(|(operation, average_ms)| SlowOperation {
                    operation,
                    average_ms,
                })
                .collect(),
        }
    }
}

/// Response body for maintenance actions (DELETE /cache, /metrics, /limits)
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    /// Success message
    pub message: String,
    /// Entries removed, when the action reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<usize>,
}

impl ActionResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            removed: None,
        }
    }

    pub fn with_removed(mut self, removed: usize) -> Self {
        self.removed = Some(removed);
        self
    }
}

/// Response body for GET /limits/:actor
#[derive(Debug, Clone, Serialize)]
pub struct LimitsResponse {
    pub actor: String,
    /// In-window call count per operation
    pub operations: BTreeMap<String, u32>,
}

/// Response body for an admitted call (POST /limits/:actor/:operation)
#[derive(Debug, Clone, Serialize)]
pub struct AdmissionResponse {
    pub actor: String,
    pub operation: String,
    pub allowed: bool,
    /// Calls left in the current window after this one
    pub remaining: u32,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
