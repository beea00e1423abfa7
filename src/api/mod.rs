//! API Module
//!
//! HTTP handlers and routing for the diagnostics REST API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache statistics and slowest operations
//! - `GET /report` - Plain-text performance report
//! - `DELETE /cache`, `DELETE /cache/:namespace` - Cache invalidation
//! - `DELETE /metrics` - Drop timing samples
//! - `GET|DELETE /limits/:actor` - Inspect or reset an actor's quotas
//! - `POST /limits/:actor/:operation` - Admission check

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
