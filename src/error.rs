//! Error types for the support layer
//!
//! Provides unified error handling using thiserror.
//!
//! The cache, limiter and monitor never fail on their own. This type covers the
//! opt-in `?`-style admission check and the diagnostics API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Support Error Enum ==
/// Unified error type for the support layer.
#[derive(Error, Debug)]
pub enum SupportError {
    /// Actor exhausted its quota for an operation in the current window
    #[error("Rate limit exceeded for '{actor}' on '{operation}'")]
    RateLimited { actor: String, operation: String },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for SupportError {
    fn into_response(self) -> Response {
        let status = match &self {
            SupportError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            SupportError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the support layer.
pub type Result<T> = std::result::Result<T, SupportError>;
