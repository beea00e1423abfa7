//! Rate Limiter Module
//!
//! Sliding-window admission control per (actor, operation) pair.

mod limits;
mod rate_limiter;
mod window;


pub use limits::{RateLimits, DEFAULT_LIMIT};
pub use rate_limiter::{RateLimiter, DEFAULT_WINDOW};
pub use window::RateWindow;
