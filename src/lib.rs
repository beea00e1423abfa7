//! Inventory Support - in-process performance layer
//!
//! An expiring read-through cache, a sliding-window rate limiter and a
//! timing monitor, plus a small HTTP surface for inspecting them.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod limiter;
pub mod models;
pub mod monitor;
pub mod query;
pub mod tasks;

pub use api::AppState;
pub use cache::ExpiringCache;
pub use config::Config;
pub use error::{Result, SupportError};
pub use limiter::RateLimiter;
pub use monitor::PerformanceMonitor;
pub use query::cached_query;
pub use tasks::spawn_cleanup_task;
