//! Read-through cached, timed queries.
//!
//! The usual way callers reach the remote document store: serve from the
//! cache when possible, otherwise time the fetch and cache its result.

use std::future::Future;

use crate::cache::ExpiringCache;
use crate::monitor::PerformanceMonitor;

/// Operation name under which the fetch for `key` is timed.
pub fn query_operation_name(key: &str) -> String {
    format!("query_{}", key)
}

/// Returns the cached value for `key`, or runs `fetch`, timing it as
/// `query_{key}`, and caches a successful result.
///
/// Cache hits record no sample. A failed fetch records no sample, caches
/// nothing and is returned unchanged.
pub async fn cached_query<T, E, F, Fut>(
    cache: &ExpiringCache,
    monitor: &PerformanceMonitor,
    key: &str,
    fetch: F,
) -> Result<T, E>
where
    T: Clone + Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let operation = query_operation_name(key);
    cache
        .get_or_compute(key, || monitor.try_measure(&operation, fetch()))
        .await
}
