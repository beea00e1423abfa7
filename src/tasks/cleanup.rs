//! Expiry Sweep Task
//!
//! Background task that periodically reclaims expired cache entries and idle
//! rate-limit windows.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::AppState;

/// Spawns a background task that periodically sweeps the cache and the
/// rate limiter.
///
/// Reads never depend on the sweep: expired entries and stale instants are
/// already ignored on access. The sweep only bounds memory.
///
/// # Arguments
/// * `state` - Shared application state
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let state = AppState::default();
/// let cleanup_handle = spawn_cleanup_task(state.clone(), 30);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(state: AppState, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiry sweep with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let entries = state.cache.cleanup().await;
            let windows = state.limiter.cleanup();

            if entries > 0 || windows > 0 {
                info!(
                    "Expiry sweep: removed {} cache entries and {} rate windows",
                    entries, windows
                );
            } else {
                debug!("Expiry sweep: nothing to remove");
            }
        }
    })
}
