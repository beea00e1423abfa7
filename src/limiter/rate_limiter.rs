//! Shared sliding-window rate limiter.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{Result, SupportError};
use crate::limiter::{RateLimits, RateWindow};

/// Length of the sliding window.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Windows keyed by actor, then by operation.
type Records = HashMap<String, HashMap<String, RateWindow>>;

// == Rate Limiter ==
/// Admission control per (actor, operation) pair.
///
/// Cloning yields a handle to the same records. Every call holds the lock only
/// while it touches the record map, and never blocks waiting for quota.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    records: Arc<Mutex<Records>>,
    limits: Arc<RateLimits>,
    window: Duration,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimits::default())
    }
}

impl RateLimiter {
    /// Creates a limiter with a 60 second window.
    pub fn new(limits: RateLimits) -> Self {
        Self::with_window(limits, DEFAULT_WINDOW)
    }

    /// Creates a limiter with a custom window length.
    pub fn with_window(limits: RateLimits, window: Duration) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            limits: Arc::new(limits),
            window,
        }
    }

    pub fn limit_for(&self, operation: &str) -> u32 {
        self.limits.limit_for(operation)
    }

    /// Every critical section leaves the map consistent, so a poisoned lock is
    /// still safe to use.
    fn records(&self) -> MutexGuard<'_, Records> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Is Allowed ==
    /// Admits the call and counts it if the actor still has quota for `operation`.
    ///
    /// Check and increment happen under one lock, so concurrent callers can
    /// never overshoot the limit. A rejected call is not counted.
    pub fn is_allowed(&self, actor: &str, operation: &str) -> bool {
        self.admit(actor, operation).is_some()
    }

    // == Check ==
    /// Same as [`is_allowed`](Self::is_allowed), with rejection as an error.
    ///
    /// On admission returns the calls left in the window, read under the same
    /// lock that recorded this one.
    pub fn check(&self, actor: &str, operation: &str) -> Result<u32> {
        self.admit(actor, operation)
            .ok_or_else(|| SupportError::RateLimited {
                actor: actor.to_string(),
                operation: operation.to_string(),
            })
    }

    /// Admission core: remaining quota when admitted, `None` when rejected.
    fn admit(&self, actor: &str, operation: &str) -> Option<u32> {
        let limit = self.limit_for(operation);
        let now = Instant::now();

        let remaining = {
            let mut records = self.records();
            match records
                .get_mut(actor)
                .and_then(|operations| operations.get_mut(operation))
            {
                Some(window) => window.try_admit(now, self.window, limit),
                None => {
                    let mut window = RateWindow::new();
                    let remaining = window.try_admit(now, self.window, limit);
                    if remaining.is_some() {
                        records
                            .entry(actor.to_string())
                            .or_default()
                            .insert(operation.to_string(), window);
                    }
                    remaining
                }
            }
        };

        if remaining.is_none() {
            warn!(actor, operation, limit, "rate limit exceeded");
        }
        remaining
    }

    // == Remaining Operations ==
    /// Calls the actor may still make for `operation` in the current window.
    pub fn remaining_operations(&self, actor: &str, operation: &str) -> u32 {
        let limit = self.limit_for(operation);
        let now = Instant::now();

        let used = {
            let mut records = self.records();
            match records
                .get_mut(actor)
                .and_then(|operations| operations.get_mut(operation))
            {
                Some(window) => {
                    window.prune(now, self.window);
                    window.count()
                }
                None => 0,
            }
        };

        limit.saturating_sub(used)
    }

    // == Reset ==
    /// Forgets the actor's history for one operation.
    pub fn reset(&self, actor: &str, operation: &str) {
        let mut records = self.records();
        if let Some(operations) = records.get_mut(actor) {
            operations.remove(operation);
            if operations.is_empty() {
                records.remove(actor);
            }
        }
        debug!(actor, operation, "rate limit reset");
    }

    /// Forgets the actor's history for every operation.
    pub fn reset_user(&self, actor: &str) {
        self.records().remove(actor);
        debug!(actor, "rate limits reset for actor");
    }

    // == Cleanup ==
    /// Prunes every window and drops the ones left empty.
    ///
    /// Returns the number of (actor, operation) records dropped. Admission does
    /// not depend on this; it only bounds memory.
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let window = self.window;
        let mut removed = 0;

        let mut records = self.records();
        records.retain(|_, operations| {
            let before = operations.len();
            operations.retain(|_, record| {
                record.prune(now, window);
                !record.is_empty()
            });
            removed += before - operations.len();
            !operations.is_empty()
        });

        removed
    }

    // == Stats ==
    /// In-window call counts per operation for one actor.
    pub fn stats(&self, actor: &str) -> BTreeMap<String, u32> {
        let now = Instant::now();
        let mut records = self.records();

        let Some(operations) = records.get_mut(actor) else {
            return BTreeMap::new();
        };

        operations
            .iter_mut()
            .filter_map(|(operation, record)| {
                record.prune(now, self.window);
                (!record.is_empty()).then(|| (operation.clone(), record.count()))
            })
            .collect()
    }
}
