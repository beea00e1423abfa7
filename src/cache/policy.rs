//! TTL policy per key namespace.

use std::collections::HashMap;
use std::time::Duration;

/// TTL applied to namespaces missing from the table.
pub const DEFAULT_TTL: Duration = Duration::from_millis(30_000);

/// Returns the namespace of a key: everything before the first `_`, or the
/// whole key when it has no `_`.
pub fn namespace_of(key: &str) -> &str {
    key.split_once('_').map_or(key, |(namespace, _)| namespace)
}

// == TTL Policy ==
/// Maps namespaces to time-to-live durations.
///
/// Unknown namespaces fall back to the default TTL instead of failing, so a
/// new call site cannot break by forgetting to register its namespace.
#[derive(Debug, Clone)]
pub struct TtlPolicy {
    ttls: HashMap<String, Duration>,
    default_ttl: Duration,
}

impl TtlPolicy {
    /// Creates an empty policy where every namespace uses `default_ttl`.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            ttls: HashMap::new(),
            default_ttl,
        }
    }

    /// Sets the TTL for one namespace.
    pub fn with_ttl(mut self, namespace: impl Into<String>, ttl: Duration) -> Self {
        self.ttls.insert(namespace.into(), ttl);
        self
    }

    /// TTL for a namespace.
    pub fn ttl_for(&self, namespace: &str) -> Duration {
        self.ttls.get(namespace).copied().unwrap_or(self.default_ttl)
    }

    /// TTL for a full key, resolved through its namespace.
    pub fn ttl_for_key(&self, key: &str) -> Duration {
        self.ttl_for(namespace_of(key))
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
            .with_ttl("inventory", Duration::from_millis(30_000))
            .with_ttl("providers", Duration::from_millis(60_000))
            .with_ttl("projects", Duration::from_millis(60_000))
            .with_ttl("transfers", Duration::from_millis(30_000))
            .with_ttl("movements", Duration::from_millis(20_000))
            .with_ttl("totals", Duration::from_millis(15_000))
            .with_ttl("stats", Duration::from_millis(30_000))
    }
}
