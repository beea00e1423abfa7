//! Cache Statistics Module
//!
//! Entry counts per namespace plus hit/miss counters.

use std::collections::BTreeMap;

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache occupancy and read outcomes.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CacheStats {
    /// Number of reads that returned a fresh value
    pub hits: u64,
    /// Number of reads that found nothing usable (absent, expired, wrong type)
    pub misses: u64,
    /// Entry count per namespace
    pub namespaces: BTreeMap<String, usize>,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == As Map ==
    /// Flattens the counts into `namespace -> count` with an extra `"total"`.
    ///
    /// The `"total"` entry is written last, so it wins over a namespace that
    /// happens to be called `total`.
    pub fn as_map(&self) -> BTreeMap<String, usize> {
        let mut map = self.namespaces.clone();
        map.insert("total".to_string(), self.total_entries);
        map
    }
}
