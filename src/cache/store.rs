//! Cache Store Module
//!
//! Unsynchronized cache engine: HashMap storage with lazy per-namespace expiry.
//! [`ExpiringCache`](super::ExpiringCache) wraps it in a lock for shared use.

use std::any::Any;
use std::collections::HashMap;
use std::time::Instant;

use crate::cache::{namespace_of, CacheEntry, CacheStats, TtlPolicy};

// == Cache Store ==
/// Key-value storage where each entry expires after its namespace's TTL.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Namespace TTL table
    policy: TtlPolicy,
    /// Read counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store governed by `policy`.
    pub fn new(policy: TtlPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
            stats: CacheStats::new(),
        }
    }

    // == Put ==
    /// Stores a value, replacing any previous entry and restarting its TTL.
    pub fn put<T: Any + Send + Sync>(&mut self, key: String, value: T) {
        self.entries.insert(key, CacheEntry::new(value));
    }

    // == Get ==
    /// Retrieves a copy of a fresh value.
    ///
    /// Expired entries are removed and count as misses. An entry holding a
    /// different type reads as a miss but is left in place.
    pub fn get<T: Clone + 'static>(&mut self, key: &str) -> Option<T> {
        let value = self
            .fresh_entry(key)
            .and_then(|entry| entry.downcast::<T>());

        match value {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Contains ==
    /// Returns true if a fresh entry exists for `key`, whatever its type.
    pub fn contains(&mut self, key: &str) -> bool {
        let found = self.fresh_entry(key).is_some();
        if found {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        found
    }

    /// Looks up `key`, evicting it first if it has expired.
    fn fresh_entry(&mut self, key: &str) -> Option<&CacheEntry> {
        let ttl = self.policy.ttl_for_key(key);
        let expired = self.entries.get(key)?.is_expired(ttl);

        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key)
    }

    // == Remove ==
    /// Removes an entry by key. Returns whether something was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Invalidate Namespace ==
    /// Removes every `"{namespace}_..."` entry plus the bare `namespace` key.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_namespace(&mut self, namespace: &str) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|key, _| key != namespace && namespace_of_prefixed(key) != Some(namespace));
        before - self.entries.len()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let policy = &self.policy;
        let before = self.entries.len();

        self.entries
            .retain(|key, entry| !entry.is_expired_at(now, policy.ttl_for_key(key)));

        before - self.entries.len()
    }

    // == Stats ==
    /// Returns read counters and per-namespace entry counts.
    ///
    /// Counts include entries that have expired but not been swept yet.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.namespaces.clear();
        for key in self.entries.keys() {
            *stats
                .namespaces
                .entry(namespace_of(key).to_string())
                .or_insert(0) += 1;
        }
        stats.total_entries = self.entries.len();
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Namespace of a key that actually carries a `_` separator.
fn namespace_of_prefixed(key: &str) -> Option<&str> {
    key.split_once('_').map(|(namespace, _)| namespace)
}
