//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached value together with the instant it was stored.
///
/// Values are type-erased so one cache can memoize results of different
/// queries; readers recover the concrete type with [`CacheEntry::downcast`].
#[derive(Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: Arc<dyn Any + Send + Sync>,
    /// When the value was stored
    pub stored_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            stored_at: Instant::now(),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl` as of `now`.
    ///
    /// An entry whose age equals the TTL exactly is still fresh; it expires once
    /// the age strictly exceeds the TTL.
    pub fn is_expired_at(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) > ttl
    }

    /// Checks if the entry has outlived `ttl` as of now.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.is_expired_at(Instant::now(), ttl)
    }

    // == Downcast ==
    /// Returns a copy of the value if it is a `T`.
    pub fn downcast<T: Clone + 'static>(&self) -> Option<T> {
        self.value.downcast_ref::<T>().cloned()
    }
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("stored_at", &self.stored_at)
            .finish_non_exhaustive()
    }
}
