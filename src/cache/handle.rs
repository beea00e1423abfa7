//! Shared, lock-guarded cache handle.

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore, TtlPolicy};

// == Expiring Cache ==
/// Thread-safe expiring cache shared by every task of the process.
///
/// Cloning is cheap and yields a handle to the same store. Every operation holds
/// the lock only for the map access itself.
#[derive(Debug, Clone, Default)]
pub struct ExpiringCache {
    store: Arc<Mutex<CacheStore>>,
}

impl ExpiringCache {
    /// Creates a cache using the standard namespace TTL table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache using a custom TTL table.
    pub fn with_policy(policy: TtlPolicy) -> Self {
        Self {
            store: Arc::new(Mutex::new(CacheStore::new(policy))),
        }
    }

    pub async fn put<T: Any + Send + Sync>(&self, key: impl Into<String>, value: T) {
        self.store.lock().await.put(key.into(), value);
    }

    /// Returns a copy of the value for `key` if present, fresh and a `T`.
    pub async fn get<T: Clone + Send + Sync + 'static>(&self, key: &str) -> Option<T> {
        self.store.lock().await.get(key)
    }

    /// Returns true if a fresh entry exists for `key`.
    pub async fn has(&self, key: &str) -> bool {
        self.store.lock().await.contains(key)
    }

    pub async fn invalidate(&self, key: &str) {
        self.store.lock().await.remove(key);
    }

    /// Drops every entry of `namespace`. Returns how many were removed.
    pub async fn invalidate_namespace(&self, namespace: &str) -> usize {
        let removed = self.store.lock().await.invalidate_namespace(namespace);
        debug!(namespace, removed, "cache namespace invalidated");
        removed
    }

    pub async fn clear(&self) {
        self.store.lock().await.clear();
        info!("cache cleared");
    }

    /// Sweeps expired entries. Returns how many were removed.
    ///
    /// Reads already skip stale entries, so this only reclaims memory.
    pub async fn cleanup(&self) -> usize {
        self.store.lock().await.cleanup_expired()
    }

    // == Get Or Compute ==
    /// Returns the cached value for `key`, or computes, stores and returns it.
    ///
    /// `compute` runs after the lock is released, so a slow fetch never blocks
    /// other cache users. Two concurrent misses on one key may therefore both
    /// compute; the later store wins. A failed computation is returned as is
    /// and leaves no entry behind.
    pub async fn get_or_compute<T, E, F, Fut>(&self, key: &str, compute: F) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.get::<T>(key).await {
            debug!(key, "cache hit");
            return Ok(value);
        }

        debug!(key, "cache miss");
        let value = compute().await?;
        self.put(key, value.clone()).await;
        Ok(value)
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    pub async fn size(&self) -> usize {
        self.store.lock().await.len()
    }
}
