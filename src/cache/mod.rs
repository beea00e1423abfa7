//! Cache Module
//!
//! Provides in-memory caching with per-namespace TTL expiration.
//!
//! Keys follow the `"{namespace}_{discriminator}"` convention. The namespace picks
//! the entry's TTL and groups entries for bulk invalidation.

mod entry;
mod handle;
mod policy;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use handle::ExpiringCache;
pub use policy::{namespace_of, TtlPolicy, DEFAULT_TTL};
pub use stats::CacheStats;
pub use store::CacheStore;
