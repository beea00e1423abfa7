//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check namespace bookkeeping over arbitrary key sets.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::{namespace_of, CacheStore, TtlPolicy};

// == Strategies ==
/// Generates keys spread over a handful of namespaces, bare names included
fn key_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["inventory", "providers", "projects", "movements", "custom"]),
        prop::option::of("[a-z0-9]{1,8}"),
    )
        .prop_map(|(namespace, suffix)| match suffix {
            Some(suffix) => format!("{}_{}", namespace, suffix),
            None => namespace.to_string(),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Invalidating a namespace removes exactly the keys of that namespace
    #[test]
    fn prop_invalidate_namespace_is_exact(
        keys in prop::collection::vec(key_strategy(), 1..60),
        target in prop::sample::select(vec!["inventory", "providers", "custom"]),
    ) {
        let mut store = CacheStore::new(TtlPolicy::default());
        for key in &keys {
            store.put(key.clone(), key.len());
        }

        store.invalidate_namespace(target);

        let distinct: HashSet<&String> = keys.iter().collect();
        for key in distinct {
            let expect_present = namespace_of(key) != target;
            prop_assert_eq!(store.contains(key), expect_present, "key {}", key);
        }
    }

    // Per-namespace counts always add up to the total
    #[test]
    fn prop_stats_sum_to_total(keys in prop::collection::vec(key_strategy(), 0..60)) {
        let mut store = CacheStore::new(TtlPolicy::default());
        for key in &keys {
            store.put(key.clone(), ());
        }

        let stats = store.stats();
        let distinct: HashSet<&String> = keys.iter().collect();

        prop_assert_eq!(stats.total_entries, distinct.len());
        prop_assert_eq!(stats.namespaces.values().sum::<usize>(), stats.total_entries);
        prop_assert_eq!(stats.as_map()["total"], distinct.len());
    }

    // The last value written for a key is the one read back
    #[test]
    fn prop_last_write_wins(
        key in key_strategy(),
        values in prop::collection::vec(any::<u32>(), 1..10),
    ) {
        let mut store = CacheStore::new(TtlPolicy::default());
        for value in &values {
            store.put(key.clone(), *value);
        }

        prop_assert_eq!(store.get::<u32>(&key), values.last().copied());
        prop_assert_eq!(store.len(), 1);
    }
}
