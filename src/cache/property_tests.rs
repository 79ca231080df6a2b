//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the structural invariants the cache must keep
//! across arbitrary render/evict sequences.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::cache::InstanceCache;
use crate::vdom::testing::CountingInstance;
use crate::vdom::{ComponentOptions, VNode};

// == Strategies ==
/// Generates keys from a small pool so sequences revisit keys often.
fn key_strategy() -> impl Strategy<Value = String> {
    "k[0-4]".prop_map(|s| s)
}

/// One step of cache traffic.
#[derive(Debug, Clone)]
enum CacheOp {
    /// A render cycle for the given key: lookup, then hit or miss
    Render { key: String },
    /// An explicit eviction with no active descriptor
    Evict { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => key_strategy().prop_map(|key| CacheOp::Render { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Evict { key }),
    ]
}

// == Helpers ==
/// Builds a component node whose type is unique to its key, so the
/// hand-off guard never suppresses a destroy in these sequences.
fn node_for_key(key: &str) -> VNode {
    VNode::component(ComponentOptions {
        ctor_id: 1,
        type_name: format!("type_{}", key),
        tag: None,
        explicit_key: Some(key.to_string()),
    })
}

/// Runs one render cycle against the cache, binding a fresh counting
/// instance on a miss. Returns the destroy counter for a created instance.
fn render_once(cache: &mut InstanceCache, key: &str) -> Option<Rc<Cell<u32>>> {
    let node = node_for_key(key);
    if cache.lookup(key).is_some() {
        cache.hit(key, &node);
        None
    } else {
        let (instance, destroys) = CountingInstance::create();
        node.bind_instance(instance);
        cache.miss(key.to_string(), &node);
        Some(destroys)
    }
}

/// Checks that the recency queue and the entry map describe the same key
/// set, with no duplicates.
fn assert_map_and_order_in_sync(cache: &InstanceCache) -> Result<(), TestCaseError> {
    let ordered: Vec<&str> = cache.keys_by_recency().collect();
    let unique: HashSet<&str> = ordered.iter().copied().collect();

    prop_assert_eq!(ordered.len(), unique.len(), "recency queue holds duplicates");
    prop_assert_eq!(ordered.len(), cache.len(), "queue and map sizes differ");
    for key in ordered {
        prop_assert!(cache.contains(key), "queued key '{}' missing from map", key);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // *For any* sequence of render and evict operations, the entry map and
    // the recency queue describe exactly the same key set after every step.
    #[test]
    fn prop_map_and_order_stay_in_sync(
        capacity in proptest::option::of(1usize..4),
        ops in prop::collection::vec(cache_op_strategy(), 1..60)
    ) {
        let mut cache = InstanceCache::new(capacity);

        for op in ops {
            match op {
                CacheOp::Render { key } => { render_once(&mut cache, &key); }
                CacheOp::Evict { key } => { cache.evict(&key, None); }
            }
            assert_map_and_order_in_sync(&cache)?;
        }
    }

    // *For any* sequence of render cycles, the number of cached entries
    // never exceeds the configured capacity.
    #[test]
    fn prop_capacity_never_exceeded(
        capacity in 1usize..4,
        keys in prop::collection::vec(key_strategy(), 1..60)
    ) {
        let mut cache = InstanceCache::new(Some(capacity));

        for key in keys {
            render_once(&mut cache, &key);
            prop_assert!(
                cache.len() <= capacity,
                "cache size {} exceeds capacity {}",
                cache.len(),
                capacity
            );
        }
    }

    // *For any* sequence of operations followed by a full prune, every
    // instance the cache ever created is destroyed exactly once: no leaks,
    // no double-destroys.
    #[test]
    fn prop_every_instance_destroyed_exactly_once(
        capacity in proptest::option::of(1usize..4),
        ops in prop::collection::vec(cache_op_strategy(), 1..60)
    ) {
        let mut cache = InstanceCache::new(capacity);
        let mut counters: Vec<Rc<Cell<u32>>> = Vec::new();

        for op in ops {
            match op {
                CacheOp::Render { key } => {
                    if let Some(destroys) = render_once(&mut cache, &key) {
                        counters.push(destroys);
                    }
                }
                CacheOp::Evict { key } => { cache.evict(&key, None); }
            }
            // Mid-sequence, nothing may ever be destroyed twice
            for destroys in &counters {
                prop_assert!(destroys.get() <= 1, "instance destroyed twice");
            }
        }

        cache.prune_all(None);

        prop_assert!(cache.is_empty());
        for destroys in &counters {
            prop_assert_eq!(destroys.get(), 1, "instance leaked or double-destroyed");
        }
    }

    // *For any* sequence of render cycles, hit and miss counters add up to
    // the number of cycles and the entry count matches the map.
    #[test]
    fn prop_stats_accuracy(
        keys in prop::collection::vec(key_strategy(), 1..60)
    ) {
        let mut cache = InstanceCache::new(None);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for key in &keys {
            if cache.lookup(key).is_some() {
                expected_hits += 1;
            } else {
                expected_misses += 1;
            }
            render_once(&mut cache, key);
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits, "hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "misses mismatch");
        prop_assert_eq!(stats.total_entries, cache.len(), "total entries mismatch");
    }

    // *For any* render sequence, the key just rendered sits at the
    // most-recently-used end of the queue.
    #[test]
    fn prop_rendered_key_becomes_most_recent(
        keys in prop::collection::vec(key_strategy(), 1..40)
    ) {
        let mut cache = InstanceCache::new(None);

        for key in &keys {
            render_once(&mut cache, key);
            let last = cache.keys_by_recency().last().map(str::to_string);
            prop_assert_eq!(last.as_deref(), Some(key.as_str()));
        }
    }
}
