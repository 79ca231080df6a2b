//! Instance Cache Module
//!
//! Main cache engine combining HashMap storage with recency tracking and
//! capacity-bounded eviction of component instances.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, RecencyTracker};
use crate::vdom::VNode;

// == Instance Cache ==
/// Keyed storage for reusable component instances with LRU eviction.
///
/// The entry map and the recency tracker always hold exactly the same key
/// set; every mutation updates both before returning.
#[derive(Debug)]
pub struct InstanceCache {
    /// Key to cached entry storage
    entries: HashMap<String, CacheEntry>,
    /// Recency order over the same keys, oldest first
    recency: RecencyTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of distinct keys; None = unbounded
    capacity: Option<usize>,
}

impl InstanceCache {
    // == Constructor ==
    /// Creates a new cache with an optional capacity bound.
    ///
    /// A zero capacity is rejected by configuration validation and never
    /// reaches this constructor through the public surface.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyTracker::new(),
            stats: CacheStats::new(),
            capacity,
        }
    }

    // == Lookup ==
    /// Returns the entry cached under `key`, if any. No side effects.
    pub fn lookup(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Hit ==
    /// Reuses the cached instance for `key`: rebinds `node` to it, stores
    /// `node` as the freshest descriptor, and promotes the key to most
    /// recently used.
    ///
    /// No instance is created or destroyed. Callers invoke this only after
    /// a successful `lookup`; an absent key is a no-op.
    pub fn hit(&mut self, key: &str, node: &VNode) {
        if let Some(entry) = self.entries.get_mut(key) {
            node.adopt_instance_from(entry.node());
            entry.replace_node(node.clone());
            self.recency.touch(key);
            self.stats.record_hit();
            debug!(key, "cache hit, instance reused");
        }
    }

    // == Miss ==
    /// Stores `node` as a new entry under `key`, appends the key as most
    /// recently used, and enforces the capacity bound.
    pub fn miss(&mut self, key: String, node: &VNode) {
        debug!(key = key.as_str(), "cache miss, storing entry");
        self.entries.insert(key.clone(), CacheEntry::new(node.clone()));
        self.recency.touch(&key);
        self.stats.record_miss();
        self.stats.set_total_entries(self.entries.len());
        self.enforce_capacity(node);
    }

    // == Evict ==
    /// Removes `key` from the map and the recency queue, then disposes of
    /// the detached entry: its instance is destroyed unless its component
    /// type matches `current` (hand-off to the active descriptor).
    ///
    /// # Returns
    /// `true` if an entry was removed.
    pub fn evict(&mut self, key: &str, current: Option<&VNode>) -> bool {
        match self.detach(key) {
            Some(entry) => {
                if entry.dispose(current) {
                    self.stats.record_destroy();
                }
                self.stats.set_total_entries(self.entries.len());
                true
            }
            None => false,
        }
    }

    // == Prune All ==
    /// Evicts every entry, applying the per-entry hand-off guard; used on
    /// full cache teardown. Afterwards the cache is empty.
    pub fn prune_all(&mut self, current: Option<&VNode>) {
        let keys: Vec<String> = self.recency.iter().map(str::to_string).collect();
        for key in keys {
            self.evict(&key, current);
        }
    }

    // == Capacity Enforcement ==
    /// Evicts the oldest key when the bound is exceeded.
    ///
    /// The just-stored key sits at the recency tail, so with capacity >= 1
    /// (enforced at configuration) the victim is never the active key.
    fn enforce_capacity(&mut self, active: &VNode) {
        let Some(capacity) = self.capacity else {
            return;
        };
        if self.entries.len() <= capacity {
            return;
        }
        if let Some(victim) = self.recency.peek_oldest().cloned() {
            debug!(key = victim.as_str(), "capacity exceeded, evicting oldest");
            if self.evict(&victim, Some(active)) {
                self.stats.record_eviction();
            }
        }
    }

    // == Detach ==
    /// Removes an entry from the map and the recency queue in one step,
    /// without disposing of it. Both structures stay in sync.
    fn detach(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.recency.remove(key);
        Some(entry)
    }

    // == Introspection ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks whether `key` is cached.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over cached keys, least recently used first.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &str> {
        self.recency.iter()
    }
}
