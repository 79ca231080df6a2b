//! Keep-Alive Node Module
//!
//! The composition-node contract that glues identity resolution and the
//! instance cache into one render pass. A host renderer creates one
//! `KeepAlive` per composition point, calls `render` once per cycle, and
//! calls `destroy` when the owning node is torn down.

use tracing::debug;

use crate::cache::{resolve_key, CacheStats, InstanceCache};
use crate::config::Config;
use crate::error::Result;
use crate::vdom::{first_component_child, VNode};

// == Keep-Alive Node ==
/// A single-child composition point that caches the instances of the
/// components rendered through it.
#[derive(Debug)]
pub struct KeepAlive {
    /// The cache owned by this node; no hidden or shared storage
    cache: InstanceCache,
    /// Validated filter and capacity settings
    config: Config,
}

impl KeepAlive {
    // == Creation ==
    /// Creates the node with an empty cache.
    ///
    /// Configuration problems (zero capacity, unusable filter names) are
    /// rejected here, once, so render cycles never re-check them.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cache: InstanceCache::new(config.max),
            config,
        })
    }

    // == Render Cycle ==
    /// Runs one render cycle over the node's children.
    ///
    /// The first component-bearing child participates in caching: its key
    /// is resolved, the cache is consulted, and on a hit the child adopts
    /// the cached instance. The child is then marked cache-managed so the
    /// instantiation subsystem leaves its lifecycle to this node.
    ///
    /// Children with no component content pass through unchanged, as does
    /// a component filtered out by the include/exclude configuration.
    ///
    /// # Returns
    /// The (possibly rebound) participating child, the first child when no
    /// component is present, or None for an empty children list.
    pub fn render(&mut self, children: &[VNode]) -> Option<VNode> {
        let Some(node) = first_component_child(children) else {
            return children.first().cloned();
        };

        let options = match node.component_options() {
            Some(options) => options,
            // Descriptors without construction options never participate
            None => return Some(node.clone()),
        };

        if !self.config.allows(&options.type_name) {
            debug!(
                type_name = options.type_name.as_str(),
                "filtered out, passing through unmanaged"
            );
            return Some(node.clone());
        }

        let key = resolve_key(options);
        if self.cache.lookup(&key).is_some() {
            self.cache.hit(&key, node);
        } else {
            self.cache.miss(key, node);
        }

        node.mark_cache_managed();
        Some(node.clone())
    }

    // == Teardown ==
    /// Tears the node down, pruning every cached entry.
    ///
    /// No current descriptor is passed: a cache-managed child's unmount is
    /// suppressed by the host, so every remaining instance must be
    /// destroyed here.
    pub fn destroy(&mut self) {
        debug!(entries = self.cache.len(), "tearing down instance cache");
        self.cache.prune_all(None);
    }

    // == Introspection ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Checks whether a key is currently cached.
    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains(key)
    }

    /// Iterates over cached keys, least recently used first.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &str> {
        self.cache.keys_by_recency()
    }
}
