//! Cache Entry Module
//!
//! Defines a single cached slot: the last render node stored under a key,
//! and the disposal step applied when the entry is discarded.

use tracing::debug;

use crate::vdom::VNode;

// == Cache Entry ==
/// One live entry per cache key.
///
/// The entry holds the last descriptor stored under its key; the backing
/// instance is reached through that descriptor's instance slot.
#[derive(Debug)]
pub struct CacheEntry {
    /// The most recent render node stored under this key
    node: VNode,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry wrapping a component-bearing node.
    pub fn new(node: VNode) -> Self {
        Self { node }
    }

    // == Accessors ==
    /// Returns the cached render node.
    pub fn node(&self) -> &VNode {
        &self.node
    }

    /// Returns the cached component's type name.
    pub fn type_name(&self) -> Option<&str> {
        self.node.type_name()
    }

    // == Replace ==
    /// Replaces the stored node with a newer descriptor for the same key.
    ///
    /// Called on a cache hit after the incoming node has adopted the cached
    /// instance, so the entry always holds the freshest descriptor.
    pub fn replace_node(&mut self, node: VNode) {
        self.node = node;
    }

    // == Dispose ==
    /// Destroys the entry's backing instance unless it is being handed off.
    ///
    /// The instance survives only when `current` is present and its
    /// component type matches this entry's: in that case the instance is
    /// still in use by the active descriptor and must not be torn down.
    /// Consumes the entry, so an instance can never be disposed twice
    /// through the same entry.
    ///
    /// # Returns
    /// `true` if an instance was destroyed.
    pub fn dispose(self, current: Option<&VNode>) -> bool {
        let handed_off = current
            .map(|active| self.node.same_component_type(active))
            .unwrap_or(false);
        if handed_off {
            debug!(
                type_name = self.type_name(),
                "skipping destroy, instance handed off to active descriptor"
            );
            return false;
        }

        match self.node.instance() {
            Some(instance) => {
                debug!(type_name = self.type_name(), "destroying cached instance");
                instance.destroy();
                true
            }
            None => false,
        }
    }
}
