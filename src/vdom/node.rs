//! Render Node Module
//!
//! Defines the renderable-descriptor surface the cache operates on: a node
//! with optional construction options, a rebindable instance slot, and the
//! cache-managed marker.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::vdom::InstanceHandle;

// == Component Options ==
/// Construction options carried by a component-bearing render node.
#[derive(Debug, Clone)]
pub struct ComponentOptions {
    /// Stable unique id assigned to the constructor at registration time
    pub ctor_id: u64,
    /// Component type name; consulted by include/exclude filters and by
    /// the reuse guard on eviction
    pub type_name: String,
    /// Local registration tag, when the constructor was registered under
    /// a local name
    pub tag: Option<String>,
    /// Explicit identity assigned by the host template
    pub explicit_key: Option<String>,
}

// == Render Node ==
/// A lightweight description of what should be rendered, not yet (or no
/// longer) bound to a live instance.
///
/// `VNode` is a cheap cloneable handle: clones share one underlying node,
/// so an instance bound through one handle is visible through all of them.
/// The instance slot and the cache-managed flag are the only mutable parts.
#[derive(Clone)]
pub struct VNode {
    inner: Rc<NodeInner>,
}

struct NodeInner {
    /// Present only on component-bearing nodes
    options: Option<ComponentOptions>,
    /// Rebindable slot for the live instance
    instance: RefCell<Option<InstanceHandle>>,
    /// Marker telling the instantiation subsystem that the cache owns this
    /// instance's lifecycle
    cache_managed: Cell<bool>,
}

impl VNode {
    // == Constructors ==
    /// Creates a component-bearing node, not yet bound to an instance.
    pub fn component(options: ComponentOptions) -> Self {
        Self::new(Some(options))
    }

    /// Creates a plain node (element or text) with no component
    /// information. Plain nodes pass through the cache unmanaged.
    pub fn plain() -> Self {
        Self::new(None)
    }

    fn new(options: Option<ComponentOptions>) -> Self {
        Self {
            inner: Rc::new(NodeInner {
                options,
                instance: RefCell::new(None),
                cache_managed: Cell::new(false),
            }),
        }
    }

    // == Accessors ==
    /// Returns the construction options, if this node bears a component.
    pub fn component_options(&self) -> Option<&ComponentOptions> {
        self.inner.options.as_ref()
    }

    /// Returns the component type name, if this node bears a component.
    pub fn type_name(&self) -> Option<&str> {
        self.inner.options.as_ref().map(|o| o.type_name.as_str())
    }

    /// Returns a handle to the currently bound instance, if any.
    pub fn instance(&self) -> Option<InstanceHandle> {
        self.inner.instance.borrow().clone()
    }

    // == Instance Slot ==
    /// Binds a freshly constructed instance to this node.
    ///
    /// Called by the instantiation subsystem after a cache miss; the cached
    /// entry sees the binding too, since it holds a handle to this node.
    pub fn bind_instance(&self, instance: InstanceHandle) {
        *self.inner.instance.borrow_mut() = Some(instance);
    }

    /// Adopts the instance bound to `other`, replacing any binding here.
    ///
    /// This is the reuse step on a cache hit: afterwards both nodes are
    /// bound to the same instance and none was created or destroyed.
    /// Safe when `other` is this very node.
    pub fn adopt_instance_from(&self, other: &VNode) {
        let adopted = other.instance();
        *self.inner.instance.borrow_mut() = adopted;
    }

    // == Cache-Managed Flag ==
    /// Whether the cache owns this node's instance lifecycle.
    pub fn is_cache_managed(&self) -> bool {
        self.inner.cache_managed.get()
    }

    /// Marks the node as cache-managed so the instantiation subsystem
    /// suppresses re-construction and destructive unmount.
    pub fn mark_cache_managed(&self) {
        self.inner.cache_managed.set(true);
    }

    // == Identity ==
    /// Whether two handles refer to the same underlying node.
    pub fn same_node(&self, other: &VNode) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Whether this node's component type matches `other`'s.
    ///
    /// The comparison is the coarse type tag, not constructor identity;
    /// two nodes of one type count as matching even across registrations.
    pub fn same_component_type(&self, other: &VNode) -> bool {
        match (self.type_name(), other.type_name()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for VNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VNode")
            .field("type_name", &self.type_name())
            .field("has_instance", &self.instance().is_some())
            .field("cache_managed", &self.is_cache_managed())
            .finish()
    }
}

// == Child Extraction ==
/// Returns the first component-bearing node in a children list.
///
/// Only this node participates in caching; siblings pass through unmanaged.
pub fn first_component_child(children: &[VNode]) -> Option<&VNode> {
    children
        .iter()
        .find(|child| child.component_options().is_some())
}
