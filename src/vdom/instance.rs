//! Backing Instance Module
//!
//! The seam between the cache and the component instantiation subsystem.
//! The cache never constructs instances; it only rebinds handles on reuse
//! and destroys instances it discards.

use std::rc::Rc;

// == Backing Instance ==
/// A live, stateful component instance bound behind a render node.
///
/// Instances are expensive to create and cheap to rebind, which is the
/// whole reason the cache exists.
pub trait BackingInstance {
    /// Releases the instance's resources and runs its teardown hooks.
    ///
    /// Called only from eviction and full cache teardown, at most once per
    /// instance. An instance whose component type matches the currently
    /// active descriptor is handed off rather than destroyed.
    fn destroy(&self);
}

// == Instance Handle ==
/// Shared handle to a backing instance.
///
/// The cache and the live tree may hold the same instance at the same time;
/// the handle makes rebinding a pointer copy.
pub type InstanceHandle = Rc<dyn BackingInstance>;
