//! Retained - a keyed instance-reuse cache for component trees
//!
//! Decides, per render cycle, whether to reuse a previously materialized
//! component instance or create a new one, with LRU eviction and
//! deterministic teardown of discarded instances.

pub mod cache;
pub mod config;
pub mod error;
pub mod keep_alive;
pub mod vdom;

pub use config::Config;
pub use error::{CacheError, Result};
pub use keep_alive::KeepAlive;
