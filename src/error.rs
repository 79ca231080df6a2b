//! Error types for the instance cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the instance cache.
///
/// Every variant is a configuration error: each surfaces once at setup,
/// never during a render cycle.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Capacity configured as zero; disabled caching is not supported
    #[error("Invalid capacity: max must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// Include/exclude filter contains an unusable type name
    #[error("Invalid filter pattern: {0}")]
    InvalidFilter(String),
}

// == Result Type Alias ==
/// Convenience Result type for the instance cache.
pub type Result<T> = std::result::Result<T, CacheError>;
