//! Error types for the caching layer
//!
//! Lookups never fail: a miss is reported as `None`. The variants here cover
//! configuration and key-building input that is rejected up front.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for configuration and key-building failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Configuration value is out of range or could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Calculation-type tag is not one of the known kinds
    #[error("Unknown calculation type: {0}")]
    InvalidCalculationType(String),

    /// Eviction-policy tag is not one of the known policies
    #[error("Unknown eviction policy: {0}")]
    InvalidPolicy(String),

    /// Memoized-function arguments could not be rendered into a key
    #[error("Cannot derive memo key: {0}")]
    InvalidMemoKey(String),
}

// == Result Type Alias ==
/// Convenience Result type for the caching layer.
pub type Result<T> = std::result::Result<T, CacheError>;
