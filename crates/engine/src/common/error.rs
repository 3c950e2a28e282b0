//! Configuration validation errors.
//!
//! This module defines the typed errors surfaced by strict configuration
//! validation. The engine itself never faults at runtime; abnormal conditions
//! on the access path degrade to "no prediction". Errors exist only at the
//! configuration boundary, where an embedder or the CLI loads settings from
//! JSON and wants a precise reason for rejecting them.

use thiserror::Error;

/// Error raised by [`EngineConfig::validate`](crate::config::EngineConfig::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The tracker table must hold at least one entry.
    #[error("tracker table capacity must be nonzero")]
    ZeroTableCapacity,

    /// The spectral analysis interval must be at least one access.
    #[error("spectral analysis interval must be nonzero")]
    ZeroAnalysisInterval,

    /// The spectral power threshold must be a positive, finite value.
    #[error("spectral power threshold must be positive and finite, got {value}")]
    InvalidPowerThreshold {
        /// The rejected threshold value.
        value: f64,
    },

    /// Line and page sizes must be powers of two.
    #[error("{field} must be a power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending configuration field.
        field: &'static str,
        /// The rejected size in bytes.
        value: u64,
    },

    /// A cache line cannot be larger than a page.
    #[error("cache line ({line} bytes) cannot exceed page ({page} bytes)")]
    LineExceedsPage {
        /// Configured line size in bytes.
        line: u64,
        /// Configured page size in bytes.
        page: u64,
    },
}
