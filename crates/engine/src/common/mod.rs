//! Common utilities and types used throughout the prefetch engine.
//!
//! This module provides fundamental building blocks shared across all components
//! of the engine. It includes:
//! 1. **Line Geometry:** Cache-line and page arithmetic over raw byte addresses.
//! 2. **Constants:** Fixed algorithm parameters (window length, candidate periods,
//!    confidence thresholds).
//! 3. **Error Handling:** Typed configuration validation errors.

/// Cache-line and page geometry helpers.
pub mod addr;

/// Fixed algorithm constants used throughout the engine.
pub mod constants;

/// Configuration validation error types.
pub mod error;

pub use addr::LineGeometry;
pub use constants::{CANDIDATE_PERIODS, HISTORY_LEN, MAX_PATTERN_LEN};
pub use error::ConfigError;
