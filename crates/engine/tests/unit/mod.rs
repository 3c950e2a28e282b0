//! # Unit Components
//!
//! This module serves as the central hub for the engine's unit tests. It
//! organizes fine-grained tests for the configuration boundary, the
//! statistics report, and the prediction pipeline's components.

/// Unit tests for the configuration system.
///
/// Covers serde defaults for partial JSON configurations and every strict
/// validation error.
pub mod config;

/// Unit tests for the prediction pipeline components.
///
/// Covers the spectral analyzer, the pattern lock state machine, the
/// tracker table, and the end-to-end prediction gate.
pub mod engine;
