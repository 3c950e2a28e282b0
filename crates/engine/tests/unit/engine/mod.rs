//! Unit tests for the prediction pipeline components.


/// Tests for the pattern lock state machine and replay.
pub mod replay;

/// Tests for the single-bin Goertzel period detector.
pub mod spectral;
