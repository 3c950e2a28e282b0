//! Spectral cache-prefetch engine library.
//!
//! This crate implements a frequency-domain prefetch engine for memory-system
//! simulators with the following:
//! 1. **Tracking:** Bounded per-instruction-pointer state with FIFO recycling.
//! 2. **Analysis:** Single-bin Goertzel evaluation of recent delta history at a
//!    fixed set of candidate periods.
//! 3. **Replay:** Stability-gated pattern capture and phase-tracked replay of
//!    the locked delta sequence.
//! 4. **Gating:** Confidence-scored, page-bounded emission of at most one
//!    prefetch request per access.
//! 5. **Reporting:** Running counters and a final snapshot (paths, accuracy,
//!    locked-period histogram).

/// Common types and constants (line geometry, algorithm limits, errors).
pub mod common;
/// Engine configuration (defaults, validation, serde structures).
pub mod config;
/// The prefetch engine (history, analyzer, replay, tracker, pipeline).
pub mod engine;
/// Host-facing interface (requests, fill levels, occupancy probe).
pub mod host;
/// Prefetch statistics collection and reporting.
pub mod stats;

/// Engine configuration type; use `EngineConfig::default()` or deserialize from JSON.
pub use crate::config::EngineConfig;
/// The spectral prefetch engine; construct with `SpectralPrefetcher::new`.
pub use crate::engine::SpectralPrefetcher;
/// Trait implemented by prefetch engines; drives the observe/fill/tick/finalize cycle.
pub use crate::engine::Prefetcher;
/// Host interface types re-exported for embedders.
pub use crate::host::{CacheHost, FillLevel, PrefetchRequest};
/// Final statistics snapshot returned by `Prefetcher::finalize`.
pub use crate::stats::PrefetchReport;
