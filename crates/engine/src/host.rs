//! Host-facing interface.
//!
//! This module defines the boundary between the engine and the cache that
//! embeds it. It provides:
//! 1. **Requests:** The line-aligned prefetch request and its fill level.
//! 2. **Occupancy Probe:** A trait the host implements so the engine can see
//!    how full the prefetch queue is before choosing a fill level.
//!
//! The engine only ever queries the host while emitting a request; withheld
//! predictions cost the host nothing.

/// Cache level a prefetch request should fill into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillLevel {
    /// Innermost cache level; used for high-confidence requests while the
    /// host queue has headroom.
    Near,
    /// Next level out; the conservative default.
    Far,
}

/// A single prefetch request produced by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrefetchRequest {
    /// Line-aligned target byte address, always in the same page as the
    /// access that produced it.
    pub target: u64,
    /// Cache level the line should be installed into.
    pub fill: FillLevel,
}

/// Interface the engine uses to inspect host cache state.
///
/// Implemented by the embedding simulator; mocked in tests.
pub trait CacheHost {
    /// Returns the fraction of the host prefetch queue in use, in `0.0..=1.0`.
    fn occupancy(&self) -> f64;
}
