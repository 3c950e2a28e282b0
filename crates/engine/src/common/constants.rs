//! Fixed Algorithm Constants.
//!
//! This module defines the design constants of the spectral engine. It includes:
//! 1. **Window Constants:** Delta history length and the candidate period set.
//! 2. **Confidence Constants:** Counter range, step sizes, and decision thresholds.
//! 3. **Gating Constants:** Stability requirement, fast-path run length, and the
//!    near-fill occupancy limit.
//!
//! These values are properties of the algorithm, not tunables: the history
//! length is the least common multiple of the candidate periods, so every
//! candidate divides the analysis window evenly and a periodic signal lands
//! exactly on its own spectral bin.

/// Number of delta samples retained per tracked instruction pointer.
pub const HISTORY_LEN: usize = 24;

/// Candidate pattern periods examined by the spectral analyzer.
///
/// Every member divides [`HISTORY_LEN`], which keeps the single-bin Goertzel
/// evaluation leakage-free for signals at exactly these periods.
pub const CANDIDATE_PERIODS: [usize; 6] = [2, 3, 4, 6, 8, 12];

/// Longest replayable pattern, equal to the largest candidate period.
pub const MAX_PATTERN_LEN: usize = 12;

/// Number of identical trailing nonzero deltas that arms the fast path.
pub const FAST_PATH_RUN: usize = 4;

/// Consecutive above-threshold detections of one period required to lock.
pub const STABILITY_LOCK: u8 = 3;

/// Upper bound of the prediction confidence counter.
pub const CONFIDENCE_MAX: u8 = 7;

/// Confidence gained per verified prediction.
pub const CONFIDENCE_STEP_UP: u8 = 1;

/// Confidence lost per mispredicted delta.
pub const CONFIDENCE_STEP_DOWN: u8 = 2;

/// Minimum confidence for replay-path predictions to issue requests.
pub const ISSUE_MIN_CONFIDENCE: u8 = 3;

/// Minimum confidence for a request to fill the near (innermost) level.
pub const NEAR_MIN_CONFIDENCE: u8 = 5;

/// Host queue occupancy at or above which fills demote to the far level.
pub const NEAR_OCCUPANCY_LIMIT: f64 = 0.5;

/// Default cache line size in bytes.
pub const LINE_BYTES: u64 = 64;

/// Default page size in bytes (4 KiB).
pub const PAGE_BYTES: u64 = 4096;
