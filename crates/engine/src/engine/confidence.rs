//! Prediction confidence counter.
//!
//! A saturating counter in `[0, CONFIDENCE_MAX]` scoring how well an entry's
//! recorded predictions have matched the deltas that followed. Matches earn
//! one point; mismatches cost two, so a stream that stops following its
//! pattern is demoted quickly. Hitting the floor is reported to the caller,
//! which clears the entry's pattern state in response.

use crate::common::constants::{CONFIDENCE_MAX, CONFIDENCE_STEP_DOWN, CONFIDENCE_STEP_UP};

/// Saturating prediction-confidence counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Confidence(u8);

impl Confidence {
    /// Creates a counter at zero; new entries start with no confidence.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Returns the current counter value.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns whether the counter has reached `threshold`.
    #[inline]
    pub const fn meets(self, threshold: u8) -> bool {
        self.0 >= threshold
    }

    /// Credits a verified prediction.
    pub fn record_match(&mut self) {
        self.0 = (self.0 + CONFIDENCE_STEP_UP).min(CONFIDENCE_MAX);
    }

    /// Debits a mispredicted delta.
    ///
    /// Returns true when the counter sits at zero afterwards, which obliges
    /// the caller to clear the entry's pattern state.
    pub fn record_mismatch(&mut self) -> bool {
        self.0 = self.0.saturating_sub(CONFIDENCE_STEP_DOWN);
        self.0 == 0
    }
}
