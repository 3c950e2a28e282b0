//! Pattern lock state machine and phase-tracked replay.
//!
//! This module converts a stream of spectral detections into a replayable
//! delta pattern. It provides:
//! 1. **Stability Accounting:** Consecutive detections of the same candidate
//!    period build stability; a detection of a different period restarts it.
//! 2. **Pattern Capture:** Reaching the stability threshold copies the most
//!    recent cycle of deltas out of the history and locks onto it. A lock
//!    re-triggers on every further qualifying detection, so the replayed
//!    pattern drifts with the observed signal even after the period settles.
//! 3. **Replay:** The locked pattern is read out one delta per access, with
//!    the phase wrapping at the period.
//!
//! There are only two shapes of replay state, unlocked and locked, so the
//! state is a plain two-variant enum rather than anything dispatched.

use crate::common::constants::{MAX_PATTERN_LEN, STABILITY_LOCK};
use crate::engine::history::DeltaHistory;

/// Outcome of feeding one above-threshold detection into the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReinforceOutcome {
    /// Stability credited toward the current candidate; not enough to lock.
    Building,
    /// The stability threshold was reached from an unlocked state and a
    /// pattern was captured.
    Locked,
    /// An existing lock re-captured the freshest deltas and reset its phase.
    Refreshed,
    /// The dominant period changed; stability restarted at one and any
    /// existing lock was dropped.
    Switched {
        /// The candidate period abandoned, when one had been established.
        previous: Option<usize>,
    },
}

/// Lock state: either nothing trusted yet, or a captured pattern under replay.
#[derive(Clone, Debug, PartialEq, Eq)]
enum ReplayState {
    /// No pattern is trusted; no replay predictions are available.
    Unlocked,
    /// A pattern is locked and replayed cyclically.
    Locked {
        /// Length of the locked pattern.
        period: usize,
        /// Read position within the pattern; always below `period`.
        phase: usize,
        /// Captured deltas in chronological order; slots past `period` are
        /// unused.
        pattern: [i64; MAX_PATTERN_LEN],
    },
}

/// Per-entry pattern lock and replay state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternReplay {
    /// Candidate period the stability count refers to.
    candidate: Option<usize>,
    /// Consecutive above-threshold detections of `candidate`, saturating at
    /// the lock threshold.
    stability: u8,
    /// Current lock state.
    state: ReplayState,
}

impl PatternReplay {
    /// Creates an unlocked replay state with no candidate.
    pub const fn new() -> Self {
        Self {
            candidate: None,
            stability: 0,
            state: ReplayState::Unlocked,
        }
    }

    /// Returns the current stability count.
    #[inline]
    pub const fn stability(&self) -> u8 {
        self.stability
    }

    /// Returns the locked period, if a pattern is locked.
    pub const fn locked_period(&self) -> Option<usize> {
        match self.state {
            ReplayState::Locked { period, .. } => Some(period),
            ReplayState::Unlocked => None,
        }
    }

    /// Returns true while a pattern is locked.
    #[inline]
    pub const fn is_locked(&self) -> bool {
        matches!(self.state, ReplayState::Locked { .. })
    }

    /// Feeds one above-threshold detection into the state machine.
    ///
    /// Detections below the power threshold must not be fed here; they leave
    /// the state untouched by never reaching this call.
    ///
    /// # Arguments
    ///
    /// * `period` - The dominant candidate period of this detection.
    /// * `history` - The delta history patterns are captured from.
    pub fn reinforce(&mut self, period: usize, history: &DeltaHistory) -> ReinforceOutcome {
        if self.candidate == Some(period) {
            self.stability = (self.stability + 1).min(STABILITY_LOCK);
            if self.stability >= STABILITY_LOCK {
                let refreshing = self.is_locked();
                self.capture(period, history);
                if refreshing {
                    ReinforceOutcome::Refreshed
                } else {
                    ReinforceOutcome::Locked
                }
            } else {
                ReinforceOutcome::Building
            }
        } else {
            // A switch restarts stability from one; a stability count below
            // the lock threshold cannot sustain a lock, so any lock drops.
            let previous = self.candidate.replace(period);
            self.stability = 1;
            self.state = ReplayState::Unlocked;
            ReinforceOutcome::Switched { previous }
        }
    }

    /// Captures the most recent `period` deltas and locks at phase zero.
    fn capture(&mut self, period: usize, history: &DeltaHistory) {
        let mut pattern = [0_i64; MAX_PATTERN_LEN];
        for (slot, delta) in pattern.iter_mut().zip(history.recent(period)) {
            *slot = delta;
        }
        self.state = ReplayState::Locked {
            period,
            phase: 0,
            pattern,
        };
    }

    /// Returns the delta at the current phase of the locked pattern.
    pub fn predicted_delta(&self) -> Option<i64> {
        match &self.state {
            ReplayState::Locked { phase, pattern, .. } => Some(pattern[*phase]),
            ReplayState::Unlocked => None,
        }
    }

    /// Advances the replay phase, wrapping at the period. No-op when unlocked.
    pub fn advance(&mut self) {
        if let ReplayState::Locked { period, phase, .. } = &mut self.state {
            *phase = (*phase + 1) % *period;
        }
    }

    /// Clears all pattern state back to unlocked with no candidate.
    ///
    /// Used for the confidence-floor hard reset; re-detection starts from
    /// scratch while the delta history is retained by the caller.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for PatternReplay {
    /// Returns an unlocked replay state.
    fn default() -> Self {
        Self::new()
    }
}
