//! Per-stream delta history.
//!
//! The delta history is a fixed circular buffer holding the most recent
//! cache-line deltas observed under one instruction pointer. It provides:
//! 1. **Recording:** Constant-time append that overwrites the oldest sample.
//! 2. **Chronological Iteration:** Oldest-to-newest traversal for the
//!    spectral analyzer and for pattern capture.
//! 3. **Run Detection:** The trailing equal-nonzero-delta check that arms the
//!    constant-stride fast path.
//!
//! The capacity is [`HISTORY_LEN`], the least common multiple of all
//! candidate periods, so a full window contains a whole number of cycles of
//! any candidate pattern. History is never cleared by downstream state
//! changes; only entry recycling discards it.

use crate::common::constants::HISTORY_LEN;

/// Circular buffer of the most recent signed cache-line deltas.
#[derive(Clone, Debug)]
pub struct DeltaHistory {
    /// Fixed sample storage.
    samples: [i64; HISTORY_LEN],
    /// Index where the next sample will be written.
    head: usize,
    /// Number of valid samples (saturates at capacity).
    count: usize,
}

impl DeltaHistory {
    /// Creates an empty history.
    pub const fn new() -> Self {
        Self {
            samples: [0; HISTORY_LEN],
            head: 0,
            count: 0,
        }
    }

    /// Appends a delta, overwriting the oldest sample once full.
    ///
    /// Every observed delta is recorded, including zero (a same-line
    /// re-access) and negative strides.
    pub const fn push(&mut self, delta: i64) {
        self.samples[self.head] = delta;
        self.head = (self.head + 1) % HISTORY_LEN;
        if self.count < HISTORY_LEN {
            self.count += 1;
        }
    }

    /// Returns the number of valid samples.
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no samples have been recorded.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true once the full analysis window is populated.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.count == HISTORY_LEN
    }

    /// Iterates the valid samples in chronological order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        let start = (self.head + HISTORY_LEN - self.count) % HISTORY_LEN;
        (0..self.count).map(move |i| self.samples[(start + i) % HISTORY_LEN])
    }

    /// Iterates the most recent `n` samples in chronological order.
    ///
    /// Yields fewer than `n` items when the history is still filling.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = i64> + '_ {
        let skip = self.count.saturating_sub(n);
        self.iter().skip(skip)
    }

    /// Reports the stride of a trailing run of `n` equal nonzero deltas.
    ///
    /// Returns `None` when fewer than `n` samples exist, the trailing samples
    /// differ, or the repeated value is zero. Zero is excluded so same-line
    /// churn never looks like a stride.
    pub fn recent_run(&self, n: usize) -> Option<i64> {
        if n == 0 || self.count < n {
            return None;
        }
        let mut tail = self.recent(n);
        let first = tail.next()?;
        if first != 0 && tail.all(|d| d == first) {
            Some(first)
        } else {
            None
        }
    }
}

impl Default for DeltaHistory {
    /// Returns an empty history.
    fn default() -> Self {
        Self::new()
    }
}
