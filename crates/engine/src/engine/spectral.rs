//! Single-bin spectral analysis of delta history.
//!
//! This module evaluates the delta window at each candidate period with the
//! Goertzel recurrence, a single-bin discrete Fourier transform. It provides:
//! 1. **Coefficients:** One precomputed Goertzel coefficient per candidate,
//!    `2 * cos(2π * k / N)` with `k = N / P` and `N` the window length.
//! 2. **Detection:** The dominant period and its spectral power, with ties
//!    resolved toward the smaller period.
//!
//! Because every candidate period divides the window length exactly, a pure
//! periodic signal concentrates its energy in its own bin and contributes
//! nothing to the other candidate bins.

use crate::common::constants::{CANDIDATE_PERIODS, HISTORY_LEN};
use crate::engine::history::DeltaHistory;

/// Result of one spectral evaluation of a full delta window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    /// Dominant candidate period.
    pub period: usize,
    /// Spectral power in the dominant period's bin.
    pub power: f64,
}

/// Goertzel evaluator over the candidate period set.
///
/// Holds only the precomputed per-bin coefficients; evaluation is pure and
/// allocation-free.
#[derive(Clone, Debug)]
pub struct SpectralAnalyzer {
    /// Goertzel coefficient per candidate period.
    coeffs: [f64; CANDIDATE_PERIODS.len()],
}

impl SpectralAnalyzer {
    /// Creates an analyzer with coefficients for every candidate period.
    pub fn new() -> Self {
        let mut coeffs = [0.0; CANDIDATE_PERIODS.len()];
        for (coeff, &period) in coeffs.iter_mut().zip(CANDIDATE_PERIODS.iter()) {
            let bin = (HISTORY_LEN / period) as f64;
            *coeff = 2.0 * (std::f64::consts::TAU * bin / HISTORY_LEN as f64).cos();
        }
        Self { coeffs }
    }

    /// Evaluates one bin over the window with the Goertzel recurrence.
    ///
    /// State update is `s = x + coeff * s0 - s1`; the bin power after the
    /// final sample is `s0^2 + s1^2 - coeff * s0 * s1`.
    fn bin_power(coeff: f64, history: &DeltaHistory) -> f64 {
        let mut s0 = 0.0_f64;
        let mut s1 = 0.0_f64;
        for delta in history.iter() {
            let s = coeff.mul_add(s0, delta as f64) - s1;
            s1 = s0;
            s0 = s;
        }
        s0.mul_add(s0, s1.mul_add(s1, -(coeff * s0 * s1)))
    }

    /// Returns the dominant candidate period and its power.
    ///
    /// Candidates are scanned in ascending order and replaced only on
    /// strictly greater power, so equal-power ties resolve to the smaller
    /// period. The result is deterministic for identical windows.
    ///
    /// # Arguments
    ///
    /// * `history` - The delta window; callers evaluate full windows only.
    pub fn detect(&self, history: &DeltaHistory) -> Detection {
        let mut best = Detection {
            period: CANDIDATE_PERIODS[0],
            power: Self::bin_power(self.coeffs[0], history),
        };
        for (&coeff, &period) in self.coeffs.iter().zip(CANDIDATE_PERIODS.iter()).skip(1) {
            let power = Self::bin_power(coeff, history);
            if power > best.power {
                best = Detection { period, power };
            }
        }
        best
    }
}

impl Default for SpectralAnalyzer {
    /// Returns an analyzer over the standard candidate set.
    fn default() -> Self {
        Self::new()
    }
}
