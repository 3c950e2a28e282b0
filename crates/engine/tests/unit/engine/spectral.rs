//! Spectral Analyzer Tests.
//!
//! Verifies that the single-bin Goertzel evaluation identifies the period of
//! exactly periodic delta windows, that equal-power ties resolve to the
//! smaller candidate period, and that constant streams carry no spectral
//! signature.

use specfetch_core::common::constants::HISTORY_LEN;
use specfetch_core::engine::{DeltaHistory, SpectralAnalyzer};

/// Fills a full analysis window by repeating `pattern`.
fn window(pattern: &[i64]) -> DeltaHistory {
    let mut history = DeltaHistory::new();
    for i in 0..HISTORY_LEN {
        history.push(pattern[i % pattern.len()]);
    }
    history
}

// ══════════════════════════════════════════════════════════
// 1. Period identification
// ══════════════════════════════════════════════════════════

/// An alternating delta stream is identified as period 2.
///
/// The `[4, 8]` alternation is a ±2 oscillation around its mean; the mean
/// itself lands at DC, which is not a candidate bin, so the entire candidate
/// energy sits in the period-2 bin: `(2 · 24)² = 2304`.
#[test]
fn alternation_is_period_2() {
    let analyzer = SpectralAnalyzer::new();
    let detection = analyzer.detect(&window(&[4, 8]));
    assert_eq!(detection.period, 2);
    assert!(
        (detection.power - 2304.0).abs() < 1e-6,
        "expected 2304, got {}",
        detection.power
    );
}

/// A repeating three-delta cycle is identified as period 3.
#[test]
fn three_cycle_is_period_3() {
    let analyzer = SpectralAnalyzer::new();
    let detection = analyzer.detect(&window(&[1, 2, 3]));
    assert_eq!(detection.period, 3);
    assert!(detection.power > 100.0, "fundamental must clear the threshold");
}

/// A sampled cosine at each remaining candidate period lands in its own bin.
#[test]
fn cosine_windows_land_in_their_bins() {
    let analyzer = SpectralAnalyzer::new();
    let cases: [(&[i64], usize); 4] = [
        (&[5, 0, -5, 0], 4),
        (&[2, 1, -1, -2, -1, 1], 6),
        (&[4, 3, 0, -3, -4, -3, 0, 3], 8),
        (&[6, 5, 3, 0, -3, -5, -6, -5, -3, 0, 3, 5], 12),
    ];
    for (pattern, period) in cases {
        let detection = analyzer.detect(&window(pattern));
        assert_eq!(
            detection.period, period,
            "pattern {pattern:?} must detect period {period}"
        );
    }
}

/// A pure period-6 cosine of amplitude 2 scores `(2 · 24 / 2)² = 576`.
#[test]
fn exact_bin_power_for_pure_cosine() {
    let analyzer = SpectralAnalyzer::new();
    let detection = analyzer.detect(&window(&[2, 1, -1, -2, -1, 1]));
    assert_eq!(detection.period, 6);
    assert!(
        (detection.power - 576.0).abs() < 1e-6,
        "expected 576, got {}",
        detection.power
    );
}

// ══════════════════════════════════════════════════════════
// 2. Tie-break and degenerate windows
// ══════════════════════════════════════════════════════════

/// An all-zero window ties every bin at zero power; the smallest candidate
/// period wins.
#[test]
fn all_zero_window_ties_to_smallest_period() {
    let analyzer = SpectralAnalyzer::new();
    let detection = analyzer.detect(&window(&[0]));
    assert_eq!(detection.period, 2, "ties resolve to the smaller period");
    assert!(detection.power.abs() < 1e-9);
}

/// A constant nonzero stream is pure DC: no candidate bin sees energy, so
/// period 1 behavior is left entirely to the fast path.
#[test]
fn constant_stride_has_no_spectral_signature() {
    let analyzer = SpectralAnalyzer::new();
    let detection = analyzer.detect(&window(&[4]));
    assert_eq!(detection.period, 2, "degenerate argmax falls to period 2");
    assert!(
        detection.power.abs() < 1e-6,
        "DC must not leak into candidate bins, got {}",
        detection.power
    );
}

/// Detection is deterministic for identical windows.
#[test]
fn detection_is_deterministic() {
    let analyzer = SpectralAnalyzer::new();
    let history = window(&[2, 1, -1, -2, -1, 1]);
    let first = analyzer.detect(&history);
    let second = analyzer.detect(&history);
    assert_eq!(first, second);
}
