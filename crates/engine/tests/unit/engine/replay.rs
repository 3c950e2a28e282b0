//! Pattern Replay Tests.
//!
//! Verifies the stability accounting, pattern capture, phase-tracked replay,
//! lock refresh, period switching, and the hard reset of the replay state
//! machine.

use specfetch_core::engine::replay::ReinforceOutcome;
use specfetch_core::engine::{DeltaHistory, PatternReplay};

/// Builds a history from a delta slice.
fn history_of(deltas: &[i64]) -> DeltaHistory {
    let mut history = DeltaHistory::new();
    for &delta in deltas {
        history.push(delta);
    }
    history
}

// ══════════════════════════════════════════════════════════
// 1. Stability accounting
// ══════════════════════════════════════════════════════════

/// The first detection establishes a candidate without a previous period.
#[test]
fn first_detection_establishes_candidate() {
    let mut replay = PatternReplay::new();
    let history = history_of(&[4, 8, 4, 8]);

    let outcome = replay.reinforce(2, &history);
    assert_eq!(outcome, ReinforceOutcome::Switched { previous: None });
    assert_eq!(replay.stability(), 1);
    assert!(!replay.is_locked(), "one detection must not lock");
    assert_eq!(replay.predicted_delta(), None);
}

/// Three agreeing detections lock; the pattern is the freshest cycle.
#[test]
fn three_agreeing_detections_lock() {
    let mut replay = PatternReplay::new();
    let history = history_of(&[4, 8, 4, 8, 4, 8]);

    assert_eq!(
        replay.reinforce(2, &history),
        ReinforceOutcome::Switched { previous: None }
    );
    assert_eq!(replay.reinforce(2, &history), ReinforceOutcome::Building);
    assert_eq!(replay.reinforce(2, &history), ReinforceOutcome::Locked);

    assert!(replay.is_locked());
    assert_eq!(replay.locked_period(), Some(2));
    // Last two deltas in chronological order: [4, 8].
    assert_eq!(replay.predicted_delta(), Some(4));
}

// ══════════════════════════════════════════════════════════
// 2. Replay and phase advance
// ══════════════════════════════════════════════════════════

/// The phase walks the pattern and wraps at the period.
#[test]
fn advance_wraps_at_period() {
    let mut replay = PatternReplay::new();
    let history = history_of(&[1, 2, 3, 1, 2, 3]);
    for _ in 0..3 {
        let _ = replay.reinforce(3, &history);
    }
    assert_eq!(replay.locked_period(), Some(3));

    // Pattern is the last cycle [1, 2, 3], read cyclically from phase 0.
    for expected in [1, 2, 3, 1, 2] {
        assert_eq!(replay.predicted_delta(), Some(expected));
        replay.advance();
    }
}

/// Advancing an unlocked state is a no-op.
#[test]
fn advance_without_lock_is_noop() {
    let mut replay = PatternReplay::new();
    replay.advance();
    assert_eq!(replay.predicted_delta(), None);
}

// ══════════════════════════════════════════════════════════
// 3. Refresh, switch, and reset
// ══════════════════════════════════════════════════════════

/// A qualifying detection while locked re-captures the freshest deltas and
/// resets the phase, letting the replayed pattern drift with the signal.
#[test]
fn relock_refreshes_pattern_and_phase() {
    let mut replay = PatternReplay::new();
    let history = history_of(&[4, 8, 4, 8]);
    for _ in 0..3 {
        let _ = replay.reinforce(2, &history);
    }
    replay.advance();
    assert_eq!(replay.predicted_delta(), Some(8), "phase moved off zero");

    // The signal drifts to [6, 10]; a further agreeing round refreshes.
    let drifted = history_of(&[4, 8, 6, 10]);
    assert_eq!(replay.reinforce(2, &drifted), ReinforceOutcome::Refreshed);
    assert_eq!(replay.predicted_delta(), Some(6), "phase reset to zero");
    replay.advance();
    assert_eq!(replay.predicted_delta(), Some(10));
}

/// A different detected period restarts stability and drops the lock.
#[test]
fn period_switch_drops_lock() {
    let mut replay = PatternReplay::new();
    let history = history_of(&[4, 8, 4, 8, 1, 2, 3, 4]);
    for _ in 0..3 {
        let _ = replay.reinforce(2, &history);
    }
    assert!(replay.is_locked());

    let outcome = replay.reinforce(4, &history);
    assert_eq!(outcome, ReinforceOutcome::Switched { previous: Some(2) });
    assert!(!replay.is_locked(), "stability 1 cannot sustain a lock");
    assert_eq!(replay.stability(), 1);
    assert_eq!(replay.predicted_delta(), None);
}

/// The hard reset returns to no candidate, zero stability, unlocked.
#[test]
fn reset_clears_everything() {
    let mut replay = PatternReplay::new();
    let history = history_of(&[4, 8, 4, 8]);
    for _ in 0..3 {
        let _ = replay.reinforce(2, &history);
    }
    assert!(replay.is_locked());

    replay.reset();
    assert!(!replay.is_locked());
    assert_eq!(replay.stability(), 0);
    assert_eq!(replay.predicted_delta(), None);
    // Re-detection starts from scratch.
    assert_eq!(
        replay.reinforce(2, &history),
        ReinforceOutcome::Switched { previous: None }
    );
}
