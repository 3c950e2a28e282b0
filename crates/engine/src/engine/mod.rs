//! The spectral prefetch engine.
//!
//! This module contains the engine's components and the per-access pipeline
//! that connects them. It organizes:
//! 1. **History:** The circular per-stream delta buffer.
//! 2. **Analysis:** The single-bin Goertzel period detector.
//! 3. **Replay:** The stability-gated pattern lock and phase-tracked replay.
//! 4. **Confidence:** The saturating prediction-accuracy counter.
//! 5. **Tracking:** The bounded FIFO-recycled per-instruction-pointer table.
//! 6. **Pipeline:** [`SpectralPrefetcher`], which runs verification, the
//!    stride fast path, the rate-limited spectral path, and the emission
//!    gate on every access.

/// Prediction confidence counter.
pub mod confidence;

/// Per-stream delta history buffer.
pub mod history;

/// Pattern lock state machine and replay.
pub mod replay;

/// Single-bin Goertzel period detection.
pub mod spectral;

/// Bounded per-instruction-pointer tracking table.
pub mod tracker;

pub use self::confidence::Confidence;
pub use self::history::DeltaHistory;
pub use self::replay::PatternReplay;
pub use self::spectral::{Detection, SpectralAnalyzer};
pub use self::tracker::{TrackerEntry, TrackerTable};

use crate::common::addr::LineGeometry;
use crate::common::constants::{
    CANDIDATE_PERIODS, FAST_PATH_RUN, ISSUE_MIN_CONFIDENCE, NEAR_MIN_CONFIDENCE,
    NEAR_OCCUPANCY_LIMIT,
};
use crate::config::EngineConfig;
use crate::host::{CacheHost, FillLevel, PrefetchRequest};
use crate::stats::{PrefetchReport, PrefetchStats};
use self::replay::ReinforceOutcome;

/// Trait for cache prefetch engines.
///
/// The embedding cache invokes `observe` once per demand access, on the
/// simulation-critical path; implementations must complete synchronously
/// with no background work.
pub trait Prefetcher: Send + Sync {
    /// Observes one demand access and produces at most one prefetch request.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address of the demand access.
    /// * `ip_tag` - Tag of the instruction pointer that issued it.
    /// * `hit` - Whether the access hit in the host cache.
    /// * `host` - Host state probe; queried only while emitting a request.
    fn observe(
        &mut self,
        addr: u64,
        ip_tag: u64,
        hit: bool,
        host: &dyn CacheHost,
    ) -> Option<PrefetchRequest>;

    /// Notifies the engine of a completed cache fill.
    ///
    /// Reserved for correlating prefetches with actual fills; the default
    /// does nothing.
    fn fill(&mut self, _addr: u64) {}

    /// Advances engine-internal time by one host cycle.
    ///
    /// Reserved for time-driven housekeeping; the default does nothing.
    fn tick(&mut self) {}

    /// Returns the final statistics snapshot.
    ///
    /// Mutates nothing and may be called repeatedly.
    fn finalize(&self) -> PrefetchReport;
}

/// Frequency-domain prefetch engine.
///
/// Detects periodic structure in each instruction pointer's delta stream
/// with a single-bin Goertzel evaluation over a fixed candidate period set,
/// and replays the locked pattern as prefetch requests. A constant-stride
/// fast path bypasses the spectral machinery entirely when the last few
/// deltas repeat.
///
/// Each cache instance owns its own engine; no state is shared between
/// instances.
#[derive(Debug)]
pub struct SpectralPrefetcher {
    /// Line and page arithmetic for the host geometry.
    geometry: LineGeometry,
    /// Goertzel evaluator over the candidate period set.
    analyzer: SpectralAnalyzer,
    /// Per-instruction-pointer tracking state.
    table: TrackerTable,
    /// Run the spectral analysis every N-th access of an entry.
    analysis_interval: u64,
    /// Minimum dominant-bin power for a detection to update pattern state.
    power_threshold: f64,
    /// Running behavioral counters.
    stats: PrefetchStats,
}

impl SpectralPrefetcher {
    /// Creates an engine from a configuration.
    ///
    /// Invalid values are sanitized rather than rejected: a zero table
    /// capacity or analysis interval and a non-positive or non-finite power
    /// threshold fall back to the defaults, and geometry sanitization is
    /// handled by [`LineGeometry`]. Use
    /// [`EngineConfig::validate`](crate::config::EngineConfig::validate) to
    /// reject bad configurations outright instead.
    pub fn new(config: &EngineConfig) -> Self {
        let defaults = EngineConfig::default();
        let table_entries = if config.table_entries == 0 {
            defaults.table_entries
        } else {
            config.table_entries
        };
        let analysis_interval = if config.analysis_interval == 0 {
            defaults.analysis_interval
        } else {
            config.analysis_interval
        };
        let power_threshold =
            if config.power_threshold.is_finite() && config.power_threshold > 0.0 {
                config.power_threshold
            } else {
                defaults.power_threshold
            };

        Self {
            geometry: LineGeometry::new(config.line_bytes, config.page_bytes),
            analyzer: SpectralAnalyzer::new(),
            table: TrackerTable::new(table_entries),
            analysis_interval,
            power_threshold,
            stats: PrefetchStats::default(),
        }
    }

    /// Returns the engine's line geometry.
    pub const fn geometry(&self) -> LineGeometry {
        self.geometry
    }

    /// Returns the running counters.
    pub const fn stats(&self) -> &PrefetchStats {
        &self.stats
    }
}

impl Prefetcher for SpectralPrefetcher {
    /// Runs the fixed per-access pipeline.
    ///
    /// In order: tracker resolution (with FIFO recycling under capacity
    /// pressure), delta recording and verification of the previous round's
    /// prediction, the stride fast path, the rate-limited spectral path,
    /// prediction recording, and the emission gate. At most one request is
    /// produced per access, and its target never leaves the page of `addr`.
    fn observe(
        &mut self,
        addr: u64,
        ip_tag: u64,
        hit: bool,
        host: &dyn CacheHost,
    ) -> Option<PrefetchRequest> {
        self.stats.accesses += 1;
        if hit {
            self.stats.demand_hits += 1;
        } else {
            self.stats.demand_misses += 1;
        }

        let line = self.geometry.line_index(addr);
        let (entry, evicted) = self.table.resolve(ip_tag);
        if let Some(old_tag) = evicted {
            self.stats.evictions += 1;
            tracing::debug!(evicted = old_tag, admitted = ip_tag, "tracker entry recycled");
        }
        entry.accesses += 1;

        // Record the new delta and verify the prediction made last round.
        // Verification runs before any new prediction so a mismatch can
        // demote the entry before it speaks again.
        if let Some(last_line) = entry.last_line {
            let delta = line as i64 - last_line as i64;
            entry.history.push(delta);

            if let Some(predicted) = entry.pending.take() {
                if predicted == delta {
                    entry.confidence.record_match();
                    self.stats.verified_matches += 1;
                } else {
                    self.stats.verified_mismatches += 1;
                    if entry.confidence.record_mismatch() {
                        entry.replay.reset();
                        self.stats.confidence_resets += 1;
                        tracing::debug!(ip = ip_tag, "confidence floor; pattern state cleared");
                    }
                }
            }
        }
        entry.last_line = Some(line);

        // Fast path: a trailing run of equal nonzero deltas predicts that
        // stride directly. It neither consults nor modifies spectral state
        // and does not consume the analysis cadence.
        let fast_delta = entry.history.recent_run(FAST_PATH_RUN);

        let mut replay_delta = None;
        if fast_delta.is_none() {
            if entry.history.is_full() && entry.accesses % self.analysis_interval == 0 {
                self.stats.spectral_rounds += 1;
                let detection = self.analyzer.detect(&entry.history);
                if detection.power > self.power_threshold {
                    match entry.replay.reinforce(detection.period, &entry.history) {
                        ReinforceOutcome::Locked => {
                            self.stats.pattern_locks += 1;
                            tracing::debug!(
                                ip = ip_tag,
                                period = detection.period,
                                "pattern locked"
                            );
                        }
                        ReinforceOutcome::Switched {
                            previous: Some(old_period),
                        } => {
                            self.stats.period_switches += 1;
                            tracing::debug!(
                                ip = ip_tag,
                                from = old_period,
                                to = detection.period,
                                "candidate period switched"
                            );
                        }
                        ReinforceOutcome::Building
                        | ReinforceOutcome::Refreshed
                        | ReinforceOutcome::Switched { previous: None } => {}
                    }
                }
            }
            replay_delta = entry.replay.predicted_delta();
        }

        // Record whichever path spoke; training continues even when the
        // emission gate below withholds the request.
        let (predicted, from_replay) = match (fast_delta, replay_delta) {
            (Some(delta), _) => (delta, false),
            (None, Some(delta)) => (delta, true),
            (None, None) => {
                entry.pending = None;
                return None;
            }
        };
        entry.pending = Some(predicted);
        if from_replay {
            entry.replay.advance();
        }

        // Emission gate: the fast path's equal-run precondition is its own
        // gate; replay predictions additionally need earned confidence.
        if from_replay && !entry.confidence.meets(ISSUE_MIN_CONFIDENCE) {
            self.stats.withheld_low_confidence += 1;
            return None;
        }

        let target = match self.geometry.target(addr, predicted) {
            Some(target) if self.geometry.same_page(addr, target) => target,
            _ => {
                self.stats.withheld_cross_page += 1;
                return None;
            }
        };

        let fill = if entry.confidence.meets(NEAR_MIN_CONFIDENCE)
            && host.occupancy() < NEAR_OCCUPANCY_LIMIT
        {
            FillLevel::Near
        } else {
            FillLevel::Far
        };
        if from_replay {
            self.stats.spectral_issued += 1;
        } else {
            self.stats.fast_issued += 1;
        }
        tracing::trace!(
            ip = ip_tag,
            addr = target,
            near = (fill == FillLevel::Near),
            replay = from_replay,
            "prefetch request issued"
        );
        Some(PrefetchRequest { target, fill })
    }

    /// Builds the final snapshot from the counters and the live table.
    fn finalize(&self) -> PrefetchReport {
        let mut locked_by_period = [0_u64; CANDIDATE_PERIODS.len()];
        let mut locked_entries = 0_u64;
        let mut confidence_sum = 0_u64;

        for entry in self.table.iter() {
            if let Some(period) = entry.replay.locked_period() {
                locked_entries += 1;
                confidence_sum += u64::from(entry.confidence.get());
                if let Some(bucket) = CANDIDATE_PERIODS.iter().position(|&p| p == period) {
                    locked_by_period[bucket] += 1;
                }
            }
        }

        let verified = self.stats.verified_matches + self.stats.verified_mismatches;
        PrefetchReport {
            stats: self.stats.clone(),
            tracked_ips: self.table.len() as u64,
            locked_entries,
            locked_by_period,
            mean_locked_confidence: if locked_entries == 0 {
                0.0
            } else {
                confidence_sum as f64 / locked_entries as f64
            },
            accuracy: if verified == 0 {
                0.0
            } else {
                self.stats.verified_matches as f64 / verified as f64
            },
        }
    }
}
