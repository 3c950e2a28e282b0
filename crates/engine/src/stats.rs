//! Prefetch statistics collection and reporting.
//!
//! This module tracks behavioral counters for the prefetch engine. It provides:
//! 1. **Access Counters:** Demand accesses and their hit/miss split.
//! 2. **Prediction Paths:** Issued requests by path and the withheld breakdown.
//! 3. **Verification:** Match/mismatch counts and confidence hard resets.
//! 4. **Pattern State:** Spectral rounds, locks, period switches, and evictions.
//! 5. **Snapshot:** The final report with the locked-period histogram, mean
//!    locked confidence, and prediction accuracy.

use crate::common::constants::CANDIDATE_PERIODS;

/// Running counters mutated along the access pipeline.
#[derive(Clone, Debug, Default)]
pub struct PrefetchStats {
    /// Total demand accesses observed.
    pub accesses: u64,
    /// Demand accesses that hit in the host cache.
    pub demand_hits: u64,
    /// Demand accesses that missed in the host cache.
    pub demand_misses: u64,

    /// Requests issued by the constant-stride fast path.
    pub fast_issued: u64,
    /// Requests issued by the spectral replay path.
    pub spectral_issued: u64,
    /// Replay predictions withheld below the confidence threshold.
    pub withheld_low_confidence: u64,
    /// Predictions withheld because the target left the page (or the
    /// address space).
    pub withheld_cross_page: u64,

    /// Recorded predictions confirmed by the next delta.
    pub verified_matches: u64,
    /// Recorded predictions contradicted by the next delta.
    pub verified_mismatches: u64,
    /// Times a mismatch drove confidence to zero and cleared pattern state.
    pub confidence_resets: u64,

    /// Spectral analysis rounds executed.
    pub spectral_rounds: u64,
    /// Patterns locked from an unlocked state.
    pub pattern_locks: u64,
    /// Candidate period changes after a period had been established.
    pub period_switches: u64,
    /// Tracker entries recycled to admit a new instruction pointer.
    pub evictions: u64,
}

/// Section names for selective report output.
///
/// Valid section identifiers: `"summary"`, `"paths"`, `"verification"`,
/// `"periods"`, `"table"`. Pass an empty slice to `print_sections` to print
/// all sections.
pub const REPORT_SECTIONS: &[&str] = &["summary", "paths", "verification", "periods", "table"];

/// Final statistics snapshot produced by finalize.
///
/// Carries the running counters plus the table-derived aggregates: how many
/// entries are locked per candidate period, the mean confidence across locked
/// entries, and the overall prediction accuracy.
#[derive(Clone, Debug)]
pub struct PrefetchReport {
    /// Running counters at snapshot time.
    pub stats: PrefetchStats,
    /// Instruction pointers resident in the table at snapshot time.
    pub tracked_ips: u64,
    /// Table entries holding a locked pattern.
    pub locked_entries: u64,
    /// Locked-entry count per candidate period, aligned with
    /// [`CANDIDATE_PERIODS`].
    pub locked_by_period: [u64; CANDIDATE_PERIODS.len()],
    /// Mean confidence across locked entries (0.0 when none are locked).
    pub mean_locked_confidence: f64,
    /// `verified_matches / (verified_matches + verified_mismatches)`, or 0.0
    /// when nothing was verified.
    pub accuracy: f64,
}

impl PrefetchReport {
    /// Prints only the requested report sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"paths"`,
    /// `"verification"`, `"periods"`, or `"table"`. Pass an empty slice to
    /// print all sections (same as `print()`).
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    ///
    /// # Panics
    ///
    /// This function will not panic. Division by zero is prevented by
    /// substituting 1 for zero denominators before any percentage is formed.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let s = &self.stats;
        let acc = if s.accesses == 0 { 1 } else { s.accesses };
        let issued = s.fast_issued + s.spectral_issued;

        if want("summary") {
            println!("\n==========================================================");
            println!("SPECTRAL PREFETCH ENGINE STATISTICS");
            println!("==========================================================");
            println!("accesses                 {}", s.accesses);
            println!(
                "demand_hits              {} ({:.2}%)",
                s.demand_hits,
                (s.demand_hits as f64 / acc as f64) * 100.0
            );
            println!(
                "demand_misses            {} ({:.2}%)",
                s.demand_misses,
                (s.demand_misses as f64 / acc as f64) * 100.0
            );
            println!("requests_issued          {issued}");
            println!(
                "issue_rate               {:.4} per access",
                issued as f64 / acc as f64
            );
            println!("----------------------------------------------------------");
        }
        if want("paths") {
            println!("PREDICTION PATHS");
            println!("  path.fast              {}", s.fast_issued);
            println!("  path.spectral          {}", s.spectral_issued);
            println!("  withheld.confidence    {}", s.withheld_low_confidence);
            println!("  withheld.page          {}", s.withheld_cross_page);
            println!("----------------------------------------------------------");
        }
        if want("verification") {
            println!("VERIFICATION");
            println!("  verify.matches         {}", s.verified_matches);
            println!("  verify.mismatches      {}", s.verified_mismatches);
            println!("  verify.accuracy        {:.2}%", self.accuracy * 100.0);
            println!("  confidence.resets      {}", s.confidence_resets);
            println!("----------------------------------------------------------");
        }
        if want("periods") {
            println!("LOCKED PERIOD HISTOGRAM");
            for (period, count) in CANDIDATE_PERIODS.iter().zip(self.locked_by_period.iter()) {
                println!("  period.{period:<2}              {count}");
            }
            println!("  locks.established      {}", s.pattern_locks);
            println!("  locks.switches         {}", s.period_switches);
            println!("----------------------------------------------------------");
        }
        if want("table") {
            println!("TRACKER TABLE");
            println!("  table.tracked          {}", self.tracked_ips);
            println!("  table.locked           {}", self.locked_entries);
            println!("  table.evictions        {}", s.evictions);
            println!(
                "  confidence.mean_locked {:.2}",
                self.mean_locked_confidence
            );
            println!("  spectral.rounds        {}", s.spectral_rounds);
        }
        println!("==========================================================");
    }

    /// Prints all report sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
