//! Configuration system for the prefetch engine.
//!
//! This module defines the configuration structure used to parameterize the
//! engine. It provides:
//! 1. **Defaults:** Baseline geometry and tuning constants (table size, line and
//!    page bytes, analysis cadence, power threshold).
//! 2. **Deserialization:** Per-field serde defaults so partial JSON configs work.
//! 3. **Validation:** A strict `validate()` pass for configs loaded from files.
//!
//! The algorithm's fixed parameters (history length, candidate periods,
//! confidence thresholds) are not configurable; see
//! [`common::constants`](crate::common::constants).

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the engine.
///
/// These values define the baseline engine configuration when not explicitly
/// overridden in a JSON configuration file.
mod defaults {
    /// Default tracker table capacity (256 tracked instruction pointers).
    pub const TABLE_ENTRIES: usize = 256;

    /// Default cache line size in bytes (64 bytes).
    ///
    /// Matches typical modern processor cache line sizes.
    pub const LINE_BYTES: u64 = 64;

    /// Default page size in bytes (4 KiB).
    ///
    /// Prefetch targets never cross this boundary.
    pub const PAGE_BYTES: u64 = 4096;

    /// Default spectral analysis cadence (every 4th access per entry).
    ///
    /// Rate-limits the Goertzel evaluation so steady streams do not pay the
    /// analysis cost on every access.
    pub const ANALYSIS_INTERVAL: u64 = 4;

    /// Default spectral power threshold for a detection to count.
    ///
    /// The weakest meaningful pattern, a one-line alternation, scores 144
    /// over a full window; flat or noisy windows score near zero.
    pub const POWER_THRESHOLD: f64 = 100.0;
}

/// Engine configuration.
///
/// Configuration is supplied via JSON or built with `EngineConfig::default()`.
/// Constructors sanitize invalid geometry; use [`EngineConfig::validate`] to
/// reject bad values outright instead.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use specfetch_core::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.table_entries, 256);
/// assert_eq!(config.line_bytes, 64);
/// ```
///
/// Deserializing a partial JSON config (missing fields take defaults):
///
/// ```
/// use specfetch_core::config::EngineConfig;
///
/// let json = r#"{
///     "table_entries": 128,
///     "power_threshold": 250.0
/// }"#;
///
/// let config: EngineConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.table_entries, 128);
/// assert_eq!(config.analysis_interval, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of tracked instruction pointers.
    #[serde(default = "EngineConfig::default_table_entries")]
    pub table_entries: usize,

    /// Cache line size in bytes (power of two).
    #[serde(default = "EngineConfig::default_line_bytes")]
    pub line_bytes: u64,

    /// Page size in bytes (power of two, at least one line).
    #[serde(default = "EngineConfig::default_page_bytes")]
    pub page_bytes: u64,

    /// Run the spectral analysis every N-th access of an entry.
    #[serde(default = "EngineConfig::default_analysis_interval")]
    pub analysis_interval: u64,

    /// Minimum dominant-bin power for a detection to update pattern state.
    #[serde(default = "EngineConfig::default_power_threshold")]
    pub power_threshold: f64,
}

impl EngineConfig {
    /// Returns the default tracker table capacity.
    fn default_table_entries() -> usize {
        defaults::TABLE_ENTRIES
    }

    /// Returns the default cache line size in bytes.
    fn default_line_bytes() -> u64 {
        defaults::LINE_BYTES
    }

    /// Returns the default page size in bytes.
    fn default_page_bytes() -> u64 {
        defaults::PAGE_BYTES
    }

    /// Returns the default spectral analysis cadence.
    fn default_analysis_interval() -> u64 {
        defaults::ANALYSIS_INTERVAL
    }

    /// Returns the default spectral power threshold.
    fn default_power_threshold() -> f64 {
        defaults::POWER_THRESHOLD
    }

    /// Checks every field and reports the first invalid one.
    ///
    /// The engine constructor sanitizes instead of failing; this is the
    /// strict path for configurations loaded from files.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the offending field when the table
    /// capacity or analysis interval is zero, the power threshold is not a
    /// positive finite number, a size is not a power of two, or the line
    /// exceeds the page.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_entries == 0 {
            return Err(ConfigError::ZeroTableCapacity);
        }
        if self.analysis_interval == 0 {
            return Err(ConfigError::ZeroAnalysisInterval);
        }
        if !self.power_threshold.is_finite() || self.power_threshold <= 0.0 {
            return Err(ConfigError::InvalidPowerThreshold {
                value: self.power_threshold,
            });
        }
        if !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "line_bytes",
                value: self.line_bytes,
            });
        }
        if !self.page_bytes.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "page_bytes",
                value: self.page_bytes,
            });
        }
        if self.line_bytes > self.page_bytes {
            return Err(ConfigError::LineExceedsPage {
                line: self.line_bytes,
                page: self.page_bytes,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    /// Creates the default engine configuration.
    ///
    /// Uses a 256-entry table, 64-byte lines in 4 KiB pages, analysis every
    /// 4th access, and a power threshold of 100.
    fn default() -> Self {
        Self {
            table_entries: defaults::TABLE_ENTRIES,
            line_bytes: defaults::LINE_BYTES,
            page_bytes: defaults::PAGE_BYTES,
            analysis_interval: defaults::ANALYSIS_INTERVAL,
            power_threshold: defaults::POWER_THRESHOLD,
        }
    }
}
