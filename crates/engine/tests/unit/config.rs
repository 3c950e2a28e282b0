//! Engine Configuration Tests.
//!
//! Verifies the default configuration values, serde defaults for partial
//! JSON configurations, and every strict validation error.

use pretty_assertions::assert_eq;
use specfetch_core::common::ConfigError;
use specfetch_core::config::EngineConfig;

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

/// The default configuration carries the documented baseline values.
#[test]
fn default_values() {
    let config = EngineConfig::default();
    assert_eq!(config.table_entries, 256);
    assert_eq!(config.line_bytes, 64);
    assert_eq!(config.page_bytes, 4096);
    assert_eq!(config.analysis_interval, 4);
    assert!((config.power_threshold - 100.0).abs() < f64::EPSILON);
    assert!(config.validate().is_ok(), "defaults must validate");
}

/// Missing JSON fields fall back to the per-field defaults.
#[test]
fn partial_json_takes_defaults() {
    let json = r#"{ "table_entries": 64, "power_threshold": 250.0 }"#;
    let config: EngineConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.table_entries, 64);
    assert!((config.power_threshold - 250.0).abs() < f64::EPSILON);
    assert_eq!(config.line_bytes, 64, "unspecified field takes default");
    assert_eq!(config.analysis_interval, 4, "unspecified field takes default");
}

/// An empty JSON object deserializes into the full default configuration.
#[test]
fn empty_json_is_default() {
    let config: EngineConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.table_entries, EngineConfig::default().table_entries);
    assert_eq!(config.page_bytes, EngineConfig::default().page_bytes);
}

// ══════════════════════════════════════════════════════════
// 2. Validation errors
// ══════════════════════════════════════════════════════════

/// A zero-entry table is rejected.
#[test]
fn zero_table_capacity_rejected() {
    let config = EngineConfig {
        table_entries: 0,
        ..EngineConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::ZeroTableCapacity));
}

/// A zero analysis interval is rejected.
#[test]
fn zero_analysis_interval_rejected() {
    let config = EngineConfig {
        analysis_interval: 0,
        ..EngineConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::ZeroAnalysisInterval));
}

/// Non-positive and non-finite power thresholds are rejected.
#[test]
fn bad_power_threshold_rejected() {
    for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let config = EngineConfig {
            power_threshold: bad,
            ..EngineConfig::default()
        };
        assert!(
            matches!(
                config.validate(),
                Err(ConfigError::InvalidPowerThreshold { .. })
            ),
            "threshold {bad} must be rejected"
        );
    }
}

/// Non-power-of-two geometry is rejected, naming the offending field.
#[test]
fn non_power_of_two_geometry_rejected() {
    let config = EngineConfig {
        line_bytes: 48,
        ..EngineConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::NotPowerOfTwo {
            field: "line_bytes",
            value: 48
        })
    );

    let config = EngineConfig {
        page_bytes: 5000,
        ..EngineConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::NotPowerOfTwo {
            field: "page_bytes",
            value: 5000
        })
    );
}

/// A line larger than a page is rejected.
#[test]
fn line_exceeding_page_rejected() {
    let config = EngineConfig {
        line_bytes: 8192,
        page_bytes: 4096,
        ..EngineConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::LineExceedsPage {
            line: 8192,
            page: 4096
        })
    );
}

/// Validation errors render a readable message.
#[test]
fn errors_display_field_and_value() {
    let err = ConfigError::NotPowerOfTwo {
        field: "line_bytes",
        value: 48,
    };
    assert_eq!(err.to_string(), "line_bytes must be a power of two, got 48");
}
