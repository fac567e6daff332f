//! Tests for analysis settings
//!
//! Tests cover:
//! - Default settings values
//! - Serialization/deserialization
//! - Partial settings files
//! - Validation of thresholds
//! - Config path handling

use erpclog::settings::{AnalysisSettings, SettingsError};

// ============================================
// Default Settings Tests
// ============================================

#[test]
fn test_settings_default_version() {
    let settings = AnalysisSettings::default();
    assert_eq!(settings.version, 1);
}

#[test]
fn test_settings_default_thresholds() {
    let settings = AnalysisSettings::default();

    assert_eq!(settings.filter.min_voltage, 0.5);
    assert_eq!(settings.filter.max_voltage, 12.0);
    assert_eq!(settings.regions.nominal_min, 4.5);
    assert_eq!(settings.regions.nominal_max, 6.0);
    assert_eq!(settings.regions.overvoltage_above, 7.0);
    assert_eq!(settings.regions.undervoltage_min, 0.5);
    assert_eq!(settings.regions.undervoltage_max, 3.0);
    assert_eq!(settings.load.light_below, 1.0);
    assert_eq!(settings.load.heavy_from, 3.0);
    assert_eq!(settings.load.transition_step, 0.5);
}

// ============================================
// Serialization Tests
// ============================================

#[test]
fn test_settings_serialize_pretty() {
    let json = AnalysisSettings::default().to_json_pretty().unwrap();

    assert!(json.contains('\n'));
    assert!(json.contains("min_voltage"));
    assert!(json.contains("transition_step"));
}

#[test]
fn test_settings_roundtrip() {
    let mut settings = AnalysisSettings::default();
    settings.filter.max_voltage = 9.0;
    settings.load.heavy_from = 2.5;

    let json = serde_json::to_string(&settings).unwrap();
    let loaded = AnalysisSettings::from_json(&json).unwrap();

    assert_eq!(loaded, settings);
}

#[test]
fn test_settings_partial_json_uses_defaults() {
    let loaded = AnalysisSettings::from_json(r#"{ "filter": { "max_voltage": 9.0 } }"#).unwrap();

    assert_eq!(loaded.filter.max_voltage, 9.0);
    assert_eq!(loaded.filter.min_voltage, 0.5);
    assert_eq!(loaded.version, 1);
    assert_eq!(loaded.regions, AnalysisSettings::default().regions);
}

#[test]
fn test_settings_empty_object_is_default() {
    let loaded = AnalysisSettings::from_json("{}").unwrap();
    assert_eq!(loaded, AnalysisSettings::default());
}

#[test]
fn test_settings_invalid_json() {
    assert!(matches!(
        AnalysisSettings::from_json("{ not json"),
        Err(SettingsError::Parse(_))
    ));
}

// ============================================
// Validation Tests
// ============================================

#[test]
fn test_settings_inverted_load_limits() {
    let result =
        AnalysisSettings::from_json(r#"{ "load": { "light_below": 4.0, "heavy_from": 2.0 } }"#);

    match result {
        Err(SettingsError::InvalidThreshold(msg)) => assert!(msg.contains("load.light_below")),
        other => panic!("Expected InvalidThreshold, got {:?}", other),
    }
}

#[test]
fn test_settings_negative_step() {
    let result = AnalysisSettings::from_json(r#"{ "load": { "transition_step": -1.0 } }"#);
    assert!(matches!(result, Err(SettingsError::InvalidThreshold(_))));
}

// ============================================
// File and Path Tests
// ============================================

#[test]
fn test_settings_load_from_file() {
    let path = std::env::temp_dir().join(format!(
        "erpclog_settings_test_{}.json",
        std::process::id()
    ));
    std::fs::write(&path, r#"{ "filter": { "min_voltage": 1.0 } }"#).unwrap();

    let loaded = AnalysisSettings::load_from(&path);
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.unwrap().filter.min_voltage, 1.0);
}

#[test]
fn test_settings_path_ends_with_json() {
    if let Some(path) = AnalysisSettings::get_settings_path() {
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
        assert!(path.to_string_lossy().contains("erpclog"));
    }
}
