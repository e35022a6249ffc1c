//! Unit tests for loading and validating editor settings.

use planboard::settings::{default_settings_path, Settings, SettingsError};
use tempfile::tempdir;

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut settings = Settings::default();
    settings.snapping.grid_size = 25.0;
    settings.gesture.long_press_delay_ms = 800;
    settings.save(&path).unwrap();

    assert_eq!(Settings::load(&path).unwrap(), settings);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "viewport": { "max_zoom": 3.0 } }"#).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.viewport.max_zoom, 3.0);
    assert_eq!(settings.viewport.min_zoom, 0.2);
    assert_eq!(settings.gesture, Settings::default().gesture);
}

#[test]
fn test_invalid_file_reports_context() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "snapping": { "grid_size": -5.0 } }"#).unwrap();

    let err = Settings::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("grid_size"));
    assert_eq!(Settings::load_or_default(&path), Settings::default());
}

#[test]
fn test_missing_file_falls_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert!(Settings::load(&path).is_err());
    assert_eq!(Settings::load_or_default(&path), Settings::default());
}

#[test]
fn test_validation_rules() {
    let mut settings = Settings::default();
    settings.viewport.min_zoom = 6.0;
    assert!(matches!(
        settings.validate(),
        Err(SettingsError::InvertedZoomBounds { .. })
    ));

    let mut settings = Settings::default();
    settings.gesture.double_tap_delay_ms = 100;
    assert!(matches!(
        settings.validate(),
        Err(SettingsError::DoubleTapShorterThanTap { .. })
    ));

    let mut settings = Settings::default();
    settings.gesture.move_threshold = f64::NAN;
    assert!(matches!(settings.validate(), Err(SettingsError::NotPositive { .. })));
}

#[test]
fn test_default_path_is_namespaced() {
    if let Some(path) = default_settings_path() {
        assert!(path.ends_with("planboard/settings.json"));
    }
}

#[test]
fn test_telemetry_installs_once() {
    let _ = planboard::telemetry::init();
    // A global subscriber is in place now; a second install is refused
    assert!(!planboard::telemetry::init());
}
