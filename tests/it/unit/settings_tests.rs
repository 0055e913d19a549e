//! Settings persistence.

use collage::capture::CaptureConfig;
use collage::composition::RegionConfig;
use collage::geometry::Point;
use collage::settings::Settings;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_defaults_match_interaction_constants() {
    let settings = Settings::default();
    assert_eq!(settings.drag_start_threshold, 5.0);
    assert_eq!(settings.min_selection_size, 5.0);
    assert_eq!(settings.dwell_hold(), Duration::from_millis(500));
    assert!(settings.dwell_poll() < settings.dwell_hold());
    assert!(settings.export_scale > 1.0);
}

#[test]
fn test_configs_follow_settings() {
    let settings = Settings {
        capture_offset: (8.0, 12.0),
        min_region_size: 250.0,
        ..Settings::default()
    };
    assert_eq!(CaptureConfig::from(&settings).offset, Point::new(8.0, 12.0));
    assert_eq!(RegionConfig::from(&settings).min_size, 250.0);
}

#[test]
fn test_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("collage").join("settings.json");
    let settings = Settings {
        export_scale: 4.0,
        region_size: (420.0, 594.0),
        ..Settings::default()
    };
    settings.save(&path).unwrap();

    let loaded = Settings::load(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    assert!(Settings::load(&dir.path().join("absent.json")).is_err());
}
