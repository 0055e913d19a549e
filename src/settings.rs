//! Interaction settings, stored as JSON in the platform config directory.

use crate::constants::*;
use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Tunables read by every recognizer. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub drag_start_threshold: f32,
    pub min_selection_size: f32,
    pub capture_offset: (f32, f32),
    pub capture_scale: f32,
    pub dwell_hold_ms: u64,
    pub dwell_poll_ms: u64,
    pub dwell_affordance_scale: f32,
    pub region_size: (f32, f32),
    pub min_region_size: f32,
    pub resize_delta_multiplier: f32,
    pub resize_handle_size: f32,
    pub export_scale: f32,
    pub surface_background: [u8; 4],
    pub region_fill: [u8; 4],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            drag_start_threshold: DRAG_START_THRESHOLD,
            min_selection_size: MIN_SELECTION_SIZE,
            capture_offset: CAPTURE_OFFSET,
            capture_scale: CAPTURE_SCALE,
            dwell_hold_ms: DWELL_HOLD_MS,
            dwell_poll_ms: DWELL_POLL_MS,
            dwell_affordance_scale: DWELL_AFFORDANCE_SCALE,
            region_size: DEFAULT_REGION_SIZE,
            min_region_size: MIN_REGION_SIZE,
            resize_delta_multiplier: RESIZE_DELTA_MULTIPLIER,
            resize_handle_size: RESIZE_HANDLE_SIZE,
            export_scale: EXPORT_SCALE,
            surface_background: SURFACE_BACKGROUND,
            region_fill: REGION_FILL,
        }
    }
}

/// `<config dir>/collage/settings.json`
pub fn default_settings_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("collage").join("settings.json"))
        .ok_or(SettingsError::NoConfigDir)
}

impl Settings {
    pub fn dwell_hold(&self) -> Duration {
        Duration::from_millis(self.dwell_hold_ms)
    }

    pub fn dwell_poll(&self) -> Duration {
        Duration::from_millis(self.dwell_poll_ms)
    }

    pub fn load(path: &Path) -> SettingsResult<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load from the default path; a missing or unreadable file yields defaults
    pub fn load_or_default() -> Self {
        let path = match default_settings_path() {
            Ok(path) => path,
            Err(e) => {
                warn!("{}, using default settings", e);
                return Self::default();
            }
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(settings) => {
                info!(path = %path.display(), "settings loaded");
                settings
            }
            Err(e) => {
                warn!(path = %path.display(), "failed to load settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
