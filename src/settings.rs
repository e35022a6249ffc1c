//! Editor settings - gesture thresholds, zoom limits, snapping and feedback.
//!
//! Settings are stored as JSON. Every section is `#[serde(default)]` so a
//! partial file only overrides what it names; the defaults come from
//! `constants.rs`.

use crate::constants::*;
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Reasons a settings file is rejected after parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("{name} must be positive (got {value})")]
    NotPositive { name: &'static str, value: f64 },

    #[error("zoom bounds are inverted: min {min} > max {max}")]
    InvertedZoomBounds { min: f64, max: f64 },

    #[error("double-tap delay ({double_tap_ms}ms) must be at least the tap threshold ({tap_ms}ms)")]
    DoubleTapShorterThanTap { double_tap_ms: u64, tap_ms: u64 },
}

/// Gesture recognizer thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    pub tap_threshold_ms: u64,
    pub double_tap_delay_ms: u64,
    pub long_press_delay_ms: u64,
    pub move_threshold: f64,
    pub pinch_threshold: f64,
    pub pinch_pan_threshold: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            tap_threshold_ms: TAP_THRESHOLD_MS,
            double_tap_delay_ms: DOUBLE_TAP_DELAY_MS,
            long_press_delay_ms: LONG_PRESS_DELAY_MS,
            move_threshold: MOVE_THRESHOLD,
            pinch_threshold: PINCH_THRESHOLD,
            pinch_pan_threshold: PINCH_PAN_THRESHOLD,
        }
    }
}

impl GestureSettings {
    pub fn tap_threshold(&self) -> Duration {
        Duration::from_millis(self.tap_threshold_ms)
    }

    pub fn double_tap_delay(&self) -> Duration {
        Duration::from_millis(self.double_tap_delay_ms)
    }

    pub fn long_press_delay(&self) -> Duration {
        Duration::from_millis(self.long_press_delay_ms)
    }
}

/// Zoom limits for the viewport.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub initial_zoom: f64,
    pub double_tap_zoom_step: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            initial_zoom: DEFAULT_ZOOM,
            double_tap_zoom_step: DOUBLE_TAP_ZOOM_STEP,
        }
    }
}

/// Grid and neighbor snapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    pub enabled: bool,
    pub grid_size: f64,
    pub threshold: f64,
    pub node_snap_radius: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            grid_size: GRID_SIZE,
            threshold: SNAP_THRESHOLD,
            node_snap_radius: NODE_SNAP_RADIUS,
        }
    }
}

/// Haptics and timed visual feedback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackSettings {
    pub double_tap_haptic_ms: u64,
    pub long_press_haptic_ms: u64,
    pub wall_fix_highlight_ms: u64,
    pub menu_close_debounce_ms: u64,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            double_tap_haptic_ms: DOUBLE_TAP_HAPTIC_MS,
            long_press_haptic_ms: LONG_PRESS_HAPTIC_MS,
            wall_fix_highlight_ms: WALL_FIX_HIGHLIGHT_MS,
            menu_close_debounce_ms: MENU_CLOSE_DEBOUNCE_MS,
        }
    }
}

/// All editor settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gesture: GestureSettings,
    pub viewport: ViewportSettings,
    pub snapping: SnapSettings,
    pub feedback: FeedbackSettings,
}

impl Settings {
    /// Load settings from a JSON file and validate them.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&raw)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        settings
            .validate()
            .with_context(|| format!("validating settings in {}", path.display()))?;
        Ok(settings)
    }

    /// Load from `path`, falling back to defaults when the file is missing or bad.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Falling back to default settings: {:#}", e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("gesture.move_threshold", self.gesture.move_threshold),
            ("gesture.pinch_threshold", self.gesture.pinch_threshold),
            ("gesture.pinch_pan_threshold", self.gesture.pinch_pan_threshold),
            ("viewport.min_zoom", self.viewport.min_zoom),
            ("viewport.initial_zoom", self.viewport.initial_zoom),
            ("viewport.double_tap_zoom_step", self.viewport.double_tap_zoom_step),
            ("snapping.grid_size", self.snapping.grid_size),
            ("snapping.threshold", self.snapping.threshold),
            ("snapping.node_snap_radius", self.snapping.node_snap_radius),
        ];
        for (name, value) in positive {
            // Also rejects NaN
            if !(value > 0.0) || !value.is_finite() {
                return Err(SettingsError::NotPositive { name, value });
            }
        }

        if self.viewport.min_zoom > self.viewport.max_zoom {
            return Err(SettingsError::InvertedZoomBounds {
                min: self.viewport.min_zoom,
                max: self.viewport.max_zoom,
            });
        }

        if self.gesture.double_tap_delay_ms < self.gesture.tap_threshold_ms {
            return Err(SettingsError::DoubleTapShorterThanTap {
                double_tap_ms: self.gesture.double_tap_delay_ms,
                tap_ms: self.gesture.tap_threshold_ms,
            });
        }

        Ok(())
    }
}

/// Default location of the settings file (`<config dir>/planboard/settings.json`).
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("planboard").join("settings.json"))
}
