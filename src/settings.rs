//! Runtime settings
//!
//! Loaded from an optional JSON file next to the binary. Every field has a
//! default, so a partial file only overrides what it names.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LevelError, LevelResult};

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Content ===
    /// Directory holding `level{n}.json` files
    pub levels_dir: PathBuf,

    // === Simulation ===
    /// Fixed ticks per simulated second
    pub tick_rate_hz: u32,
    /// Headless driver stops after this many ticks
    pub max_ticks: u64,

    // === View ===
    /// How quickly the camera catches up with the player (1/s)
    pub camera_follow_rate: f32,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            levels_dir: PathBuf::from("levels"),

            tick_rate_hz: 60,
            max_ticks: 60 * 60,

            camera_follow_rate: 6.0,
            screen_width: 1280.0,
            screen_height: 720.0,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load(path: &Path) -> LevelResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| LevelError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Length of one fixed tick in seconds
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate_hz.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "tick_rate_hz": 30, "max_ticks": 90 }"#).unwrap();
        assert_eq!(settings.tick_rate_hz, 30);
        assert_eq!(settings.max_ticks, 90);
        assert_eq!(settings.levels_dir, PathBuf::from("levels"));
        assert_eq!(settings.screen_width, 1280.0);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings.tick_rate_hz, 60);
    }

    #[test]
    fn test_time_scale_is_not_configurable() {
        let settings: Settings =
            serde_json::from_str(r#"{ "slow_motion_factor": 0.25 }"#).unwrap();
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("slow_motion_factor"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load(Path::new("/nonexistent/settings.json")).unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }

    #[test]
    fn test_tick_seconds_guards_zero_rate() {
        let settings = Settings {
            tick_rate_hz: 0,
            ..Default::default()
        };
        assert_eq!(settings.tick_seconds(), 1.0);
    }
}
