//! Level data loading
//!
//! A level file is one JSON object. Only the dimensions and the player start
//! are required; every actor list may be left out, and every tuning record
//! falls back to its defaults field by field.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{LevelError, LevelResult};
use crate::sim::black_hole::BlackHoleData;
use crate::sim::food_cart::FoodCartData;
use crate::sim::geometry::Rect;
use crate::sim::unicorn::UnicornData;
use crate::sim::wave::WaveData;

/// Everything needed to build one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelData {
    /// Seeds every random stream in the level
    #[serde(default)]
    pub seed: u64,
    pub width: f32,
    pub height: f32,
    pub player_start: Vec2,
    #[serde(default)]
    pub black_hole: BlackHoleData,
    #[serde(default)]
    pub trickle_waves: Vec<WaveData>,
    #[serde(default)]
    pub burst_waves: Vec<WaveData>,
    #[serde(default)]
    pub unicorns: Vec<UnicornData>,
    #[serde(default)]
    pub food_carts: Vec<FoodCartData>,
}

impl LevelData {
    /// Level with nothing in it but the player and the hazard
    pub fn empty(width: f32, height: f32, player_start: Vec2) -> Self {
        Self {
            seed: 0,
            width,
            height,
            player_start,
            black_hole: BlackHoleData {
                position: Vec2::new(width * 0.5, height * 0.5),
                ..Default::default()
            },
            trickle_waves: Vec::new(),
            burst_waves: Vec::new(),
            unicorns: Vec::new(),
            food_carts: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn from_json_str(json: &str, origin: &Path) -> LevelResult<Self> {
        serde_json::from_str(json).map_err(|source| LevelError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Reject data a level cannot be built from
    pub fn validate(&self) -> LevelResult<()> {
        let bounds = self.bounds();
        if !bounds.is_valid() {
            return Err(malformed(format!(
                "level size {}x{} is not positive",
                self.width, self.height
            )));
        }
        if !bounds.contains(self.player_start) {
            return Err(malformed("player start is outside the level"));
        }

        let hole = &self.black_hole;
        if !bounds.contains(hole.position) {
            return Err(malformed("black hole is outside the level"));
        }
        if hole.radius <= 0.0 || hole.capacity <= 0.0 {
            return Err(malformed("black hole needs a positive radius and capacity"));
        }

        let waves = self
            .trickle_waves
            .iter()
            .map(|w| ("trickle", w))
            .chain(self.burst_waves.iter().map(|w| ("burst", w)));
        for (i, (kind, wave)) in waves.enumerate() {
            if wave.count == 0 {
                return Err(malformed(format!("{kind} wave {i} spawns nothing")));
            }
            if wave.spawn_interval <= 0.0 || wave.start_delay < 0.0 {
                return Err(malformed(format!("{kind} wave {i} has a bad schedule")));
            }
            if kind == "burst" && wave.burst_size == 0 {
                return Err(malformed(format!("burst wave {i} has a zero burst size")));
            }
            if wave.enemy.radius <= 0.0 || wave.enemy.mass <= 0.0 {
                return Err(malformed(format!("{kind} wave {i} has a degenerate enemy")));
            }
        }

        for (i, unicorn) in self.unicorns.iter().enumerate() {
            if unicorn.speed <= 0.0 || unicorn.radius <= 0.0 || unicorn.mass <= 0.0 {
                return Err(malformed(format!("unicorn {i} cannot move")));
            }
        }

        for (i, cart) in self.food_carts.iter().enumerate() {
            if !bounds.contains(cart.position) {
                return Err(malformed(format!("food cart {i} is outside the level")));
            }
        }

        Ok(())
    }
}

fn malformed(reason: impl Into<String>) -> LevelError {
    LevelError::Malformed(reason.into())
}

/// Source of level data by level number
pub trait DataLoader {
    fn load_level(&self, level_number: u32) -> LevelResult<LevelData>;
}

/// Loads `level{n}.json` from a directory
#[derive(Debug, Clone)]
pub struct JsonDataLoader {
    root: PathBuf,
}

impl JsonDataLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn level_path(&self, level_number: u32) -> PathBuf {
        self.root.join(format!("level{level_number}.json"))
    }
}

impl DataLoader for JsonDataLoader {
    fn load_level(&self, level_number: u32) -> LevelResult<LevelData> {
        let path = self.level_path(level_number);
        let text = fs::read_to_string(&path).map_err(|source| LevelError::Io {
            path: path.clone(),
            source,
        })?;
        LevelData::from_json_str(&text, &path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "width": 800, "height": 600,
        "player_start": [100, 100],
        "black_hole": { "position": [400, 300] }
    }"#;

    #[test]
    fn test_minimal_level_parses_with_defaults() {
        let data = LevelData::from_json_str(MINIMAL, Path::new("inline")).unwrap();
        assert_eq!(data.player_start, Vec2::new(100.0, 100.0));
        assert_eq!(data.black_hole.radius, BlackHoleData::default().radius);
        assert!(data.trickle_waves.is_empty());
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_full_level_parses() {
        let json = r#"{
            "seed": 9, "width": 2000, "height": 1500,
            "player_start": [200, 200],
            "black_hole": { "position": [1000, 750], "capacity": 500 },
            "trickle_waves": [{ "count": 5, "spawn_interval": 1.5 }],
            "burst_waves": [{ "count": 12, "burst_size": 4, "enemy": { "health": 50 } }],
            "unicorns": [{ "spawn_time": 10 }],
            "food_carts": [{ "position": [300, 900], "clockwise": false }]
        }"#;
        let data = LevelData::from_json_str(json, Path::new("inline")).unwrap();
        assert_eq!(data.seed, 9);
        assert_eq!(data.burst_waves[0].burst_size, 4);
        assert_eq!(data.burst_waves[0].enemy.health, 50.0);
        assert!(!data.food_carts[0].clockwise);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_missing_dimensions_is_parse_error() {
        let err = LevelData::from_json_str(r#"{ "width": 10 }"#, Path::new("x")).unwrap_err();
        assert!(matches!(err, LevelError::Parse { .. }));
    }

    #[test]
    fn test_validation_rejects_bad_data() {
        let ok = LevelData::empty(800.0, 600.0, Vec2::new(50.0, 50.0));
        assert!(ok.validate().is_ok());

        let mut data = ok.clone();
        data.width = 0.0;
        assert!(matches!(data.validate(), Err(LevelError::Malformed(_))));

        let mut data = ok.clone();
        data.player_start = Vec2::new(-1.0, 50.0);
        assert!(data.validate().is_err());

        let mut data = ok.clone();
        data.trickle_waves.push(WaveData {
            count: 0,
            ..Default::default()
        });
        assert!(data.validate().is_err());

        let mut data = ok.clone();
        data.burst_waves.push(WaveData {
            burst_size: 0,
            ..Default::default()
        });
        assert!(data.validate().is_err());

        let mut data = ok.clone();
        data.unicorns.push(UnicornData {
            speed: 0.0,
            ..Default::default()
        });
        assert!(data.validate().is_err());

        let mut data = ok;
        data.food_carts.push(FoodCartData {
            position: Vec2::new(5000.0, 0.0),
            ..Default::default()
        });
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_loader_reports_missing_file() {
        let loader = JsonDataLoader::new("/nonexistent/levels");
        assert!(loader.level_path(3).ends_with("level3.json"));
        assert!(matches!(loader.load_level(3), Err(LevelError::Io { .. })));
    }
}
