//! Space Game - level simulation and rendering front end
//!
//! Core modules:
//! - `sim`: Level simulation (actors, hazard, waves, per-tick orchestration)
//! - `renderer`: Render sink trait and CPU vertex batching
//! - `data`: Level files and validation
//! - `inventory`: Equipment shared with levels
//! - `hud`: Screen-space overlay
//! - `settings`: Runtime tuning

pub mod data;
pub mod error;
pub mod hud;
pub mod inventory;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use data::{DataLoader, JsonDataLoader, LevelData};
pub use error::{EquipmentSlot, LevelError, LevelResult};
pub use inventory::InventoryManager;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// First level loaded when none is named
    pub const FIRST_LEVEL: u32 = 1;
    /// Default settings file looked up next to the binary
    pub const SETTINGS_FILE: &str = "settings.json";
    /// Time scale while the primary gadget is active
    pub const SLOW_MOTION_FACTOR: f32 = 0.5;
}

/// Unit vector from `from` toward `to`, or zero when they coincide
#[inline]
pub fn direction_between(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}
