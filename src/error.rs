//! Level setup errors
//!
//! Only construction can fail. Once a level is running every tick operation
//! is total over valid state.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Equipment slots the level borrows from the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentSlot {
    PrimaryWeapon,
    SecondaryWeapon,
    PrimaryGadget,
    SecondaryGadget,
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EquipmentSlot::PrimaryWeapon => "primary weapon",
            EquipmentSlot::SecondaryWeapon => "secondary weapon",
            EquipmentSlot::PrimaryGadget => "primary gadget",
            EquipmentSlot::SecondaryGadget => "secondary gadget",
        };
        f.write_str(name)
    }
}

/// Fatal errors raised while entering a level
#[derive(Error, Debug)]
pub enum LevelError {
    /// Level or settings file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File was read but is not valid JSON for the expected record.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Data parsed but violates a structural rule (empty bounds, bad schedule...).
    #[error("malformed level data: {0}")]
    Malformed(String),

    /// The inventory has nothing equipped in a slot the level requires.
    #[error("nothing equipped in {0} slot")]
    MissingEquipment(EquipmentSlot),

    /// The same weapon is equipped in both weapon slots.
    #[error("the same weapon is equipped as primary and secondary")]
    DuplicateWeapon,
}

/// Result type for level setup.
pub type LevelResult<T> = Result<T, LevelError>;
