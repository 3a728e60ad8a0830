//! Equipment inventory
//!
//! The inventory owns the player's weapons and gadgets across levels. A level
//! borrows shared handles for its lifetime and only mutates them through the
//! equipment's own operations.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{EquipmentSlot, LevelError, LevelResult};
use crate::sim::gadget::{Gadget, GadgetData};
use crate::sim::weapon::{ProjectileWeapon, Weapon, WeaponData};

pub type WeaponHandle = Rc<RefCell<dyn Weapon>>;
pub type GadgetHandle = Rc<RefCell<Gadget>>;

/// Currently equipped items
#[derive(Default)]
pub struct InventoryManager {
    primary_weapon: Option<WeaponHandle>,
    secondary_weapon: Option<WeaponHandle>,
    primary_gadget: Option<GadgetHandle>,
    secondary_gadget: Option<GadgetHandle>,
}

impl InventoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flamethrower and freeze ray, plus two time gadgets
    pub fn default_loadout() -> Self {
        let mut inventory = Self::new();
        inventory.set_primary_weapon(weapon(WeaponData::flamethrower()));
        inventory.set_secondary_weapon(weapon(WeaponData::freeze_ray()));
        inventory.set_primary_gadget(gadget(GadgetData::default()));
        inventory.set_secondary_gadget(gadget(GadgetData {
            name: "Stasis Field".to_string(),
            max_energy: 600.0,
            ..Default::default()
        }));
        inventory
    }

    pub fn primary_weapon(&self) -> Option<WeaponHandle> {
        self.primary_weapon.clone()
    }

    pub fn secondary_weapon(&self) -> Option<WeaponHandle> {
        self.secondary_weapon.clone()
    }

    pub fn primary_gadget(&self) -> Option<GadgetHandle> {
        self.primary_gadget.clone()
    }

    pub fn secondary_gadget(&self) -> Option<GadgetHandle> {
        self.secondary_gadget.clone()
    }

    pub fn set_primary_weapon(&mut self, weapon: WeaponHandle) {
        self.primary_weapon = Some(weapon);
    }

    pub fn set_secondary_weapon(&mut self, weapon: WeaponHandle) {
        self.secondary_weapon = Some(weapon);
    }

    pub fn set_primary_gadget(&mut self, gadget: GadgetHandle) {
        self.primary_gadget = Some(gadget);
    }

    pub fn set_secondary_gadget(&mut self, gadget: GadgetHandle) {
        self.secondary_gadget = Some(gadget);
    }

    /// All four handles a level needs, or the first empty slot
    pub fn loadout(&self) -> LevelResult<Loadout> {
        let primary_weapon = self
            .primary_weapon()
            .ok_or(LevelError::MissingEquipment(EquipmentSlot::PrimaryWeapon))?;
        let secondary_weapon = self
            .secondary_weapon()
            .ok_or(LevelError::MissingEquipment(EquipmentSlot::SecondaryWeapon))?;
        let primary_gadget = self
            .primary_gadget()
            .ok_or(LevelError::MissingEquipment(EquipmentSlot::PrimaryGadget))?;
        let secondary_gadget = self
            .secondary_gadget()
            .ok_or(LevelError::MissingEquipment(EquipmentSlot::SecondaryGadget))?;

        // Both weapons are borrowed mutably together every tick
        if Rc::ptr_eq(&primary_weapon, &secondary_weapon) {
            return Err(LevelError::DuplicateWeapon);
        }

        Ok(Loadout {
            primary_weapon,
            secondary_weapon,
            primary_gadget,
            secondary_gadget,
        })
    }
}

/// Equipment handles held by a running level
#[derive(Clone)]
pub struct Loadout {
    pub primary_weapon: WeaponHandle,
    pub secondary_weapon: WeaponHandle,
    pub primary_gadget: GadgetHandle,
    pub secondary_gadget: GadgetHandle,
}

/// Wrap a projectile weapon in a shareable handle
pub fn weapon(data: WeaponData) -> WeaponHandle {
    Rc::new(RefCell::new(ProjectileWeapon::new(data)))
}

/// Wrap a gadget in a shareable handle
pub fn gadget(data: GadgetData) -> GadgetHandle {
    Rc::new(RefCell::new(Gadget::new(data)))
}
