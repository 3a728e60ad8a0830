//! Energy-powered gadgets
//!
//! A gadget toggles on and off and burns energy while active. The level
//! watches the primary gadget's `active` flag to decide whether the tick runs
//! in slow motion.

use serde::{Deserialize, Serialize};

use super::actor::Updatable;
use super::tick::GameTime;

/// Gadget tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GadgetData {
    pub name: String,
    pub max_energy: f32,
    /// Energy burned per second while active
    pub drain_rate: f32,
    /// Energy regained per second while idle
    pub recharge_rate: f32,
}

impl Default for GadgetData {
    fn default() -> Self {
        Self {
            name: "Chronosphere".to_string(),
            max_energy: 1000.0,
            drain_rate: 250.0,
            recharge_rate: 50.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Gadget {
    data: GadgetData,
    energy: f32,
    active: bool,
}

impl Gadget {
    /// New gadget with a full charge
    pub fn new(data: GadgetData) -> Self {
        let energy = data.max_energy;
        Self {
            data,
            energy,
            active: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    #[inline]
    pub fn active(&self) -> bool {
        self.active
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn max_energy(&self) -> f32 {
        self.data.max_energy
    }

    /// Toggle the effect; turning on requires some charge
    pub fn trigger(&mut self) {
        if self.active {
            self.active = false;
        } else if self.energy > 0.0 {
            self.active = true;
        }
        log::debug!("{} active: {}", self.data.name, self.active);
    }
}

impl Updatable for Gadget {
    fn update(&mut self, time: &GameTime) {
        let dt = time.dt();
        if self.active {
            self.energy -= self.data.drain_rate * dt;
            if self.energy <= 0.0 {
                self.energy = 0.0;
                self.active = false;
                log::debug!("{} ran out of energy", self.data.name);
            }
        } else {
            self.energy = (self.energy + self.data.recharge_rate * dt).min(self.data.max_energy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn secs(s: u64) -> GameTime {
        GameTime::new(Duration::ZERO, Duration::from_secs(s))
    }

    #[test]
    fn test_trigger_toggles() {
        let mut gadget = Gadget::new(GadgetData::default());
        gadget.trigger();
        assert!(gadget.active());
        gadget.trigger();
        assert!(!gadget.active());
    }

    #[test]
    fn test_drains_and_shuts_off() {
        let mut gadget = Gadget::new(GadgetData::default());
        gadget.trigger();
        gadget.update(&secs(2));
        assert_eq!(gadget.energy(), 500.0);
        gadget.update(&secs(3));
        assert!(!gadget.active());
        assert_eq!(gadget.energy(), 0.0);
    }

    #[test]
    fn test_empty_gadget_cannot_activate() {
        let mut gadget = Gadget::new(GadgetData {
            max_energy: 0.0,
            ..Default::default()
        });
        gadget.trigger();
        assert!(!gadget.active());
    }

    #[test]
    fn test_recharges_to_max() {
        let mut gadget = Gadget::new(GadgetData::default());
        gadget.trigger();
        gadget.update(&secs(1));
        gadget.trigger();
        gadget.update(&secs(60));
        assert_eq!(gadget.energy(), 1000.0);
    }
}
