//! The level's central hazard
//!
//! A black hole cycles through a small state machine. While pulling it drags
//! every unit in range toward its center and swallows anything that crosses
//! the event horizon. Swallowed mass fills its energy; a full hole goes into
//! overdrive (no new spawns anywhere), then collapses into an exhausted lull
//! during which the player cannot act. A debug command can blow it up, which
//! pushes everything outward and leaves the hole permanently inactive.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Collidable, Drawable, Updatable};
use super::tick::GameTime;
use crate::renderer::{RenderSink, colors};

/// Distance at which pull strength equals the base gravity
pub const PULL_REFERENCE_DISTANCE: f32 = 200.0;
/// Cap on the inverse-distance pull multiplier
pub const MAX_PULL_MULTIPLIER: f32 = 4.0;

/// Black hole tuning, as stored in level files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackHoleData {
    pub position: Vec2,
    /// Event horizon radius; units whose center crosses it are consumed
    pub radius: f32,
    /// Units farther than this feel no pull
    pub influence_radius: f32,
    /// Base acceleration toward the center (pixels/s²)
    pub gravity: f32,
    /// Energy needed to trigger overdrive
    pub capacity: f32,
    /// Energy gained per unit of consumed mass
    pub energy_per_mass: f32,
    pub overdrive_duration: f32,
    pub exhausted_duration: f32,
    pub explosion_duration: f32,
    /// Final radius of the expanding blast
    pub explosion_radius: f32,
    /// Outward acceleration inside the blast (pixels/s²)
    pub explosion_force: f32,
    /// Damage per second inside the blast
    pub explosion_damage: f32,
}

impl Default for BlackHoleData {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            radius: 40.0,
            influence_radius: 600.0,
            gravity: 120.0,
            capacity: 1000.0,
            energy_per_mass: 10.0,
            overdrive_duration: 5.0,
            exhausted_duration: 3.0,
            explosion_duration: 1.5,
            explosion_radius: 400.0,
            explosion_force: 900.0,
            explosion_damage: 40.0,
        }
    }
}

/// Black hole states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlackHoleState {
    /// Collapsed after an explosion; no further effect
    Inactive,
    /// Attracting and consuming units
    Pulling,
    /// Full of energy; all spawning suppressed
    Overdrive,
    /// Spent; player input suppressed (except exit)
    Exhausted,
    /// Blowing apart; pushes and damages nearby units
    Exploding,
}

/// Level-wide consequences of the hazard's current state
///
/// The orchestrator queries this once at each decision point instead of
/// matching on [`BlackHoleState`] in several places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HazardEffects {
    pub pulling: bool,
    pub suppress_spawning: bool,
    pub suppress_input: bool,
}

/// The level's central gravitational hazard
#[derive(Debug, Clone)]
pub struct BlackHole {
    data: BlackHoleData,
    state: BlackHoleState,
    /// Seconds left in timed states
    state_timer: f32,
    energy: f32,
    /// Seconds since construction, drives the swirl animation
    age: f32,
}

impl BlackHole {
    pub fn new(data: BlackHoleData) -> Self {
        Self {
            data,
            state: BlackHoleState::Pulling,
            state_timer: 0.0,
            energy: 0.0,
            age: 0.0,
        }
    }

    #[inline]
    pub fn state(&self) -> BlackHoleState {
        self.state
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.data.position
    }

    pub fn radius(&self) -> f32 {
        self.data.radius
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn capacity(&self) -> f32 {
        self.data.capacity
    }

    pub fn effects(&self) -> HazardEffects {
        HazardEffects {
            pulling: self.state == BlackHoleState::Pulling,
            suppress_spawning: self.state == BlackHoleState::Overdrive,
            suppress_input: self.state == BlackHoleState::Exhausted,
        }
    }

    /// Current blast radius while exploding, zero otherwise
    pub fn blast_radius(&self) -> f32 {
        if self.state != BlackHoleState::Exploding || self.data.explosion_duration <= 0.0 {
            return 0.0;
        }
        let progress = 1.0 - self.state_timer / self.data.explosion_duration;
        self.data.explosion_radius * progress.clamp(0.0, 1.0)
    }

    /// Gravitational pull on a unit, ignoring state
    ///
    /// Strength grows inversely with distance, capped near the horizon, and
    /// drops to zero outside the influence radius.
    pub fn pull_force_on(&self, unit: &dyn Collidable) -> Vec2 {
        let body = unit.body();
        let offset = self.data.position - body.center;
        let dist = offset.length();
        if dist > self.data.influence_radius || dist <= f32::EPSILON {
            return Vec2::ZERO;
        }
        let multiplier =
            (PULL_REFERENCE_DISTANCE / dist.max(self.data.radius)).min(MAX_PULL_MULTIPLIER);
        offset / dist * self.data.gravity * multiplier * body.mass
    }

    /// Apply this tick's state-dependent effect to a unit
    ///
    /// Pulling attracts (and swallows units at the horizon); exploding pushes
    /// and damages units inside the blast. Other states do nothing.
    pub fn apply_to_unit(&mut self, unit: &mut dyn Collidable, time: &GameTime) {
        if !unit.body().is_alive() {
            return;
        }
        let dt = time.dt();
        match self.state {
            BlackHoleState::Pulling => {
                let force = self.pull_force_on(unit);
                unit.body_mut().apply_force(force, dt);
                self.try_eat(unit);
            }
            BlackHoleState::Exploding => {
                let blast = self.blast_radius();
                let body = unit.body_mut();
                let offset = body.center - self.data.position;
                let dist = offset.length();
                if dist < blast {
                    let dir = if dist > f32::EPSILON { offset / dist } else { Vec2::X };
                    let accel = self.data.explosion_force * body.mass;
                    body.apply_force(dir * accel, dt);
                    body.take_damage(self.data.explosion_damage * dt);
                }
            }
            BlackHoleState::Inactive | BlackHoleState::Overdrive | BlackHoleState::Exhausted => {}
        }
    }

    /// Swallow the unit if it has crossed the event horizon while pulling.
    /// Returns true if the unit was consumed this call.
    pub fn try_eat(&mut self, unit: &mut dyn Collidable) -> bool {
        if self.state != BlackHoleState::Pulling {
            return false;
        }
        let body = unit.body_mut();
        if body.center.distance(self.data.position) > self.data.radius {
            return false;
        }
        let mass = body.mass;
        if !body.consume() {
            return false;
        }
        self.energy += mass * self.data.energy_per_mass;
        log::debug!(
            "Black hole consumed unit (mass {mass:.1}), energy {:.0}/{:.0}",
            self.energy,
            self.data.capacity
        );
        true
    }

    /// Blow the hole apart. Ignored once exploding or collapsed.
    pub fn explode(&mut self) -> bool {
        match self.state {
            BlackHoleState::Pulling | BlackHoleState::Overdrive | BlackHoleState::Exhausted => {
                self.transition(BlackHoleState::Exploding, self.data.explosion_duration);
                true
            }
            BlackHoleState::Exploding | BlackHoleState::Inactive => false,
        }
    }

    fn transition(&mut self, next: BlackHoleState, timer: f32) {
        log::info!("Black hole: {:?} -> {:?}", self.state, next);
        self.state = next;
        self.state_timer = timer;
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: BlackHoleState, timer: f32) {
        self.state = state;
        self.state_timer = timer;
    }

    #[cfg(test)]
    pub(crate) fn set_energy(&mut self, energy: f32) {
        self.energy = energy;
    }
}

impl Updatable for BlackHole {
    fn update(&mut self, time: &GameTime) {
        let dt = time.dt();
        self.age += dt;

        match self.state {
            BlackHoleState::Pulling => {
                if self.energy >= self.data.capacity {
                    self.energy = self.data.capacity;
                    self.transition(BlackHoleState::Overdrive, self.data.overdrive_duration);
                }
            }
            BlackHoleState::Overdrive => {
                self.state_timer -= dt;
                if self.state_timer <= 0.0 {
                    self.transition(BlackHoleState::Exhausted, self.data.exhausted_duration);
                }
            }
            BlackHoleState::Exhausted => {
                let drain = if self.data.exhausted_duration > 0.0 {
                    self.data.capacity / self.data.exhausted_duration * dt
                } else {
                    self.energy
                };
                self.energy = (self.energy - drain).max(0.0);
                self.state_timer -= dt;
                if self.state_timer <= 0.0 {
                    self.energy = 0.0;
                    self.transition(BlackHoleState::Pulling, 0.0);
                }
            }
            BlackHoleState::Exploding => {
                self.state_timer -= dt;
                if self.state_timer <= 0.0 {
                    self.energy = 0.0;
                    self.transition(BlackHoleState::Inactive, 0.0);
                }
            }
            BlackHoleState::Inactive => {}
        }
    }
}

impl Drawable for BlackHole {
    fn draw(&self, sink: &mut dyn RenderSink) {
        let center = self.data.position;
        let radius = self.data.radius;

        if self.state == BlackHoleState::Inactive {
            sink.draw_ring(center, radius * 0.5, 2.0, colors::BLACK_HOLE_EXHAUSTED);
            return;
        }

        sink.draw_circle(center, radius, colors::BLACK_HOLE);
        let ring_color = match self.state {
            BlackHoleState::Overdrive => colors::BLACK_HOLE_OVERDRIVE,
            BlackHoleState::Exhausted => colors::BLACK_HOLE_EXHAUSTED,
            _ => colors::BLACK_HOLE_RING,
        };
        // Accretion ring pulses slightly
        let pulse = 1.0 + 0.05 * (self.age * 4.0).sin();
        sink.draw_ring(center, radius * 1.2 * pulse, 4.0, ring_color);

        if self.state == BlackHoleState::Exploding {
            sink.draw_ring(center, self.blast_radius(), 8.0, colors::BLACK_HOLE_EXPLOSION);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::{LifeState, PhysicalUnit};
    use std::time::Duration;

    fn hole() -> BlackHole {
        BlackHole::new(BlackHoleData {
            position: Vec2::new(500.0, 500.0),
            ..Default::default()
        })
    }

    fn tick_time(secs: f32) -> GameTime {
        GameTime::new(Duration::ZERO, Duration::from_secs_f32(secs))
    }

    #[test]
    fn test_starts_pulling() {
        let bh = hole();
        assert_eq!(bh.state(), BlackHoleState::Pulling);
        assert!(bh.effects().pulling);
        assert!(!bh.effects().suppress_spawning);
    }

    #[test]
    fn test_pull_points_toward_center() {
        let bh = hole();
        let unit = PhysicalUnit::new(Vec2::new(300.0, 500.0), 10.0, 2.0, 10.0);
        let force = bh.pull_force_on(&unit);
        assert!(force.x > 0.0);
        assert!(force.y.abs() < 0.001);
        // At the reference distance the multiplier is exactly 1
        assert!((force.x - 120.0 * 2.0).abs() < 0.01);
    }

    #[test]
    fn test_no_pull_outside_influence() {
        let bh = hole();
        let unit = PhysicalUnit::new(Vec2::new(-500.0, 500.0), 10.0, 1.0, 10.0);
        assert_eq!(bh.pull_force_on(&unit), Vec2::ZERO);
    }

    #[test]
    fn test_consuming_fills_energy_and_triggers_overdrive() {
        let mut bh = hole();
        let mut unit = PhysicalUnit::new(Vec2::new(510.0, 500.0), 10.0, 100.0, 10.0);
        assert!(bh.try_eat(&mut unit));
        assert_eq!(unit.life_state(), LifeState::BeingEaten);
        assert_eq!(bh.energy(), 1000.0);

        bh.update(&tick_time(0.016));
        assert_eq!(bh.state(), BlackHoleState::Overdrive);
        assert!(bh.effects().suppress_spawning);
    }

    #[test]
    fn test_overdrive_exhausted_pulling_cycle() {
        let mut bh = hole();
        bh.set_energy(1000.0);
        bh.update(&tick_time(0.1));
        assert_eq!(bh.state(), BlackHoleState::Overdrive);

        bh.update(&tick_time(5.0));
        assert_eq!(bh.state(), BlackHoleState::Exhausted);
        assert!(bh.effects().suppress_input);

        bh.update(&tick_time(1.5));
        assert!(bh.energy() < 1000.0 && bh.energy() > 0.0);

        bh.update(&tick_time(1.5));
        assert_eq!(bh.state(), BlackHoleState::Pulling);
        assert_eq!(bh.energy(), 0.0);
    }

    #[test]
    fn test_explode_path_ends_inactive() {
        let mut bh = hole();
        assert!(bh.explode());
        assert_eq!(bh.state(), BlackHoleState::Exploding);
        assert!(!bh.explode());

        bh.update(&tick_time(0.75));
        assert!(bh.blast_radius() > 0.0);

        bh.update(&tick_time(1.0));
        assert_eq!(bh.state(), BlackHoleState::Inactive);
        assert!(!bh.explode());
    }

    #[test]
    fn test_explosion_pushes_outward() {
        let mut bh = hole();
        bh.explode();
        bh.update(&tick_time(1.0));
        let mut unit = PhysicalUnit::new(Vec2::new(600.0, 500.0), 10.0, 1.0, 100.0);
        bh.apply_to_unit(&mut unit, &tick_time(0.1));
        assert!(unit.velocity.x > 0.0);
        assert!(unit.health < 100.0);
    }

    #[test]
    fn test_no_eating_outside_pulling() {
        let mut bh = hole();
        bh.force_state(BlackHoleState::Overdrive, 5.0);
        let mut unit = PhysicalUnit::new(Vec2::new(500.0, 500.0), 10.0, 1.0, 10.0);
        assert!(!bh.try_eat(&mut unit));
        assert!(unit.is_alive());
    }
}
