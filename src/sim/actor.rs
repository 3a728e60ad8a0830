//! Shared actor body and capability traits
//!
//! Every moving thing in a level (player, wave enemies, unicorns, food carts)
//! carries a [`PhysicalUnit`]. The orchestrator talks to actors through a few
//! narrow capabilities instead of one polymorphic actor list, so update order
//! and cross-category rules stay explicit per collection.

use glam::Vec2;

use super::collision::reflect_velocity;
use super::geometry::Rect;
use super::tick::GameTime;
use crate::renderer::RenderSink;

/// Seconds a dying or consumed unit takes to fade out
pub const FADE_DURATION: f32 = 0.5;

/// Life state of a physical unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifeState {
    #[default]
    Living,
    /// Health ran out; fading before removal
    Dying,
    /// Captured by the black hole; shrinking into it
    BeingEaten,
    /// Gone; owners drop or recycle the unit
    Dead,
}

/// Position, motion, and health shared by all physical actors
#[derive(Debug, Clone)]
pub struct PhysicalUnit {
    pub center: Vec2,
    pub velocity: Vec2,
    /// Hit circle radius
    pub radius: f32,
    pub mass: f32,
    pub health: f32,
    pub max_health: f32,
    /// Speed cap applied after integration
    pub max_speed: f32,
    /// Fraction of velocity lost per second
    pub drag: f32,
    life_state: LifeState,
    /// 1.0 while living, counts down to 0.0 while fading
    fade: f32,
}

impl PhysicalUnit {
    pub fn new(center: Vec2, radius: f32, mass: f32, health: f32) -> Self {
        Self {
            center,
            velocity: Vec2::ZERO,
            radius,
            mass,
            health,
            max_health: health,
            max_speed: f32::INFINITY,
            drag: 0.0,
            life_state: LifeState::Living,
            fade: 1.0,
        }
    }

    pub fn with_motion(mut self, max_speed: f32, drag: f32) -> Self {
        self.max_speed = max_speed;
        self.drag = drag;
        self
    }

    #[inline]
    pub fn life_state(&self) -> LifeState {
        self.life_state
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life_state == LifeState::Living
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life_state == LifeState::Dead
    }

    /// Visual scale while fading (1.0 when living)
    pub fn fade(&self) -> f32 {
        self.fade
    }

    /// Accelerate by `force / mass` over `dt` seconds
    pub fn apply_force(&mut self, force: Vec2, dt: f32) {
        if self.mass > 0.0 {
            self.velocity += force / self.mass * dt;
        }
    }

    /// Instant velocity change scaled by mass
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.mass > 0.0 {
            self.velocity += impulse / self.mass;
        }
    }

    /// Apply drag, clamp speed, move, and advance any fade-out
    pub fn integrate(&mut self, dt: f32) {
        self.velocity *= (1.0 - self.drag * dt).max(0.0);
        self.velocity = self.velocity.clamp_length_max(self.max_speed);
        if self.life_state != LifeState::BeingEaten {
            self.center += self.velocity * dt;
        }
        self.advance_fade(dt);
    }

    /// Keep the hit circle inside `bounds`, zeroing velocity into the wall
    pub fn confine(&mut self, bounds: &Rect) {
        let inner = bounds.inset(self.radius);
        let clamped = inner.clamp_point(self.center);
        if clamped.x != self.center.x {
            self.velocity.x = 0.0;
        }
        if clamped.y != self.center.y {
            self.velocity.y = 0.0;
        }
        self.center = clamped;
    }

    /// Same as [`confine`](Self::confine) but reflects velocity instead of stopping
    pub fn bounce_within(&mut self, bounds: &Rect) {
        let inner = bounds.inset(self.radius);
        let clamped = inner.clamp_point(self.center);
        if clamped.x != self.center.x {
            self.velocity = reflect_velocity(self.velocity, Vec2::X);
        }
        if clamped.y != self.center.y {
            self.velocity = reflect_velocity(self.velocity, Vec2::Y);
        }
        self.center = clamped;
    }

    /// Subtract health; a living unit at zero health starts dying
    pub fn take_damage(&mut self, amount: f32) {
        if !self.is_alive() {
            return;
        }
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.life_state = LifeState::Dying;
        }
    }

    /// Start being swallowed. Returns false if the unit was already gone.
    pub fn consume(&mut self) -> bool {
        match self.life_state {
            LifeState::Living | LifeState::Dying => {
                self.life_state = LifeState::BeingEaten;
                self.velocity = Vec2::ZERO;
                true
            }
            LifeState::BeingEaten | LifeState::Dead => false,
        }
    }

    /// Take the unit out of play immediately, skipping any fade
    pub fn despawn(&mut self) {
        self.life_state = LifeState::Dead;
        self.velocity = Vec2::ZERO;
        self.fade = 0.0;
    }

    /// Bring a dead unit back at `center` with full health
    pub fn revive(&mut self, center: Vec2) {
        self.center = center;
        self.velocity = Vec2::ZERO;
        self.health = self.max_health;
        self.life_state = LifeState::Living;
        self.fade = 1.0;
    }

    fn advance_fade(&mut self, dt: f32) {
        match self.life_state {
            LifeState::Dying | LifeState::BeingEaten => {
                self.fade -= dt / FADE_DURATION;
                if self.fade <= 0.0 {
                    self.fade = 0.0;
                    self.life_state = LifeState::Dead;
                }
            }
            LifeState::Living | LifeState::Dead => {}
        }
    }
}

/// Actors advanced with nothing but the tick time
pub trait Updatable {
    fn update(&mut self, time: &GameTime);
}

/// Actors that render themselves into a sink
pub trait Drawable {
    fn draw(&self, sink: &mut dyn RenderSink);
}

/// Actors with a physical body that others can hit, pull, or consume
pub trait Collidable {
    fn body(&self) -> &PhysicalUnit;
    fn body_mut(&mut self) -> &mut PhysicalUnit;
}

/// Collections whose new spawns can be switched off without touching
/// units already in play
pub trait SpawnGated {
    fn spawn_enable(&self) -> bool;
    fn set_spawn_enable(&mut self, enable: bool);
}

impl Collidable for PhysicalUnit {
    fn body(&self) -> &PhysicalUnit {
        self
    }

    fn body_mut(&mut self) -> &mut PhysicalUnit {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_then_fade_to_dead() {
        let mut unit = PhysicalUnit::new(Vec2::ZERO, 5.0, 1.0, 10.0);
        unit.take_damage(4.0);
        assert!(unit.is_alive());
        unit.take_damage(10.0);
        assert_eq!(unit.life_state(), LifeState::Dying);

        // Dying units ignore further damage
        unit.take_damage(100.0);
        assert_eq!(unit.health, 0.0);

        for _ in 0..40 {
            unit.integrate(1.0 / 60.0);
        }
        assert!(unit.is_dead());
    }

    #[test]
    fn test_consumed_unit_stops_moving() {
        let mut unit = PhysicalUnit::new(Vec2::ZERO, 5.0, 1.0, 10.0);
        unit.velocity = Vec2::new(100.0, 0.0);
        assert!(unit.consume());
        assert!(!unit.consume());
        unit.integrate(0.1);
        assert_eq!(unit.center, Vec2::ZERO);
        assert_eq!(unit.life_state(), LifeState::BeingEaten);
    }

    #[test]
    fn test_confine_stops_at_wall() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut unit = PhysicalUnit::new(Vec2::new(120.0, 50.0), 5.0, 1.0, 10.0);
        unit.velocity = Vec2::new(30.0, 10.0);
        unit.confine(&bounds);
        assert_eq!(unit.center, Vec2::new(95.0, 50.0));
        assert_eq!(unit.velocity, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_bounce_reflects() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut unit = PhysicalUnit::new(Vec2::new(50.0, -3.0), 5.0, 1.0, 10.0);
        unit.velocity = Vec2::new(0.0, -20.0);
        unit.bounce_within(&bounds);
        assert_eq!(unit.velocity, Vec2::new(0.0, 20.0));
    }

    #[test]
    fn test_integrate_applies_drag_and_speed_cap() {
        let mut unit = PhysicalUnit::new(Vec2::ZERO, 5.0, 1.0, 10.0).with_motion(50.0, 1.0);
        unit.velocity = Vec2::new(200.0, 0.0);
        unit.integrate(0.5);
        // 200 * (1 - 0.5) = 100, capped to 50
        assert!((unit.velocity.x - 50.0).abs() < 0.001);
        assert!((unit.center.x - 25.0).abs() < 0.001);
    }

    #[test]
    fn test_revive_restores_health() {
        let mut unit = PhysicalUnit::new(Vec2::ZERO, 5.0, 1.0, 10.0);
        unit.take_damage(10.0);
        unit.revive(Vec2::new(3.0, 4.0));
        assert!(unit.is_alive());
        assert_eq!(unit.health, 10.0);
        assert_eq!(unit.fade(), 1.0);
    }
}
