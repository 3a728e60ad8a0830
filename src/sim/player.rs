//! The player's spaceman

use glam::Vec2;

use super::actor::{Collidable, Drawable, PhysicalUnit};
use super::geometry::Rect;
use super::tick::GameTime;
use crate::renderer::{RenderSink, colors};

pub const PLAYER_RADIUS: f32 = 16.0;
pub const PLAYER_MASS: f32 = 10.0;
pub const PLAYER_HEALTH: f32 = 100.0;
/// Thrust acceleration along the move direction (pixels/s²)
pub const PLAYER_MOVE_ACCEL: f32 = 900.0;
pub const PLAYER_MAX_SPEED: f32 = 320.0;
/// Fraction of velocity lost per second
pub const PLAYER_DRAG: f32 = 3.0;

/// The player-controlled unit
#[derive(Debug, Clone)]
pub struct Spaceman {
    body: PhysicalUnit,
    /// Desired movement, any length; normalized when applied
    pub move_direction: Vec2,
    /// Unit vector the spaceman faces (toward the pointer)
    pub look_direction: Vec2,
}

impl Spaceman {
    pub fn new(start: Vec2) -> Self {
        Self {
            body: PhysicalUnit::new(start, PLAYER_RADIUS, PLAYER_MASS, PLAYER_HEALTH)
                .with_motion(PLAYER_MAX_SPEED, PLAYER_DRAG),
            move_direction: Vec2::ZERO,
            look_direction: Vec2::X,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.center
    }

    /// Same as position; the spaceman is drawn centered on its body
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.center
    }

    pub fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    /// Thrust, integrate, and stay inside the level
    pub fn update(&mut self, time: &GameTime, bounds: &Rect) {
        let dt = time.dt();
        if self.body.is_alive() {
            let thrust = self.move_direction.normalize_or_zero() * PLAYER_MOVE_ACCEL;
            self.body.velocity += thrust * dt;
        }
        self.body.integrate(dt);
        self.body.confine(bounds);
    }
}

impl Collidable for Spaceman {
    fn body(&self) -> &PhysicalUnit {
        &self.body
    }

    fn body_mut(&mut self) -> &mut PhysicalUnit {
        &mut self.body
    }
}

impl Drawable for Spaceman {
    fn draw(&self, sink: &mut dyn RenderSink) {
        if self.body.is_dead() {
            return;
        }
        let radius = self.body.radius * self.body.fade();
        let center = self.body.center;
        sink.draw_circle(center, radius, colors::PLAYER);
        sink.draw_line(
            center,
            center + self.look_direction * radius * 1.6,
            3.0,
            colors::PLAYER_LOOK,
        );
    }
}
