//! Food carts
//!
//! Slow resource actors that drift in a lazy orbit around the black hole and
//! bounce off the level edges. They can be shot, rammed by unicorns, and
//! pulled into the hole.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Collidable, Drawable, PhysicalUnit};
use super::geometry::Rect;
use super::tick::GameTime;
use crate::renderer::vertex::with_alpha;
use crate::renderer::{RenderSink, colors};

/// How quickly carts turn toward their orbit heading (1/s)
const STEER_RATE: f32 = 2.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodCartData {
    pub position: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub health: f32,
    /// Cruising speed along the orbit (pixels/s)
    pub drift_speed: f32,
    pub clockwise: bool,
}

impl Default for FoodCartData {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            radius: 20.0,
            mass: 30.0,
            health: 60.0,
            drift_speed: 40.0,
            clockwise: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FoodCart {
    body: PhysicalUnit,
    drift_speed: f32,
    clockwise: bool,
}

impl FoodCart {
    pub fn new(data: &FoodCartData) -> Self {
        Self {
            body: PhysicalUnit::new(data.position, data.radius, data.mass, data.health),
            drift_speed: data.drift_speed,
            clockwise: data.clockwise,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.center
    }

    /// Drift around `hazard_position` and stay within `bounds`
    pub fn update(&mut self, time: &GameTime, bounds: &Rect, hazard_position: Vec2) {
        let dt = time.dt();
        if self.body.is_alive() {
            let radial = (hazard_position - self.body.center).normalize_or_zero();
            // y points down, so this turn reads clockwise on screen
            let tangent = if self.clockwise {
                Vec2::new(radial.y, -radial.x)
            } else {
                Vec2::new(-radial.y, radial.x)
            };
            let desired = tangent * self.drift_speed;
            let blend = 1.0 - (-STEER_RATE * dt).exp();
            self.body.velocity += (desired - self.body.velocity) * blend;
        }
        self.body.integrate(dt);
        self.body.bounce_within(bounds);
    }
}

impl Collidable for FoodCart {
    fn body(&self) -> &PhysicalUnit {
        &self.body
    }

    fn body_mut(&mut self) -> &mut PhysicalUnit {
        &mut self.body
    }
}

impl Drawable for FoodCart {
    fn draw(&self, sink: &mut dyn RenderSink) {
        if self.body.is_dead() {
            return;
        }
        let fade = self.body.fade();
        let rect = Rect::around(self.body.center, self.body.radius * fade);
        sink.draw_rect(rect, with_alpha(colors::FOOD_CART, fade));
    }
}
