//! Follow camera
//!
//! Eases toward the player each tick. The simulation never reads the camera;
//! it only feeds the input source (pointer translation) and the draw pass.

use glam::{Affine2, Vec2};

use super::tick::GameTime;

/// 2D camera tracking a target point
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// World point at the center of the view
    center: Vec2,
    viewport: Vec2,
    /// Higher is snappier; 0 freezes the camera
    follow_rate: f32,
}

impl Camera2D {
    pub fn new(center: Vec2, viewport_width: f32, viewport_height: f32, follow_rate: f32) -> Self {
        Self {
            center,
            viewport: Vec2::new(viewport_width, viewport_height),
            follow_rate,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// World coordinates of the view's top-left corner
    pub fn position(&self) -> Vec2 {
        self.center - self.viewport * 0.5
    }

    /// Ease toward `target` with exponential smoothing (frame-rate independent)
    pub fn update(&mut self, time: &GameTime, target: Vec2) {
        let blend = 1.0 - (-self.follow_rate * time.dt()).exp();
        self.center += (target - self.center) * blend;
    }

    /// World-to-view transform
    pub fn transform(&self) -> Affine2 {
        Affine2::from_translation(-self.position())
    }
}
