//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Linear RGBA color
pub type Color = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Multiply a color's alpha
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BLACK_HOLE: Color = [0.05, 0.0, 0.1, 1.0];
    pub const BLACK_HOLE_RING: Color = [0.6, 0.2, 0.8, 1.0];
    pub const BLACK_HOLE_OVERDRIVE: Color = [1.0, 0.35, 0.1, 1.0];
    pub const BLACK_HOLE_EXHAUSTED: Color = [0.35, 0.35, 0.45, 1.0];
    pub const BLACK_HOLE_EXPLOSION: Color = [1.0, 0.9, 0.6, 0.8];
    pub const PLAYER: Color = [0.2, 0.8, 0.4, 1.0];
    pub const PLAYER_LOOK: Color = [0.7, 1.0, 0.8, 1.0];
    pub const ENEMY: Color = [0.9, 0.25, 0.3, 1.0];
    pub const UNICORN: Color = [1.0, 0.6, 0.9, 1.0];
    pub const FOOD_CART: Color = [0.95, 0.75, 0.3, 1.0];
    pub const FLAME: Color = [1.0, 0.5, 0.1, 0.9];
    pub const FREEZE: Color = [0.5, 0.85, 1.0, 0.9];
    pub const HUD_BACK: Color = [0.1, 0.1, 0.15, 0.8];
    pub const HUD_HEALTH: Color = [0.3, 0.9, 0.4, 1.0];
    pub const HUD_ENERGY: Color = [0.6, 0.2, 0.8, 1.0];
    pub const HUD_GADGET: Color = [0.4, 0.7, 1.0, 1.0];
}
