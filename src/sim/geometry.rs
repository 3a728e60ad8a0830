//! Axis-aligned rectangles for level bounds and hit regions
//!
//! World space has its origin at the top-left of the level, x to the right
//! and y downward, matching the camera and HUD conventions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square rectangle of half-extent `radius` around `center`
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            radius * 2.0,
            radius * 2.0,
        )
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.min() + self.size() * 0.5
    }

    /// True if the rectangle has positive, finite extent
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Shrink every edge inward by `margin` (never below zero size)
    pub fn inset(&self, margin: f32) -> Rect {
        let margin_x = margin.min(self.width / 2.0);
        let margin_y = margin.min(self.height / 2.0);
        Rect::new(
            self.x + margin_x,
            self.y + margin_y,
            self.width - margin_x * 2.0,
            self.height - margin_y * 2.0,
        )
    }

    /// Closest point inside the rectangle
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }

    /// Point on the rectangle's perimeter, parameterized by `t` in [0, 1)
    /// walking clockwise from the top-left corner.
    pub fn perimeter_point(&self, t: f32) -> Vec2 {
        let perimeter = 2.0 * (self.width + self.height);
        let mut d = t.rem_euclid(1.0) * perimeter;

        if d < self.width {
            return Vec2::new(self.x + d, self.y);
        }
        d -= self.width;
        if d < self.height {
            return Vec2::new(self.right(), self.y + d);
        }
        d -= self.height;
        if d < self.width {
            return Vec2::new(self.right() - d, self.bottom());
        }
        d -= self.width;
        Vec2::new(self.x, self.bottom() - d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.center(), Vec2::new(60.0, 45.0));
    }

    #[test]
    fn test_rect_validity() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, 0.0, 1.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, f32::NAN, 1.0).is_valid());
    }

    #[test]
    fn test_rect_clamp_and_contains() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(r.contains(Vec2::new(50.0, 50.0)));
        assert!(!r.contains(Vec2::new(-1.0, 50.0)));
        assert_eq!(r.clamp_point(Vec2::new(150.0, -20.0)), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_perimeter_point_stays_on_edge() {
        let r = Rect::new(0.0, 0.0, 200.0, 100.0);
        for i in 0..16 {
            let p = r.perimeter_point(i as f32 / 16.0);
            let on_vertical = p.x.abs() < 0.001 || (p.x - 200.0).abs() < 0.001;
            let on_horizontal = p.y.abs() < 0.001 || (p.y - 100.0).abs() < 0.001;
            assert!(on_vertical || on_horizontal, "{p:?} is not on the perimeter");
        }
    }

    #[test]
    fn test_inset() {
        let r = Rect::new(0.0, 0.0, 100.0, 40.0).inset(10.0);
        assert_eq!(r, Rect::new(10.0, 10.0, 80.0, 20.0));
    }
}
