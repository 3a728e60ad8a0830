//! Collision detection and response between round bodies
//!
//! Every unit in a level is treated as a circle for contact purposes. The
//! helpers here detect overlap and push two bodies apart in proportion to
//! their masses, so that resolving A against B is the same as B against A.

use glam::Vec2;

use super::actor::PhysicalUnit;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit normal pointing from the second body toward the first
    pub normal: Vec2,
    /// Overlap depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between two circles
///
/// When the centers coincide the normal falls back to +X so that the
/// separation still has a direction.
pub fn circle_collision(
    a_pos: Vec2,
    a_radius: f32,
    b_pos: Vec2,
    b_radius: f32,
) -> CollisionResult {
    let delta = a_pos - b_pos;
    let dist = delta.length();
    let reach = a_radius + b_radius;

    if dist >= reach {
        return CollisionResult::miss();
    }

    let normal = if dist > f32::EPSILON {
        delta / dist
    } else {
        Vec2::X
    };

    CollisionResult {
        hit: true,
        normal,
        penetration: reach - dist,
    }
}

/// Check overlap between two units' hit circles
pub fn unit_collision(a: &PhysicalUnit, b: &PhysicalUnit) -> CollisionResult {
    circle_collision(a.center, a.radius, b.center, b.radius)
}

/// Push two overlapping units apart, heavier units moving less
///
/// Also removes the approaching component of their relative velocity so
/// they do not re-penetrate on the next step.
pub fn separate(a: &mut PhysicalUnit, b: &mut PhysicalUnit, contact: &CollisionResult) {
    if !contact.hit {
        return;
    }

    let total_mass = a.mass + b.mass;
    let (share_a, share_b) = if total_mass > 0.0 {
        (b.mass / total_mass, a.mass / total_mass)
    } else {
        (0.5, 0.5)
    };

    a.center += contact.normal * contact.penetration * share_a;
    b.center -= contact.normal * contact.penetration * share_b;

    let closing = (a.velocity - b.velocity).dot(contact.normal);
    if closing < 0.0 {
        a.velocity -= contact.normal * closing * share_a;
        b.velocity += contact.normal * closing * share_b;
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit_at(x: f32, y: f32, mass: f32) -> PhysicalUnit {
        PhysicalUnit::new(Vec2::new(x, y), 10.0, mass, 10.0)
    }

    #[test]
    fn test_circle_collision_hit() {
        let result = circle_collision(Vec2::new(15.0, 0.0), 10.0, Vec2::ZERO, 10.0);
        assert!(result.hit);
        assert!((result.penetration - 5.0).abs() < 0.001);
        assert!((result.normal - Vec2::X).length() < 0.001);
    }

    #[test]
    fn test_circle_collision_miss() {
        let result = circle_collision(Vec2::new(25.0, 0.0), 10.0, Vec2::ZERO, 10.0);
        assert!(!result.hit);
    }

    #[test]
    fn test_coincident_centers_still_separate() {
        let mut a = unit_at(0.0, 0.0, 1.0);
        let mut b = unit_at(0.0, 0.0, 1.0);
        let contact = unit_collision(&a, &b);
        assert!(contact.hit);
        separate(&mut a, &mut b, &contact);
        assert!((a.center - b.center).length() >= 19.999);
    }

    #[test]
    fn test_heavier_unit_moves_less() {
        let mut light = unit_at(0.0, 0.0, 1.0);
        let mut heavy = unit_at(10.0, 0.0, 9.0);
        let contact = unit_collision(&light, &heavy);
        separate(&mut light, &mut heavy, &contact);
        assert!(light.center.x.abs() > (heavy.center.x - 10.0).abs());
    }

    #[test]
    fn test_reflect_velocity() {
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x + 100.0).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -50.0f32..50.0, ay in -50.0f32..50.0,
            bx in -50.0f32..50.0, by in -50.0f32..50.0,
            ar in 1.0f32..30.0, br in 1.0f32..30.0,
        ) {
            let ab = circle_collision(Vec2::new(ax, ay), ar, Vec2::new(bx, by), br);
            let ba = circle_collision(Vec2::new(bx, by), br, Vec2::new(ax, ay), ar);
            prop_assert_eq!(ab.hit, ba.hit);
            if ab.hit {
                prop_assert!((ab.penetration - ba.penetration).abs() < 1e-3);
            }
        }

        #[test]
        fn prop_separation_resolves_overlap(
            dx in -15.0f32..15.0, dy in -15.0f32..15.0,
            ma in 0.5f32..10.0, mb in 0.5f32..10.0,
        ) {
            let mut a = unit_at(0.0, 0.0, ma);
            let mut b = unit_at(dx, dy, mb);
            let contact = unit_collision(&a, &b);
            separate(&mut a, &mut b, &contact);
            prop_assert!((a.center - b.center).length() >= 19.99);
        }
    }
}
