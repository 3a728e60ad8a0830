//! Roaming unicorns
//!
//! A unicorn waits off-screen, then charges across the level from a random
//! edge toward where the player stood when it appeared. It veers away from
//! the black hole, tramples whatever it touches, and goes back into hiding
//! once it leaves the level, is killed, or gets eaten.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Collidable, Drawable, PhysicalUnit, SpawnGated};
use super::collision::unit_collision;
use super::geometry::Rect;
use super::tick::GameTime;
use crate::renderer::vertex::with_alpha;
use crate::renderer::{RenderSink, colors};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnicornData {
    /// Seconds spent hidden before each charge
    pub spawn_time: f32,
    pub speed: f32,
    /// Damage per second dealt to anything it is touching
    pub damage: f32,
    /// Push applied to trampled units (pixels/s² per unit mass)
    pub knockback: f32,
    pub radius: f32,
    pub mass: f32,
    pub health: f32,
    /// Distance from the black hole at which the unicorn starts to veer away
    pub avoid_radius: f32,
    /// How hard it turns away inside `avoid_radius` (1/s)
    pub avoid_strength: f32,
}

impl Default for UnicornData {
    fn default() -> Self {
        Self {
            spawn_time: 8.0,
            speed: 420.0,
            damage: 30.0,
            knockback: 600.0,
            radius: 24.0,
            mass: 40.0,
            health: 80.0,
            avoid_radius: 180.0,
            avoid_strength: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Dormant { timer: f32 },
    Charging { heading: Vec2 },
}

#[derive(Debug, Clone)]
pub struct Unicorn {
    data: UnicornData,
    body: PhysicalUnit,
    phase: Phase,
    spawn_enable: bool,
    rng: Pcg32,
}

impl Unicorn {
    pub fn new(data: UnicornData, seed: u64) -> Self {
        let mut body = PhysicalUnit::new(Vec2::ZERO, data.radius, data.mass, data.health);
        body.despawn();
        Self {
            phase: Phase::Dormant {
                timer: data.spawn_time,
            },
            data,
            body,
            spawn_enable: true,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_charging(&self) -> bool {
        matches!(self.phase, Phase::Charging { .. })
    }

    pub fn position(&self) -> Vec2 {
        self.body.center
    }

    /// Advance hiding or charging
    pub fn update(
        &mut self,
        time: &GameTime,
        bounds: &Rect,
        hazard_position: Vec2,
        player_position: Vec2,
    ) {
        let dt = time.dt();
        match self.phase {
            Phase::Dormant { timer } => {
                if !self.spawn_enable {
                    return;
                }
                let timer = timer - dt;
                if timer <= 0.0 {
                    self.appear(bounds, player_position);
                } else {
                    self.phase = Phase::Dormant { timer };
                }
            }
            Phase::Charging { heading } => {
                if self.body.is_dead() {
                    self.hide();
                    return;
                }
                if self.body.is_alive() {
                    let heading = self.steer(heading, hazard_position, dt);
                    self.body.velocity = heading * self.data.speed;
                    self.phase = Phase::Charging { heading };
                }
                self.body.integrate(dt);

                let exit_zone = bounds.inset(-self.data.radius * 2.0);
                if self.body.is_alive() && !exit_zone.contains(self.body.center) {
                    self.hide();
                }
            }
        }
    }

    /// Trample `other` if charging and touching it. Returns true on contact.
    pub fn check_and_apply_collision(
        &mut self,
        other: &mut dyn Collidable,
        time: &GameTime,
    ) -> bool {
        let Phase::Charging { heading } = self.phase else {
            return false;
        };
        if !self.body.is_alive() || !other.body().is_alive() {
            return false;
        }
        let contact = unit_collision(other.body(), &self.body);
        if !contact.hit {
            return false;
        }

        let dt = time.dt();
        let target = other.body_mut();
        target.center += contact.normal * contact.penetration;
        target.apply_force(heading * self.data.knockback * target.mass, dt);
        target.take_damage(self.data.damage * dt);
        true
    }

    fn appear(&mut self, bounds: &Rect, player_position: Vec2) {
        let t: f32 = self.rng.random();
        let entry = bounds
            .inset(self.data.radius)
            .clamp_point(bounds.perimeter_point(t));
        let heading = (player_position - entry).normalize_or(bounds.center() - entry);
        let heading = heading.normalize_or(Vec2::X);

        self.body.revive(entry);
        self.body.velocity = heading * self.data.speed;
        self.phase = Phase::Charging { heading };
        log::debug!("Unicorn charging from ({:.0}, {:.0})", entry.x, entry.y);
    }

    fn hide(&mut self) {
        self.body.despawn();
        self.phase = Phase::Dormant {
            timer: self.data.spawn_time,
        };
    }

    /// Bend the heading away from the hazard when inside its avoid radius
    fn steer(&self, heading: Vec2, hazard_position: Vec2, dt: f32) -> Vec2 {
        let away = self.body.center - hazard_position;
        let dist = away.length();
        if dist >= self.data.avoid_radius || dist <= f32::EPSILON {
            return heading;
        }
        let urgency = 1.0 - dist / self.data.avoid_radius;
        let turned = heading + away / dist * urgency * self.data.avoid_strength * dt;
        turned.normalize_or(heading)
    }
}

impl SpawnGated for Unicorn {
    fn spawn_enable(&self) -> bool {
        self.spawn_enable
    }

    fn set_spawn_enable(&mut self, enable: bool) {
        self.spawn_enable = enable;
    }
}

impl Collidable for Unicorn {
    fn body(&self) -> &PhysicalUnit {
        &self.body
    }

    fn body_mut(&mut self) -> &mut PhysicalUnit {
        &mut self.body
    }
}

impl Drawable for Unicorn {
    fn draw(&self, sink: &mut dyn RenderSink) {
        let Phase::Charging { heading } = self.phase else {
            return;
        };
        if self.body.is_dead() {
            return;
        }
        let fade = self.body.fade();
        let center = self.body.center;
        let radius = self.body.radius * fade;
        sink.draw_circle(center, radius, with_alpha(colors::UNICORN, fade));
        // Horn
        sink.draw_line(center, center + heading * radius * 1.8, 4.0, colors::PLAYER_LOOK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn frame(ms: u64) -> GameTime {
        GameTime::new(Duration::ZERO, Duration::from_millis(ms))
    }

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 1000.0)
    }

    fn quick_unicorn() -> Unicorn {
        Unicorn::new(
            UnicornData {
                spawn_time: 1.0,
                ..Default::default()
            },
            7,
        )
    }

    #[test]
    fn test_waits_then_charges_toward_player() {
        let mut unicorn = quick_unicorn();
        let player = Vec2::new(500.0, 500.0);
        unicorn.update(&frame(500), &bounds(), Vec2::new(-5000.0, 0.0), player);
        assert!(!unicorn.is_charging());

        unicorn.update(&frame(600), &bounds(), Vec2::new(-5000.0, 0.0), player);
        assert!(unicorn.is_charging());
        let before = unicorn.position().distance(player);
        unicorn.update(&frame(100), &bounds(), Vec2::new(-5000.0, 0.0), player);
        assert!(unicorn.position().distance(player) < before);
    }

    #[test]
    fn test_spawn_gate_holds_it_dormant() {
        let mut unicorn = quick_unicorn();
        unicorn.set_spawn_enable(false);
        for _ in 0..10 {
            unicorn.update(&frame(500), &bounds(), Vec2::ZERO, Vec2::new(500.0, 500.0));
        }
        assert!(!unicorn.is_charging());
    }

    #[test]
    fn test_tramples_target() {
        let mut unicorn = quick_unicorn();
        let player = Vec2::new(500.0, 500.0);
        unicorn.update(&frame(1000), &bounds(), Vec2::new(-5000.0, 0.0), player);
        assert!(unicorn.is_charging());

        let mut target = PhysicalUnit::new(unicorn.position(), 10.0, 5.0, 100.0);
        assert!(unicorn.check_and_apply_collision(&mut target, &frame(100)));
        assert!(target.health < 100.0);
        assert!(target.velocity.length() > 0.0);
    }

    #[test]
    fn test_dormant_unicorn_never_collides() {
        let mut unicorn = quick_unicorn();
        let mut target = PhysicalUnit::new(Vec2::ZERO, 50.0, 5.0, 100.0);
        assert!(!unicorn.check_and_apply_collision(&mut target, &frame(16)));
    }

    #[test]
    fn test_hides_after_leaving_level() {
        let mut unicorn = quick_unicorn();
        unicorn.update(&frame(1000), &bounds(), Vec2::new(-5000.0, 0.0), Vec2::new(500.0, 500.0));
        assert!(unicorn.is_charging());
        let mut hid = false;
        for _ in 0..100 {
            unicorn.update(&frame(50), &bounds(), Vec2::new(-5000.0, 0.0), Vec2::new(500.0, 500.0));
            if !unicorn.is_charging() {
                hid = true;
                assert!(unicorn.body().is_dead());
                break;
            }
        }
        assert!(hid);
    }
}
