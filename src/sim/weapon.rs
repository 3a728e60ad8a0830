//! Weapons
//!
//! Weapons live in the inventory and are lent to the level for its lifetime.
//! The level only ever touches them through this trait.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Collidable, Drawable, Updatable};
use super::collision::circle_collision;
use super::tick::GameTime;
use crate::renderer::vertex::with_alpha;
use crate::renderer::{Color, RenderSink, colors};

/// Operations the level needs from an equipped weapon
pub trait Weapon: Updatable + Drawable {
    fn name(&self) -> &str;

    /// Fire from `origin` toward `target` if the weapon is ready
    fn trigger(&mut self, origin: Vec2, target: Vec2);

    /// Resolve live projectiles against one unit. Returns true on any hit.
    fn check_and_apply_collision(&mut self, unit: &mut dyn Collidable) -> bool;

    /// Shots still in flight
    fn projectile_count(&self) -> usize;
}

/// Projectile weapon tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponData {
    pub name: String,
    /// Seconds between shots
    pub fire_delay: f32,
    pub projectile_speed: f32,
    /// Seconds a projectile lives
    pub projectile_lifetime: f32,
    pub projectile_radius: f32,
    pub damage: f32,
    /// Impulse applied along the projectile's heading on hit
    pub impact_force: f32,
    /// Velocity multiplier applied to a unit on hit (1.0 = no slow)
    pub slow_factor: f32,
    /// Total cone angle in radians
    pub spread: f32,
    pub projectiles_per_shot: u32,
    pub color: Color,
}

impl Default for WeaponData {
    fn default() -> Self {
        Self {
            name: "Blaster".to_string(),
            fire_delay: 0.25,
            projectile_speed: 500.0,
            projectile_lifetime: 1.0,
            projectile_radius: 5.0,
            damage: 10.0,
            impact_force: 50.0,
            slow_factor: 1.0,
            spread: 0.0,
            projectiles_per_shot: 1,
            color: colors::FLAME,
        }
    }
}

impl WeaponData {
    /// Short-range cone of burning particles
    pub fn flamethrower() -> Self {
        Self {
            name: "Flamethrower".to_string(),
            fire_delay: 0.05,
            projectile_speed: 350.0,
            projectile_lifetime: 0.5,
            projectile_radius: 10.0,
            damage: 4.0,
            impact_force: 20.0,
            slow_factor: 1.0,
            spread: 0.4,
            projectiles_per_shot: 2,
            color: colors::FLAME,
        }
    }

    /// Slow, hard-hitting bolt that saps the target's momentum
    pub fn freeze_ray() -> Self {
        Self {
            name: "FreezeRay".to_string(),
            fire_delay: 0.4,
            projectile_speed: 700.0,
            projectile_lifetime: 1.0,
            projectile_radius: 6.0,
            damage: 15.0,
            impact_force: 0.0,
            slow_factor: 0.2,
            spread: 0.0,
            projectiles_per_shot: 1,
            color: colors::FREEZE,
        }
    }
}

#[derive(Debug, Clone)]
struct Projectile {
    pos: Vec2,
    vel: Vec2,
    age: f32,
    alive: bool,
}

/// Weapon that fires straight-moving projectiles
#[derive(Debug, Clone)]
pub struct ProjectileWeapon {
    data: WeaponData,
    cooldown: f32,
    projectiles: Vec<Projectile>,
}

impl ProjectileWeapon {
    pub fn new(data: WeaponData) -> Self {
        Self {
            data,
            cooldown: 0.0,
            projectiles: Vec::new(),
        }
    }

    pub fn ready(&self) -> bool {
        self.cooldown <= 0.0
    }
}

impl Weapon for ProjectileWeapon {
    fn name(&self) -> &str {
        &self.data.name
    }

    fn trigger(&mut self, origin: Vec2, target: Vec2) {
        if !self.ready() {
            return;
        }
        let aim = (target - origin).normalize_or_zero();
        if aim == Vec2::ZERO {
            return;
        }

        // Fan projectiles evenly across the cone
        let count = self.data.projectiles_per_shot.max(1);
        let base_angle = aim.y.atan2(aim.x);
        for i in 0..count {
            let offset = if count == 1 {
                0.0
            } else {
                (i as f32 / (count - 1) as f32 - 0.5) * self.data.spread
            };
            let angle = base_angle + offset;
            let dir = Vec2::new(angle.cos(), angle.sin());
            self.projectiles.push(Projectile {
                pos: origin,
                vel: dir * self.data.projectile_speed,
                age: 0.0,
                alive: true,
            });
        }
        self.cooldown = self.data.fire_delay;
    }

    fn check_and_apply_collision(&mut self, unit: &mut dyn Collidable) -> bool {
        if !unit.body().is_alive() {
            return false;
        }
        let mut hit = false;
        for projectile in self.projectiles.iter_mut().filter(|p| p.alive) {
            let body = unit.body();
            let contact = circle_collision(
                projectile.pos,
                self.data.projectile_radius,
                body.center,
                body.radius,
            );
            if !contact.hit {
                continue;
            }

            let heading = projectile.vel.normalize_or_zero();
            let body = unit.body_mut();
            body.take_damage(self.data.damage);
            body.apply_impulse(heading * self.data.impact_force);
            body.velocity *= self.data.slow_factor;
            projectile.alive = false;
            hit = true;

            if !body.is_alive() {
                break;
            }
        }
        hit
    }

    fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }
}

impl Updatable for ProjectileWeapon {
    fn update(&mut self, time: &GameTime) {
        let dt = time.dt();
        self.cooldown = (self.cooldown - dt).max(0.0);

        for projectile in &mut self.projectiles {
            projectile.pos += projectile.vel * dt;
            projectile.age += dt;
            if projectile.age >= self.data.projectile_lifetime {
                projectile.alive = false;
            }
        }
        self.projectiles.retain(|p| p.alive);
    }
}

impl Drawable for ProjectileWeapon {
    fn draw(&self, sink: &mut dyn RenderSink) {
        let lifetime = self.data.projectile_lifetime.max(f32::EPSILON);
        for projectile in self.projectiles.iter().filter(|p| p.alive) {
            let alpha = (1.0 - projectile.age / lifetime).clamp(0.0, 1.0);
            sink.draw_circle(
                projectile.pos,
                self.data.projectile_radius,
                with_alpha(self.data.color, alpha),
            );
        }
    }
}
