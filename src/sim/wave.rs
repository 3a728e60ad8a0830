//! Enemy waves
//!
//! A wave owns a schedule and the enemies it has spawned. Trickle waves feed
//! one enemy in at a time; burst waves drop a cluster at once. Spawning can
//! be gated off without touching enemies already in play.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Collidable, Drawable, PhysicalUnit, SpawnGated};
use super::black_hole::BlackHole;
use super::collision::{separate, unit_collision};
use super::geometry::Rect;
use super::player::Spaceman;
use super::tick::GameTime;
use super::unicorn::Unicorn;
use super::weapon::Weapon;
use crate::direction_between;
use crate::renderer::vertex::with_alpha;
use crate::renderer::{RenderSink, colors};

/// Max distance of a burst member from the cluster center
const BURST_JITTER: f32 = 40.0;

/// Enemy template shared by every unit of a wave
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyData {
    pub radius: f32,
    pub mass: f32,
    pub health: f32,
    pub speed: f32,
    /// Thrust toward the player (pixels/s²)
    pub accel: f32,
    /// Damage per second dealt to the player while touching
    pub contact_damage: f32,
    /// Damage dealt once to a unit of another wave on each contact
    pub collision_damage: f32,
    pub drag: f32,
}

impl Default for EnemyData {
    fn default() -> Self {
        Self {
            radius: 12.0,
            mass: 5.0,
            health: 30.0,
            speed: 140.0,
            accel: 400.0,
            contact_damage: 10.0,
            collision_damage: 5.0,
            drag: 1.0,
        }
    }
}

/// Spawn schedule for one wave
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveData {
    pub enemy: EnemyData,
    /// Total enemies this wave will ever spawn
    pub count: u32,
    /// Seconds between spawn events
    pub spawn_interval: f32,
    /// Seconds before the first spawn event
    pub start_delay: f32,
    /// Enemies per spawn event in burst mode
    pub burst_size: u32,
}

impl Default for WaveData {
    fn default() -> Self {
        Self {
            enemy: EnemyData::default(),
            count: 10,
            spawn_interval: 2.0,
            start_delay: 0.0,
            burst_size: 1,
        }
    }
}

/// One hostile unit
#[derive(Debug, Clone)]
pub struct Enemy {
    body: PhysicalUnit,
    data: EnemyData,
}

impl Enemy {
    fn new(data: EnemyData, center: Vec2) -> Self {
        Self {
            body: PhysicalUnit::new(center, data.radius, data.mass, data.health)
                .with_motion(data.speed, data.drag),
            data,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.center
    }
}

impl Collidable for Enemy {
    fn body(&self) -> &PhysicalUnit {
        &self.body
    }

    fn body_mut(&mut self) -> &mut PhysicalUnit {
        &mut self.body
    }
}

#[derive(Debug, Clone)]
pub struct Wave {
    data: WaveData,
    trickle: bool,
    bounds: Rect,
    spawn_enable: bool,
    delay_remaining: f32,
    spawn_timer: f32,
    spawned: u32,
    enemies: Vec<Enemy>,
    rng: Pcg32,
}

impl Wave {
    pub fn new(data: WaveData, trickle: bool, bounds: Rect, seed: u64) -> Self {
        Self {
            delay_remaining: data.start_delay,
            // First spawn event fires as soon as the delay is over
            spawn_timer: data.spawn_interval,
            data,
            trickle,
            bounds,
            spawn_enable: true,
            spawned: 0,
            enemies: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn is_trickle(&self) -> bool {
        self.trickle
    }

    /// True while any enemy can still collide
    pub fn is_active(&self) -> bool {
        self.enemies.iter().any(|e| e.body.is_alive())
    }

    pub fn live_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.body.is_alive()).count()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Place one enemy immediately, ignoring the schedule and the spawn gate
    pub fn spawn_at(&mut self, center: Vec2) {
        let center = self.bounds.inset(self.data.enemy.radius).clamp_point(center);
        self.enemies.push(Enemy::new(self.data.enemy, center));
    }

    /// Advance the schedule and every enemy, resolving their contacts with
    /// the player, the hazard, both weapons, and charging unicorns
    pub fn update(
        &mut self,
        time: &GameTime,
        player: &mut Spaceman,
        black_hole: &mut BlackHole,
        primary: &mut dyn Weapon,
        secondary: &mut dyn Weapon,
        unicorns: &mut [Unicorn],
    ) {
        let dt = time.dt();
        self.advance_schedule(dt);

        let target = player.center();
        for enemy in &mut self.enemies {
            if enemy.body.is_alive() {
                let dir = direction_between(enemy.body.center, target);
                enemy.body.apply_force(dir * enemy.data.accel * enemy.data.mass, dt);
            }
            black_hole.apply_to_unit(enemy, time);
            enemy.body.integrate(dt);
            enemy.body.confine(&self.bounds);

            if enemy.body.is_alive() && player.is_alive() {
                let contact = unit_collision(&enemy.body, player.body());
                if contact.hit {
                    player.body_mut().take_damage(enemy.data.contact_damage * dt);
                    separate(&mut enemy.body, player.body_mut(), &contact);
                }
            }

            primary.check_and_apply_collision(enemy);
            secondary.check_and_apply_collision(enemy);
            for unicorn in unicorns.iter_mut() {
                unicorn.check_and_apply_collision(enemy, time);
            }
        }

        self.enemies.retain(|e| !e.body.is_dead());
    }

    /// Resolve contacts between this wave's live enemies and `other`'s.
    /// Each overlapping pair is pushed apart and damages both sides once.
    /// Returns the number of contacts.
    pub fn check_and_apply_collisions(&mut self, other: &mut Wave) -> usize {
        let mut contacts = 0;
        for a in self.enemies.iter_mut().filter(|e| e.body.is_alive()) {
            for b in other.enemies.iter_mut() {
                if !a.body.is_alive() {
                    break;
                }
                if !b.body.is_alive() {
                    continue;
                }
                let contact = unit_collision(&a.body, &b.body);
                if !contact.hit {
                    continue;
                }
                separate(&mut a.body, &mut b.body, &contact);
                a.body.take_damage(b.data.collision_damage);
                b.body.take_damage(a.data.collision_damage);
                contacts += 1;
            }
        }
        contacts
    }

    fn advance_schedule(&mut self, dt: f32) {
        if self.spawned >= self.data.count {
            return;
        }
        if self.delay_remaining > 0.0 {
            self.delay_remaining -= dt;
            return;
        }

        self.spawn_timer += dt;
        if !self.spawn_enable {
            // Hold at one interval so reopening the gate can't release a backlog
            self.spawn_timer = self.spawn_timer.min(self.data.spawn_interval);
            return;
        }
        if self.spawn_timer < self.data.spawn_interval {
            return;
        }
        self.spawn_timer -= self.data.spawn_interval;
        self.spawn_timer = self.spawn_timer.min(self.data.spawn_interval);

        let remaining = self.data.count - self.spawned;
        let group = if self.trickle {
            1
        } else {
            self.data.burst_size.max(1).min(remaining)
        };
        let anchor = self.random_edge_point();
        for i in 0..group {
            let offset = if i == 0 {
                Vec2::ZERO
            } else {
                Vec2::new(
                    self.rng.random_range(-BURST_JITTER..BURST_JITTER),
                    self.rng.random_range(-BURST_JITTER..BURST_JITTER),
                )
            };
            self.spawn_at(anchor + offset);
        }
        self.spawned += group;
        log::debug!(
            "Wave spawned {group} ({}/{}) at ({:.0}, {:.0})",
            self.spawned,
            self.data.count,
            anchor.x,
            anchor.y
        );
    }

    fn random_edge_point(&mut self) -> Vec2 {
        let t: f32 = self.rng.random();
        self.bounds
            .inset(self.data.enemy.radius)
            .clamp_point(self.bounds.perimeter_point(t))
    }
}

impl SpawnGated for Wave {
    fn spawn_enable(&self) -> bool {
        self.spawn_enable
    }

    fn set_spawn_enable(&mut self, enable: bool) {
        self.spawn_enable = enable;
    }
}

impl Drawable for Wave {
    fn draw(&self, sink: &mut dyn RenderSink) {
        for enemy in self.enemies.iter().filter(|e| !e.body.is_dead()) {
            let fade = enemy.body.fade();
            sink.draw_circle(
                enemy.body.center,
                enemy.body.radius * fade,
                with_alpha(colors::ENEMY, fade),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::Updatable;
    use crate::sim::black_hole::{BlackHoleData, BlackHoleState};
    use crate::sim::weapon::{ProjectileWeapon, WeaponData};
    use std::time::Duration;

    fn frame(ms: u64) -> GameTime {
        GameTime::new(Duration::ZERO, Duration::from_millis(ms))
    }

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 1000.0)
    }

    struct Rig {
        player: Spaceman,
        hole: BlackHole,
        primary: ProjectileWeapon,
        secondary: ProjectileWeapon,
    }

    impl Rig {
        fn new() -> Self {
            let mut hole = BlackHole::new(BlackHoleData {
                position: Vec2::new(-5000.0, -5000.0),
                ..Default::default()
            });
            hole.force_state(BlackHoleState::Inactive, 0.0);
            Self {
                player: Spaceman::new(Vec2::new(500.0, 500.0)),
                hole,
                primary: ProjectileWeapon::new(WeaponData::flamethrower()),
                secondary: ProjectileWeapon::new(WeaponData::freeze_ray()),
            }
        }

        fn run(&mut self, wave: &mut Wave, time: &GameTime) {
            wave.update(
                time,
                &mut self.player,
                &mut self.hole,
                &mut self.primary,
                &mut self.secondary,
                &mut [],
            );
        }
    }

    fn schedule(count: u32, burst_size: u32) -> WaveData {
        WaveData {
            count,
            spawn_interval: 1.0,
            start_delay: 0.5,
            burst_size,
            ..Default::default()
        }
    }

    #[test]
    fn test_trickle_spawns_one_per_interval() {
        let mut rig = Rig::new();
        let mut wave = Wave::new(schedule(3, 5), true, bounds(), 1);

        rig.run(&mut wave, &frame(400));
        assert_eq!(wave.live_count(), 0);
        rig.run(&mut wave, &frame(200));
        rig.run(&mut wave, &frame(100));
        assert_eq!(wave.live_count(), 1);

        for _ in 0..5 {
            rig.run(&mut wave, &frame(1000));
        }
        assert_eq!(wave.enemies().len(), 3);
    }

    #[test]
    fn test_burst_spawns_cluster() {
        let mut rig = Rig::new();
        let mut wave = Wave::new(schedule(7, 5), false, bounds(), 2);
        rig.run(&mut wave, &frame(600));
        rig.run(&mut wave, &frame(16));
        assert_eq!(wave.live_count(), 5);

        // Remaining two arrive in the next, smaller burst
        rig.run(&mut wave, &frame(1000));
        assert_eq!(wave.live_count(), 7);
        assert!(!wave.is_trickle());
    }

    #[test]
    fn test_closed_gate_blocks_new_spawns_only() {
        let mut rig = Rig::new();
        let mut wave = Wave::new(schedule(5, 1), true, bounds(), 3);
        wave.spawn_at(Vec2::new(100.0, 100.0));
        wave.set_spawn_enable(false);
        let before = wave.enemies()[0].position();

        for _ in 0..10 {
            rig.run(&mut wave, &frame(500));
        }
        assert_eq!(wave.enemies().len(), 1);
        assert_ne!(wave.enemies()[0].position(), before);

        // Reopening releases a single spawn, not the backlog
        wave.set_spawn_enable(true);
        rig.run(&mut wave, &frame(16));
        assert_eq!(wave.enemies().len(), 2);
    }

    #[test]
    fn test_enemy_hurts_player_on_contact() {
        let mut rig = Rig::new();
        let mut wave = Wave::new(schedule(1, 1), true, bounds(), 4);
        wave.spawn_at(Vec2::new(510.0, 500.0));
        rig.run(&mut wave, &frame(100));
        assert!(rig.player.body().health < rig.player.body().max_health);
    }

    #[test]
    fn test_weapons_kill_enemies() {
        let mut rig = Rig::new();
        let mut wave = Wave::new(
            WaveData {
                enemy: EnemyData {
                    health: 10.0,
                    speed: 0.0,
                    ..Default::default()
                },
                start_delay: 60.0,
                ..schedule(1, 1)
            },
            true,
            bounds(),
            5,
        );
        wave.spawn_at(Vec2::new(540.0, 500.0));
        rig.secondary.trigger(Vec2::new(500.0, 500.0), Vec2::new(600.0, 500.0));
        rig.secondary.update(&frame(50));
        rig.run(&mut wave, &frame(16));
        assert_eq!(wave.live_count(), 0);

        // Fades out and gets dropped
        for _ in 0..40 {
            rig.run(&mut wave, &frame(16));
        }
        assert!(wave.enemies().is_empty());
    }

    #[test]
    fn test_overlapping_waves_interact_once() {
        let mut a = Wave::new(schedule(1, 1), true, bounds(), 6);
        let mut b = Wave::new(schedule(1, 1), false, bounds(), 7);
        a.spawn_at(Vec2::new(300.0, 300.0));
        b.spawn_at(Vec2::new(305.0, 300.0));

        assert_eq!(a.check_and_apply_collisions(&mut b), 1);

        let damage = EnemyData::default().collision_damage;
        let max = EnemyData::default().health;
        assert_eq!(a.enemies()[0].body().health, max - damage);
        assert_eq!(b.enemies()[0].body().health, max - damage);

        // Pushed apart, so a second check finds nothing
        assert_eq!(a.check_and_apply_collisions(&mut b), 0);
    }

    #[test]
    fn test_dying_enemies_leave_wave_inactive() {
        let mut rig = Rig::new();
        let mut wave = Wave::new(schedule(1, 1), true, bounds(), 8);
        assert!(!wave.is_active());
        rig.run(&mut wave, &frame(600));
        rig.run(&mut wave, &frame(16));
        assert!(wave.is_active());

        wave.enemies[0].body.take_damage(f32::MAX);
        assert!(!wave.is_active());
        // Still fading out, but nothing left to collide with
        assert_eq!(wave.enemies().len(), 1);
        let mut other = Wave::new(schedule(1, 1), true, bounds(), 9);
        other.spawn_at(wave.enemies()[0].position());
        assert_eq!(wave.check_and_apply_collisions(&mut other), 0);
    }
}
