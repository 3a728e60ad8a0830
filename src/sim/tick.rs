//! Per-frame level update
//!
//! Advances a level by one tick in a fixed order. Reordering the steps
//! changes gameplay: the camera follows with real time, everything after it
//! runs on the (possibly dilated) effective time, and spawn gating is
//! decided after the hazard has updated so overdrive bites the same tick.

use std::time::Duration;

use super::actor::{Collidable, SpawnGated, Updatable};
use super::input::InputSource;
use super::level::Level;
use crate::consts::SLOW_MOTION_FACTOR;
use crate::inventory::InventoryManager;

/// Frame clock handed to every update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameTime {
    /// Time since the level started
    pub total: Duration,
    /// Time covered by this tick
    pub elapsed: Duration,
}

impl GameTime {
    pub fn new(total: Duration, elapsed: Duration) -> Self {
        Self { total, elapsed }
    }

    /// Elapsed seconds as `f32`
    #[inline]
    pub fn dt(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Same frame with `elapsed` scaled by `factor`
    ///
    /// Works in whole nanoseconds so halving an even duration is exact.
    /// A non-finite factor leaves the frame unscaled.
    pub fn scaled(&self, factor: f32) -> Self {
        if !factor.is_finite() {
            return *self;
        }
        let nanos = self.elapsed.as_nanos() as f64 * f64::from(factor.max(0.0));
        Self {
            total: self.total,
            elapsed: Duration::from_nanos(nanos.round() as u64),
        }
    }

    /// Next frame after this one
    pub fn advance(&self, elapsed: Duration) -> Self {
        Self {
            total: self.total + elapsed,
            elapsed,
        }
    }
}

/// Bookkeeping from one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickStats {
    /// Time every post-camera step was advanced by
    pub effective_elapsed: Duration,
    pub dilated: bool,
    /// Wave pairs resolved against each other
    pub cross_wave_checks: usize,
    /// Hazard closed every spawn gate this tick
    pub spawn_gated: bool,
    pub live_enemies: usize,
}

impl Level {
    /// Advance the level by one tick
    ///
    /// `_inventory` is part of the frame driver contract; equipment handles
    /// were taken at construction, so the tick never looks them up again.
    pub fn update(
        &mut self,
        time: GameTime,
        input: &mut dyn InputSource,
        _inventory: &InventoryManager,
    ) {
        // 1. Pointer translation needs this tick's camera offset
        input.set_camera_offset(self.camera.position());

        // 2. Intents
        self.handle_input(&*input);

        // 3. Camera runs on real time
        self.camera.update(&time, self.player.center());

        // 4. Effective time for everything below
        let dilated = self.primary_gadget.borrow().active();
        let time = if dilated {
            time.scaled(SLOW_MOTION_FACTOR)
        } else {
            time
        };
        let dt = time.dt();

        // 5. Pull on the player
        if self.black_hole.effects().pulling {
            let force = self.black_hole.pull_force_on(&self.player);
            self.player.body_mut().apply_force(force, dt);
        }

        // 6. Player, gadget, hazard
        self.player.update(&time, &self.bounds);
        self.primary_gadget.borrow_mut().update(&time);
        self.black_hole.update(&time);

        // 7. Gating
        let spawn_gated = self.black_hole.effects().suppress_spawning;
        if spawn_gated {
            close_gates(&mut self.waves);
            close_gates(&mut self.unicorns);
        }

        // 8. Each wave updates, then meets every later wave once
        let mut cross_wave_checks = 0;
        {
            let mut primary = self.primary_weapon.borrow_mut();
            let mut secondary = self.secondary_weapon.borrow_mut();
            for i in 0..self.waves.len() {
                let (head, later) = self.waves.split_at_mut(i + 1);
                let wave = &mut head[i];
                wave.update(
                    &time,
                    &mut self.player,
                    &mut self.black_hole,
                    &mut *primary,
                    &mut *secondary,
                    &mut self.unicorns,
                );
                if !wave.is_active() {
                    continue;
                }
                for other in later {
                    wave.check_and_apply_collisions(other);
                    cross_wave_checks += 1;
                }
            }
        }

        // 9. Unicorns
        let hazard = self.black_hole.position();
        let player_position = self.player.center();
        for unicorn in &mut self.unicorns {
            unicorn.update(&time, &self.bounds, hazard, player_position);
            unicorn.check_and_apply_collision(&mut self.player, &time);
            self.black_hole.try_eat(unicorn);
            for cart in &mut self.food_carts {
                unicorn.check_and_apply_collision(cart, &time);
            }
        }

        // 10. Food carts
        {
            let mut primary = self.primary_weapon.borrow_mut();
            let mut secondary = self.secondary_weapon.borrow_mut();
            for cart in &mut self.food_carts {
                cart.update(&time, &self.bounds, hazard);
                primary.check_and_apply_collision(cart);
                secondary.check_and_apply_collision(cart);
                self.black_hole.apply_to_unit(cart, &time);
            }
        }

        // 11. Weapons
        self.primary_weapon.borrow_mut().update(&time);
        self.secondary_weapon.borrow_mut().update(&time);

        self.last_tick = TickStats {
            effective_elapsed: time.elapsed,
            dilated,
            cross_wave_checks,
            spawn_gated,
            live_enemies: self.waves.iter().map(|w| w.live_count()).sum(),
        };
        log::trace!("{:?}", self.last_tick);
    }

    /// Turn this tick's input into player intent
    fn handle_input(&mut self, input: &dyn InputSource) {
        if input.exit() {
            if !self.pop_state {
                log::info!("Exit requested");
            }
            self.pop_state = true;
        }

        // Exhausted hazard: nothing but exit gets through
        if self.black_hole.effects().suppress_input {
            return;
        }

        let pointer = input.mouse_location();
        let center = self.player.center();
        self.player.move_direction = input.move_direction();
        if let Some(look) = (pointer - center).try_normalize() {
            self.player.look_direction = look;
        }

        if self.player.is_alive() {
            if input.fire_primary() {
                self.primary_weapon.borrow_mut().trigger(center, pointer);
            }
            if input.fire_secondary() {
                self.secondary_weapon.borrow_mut().trigger(center, pointer);
            }
        }

        if input.trigger_gadget1() {
            self.primary_gadget.borrow_mut().trigger();
        }

        if input.debug_key() && self.black_hole.explode() {
            log::info!("Debug explode");
        }
    }
}

fn close_gates<T: SpawnGated>(collection: &mut [T]) {
    for item in collection {
        item.set_spawn_enable(false);
    }
}
