//! Level aggregate
//!
//! A level owns every actor category in its own typed collection, plus the
//! hazard, the camera, and the HUD. Equipment is borrowed from the inventory
//! through shared handles and handed back untouched when the level ends.
//! The per-tick sequence lives in [`tick`](super::tick).

use glam::Affine2;

use super::actor::Drawable;
use super::black_hole::BlackHole;
use super::camera::Camera2D;
use super::food_cart::FoodCart;
use super::geometry::Rect;
use super::input::InputSource;
use super::player::Spaceman;
use super::tick::{GameTime, TickStats};
use super::unicorn::Unicorn;
use super::wave::Wave;
use crate::data::{DataLoader, LevelData};
use crate::error::LevelResult;
use crate::hud::Hud;
use crate::inventory::{GadgetHandle, InventoryManager, WeaponHandle};
use crate::renderer::RenderSink;
use crate::settings::Settings;

/// Odd constant used to spread per-actor seeds apart
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// A screen on the game's state stack
pub trait Gamestate {
    fn update(&mut self, time: GameTime, input: &mut dyn InputSource, inventory: &InventoryManager);
    fn draw(&self, sink: &mut dyn RenderSink);
    /// True once the state wants to be removed from the stack
    fn pop_state(&self) -> bool;
}

/// One playable level
pub struct Level {
    pub(super) player: Spaceman,
    pub(super) black_hole: BlackHole,
    pub(super) primary_weapon: WeaponHandle,
    pub(super) secondary_weapon: WeaponHandle,
    pub(super) primary_gadget: GadgetHandle,
    pub(super) secondary_gadget: GadgetHandle,
    /// Trickle waves first, then burst waves
    pub(super) waves: Vec<Wave>,
    pub(super) unicorns: Vec<Unicorn>,
    pub(super) food_carts: Vec<FoodCart>,
    pub(super) bounds: Rect,
    pub(super) camera: Camera2D,
    pub(super) hud: Hud,
    pub(super) pop_state: bool,
    pub(super) last_tick: TickStats,
}

impl Level {
    /// Load level `level_number` and equip it from `inventory`
    pub fn new(
        level_number: u32,
        loader: &dyn DataLoader,
        inventory: &InventoryManager,
        settings: &Settings,
    ) -> LevelResult<Self> {
        let data = loader.load_level(level_number)?;
        log::info!("Entering level {level_number}");
        Self::from_data(&data, inventory, settings)
    }

    /// Build a level from already-loaded data
    pub fn from_data(
        data: &LevelData,
        inventory: &InventoryManager,
        settings: &Settings,
    ) -> LevelResult<Self> {
        data.validate()?;
        let loadout = inventory.loadout()?;

        let bounds = data.bounds();
        let player = Spaceman::new(data.player_start);
        let camera = Camera2D::new(
            player.center(),
            bounds.width,
            bounds.height,
            settings.camera_follow_rate,
        );

        let trickle = data.trickle_waves.iter().map(|w| (w, true));
        let burst = data.burst_waves.iter().map(|w| (w, false));
        let waves: Vec<Wave> = trickle
            .chain(burst)
            .enumerate()
            .map(|(i, (wave, is_trickle))| {
                Wave::new(wave.clone(), is_trickle, bounds, actor_seed(data.seed, 1, i))
            })
            .collect();

        let unicorns: Vec<Unicorn> = data
            .unicorns
            .iter()
            .enumerate()
            .map(|(i, u)| Unicorn::new(u.clone(), actor_seed(data.seed, 2, i)))
            .collect();

        let food_carts: Vec<FoodCart> = data.food_carts.iter().map(FoodCart::new).collect();

        log::info!(
            "Level ready: {}x{}, {} trickle + {} burst waves, {} unicorns, {} food carts",
            bounds.width,
            bounds.height,
            data.trickle_waves.len(),
            data.burst_waves.len(),
            unicorns.len(),
            food_carts.len()
        );

        Ok(Self {
            player,
            black_hole: BlackHole::new(data.black_hole.clone()),
            primary_weapon: loadout.primary_weapon,
            secondary_weapon: loadout.secondary_weapon,
            primary_gadget: loadout.primary_gadget,
            secondary_gadget: loadout.secondary_gadget,
            waves,
            unicorns,
            food_carts,
            bounds,
            camera,
            hud: Hud::new(settings.screen_width, settings.screen_height),
            pop_state: false,
            last_tick: TickStats::default(),
        })
    }

    /// Set once the player asked to leave; the frame driver acts on it
    #[inline]
    pub fn pop_state(&self) -> bool {
        self.pop_state
    }

    /// What the most recent tick did
    pub fn last_tick(&self) -> &TickStats {
        &self.last_tick
    }

    pub fn player(&self) -> &Spaceman {
        &self.player
    }

    pub fn black_hole(&self) -> &BlackHole {
        &self.black_hole
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn unicorns(&self) -> &[Unicorn] {
        &self.unicorns
    }

    pub fn food_carts(&self) -> &[FoodCart] {
        &self.food_carts
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    /// Render the world under the camera, then the HUD in screen space
    pub fn draw(&self, sink: &mut dyn RenderSink) {
        sink.begin(self.camera.transform());
        self.black_hole.draw(sink);
        self.player.draw(sink);
        self.primary_weapon.borrow().draw(sink);
        self.secondary_weapon.borrow().draw(sink);
        for cart in &self.food_carts {
            cart.draw(sink);
        }
        for wave in &self.waves {
            wave.draw(sink);
        }
        for unicorn in &self.unicorns {
            unicorn.draw(sink);
        }
        sink.end();

        sink.begin(Affine2::IDENTITY);
        self.hud.draw(
            sink,
            &self.player,
            &self.black_hole,
            &self.primary_gadget.borrow(),
            &self.secondary_gadget.borrow(),
        );
        sink.end();
    }
}

impl Gamestate for Level {
    fn update(
        &mut self,
        time: GameTime,
        input: &mut dyn InputSource,
        inventory: &InventoryManager,
    ) {
        Level::update(self, time, input, inventory);
    }

    fn draw(&self, sink: &mut dyn RenderSink) {
        Level::draw(self, sink);
    }

    fn pop_state(&self) -> bool {
        self.pop_state
    }
}

fn actor_seed(level_seed: u64, category: u64, index: usize) -> u64 {
    level_seed
        ^ category.wrapping_mul(SEED_STRIDE)
        ^ (index as u64 + 1).wrapping_mul(SEED_STRIDE.rotate_left(17))
}
