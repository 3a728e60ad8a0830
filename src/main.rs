//! Space Game headless driver
//!
//! Runs a level with a scripted pilot at a fixed tick rate, drawing every
//! frame into a vertex batch, and logs a summary once per simulated second.
//!
//! Usage: `space-game [level_number] [settings.json]`

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use glam::Vec2;

use space_game::consts::{FIRST_LEVEL, SETTINGS_FILE};
use space_game::renderer::VertexBatch;
use space_game::sim::{Collidable, GameTime, Gamestate, InputState, Level};
use space_game::{InventoryManager, JsonDataLoader, LevelResult, Settings};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let level_number = match args.next().map(|a| a.parse::<u32>()) {
        None => FIRST_LEVEL,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid level number: {e}");
            process::exit(2);
        }
    };
    let settings_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
    let settings = Settings::load_or_default(&settings_path);

    log::info!("Space Game (headless) starting level {level_number}");
    if let Err(e) = run(level_number, &settings) {
        log::error!("{e}");
        process::exit(1);
    }
}

fn run(level_number: u32, settings: &Settings) -> LevelResult<()> {
    let inventory = InventoryManager::default_loadout();
    let loader = JsonDataLoader::new(&settings.levels_dir);
    let mut level = Level::new(level_number, &loader, &inventory, settings)?;

    let tick = Duration::from_secs_f32(settings.tick_seconds());
    let ticks_per_second = u64::from(settings.tick_rate_hz.max(1));
    let screen = Vec2::new(settings.screen_width, settings.screen_height);

    let mut time = GameTime::default();
    let mut input = InputState::default();
    let mut batch = VertexBatch::new();

    let mut ticks = 0u64;
    while ticks < settings.max_ticks && !level.pop_state() {
        time = time.advance(tick);
        script_input(&mut input, ticks, ticks_per_second, screen);

        Gamestate::update(&mut level, time, &mut input, &inventory);
        input.clear_triggers();

        batch.clear();
        Gamestate::draw(&level, &mut batch);

        ticks += 1;
        if ticks % ticks_per_second == 0 {
            let stats = level.last_tick();
            log::info!(
                "t={:.0}s hazard={:?} energy={:.0} player_hp={:.0} enemies={} pairs={} dilated={} vertices={}",
                time.total.as_secs_f32(),
                level.black_hole().state(),
                level.black_hole().energy(),
                level.player().body().health,
                stats.live_enemies,
                stats.cross_wave_checks,
                stats.dilated,
                batch.vertex_count()
            );
        }
    }

    log::info!(
        "Level {level_number} ended after {ticks} ticks ({})",
        if level.pop_state() { "exit" } else { "tick limit" }
    );
    Ok(())
}

/// Circle the arena, spray the flamethrower, and use everything else now and then
fn script_input(input: &mut InputState, tick: u64, ticks_per_second: u64, screen: Vec2) {
    let seconds = tick as f32 / ticks_per_second as f32;
    input.move_direction = Vec2::from_angle(seconds * 0.5);
    input.mouse_screen = screen * 0.5 + Vec2::from_angle(seconds * 2.0) * 200.0;
    input.fire_primary = true;
    input.fire_secondary = tick % (ticks_per_second / 2).max(1) == 0;
    input.trigger_gadget1 = tick % (ticks_per_second * 10) == ticks_per_second * 5;
    input.debug_key = false;
}
