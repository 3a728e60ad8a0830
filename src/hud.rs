//! Heads-up display
//!
//! Drawn in screen space after the world pass.

use glam::Vec2;

use crate::renderer::vertex::with_alpha;
use crate::renderer::{Color, RenderSink, colors};
use crate::sim::actor::Collidable;
use crate::sim::black_hole::{BlackHole, BlackHoleState};
use crate::sim::gadget::Gadget;
use crate::sim::geometry::Rect;
use crate::sim::player::Spaceman;

const MARGIN: f32 = 16.0;
const BAR_WIDTH: f32 = 220.0;
const BAR_HEIGHT: f32 = 12.0;
const BAR_GAP: f32 = 6.0;
const INDICATOR_RADIUS: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct Hud {
    screen_width: f32,
    screen_height: f32,
}

impl Hud {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width,
            screen_height,
        }
    }

    pub fn draw(
        &self,
        sink: &mut dyn RenderSink,
        player: &Spaceman,
        black_hole: &BlackHole,
        primary_gadget: &Gadget,
        secondary_gadget: &Gadget,
    ) {
        let body = player.body();
        let bars = [
            (body.health / body.max_health, colors::HUD_HEALTH),
            (
                black_hole.energy() / black_hole.capacity(),
                colors::HUD_ENERGY,
            ),
            (
                primary_gadget.energy() / primary_gadget.max_energy(),
                colors::HUD_GADGET,
            ),
            (
                secondary_gadget.energy() / secondary_gadget.max_energy(),
                with_alpha(colors::HUD_GADGET, 0.6),
            ),
        ];
        for (row, (fraction, color)) in bars.into_iter().enumerate() {
            let y = MARGIN + row as f32 * (BAR_HEIGHT + BAR_GAP);
            draw_bar(sink, Vec2::new(MARGIN, y), fraction, color);
        }

        // Hazard state light, top right
        let light = Vec2::new(
            self.screen_width - MARGIN - INDICATOR_RADIUS,
            MARGIN + INDICATOR_RADIUS,
        );
        sink.draw_circle(light, INDICATOR_RADIUS, state_color(black_hole.state()));
        if primary_gadget.active() {
            sink.draw_ring(light, INDICATOR_RADIUS + 4.0, 2.0, colors::HUD_GADGET);
        }
    }
}

fn draw_bar(sink: &mut dyn RenderSink, origin: Vec2, fraction: f32, color: Color) {
    let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    sink.draw_rect(
        Rect::new(origin.x, origin.y, BAR_WIDTH, BAR_HEIGHT),
        colors::HUD_BACK,
    );
    if fraction > 0.0 {
        sink.draw_rect(
            Rect::new(origin.x, origin.y, BAR_WIDTH * fraction, BAR_HEIGHT),
            color,
        );
    }
}

fn state_color(state: BlackHoleState) -> Color {
    match state {
        BlackHoleState::Pulling => colors::BLACK_HOLE_RING,
        BlackHoleState::Overdrive => colors::BLACK_HOLE_OVERDRIVE,
        BlackHoleState::Exhausted | BlackHoleState::Inactive => colors::BLACK_HOLE_EXHAUSTED,
        BlackHoleState::Exploding => colors::BLACK_HOLE_EXPLOSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexBatch;
    use crate::sim::black_hole::BlackHoleData;
    use crate::sim::gadget::GadgetData;
    use glam::Affine2;

    #[test]
    fn test_draws_bars_and_indicator() {
        let hud = Hud::new(800.0, 600.0);
        let player = Spaceman::new(Vec2::ZERO);
        let hole = BlackHole::new(BlackHoleData::default());
        let gadget = Gadget::new(GadgetData::default());

        let mut batch = VertexBatch::new();
        batch.begin(Affine2::IDENTITY);
        hud.draw(&mut batch, &player, &hole, &gadget, &gadget);
        batch.end();

        // Four backgrounds, three fills (hazard energy starts empty), one light
        assert_eq!(batch.batches()[0].draw_calls, 8);
    }
}
