//! Rendering front end
//!
//! The simulation draws through the [`RenderSink`] trait. [`VertexBatch`]
//! is the bundled sink: it tessellates every call into colored triangles,
//! ready to upload to whatever GPU backend the host uses.

pub mod batch;
pub mod shapes;
pub mod vertex;

pub use batch::{Batch, VertexBatch};
pub use vertex::{Color, Vertex, colors};

use glam::{Affine2, Vec2};

use crate::sim::Rect;

/// Destination for draw calls
///
/// Calls are grouped into batches delimited by `begin`/`end`. Everything
/// drawn inside a batch is placed through that batch's transform; the HUD
/// uses `Affine2::IDENTITY` so it lands in screen space.
pub trait RenderSink {
    fn begin(&mut self, transform: Affine2);
    fn end(&mut self);

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_ring(&mut self, center: Vec2, radius: f32, thickness: f32, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
}
