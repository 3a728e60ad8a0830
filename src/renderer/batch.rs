//! CPU-side vertex batching
//!
//! Collects draw calls into per-`begin` batches of transformed vertices.

use glam::{Affine2, Vec2};

use super::RenderSink;
use super::shapes;
use super::vertex::{Color, Vertex};
use crate::sim::Rect;

/// One begin/end-delimited group of draw calls
#[derive(Debug, Clone)]
pub struct Batch {
    pub transform: Affine2,
    pub vertices: Vec<Vertex>,
    /// Number of draw calls that produced `vertices`
    pub draw_calls: usize,
}

/// Render sink that tessellates shapes into vertex lists
#[derive(Debug, Default)]
pub struct VertexBatch {
    batches: Vec<Batch>,
    open: Option<Batch>,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished batches from the current frame, in submission order
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn vertex_count(&self) -> usize {
        self.batches.iter().map(|b| b.vertices.len()).sum()
    }

    /// Raw bytes of every vertex, ready for a GPU upload
    pub fn vertex_bytes(&self) -> Vec<u8> {
        self.batches
            .iter()
            .flat_map(|b| bytemuck::cast_slice::<Vertex, u8>(&b.vertices).iter().copied())
            .collect()
    }

    /// Drop everything recorded so far
    pub fn clear(&mut self) {
        self.batches.clear();
        self.open = None;
    }

    fn push(&mut self, vertices: Vec<Vertex>) {
        let Some(batch) = self.open.as_mut() else {
            log::warn!("draw call outside begin/end ignored");
            return;
        };
        let transform = batch.transform;
        batch.vertices.extend(vertices.into_iter().map(|mut v| {
            let p = transform.transform_point2(Vec2::from(v.position));
            v.position = p.to_array();
            v
        }));
        batch.draw_calls += 1;
    }
}

impl RenderSink for VertexBatch {
    fn begin(&mut self, transform: Affine2) {
        if let Some(unfinished) = self.open.take() {
            log::warn!("begin called with an open batch; closing it");
            self.batches.push(unfinished);
        }
        self.open = Some(Batch {
            transform,
            vertices: Vec::new(),
            draw_calls: 0,
        });
    }

    fn end(&mut self) {
        if let Some(batch) = self.open.take() {
            self.batches.push(batch);
        }
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let segments = shapes::segments_for_radius(radius);
        self.push(shapes::circle(center, radius, color, segments));
    }

    fn draw_ring(&mut self, center: Vec2, radius: f32, thickness: f32, color: Color) {
        let segments = shapes::segments_for_radius(radius);
        let half = thickness / 2.0;
        self.push(shapes::ring(
            center,
            (radius - half).max(0.0),
            radius + half,
            color,
            segments,
        ));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.push(shapes::rect(rect, color));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.push(shapes::line(from, to, width, color));
    }
}
