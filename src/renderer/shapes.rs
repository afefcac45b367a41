//! Draw shapes and their tessellation into screen-space triangles

use glam::Vec2;

use super::vertex::Vertex;
use crate::sim::Polygon;

/// Width of stroked lines in pixels
pub const LINE_WIDTH: f32 = 1.0;

/// What a shape belongs to (draw order and debugging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Background,
    Ship,
    Asteroid,
    Projectile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Closed outline filled solid
    Filled,
    /// Open polyline stroked at LINE_WIDTH
    Line,
}

/// A shape in local space, placed by the caller at a world position
#[derive(Debug, Clone, PartialEq)]
pub struct DrawShape {
    pub layer: Layer,
    pub kind: ShapeKind,
    pub color: [f32; 4],
    pub points: Vec<Vec2>,
}

impl DrawShape {
    pub fn polygon(layer: Layer, polygon: &Polygon, color: [f32; 4]) -> Self {
        Self {
            layer,
            kind: ShapeKind::Filled,
            color,
            points: polygon.points().to_vec(),
        }
    }

    /// Segment from the placement point to `to` (relative)
    pub fn line(layer: Layer, to: Vec2, color: [f32; 4]) -> Self {
        Self {
            layer,
            kind: ShapeKind::Line,
            color,
            points: vec![Vec2::ZERO, to],
        }
    }

    /// Vertices in screen space for this shape placed at `world_pos`
    pub fn screen_points(&self, world_pos: Vec2, offset: Vec2) -> Vec<Vec2> {
        self.points
            .iter()
            .map(|&p| super::viewport::to_screen(p + world_pos, offset))
            .collect()
    }
}

/// Triangle list for a shape placed at `world_pos` and seen through `offset`
pub fn tessellate(shape: &DrawShape, world_pos: Vec2, offset: Vec2) -> Vec<Vertex> {
    let points = shape.screen_points(world_pos, offset);
    match shape.kind {
        ShapeKind::Filled => fill_star(&points, screen_center(world_pos, offset), shape.color),
        ShapeKind::Line => polyline(&points, LINE_WIDTH, shape.color),
    }
}

#[inline]
fn screen_center(world_pos: Vec2, offset: Vec2) -> Vec2 {
    super::viewport::to_screen(world_pos, offset)
}

/// Fill an outline that is star-shaped around `center` as a triangle fan
pub fn fill_star(outline: &[Vec2], center: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let n = outline.len();
    if n < 3 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity(n * 3);
    for i in 0..n {
        let a = outline[i];
        let b = outline[(i + 1) % n];
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }
    vertices
}

/// Stroke a polyline as one quad per segment
pub fn polyline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(points.len().saturating_sub(1) * 6);
    let half = width / 2.0;

    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        let dir = (p2 - p1).normalize_or_zero();
        if dir == Vec2::ZERO {
            continue;
        }
        let perp = dir.perp() * half;

        let v1a = p1 + perp;
        let v1b = p1 - perp;
        let v2a = p2 + perp;
        let v2b = p2 - perp;

        // Two triangles
        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    vertices
}
