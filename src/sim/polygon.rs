//! Polygon silhouettes for ships, asteroids and projectiles
//!
//! A silhouette is stored once in local space, centered on the entity's
//! position and facing up. Rotation and translation are applied on demand so
//! rendering and collision always read the same shape.
//!
//! Every silhouette is star-shaped around its local origin (each vertex is
//! visible from the center). That lets a concave rock be split into a fan of
//! triangles for exact convex overlap tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rotate_deg;

/// A closed polygon in local space (vertices in winding order)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Vec2>,
}

impl Polygon {
    pub fn new(points: Vec<Vec2>) -> Self {
        debug_assert!(points.len() >= 3, "polygon needs at least 3 vertices");
        Self { points }
    }

    /// Regular polygon of `segments` vertices on a circle of `radius`
    pub fn regular(radius: f32, segments: usize) -> Self {
        let points = (0..segments)
            .map(|i| {
                let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
                Vec2::new(radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        Self::new(points)
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Copy of this polygon rotated clockwise by `angle_deg` about its center
    pub fn rotated(&self, angle_deg: f32) -> Self {
        if angle_deg == 0.0 {
            return self.clone();
        }
        Self {
            points: self.points.iter().map(|&p| rotate_deg(p, angle_deg)).collect(),
        }
    }

    /// Distance from the center to the farthest vertex
    pub fn bounding_radius(&self) -> f32 {
        self.points
            .iter()
            .map(|p| p.length())
            .fold(0.0, f32::max)
    }

    /// Half size of the axis-aligned box around the center that holds every vertex
    pub fn half_extents(&self) -> Vec2 {
        self.points
            .iter()
            .fold(Vec2::ZERO, |acc, p| acc.max(p.abs()))
    }

    /// True when every turn along the outline goes the same way
    pub fn is_convex(&self) -> bool {
        let n = self.points.len();
        let mut sign = 0.0_f32;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let c = self.points[(i + 2) % n];
            let cross = cross(b - a, c - b);
            if cross.abs() <= f32::EPSILON {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }

    /// Convex pieces covering the polygon, in local space.
    ///
    /// A convex polygon is its own single piece; anything else is split into
    /// the fan of triangles around the center.
    pub fn convex_pieces(&self) -> Vec<Vec<Vec2>> {
        if self.is_convex() {
            return vec![self.points.clone()];
        }
        let n = self.points.len();
        (0..n)
            .map(|i| vec![Vec2::ZERO, self.points[i], self.points[(i + 1) % n]])
            .collect()
    }

    /// Signed area (positive for clockwise winding in y-down space)
    pub fn area(&self) -> f32 {
        let n = self.points.len();
        (0..n)
            .map(|i| cross(self.points[i], self.points[(i + 1) % n]))
            .sum::<f32>()
            * 0.5
    }
}

#[inline]
pub(crate) fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(half: f32) -> Polygon {
        Polygon::new(vec![
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ])
    }

    #[test]
    fn test_regular_polygon_radius() {
        let octagon = Polygon::regular(2.5, 8);
        assert_eq!(octagon.points().len(), 8);
        assert!((octagon.bounding_radius() - 2.5).abs() < 1e-5);
        assert!(octagon.is_convex());
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let nose = Polygon::new(vec![
            Vec2::new(0.0, -10.0),
            Vec2::new(-10.0, 10.0),
            Vec2::new(10.0, 10.0),
        ]);
        let turned = nose.rotated(90.0);
        // Nose now points right
        assert!((turned.points()[0] - Vec2::new(10.0, 0.0)).length() < 1e-4);
        // Rotation keeps the shape about its center
        assert!((turned.bounding_radius() - nose.bounding_radius()).abs() < 1e-4);
    }

    #[test]
    fn test_half_extents() {
        let sq = square(5.0);
        assert_eq!(sq.half_extents(), Vec2::splat(5.0));
        let diamond = sq.rotated(45.0);
        assert!((diamond.half_extents().x - 5.0 * std::f32::consts::SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn test_concave_is_split_into_fan() {
        // Diamond with a notch pushed in toward the center on its upper-left side
        let notched = Polygon::new(vec![
            Vec2::new(0.0, -20.0),
            Vec2::new(20.0, 0.0),
            Vec2::new(0.0, 20.0),
            Vec2::new(-20.0, 0.0),
            Vec2::new(-4.0, -4.0),
        ]);
        assert!(!notched.is_convex());
        let pieces = notched.convex_pieces();
        assert_eq!(pieces.len(), 5);
        assert!(pieces.iter().all(|p| p.len() == 3 && p[0] == Vec2::ZERO));

        // The fan covers exactly the notched outline: 800 minus the 120 notch
        assert!((notched.area().abs() - 680.0).abs() < 1e-3);
        let fan_area: f32 = pieces
            .iter()
            .map(|p| Polygon::new(p.clone()).area())
            .sum();
        assert!((fan_area - notched.area()).abs() < 1e-3);
        // Every fan triangle is convex, so each can go through the axis test
        assert!(pieces.iter().all(|p| Polygon::new(p.clone()).is_convex()));
    }

    #[test]
    fn test_convex_is_single_piece() {
        assert_eq!(square(3.0).convex_pieces().len(), 1);
    }

    #[test]
    fn test_area() {
        assert!((square(1.0).area().abs() - 4.0).abs() < 1e-6);
    }
}
