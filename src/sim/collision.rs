//! Shape-accurate collision detection
//!
//! Overlap is decided on the actual silhouettes, not their boxes: a cheap
//! bounding-circle reject first, then a separating-axis test between the
//! convex pieces of both polygons. Concave rocks are split into a fan of
//! triangles around their center (see `Polygon::convex_pieces`).

use glam::Vec2;

use super::polygon::{Polygon, cross};
use super::state::{Asteroid, Projectile};

/// A projectile that destroyed an asteroid this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kill {
    pub projectile_id: u32,
    pub asteroid_id: u32,
}

/// Outcome of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// First asteroid found touching the ship, with the contact point
    pub ship_hit: Option<(u32, Vec2)>,
    /// Projectile/asteroid pairs; each id appears at most once
    pub kills: Vec<Kill>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.ship_hit.is_none() && self.kills.is_empty()
    }
}

/// Check whether two placed polygons overlap (touching counts)
pub fn shapes_overlap(a: &Polygon, a_pos: Vec2, b: &Polygon, b_pos: Vec2) -> bool {
    let reach = a.bounding_radius() + b.bounding_radius();
    if a_pos.distance_squared(b_pos) > reach * reach {
        return false;
    }

    let offset = b_pos - a_pos;
    let a_pieces = a.convex_pieces();
    let b_pieces: Vec<Vec<Vec2>> = b
        .convex_pieces()
        .into_iter()
        .map(|piece| piece.into_iter().map(|p| p + offset).collect())
        .collect();

    a_pieces
        .iter()
        .any(|pa| b_pieces.iter().any(|pb| convex_overlap(pa, pb)))
}

/// Separating-axis test for two convex outlines in the same frame
fn convex_overlap(a: &[Vec2], b: &[Vec2]) -> bool {
    !(has_separating_edge(a, b) || has_separating_edge(b, a))
}

/// True if an edge normal of `edges_of` splits the two outlines apart
fn has_separating_edge(edges_of: &[Vec2], other: &[Vec2]) -> bool {
    let n = edges_of.len();
    for i in 0..n {
        let edge = edges_of[(i + 1) % n] - edges_of[i];
        let axis = edge.perp();
        if axis.length_squared() <= f32::EPSILON {
            continue; // Degenerate edge
        }
        let (min_a, max_a) = project(edges_of, axis);
        let (min_b, max_b) = project(other, axis);
        if max_a < min_b || max_b < min_a {
            return true;
        }
    }
    false
}

/// A world point where two overlapping shapes meet.
///
/// The first vertex of `a` inside `b`, else the first vertex of `b` inside
/// `a`, else midway between the two centers (edges crossing without any
/// vertex inside).
pub fn contact_point(a: &Polygon, a_pos: Vec2, b: &Polygon, b_pos: Vec2) -> Vec2 {
    let a_pieces = a.convex_pieces();
    let b_pieces = b.convex_pieces();
    let inside = |pieces: &[Vec<Vec2>], local: Vec2| {
        pieces.iter().any(|piece| contains_point(piece, local))
    };

    a.points()
        .iter()
        .map(|&p| p + a_pos)
        .find(|&p| inside(b_pieces.as_slice(), p - b_pos))
        .or_else(|| {
            b.points()
                .iter()
                .map(|&p| p + b_pos)
                .find(|&p| inside(a_pieces.as_slice(), p - a_pos))
        })
        .unwrap_or((a_pos + b_pos) * 0.5)
}

/// Point inside or on a convex outline
fn contains_point(outline: &[Vec2], p: Vec2) -> bool {
    let n = outline.len();
    let mut sign = 0.0_f32;
    for i in 0..n {
        let side = cross(outline[(i + 1) % n] - outline[i], p - outline[i]);
        if side.abs() <= f32::EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = side.signum();
        } else if side.signum() != sign {
            return false;
        }
    }
    true
}

#[inline]
fn project(points: &[Vec2], axis: Vec2) -> (f32, f32) {
    points.iter().fold((f32::MAX, f32::MIN), |(lo, hi), p| {
        let d = p.dot(axis);
        (lo.min(d), hi.max(d))
    })
}

/// Run the per-tick collision pass.
///
/// Asteroids are visited in order. For each one the ship is tested first
/// (only until the first hit, later asteroids are not checked against the
/// ship), then every projectile that has not already scored this tick. The
/// first overlapping projectile kills the asteroid and the scan moves on, so
/// a projectile kills at most one asteroid and an asteroid dies at most once.
///
/// `ship` is `None` while the ship is out of play.
pub fn detect_collisions(
    ship: Option<(&Polygon, Vec2)>,
    asteroids: &[Asteroid],
    projectiles: &[Projectile],
) -> CollisionReport {
    let mut report = CollisionReport::default();
    let projectile_shape = Projectile::shape();
    let mut spent = vec![false; projectiles.len()];

    for asteroid in asteroids {
        if report.ship_hit.is_none()
            && let Some((ship_shape, ship_pos)) = ship
            && shapes_overlap(ship_shape, ship_pos, asteroid.shape(), asteroid.pos)
        {
            let at = contact_point(ship_shape, ship_pos, asteroid.shape(), asteroid.pos);
            report.ship_hit = Some((asteroid.id, at));
        }

        for (i, projectile) in projectiles.iter().enumerate() {
            if spent[i] {
                continue;
            }
            if shapes_overlap(&projectile_shape, projectile.pos, asteroid.shape(), asteroid.pos) {
                spent[i] = true;
                report.kills.push(Kill {
                    projectile_id: projectile.id,
                    asteroid_id: asteroid.id,
                });
                break;
            }
        }
    }

    report
}
