//! Drift Rocks - a wrap-around asteroid field shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, game state)
//! - `renderer`: Viewport transform, draw ordering and shape tessellation
//! - `platform`: Render/input service seam plus a headless implementation
//! - `runner`: Fixed-tick frame loop tying the three together
//! - `tuning`: Data-driven session balance

pub mod error;
pub mod platform;
pub mod renderer;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use error::{PlatformError, TuningError};
pub use tuning::Tuning;

use glam::Vec2;

/// Entity constants (per-tick units: one tick is one frame)
pub mod consts {
    /// Ship rotation per tick while a turn key is held (degrees)
    pub const SHIP_ROTATION_SPEED: f32 = 3.0;
    /// Thrust added per tick along the heading
    pub const SHIP_ACCELERATION: f32 = 0.6;
    /// Hard cap on ship speed (units per tick)
    pub const SHIP_MAX_SPEED: f32 = 5.0;
    /// Velocity multiplier applied every tick
    pub const SHIP_FRICTION: f32 = 0.99;
    /// Ship silhouette is a triangle inside a square of this side
    pub const SHIP_SIZE: f32 = 20.0;

    /// Projectile speed (units per tick)
    pub const PROJECTILE_SPEED: f32 = 10.0;
    /// Projectile disc radius
    pub const PROJECTILE_RADIUS: f32 = 2.5;
    /// Vertex count of the projectile disc approximation
    pub const PROJECTILE_SEGMENTS: usize = 8;

    /// Largest and smallest asteroid tiers
    pub const ASTEROID_MAX_TIER: u8 = 3;
    pub const ASTEROID_MIN_TIER: u8 = 1;
    /// Vertices per asteroid silhouette
    pub const ASTEROID_VERTICES: usize = 8;
    /// Maximum inward jitter of an asteroid vertex from the nominal radius
    pub const ASTEROID_RADIUS_JITTER: i32 = 10;

    /// Bounding square side of an asteroid of the given tier
    pub const fn asteroid_size(tier: u8) -> f32 {
        match tier {
            3 => 200.0,
            2 => 80.0,
            _ => 50.0,
        }
    }
}

/// Axis-aligned bounds in world space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// True when the bounds lie entirely outside `[0, width] x [0, height]`
    pub fn is_outside(&self, width: f32, height: f32) -> bool {
        self.max.x < 0.0 || self.min.x > width || self.max.y < 0.0 || self.min.y > height
    }
}

/// Rescale `velocity` down to `max` if it is faster, otherwise return it unchanged
#[inline]
pub fn clamp_speed(velocity: Vec2, max: f32) -> Vec2 {
    let speed = velocity.length();
    if speed > max {
        velocity * (max / speed)
    } else {
        velocity
    }
}

/// Unit direction for a heading in degrees (0 = up, clockwise positive, y down)
#[inline]
pub fn heading_to_delta(angle_deg: f32) -> Vec2 {
    let radians = angle_deg.to_radians();
    Vec2::new(radians.sin(), -radians.cos())
}

/// Rotate a local-space point clockwise by `angle_deg` about the origin
#[inline]
pub fn rotate_deg(point: Vec2, angle_deg: f32) -> Vec2 {
    Vec2::from_angle(angle_deg.to_radians()).rotate(point)
}

/// Edge-triggered toroidal wrap.
///
/// An entity only jumps once it has fully left the world on a side; it then
/// reappears with its leading edge on the opposite boundary. Axes are
/// handled independently and the size of the bounds is preserved.
pub fn wrap(bounds: Bounds, width: f32, height: f32) -> Bounds {
    let size = bounds.size();
    let mut out = bounds;

    if bounds.min.x > width {
        out.min.x = -size.x;
        out.max.x = 0.0;
    } else if bounds.max.x < 0.0 {
        out.min.x = width;
        out.max.x = width + size.x;
    }
    if bounds.min.y > height {
        out.min.y = -size.y;
        out.max.y = 0.0;
    } else if bounds.max.y < 0.0 {
        out.min.y = height;
        out.max.y = height + size.y;
    }

    out
}

/// Apply `wrap` to an entity centered at `pos`; axes that do not wrap keep their exact value
pub fn wrap_position(pos: Vec2, half_extents: Vec2, width: f32, height: f32) -> Vec2 {
    let bounds = Bounds::from_center(pos, half_extents);
    pos + (wrap(bounds, width, height).min - bounds.min)
}
