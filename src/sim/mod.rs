//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, clock readings passed in with the input
//! - Seeded RNG only
//! - Stable iteration order (insertion order, removals applied after scans)
//! - No rendering or platform dependencies

pub mod collision;
pub mod polygon;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, Kill, contact_point, detect_collisions, shapes_overlap};
pub use polygon::Polygon;
pub use state::{
    Asteroid, GameEvent, GamePhase, GameState, Projectile, Ship, Snapshot, Turn,
};
pub use tick::{TickInput, advance, resolve, tick};
