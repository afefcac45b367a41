//! Session balance table
//!
//! Entity physics lives in `consts`; everything that shapes a session (world
//! size, pacing, timers) lives here so tests and embedders can override it
//! from JSON. The binary always plays with the defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Session-level balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Toroidal world width
    pub world_width: f32,
    /// Toroidal world height
    pub world_height: f32,
    /// Background grid spacing in world units
    pub grid_size: f32,

    // === Screen ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Fixed tick rate
    pub fps: u32,

    // === Session ===
    /// Tier-3 asteroids scattered at start
    pub starting_asteroids: usize,
    pub starting_lives: u8,
    /// Minimum gap between shots; a shot needs strictly more than this
    pub fire_cooldown_ms: u64,
    /// How long the ship stays out after a hit
    pub respawn_ms: u64,
    /// How long the game-over screen stays up before the loop returns
    pub game_over_display_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 5000.0,
            world_height: 4000.0,
            grid_size: 50.0,

            viewport_width: 1200.0,
            viewport_height: 900.0,
            fps: 60,

            starting_asteroids: 40,
            starting_lives: 3,
            fire_cooldown_ms: 500,
            respawn_ms: 3000,
            game_over_display_ms: 3000,
        }
    }
}

impl Tuning {
    /// Parse an override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("world_width", self.world_width as f64),
            ("world_height", self.world_height as f64),
            ("grid_size", self.grid_size as f64),
            ("viewport_width", self.viewport_width as f64),
            ("viewport_height", self.viewport_height as f64),
            ("fps", self.fps as f64),
            ("starting_lives", self.starting_lives as f64),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        if self.viewport_width > self.world_width || self.viewport_height > self.world_height {
            return Err(TuningError::ViewportTooLarge {
                viewport: (self.viewport_width, self.viewport_height),
                world: (self.world_width, self.world_height),
            });
        }

        Ok(())
    }

    #[inline]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    #[inline]
    pub fn world_center(&self) -> Vec2 {
        self.world_size() * 0.5
    }

    #[inline]
    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }
}
