//! Error types for the fallible seams around the simulation
//!
//! Gameplay itself never fails: hits, kills and game over are state
//! transitions. Only the platform service and balance overrides can error.

use thiserror::Error;

/// Failures reported by a render/input service
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("render/input service failed to initialize: {0}")]
    Init(String),
    #[error("failed to present frame {frame}: {reason}")]
    Present { frame: u64, reason: String },
}

/// Rejected balance overrides
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("viewport {viewport:?} does not fit inside world {world:?}")]
    ViewportTooLarge { viewport: (f32, f32), world: (f32, f32) },
}
