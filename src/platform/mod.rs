//! Platform abstraction layer
//!
//! The game loop talks to the outside world only through `Platform`:
//! - Input events and held keys
//! - Drawing (shapes through the viewport, HUD text in screen space)
//! - Wall-clock time and frame pacing
//!
//! `HeadlessPlatform` records everything and runs on a virtual clock. A
//! windowed backend implements the same trait.

pub mod headless;

use std::time::Duration;

use glam::Vec2;

use crate::error::PlatformError;
use crate::renderer::DrawShape;

pub use headless::{HeadlessPlatform, KeyState, Pilot, RecordedFrame, RecordedShape, RecordedText};

/// Held controls the game samples every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Thrust,
    Fire,
}

/// Discrete events drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// Window closed or the session was told to stop
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    /// Score, lives and countdown (36 pt)
    Hud,
    /// Game over banner (72 pt)
    Banner,
}

/// Which point of the text box `pos` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    /// Horizontally centered, top edge at `pos`
    CenterTop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: TextSize,
    pub color: [f32; 4],
    pub anchor: TextAnchor,
}

/// Render/input service used by the runner
pub trait Platform {
    /// Drain pending events
    fn poll_events(&mut self) -> Vec<PlatformEvent>;

    /// Whether `key` is held right now
    fn is_key_down(&self, key: Key) -> bool;

    /// Screen size in pixels
    fn viewport_size(&self) -> Vec2;

    /// Start a new frame filled with `color`
    fn clear(&mut self, color: [f32; 4]);

    /// Draw `shape` placed at `world_pos`, seen through `offset`
    fn draw_shape(&mut self, shape: &DrawShape, world_pos: Vec2, offset: Vec2);

    /// Draw text at a screen position
    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle);

    /// Show the finished frame
    fn present(&mut self) -> Result<(), PlatformError>;

    /// Monotonic milliseconds since the platform started
    fn now_millis(&self) -> u64;

    /// Block for `ms` milliseconds
    fn sleep_ms(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}
