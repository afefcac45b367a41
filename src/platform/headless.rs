//! Headless platform: virtual clock, scripted keys, recorded frames

use glam::Vec2;
use log::debug;

use super::{Key, Platform, PlatformEvent, TextStyle};
use crate::error::PlatformError;
use crate::renderer::{DrawShape, Layer, ShapeKind, Vertex, tessellate, to_screen};

/// Keys held during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub fire: bool,
}

impl KeyState {
    pub fn is_down(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Thrust => self.thrust,
            Key::Fire => self.fire,
        }
    }
}

/// Script mapping a frame number to the keys held during it
pub type Pilot = Box<dyn FnMut(u64) -> KeyState>;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedShape {
    pub layer: Layer,
    pub kind: ShapeKind,
    pub world_pos: Vec2,
    pub screen_pos: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedText {
    pub text: String,
    pub pos: Vec2,
    pub style: TextStyle,
}

/// Everything drawn between two presents
#[derive(Debug, Clone, Default)]
pub struct RecordedFrame {
    pub clear: Option<[f32; 4]>,
    pub shapes: Vec<RecordedShape>,
    pub texts: Vec<RecordedText>,
    pub vertices: Vec<Vertex>,
}

impl RecordedFrame {
    pub fn count(&self, layer: Layer) -> usize {
        self.shapes.iter().filter(|s| s.layer == layer).count()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.text.contains(needle))
    }
}

pub struct HeadlessPlatform {
    viewport: Vec2,
    clock_ms: u64,
    keys: KeyState,
    pilot: Option<Pilot>,
    frame_limit: Option<u64>,
    fail_present_at: Option<u64>,
    frames_presented: u64,
    bytes_uploaded: usize,
    current: RecordedFrame,
    last: RecordedFrame,
}

impl HeadlessPlatform {
    pub fn new(viewport: Vec2) -> Result<Self, PlatformError> {
        if !(viewport.x > 0.0 && viewport.y > 0.0) {
            return Err(PlatformError::Init(format!(
                "viewport must be positive, got {}x{}",
                viewport.x, viewport.y
            )));
        }
        Ok(Self {
            viewport,
            clock_ms: 0,
            keys: KeyState::default(),
            pilot: None,
            frame_limit: None,
            fail_present_at: None,
            frames_presented: 0,
            bytes_uploaded: 0,
            current: RecordedFrame::default(),
            last: RecordedFrame::default(),
        })
    }

    /// Drive the held keys from a script
    pub fn with_pilot(mut self, pilot: impl FnMut(u64) -> KeyState + 'static) -> Self {
        self.pilot = Some(Box::new(pilot));
        self
    }

    /// Emit `Quit` once `frames` frames have been presented
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Make `present` fail on the given (zero-based) frame
    pub fn fail_present_at(mut self, frame: u64) -> Self {
        self.fail_present_at = Some(frame);
        self
    }

    /// Frame being drawn (not yet presented)
    pub fn current_frame(&self) -> &RecordedFrame {
        &self.current
    }

    /// Most recently presented frame
    pub fn last_frame(&self) -> &RecordedFrame {
        &self.last
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Total vertex bytes handed over at present
    pub fn bytes_uploaded(&self) -> usize {
        self.bytes_uploaded
    }
}

impl Platform for HeadlessPlatform {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        if self.frame_limit.is_some_and(|limit| self.frames_presented >= limit) {
            return vec![PlatformEvent::Quit];
        }
        if let Some(pilot) = self.pilot.as_mut() {
            self.keys = pilot(self.frames_presented);
        }
        Vec::new()
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.keys.is_down(key)
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.current = RecordedFrame {
            clear: Some(color),
            ..RecordedFrame::default()
        };
    }

    fn draw_shape(&mut self, shape: &DrawShape, world_pos: Vec2, offset: Vec2) {
        self.current.shapes.push(RecordedShape {
            layer: shape.layer,
            kind: shape.kind,
            world_pos,
            screen_pos: to_screen(world_pos, offset),
        });
        self.current
            .vertices
            .extend(tessellate(shape, world_pos, offset));
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.current.texts.push(RecordedText {
            text: text.to_string(),
            pos,
            style,
        });
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        if self.fail_present_at == Some(self.frames_presented) {
            return Err(PlatformError::Present {
                frame: self.frames_presented,
                reason: "scripted failure".to_string(),
            });
        }
        self.bytes_uploaded += Vertex::as_bytes(&self.current.vertices).len();
        self.last = std::mem::take(&mut self.current);
        self.frames_presented += 1;
        debug!(
            "frame {} presented: {} shapes, {} texts",
            self.frames_presented,
            self.last.shapes.len(),
            self.last.texts.len()
        );
        Ok(())
    }

    fn now_millis(&self) -> u64 {
        self.clock_ms
    }

    fn sleep_ms(&mut self, ms: u64) {
        self.clock_ms += ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors;

    fn platform() -> HeadlessPlatform {
        HeadlessPlatform::new(Vec2::new(800.0, 600.0)).unwrap()
    }

    #[test]
    fn test_rejects_empty_viewport() {
        assert!(matches!(
            HeadlessPlatform::new(Vec2::new(0.0, 600.0)),
            Err(PlatformError::Init(_))
        ));
    }

    #[test]
    fn test_virtual_clock() {
        let mut p = platform();
        assert_eq!(p.now_millis(), 0);
        p.sleep_ms(17);
        p.sleep_ms(16);
        assert_eq!(p.now_millis(), 33);
    }

    #[test]
    fn test_pilot_sees_frame_number() {
        let mut p = platform().with_pilot(|frame| KeyState {
            fire: frame % 2 == 1,
            ..KeyState::default()
        });
        p.poll_events();
        assert!(!p.is_key_down(Key::Fire));
        p.present().unwrap();
        p.poll_events();
        assert!(p.is_key_down(Key::Fire));
    }

    #[test]
    fn test_frame_limit_quits() {
        let mut p = platform().with_frame_limit(1);
        assert!(p.poll_events().is_empty());
        p.present().unwrap();
        assert_eq!(p.poll_events(), vec![PlatformEvent::Quit]);
    }

    #[test]
    fn test_present_moves_frame_and_counts_bytes() {
        let mut p = platform();
        p.clear(colors::BACKGROUND);
        let line = DrawShape::line(Layer::Background, Vec2::new(0.0, 10.0), colors::GRID);
        p.draw_shape(&line, Vec2::new(5.0, 5.0), Vec2::ZERO);
        p.present().unwrap();

        assert_eq!(p.frames_presented(), 1);
        assert_eq!(p.last_frame().count(Layer::Background), 1);
        assert_eq!(p.last_frame().clear, Some(colors::BACKGROUND));
        assert!(p.current_frame().shapes.is_empty());
        assert_eq!(p.bytes_uploaded(), 6 * std::mem::size_of::<Vertex>());
    }

    #[test]
    fn test_scripted_present_failure() {
        let mut p = platform().fail_present_at(1);
        p.present().unwrap();
        let err = p.present().unwrap_err();
        assert!(matches!(err, PlatformError::Present { frame: 1, .. }));
    }
}
