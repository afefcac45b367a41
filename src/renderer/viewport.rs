//! World-to-screen transform
//!
//! The screen is a window onto the world centered on the ship. Every draw
//! subtracts the same offset from world coordinates.

use glam::Vec2;

/// Offset that puts `focus` in the middle of a viewport of `viewport_size`
#[inline]
pub fn viewport_offset(focus: Vec2, viewport_size: Vec2) -> Vec2 {
    focus - viewport_size / 2.0
}

#[inline]
pub fn to_screen(world: Vec2, offset: Vec2) -> Vec2 {
    world - offset
}

/// World-space rectangle currently on screen as (min, max)
pub fn visible_world(offset: Vec2, viewport_size: Vec2) -> (Vec2, Vec2) {
    (offset, offset + viewport_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_lands_in_center() {
        let viewport = Vec2::new(1200.0, 900.0);
        let ship = Vec2::new(2500.0, 2000.0);
        let offset = viewport_offset(ship, viewport);
        assert_eq!(offset, Vec2::new(1900.0, 1550.0));
        assert_eq!(to_screen(ship, offset), Vec2::new(600.0, 450.0));
    }

    #[test]
    fn test_offset_can_go_negative_near_edges() {
        let offset = viewport_offset(Vec2::new(10.0, 10.0), Vec2::new(1200.0, 900.0));
        assert_eq!(offset, Vec2::new(-590.0, -440.0));
        let (min, max) = visible_world(offset, Vec2::new(1200.0, 900.0));
        assert_eq!(min, offset);
        assert_eq!(max, Vec2::new(610.0, 460.0));
    }
}
