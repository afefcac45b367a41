//! Draw ordering for one frame
//!
//! Background grid first, then ship, asteroids and projectiles, then the HUD
//! on top. The HUD is drawn after the collision pass so it shows the score
//! and lives of the tick that just finished.

use glam::Vec2;

use super::shapes::{DrawShape, Layer};
use super::vertex::colors;
use super::viewport::visible_world;
use crate::platform::{Platform, TextAnchor, TextSize, TextStyle};
use crate::sim::{GamePhase, GameState, Projectile};
use crate::tuning::Tuning;

/// HUD line positions (screen space)
const SCORE_POS: Vec2 = Vec2::new(10.0, 10.0);
const LIVES_POS: Vec2 = Vec2::new(10.0, 40.0);

/// Background, then every live entity, seen through `offset`
pub fn draw_world<P: Platform + ?Sized>(platform: &mut P, state: &GameState, offset: Vec2) {
    platform.clear(colors::BACKGROUND);
    let viewport = platform.viewport_size();
    draw_grid(platform, &state.tuning, offset, viewport);

    if state.ship_active() {
        let ship = DrawShape::polygon(Layer::Ship, &state.ship.shape(), colors::SHIP);
        platform.draw_shape(&ship, state.ship.pos, offset);
    }

    for asteroid in &state.asteroids {
        let rock = DrawShape::polygon(Layer::Asteroid, asteroid.shape(), colors::ASTEROID);
        platform.draw_shape(&rock, asteroid.pos, offset);
    }

    let shot = DrawShape::polygon(Layer::Projectile, &Projectile::shape(), colors::PROJECTILE);
    for projectile in &state.projectiles {
        platform.draw_shape(&shot, projectile.pos, offset);
    }
}

/// World grid lines that intersect the viewport
fn draw_grid<P: Platform + ?Sized>(platform: &mut P, tuning: &Tuning, offset: Vec2, viewport: Vec2) {
    let grid = tuning.grid_size;
    let world = tuning.world_size();
    let (view_min, view_max) = visible_world(offset, viewport);

    // Clip the line extents to what is both inside the world and on screen
    let y0 = view_min.y.max(0.0);
    let y1 = view_max.y.min(world.y);
    if y1 > y0 {
        let mut x = (view_min.x.max(0.0) / grid).ceil() * grid;
        while x < world.x && x <= view_max.x {
            let line = DrawShape::line(Layer::Background, Vec2::new(0.0, y1 - y0), colors::GRID);
            platform.draw_shape(&line, Vec2::new(x, y0), offset);
            x += grid;
        }
    }

    let x0 = view_min.x.max(0.0);
    let x1 = view_max.x.min(world.x);
    if x1 > x0 {
        let mut y = (view_min.y.max(0.0) / grid).ceil() * grid;
        while y < world.y && y <= view_max.y {
            let line = DrawShape::line(Layer::Background, Vec2::new(x1 - x0, 0.0), colors::GRID);
            platform.draw_shape(&line, Vec2::new(x0, y), offset);
            y += grid;
        }
    }
}

/// Respawn countdown (while out), score and lives
pub fn draw_hud<P: Platform + ?Sized>(platform: &mut P, state: &GameState, now_ms: u64) {
    let hud = TextStyle {
        size: TextSize::Hud,
        color: colors::HUD_TEXT,
        anchor: TextAnchor::TopLeft,
    };

    if state.phase == GamePhase::Respawning {
        let countdown = format!("Respawning in {}...", state.respawn_countdown(now_ms));
        let center = platform.viewport_size() / 2.0;
        platform.draw_text(
            &countdown,
            center,
            TextStyle {
                anchor: TextAnchor::CenterTop,
                ..hud
            },
        );
    }

    platform.draw_text(&format!("Score: {}", state.score), SCORE_POS, hud);
    platform.draw_text(&format!("Lives: {}", state.lives), LIVES_POS, hud);
}

/// Terminal banner drawn over the last frame
pub fn draw_game_over<P: Platform + ?Sized>(platform: &mut P) {
    let center = platform.viewport_size() / 2.0;
    platform.draw_text(
        "Game Over",
        center,
        TextStyle {
            size: TextSize::Banner,
            color: colors::GAME_OVER,
            anchor: TextAnchor::CenterTop,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;
    use crate::renderer::viewport::viewport_offset;

    fn small_world() -> GameState {
        let tuning = Tuning {
            starting_asteroids: 3,
            ..Tuning::default()
        };
        GameState::with_tuning(8, tuning)
    }

    fn platform() -> HeadlessPlatform {
        HeadlessPlatform::new(Vec2::new(1200.0, 900.0)).unwrap()
    }

    #[test]
    fn test_draw_order() {
        let mut state = small_world();
        state.spawn_projectile();
        let mut platform = platform();
        let offset = viewport_offset(state.ship.pos, platform.viewport_size());
        draw_world(&mut platform, &state, offset);

        let layers: Vec<Layer> = platform.current_frame().shapes.iter().map(|s| s.layer).collect();
        let first_entity = layers.iter().position(|l| *l != Layer::Background).unwrap();
        assert!(layers[..first_entity].iter().all(|l| *l == Layer::Background));
        assert_eq!(layers[first_entity], Layer::Ship);
        assert_eq!(layers.iter().filter(|l| **l == Layer::Asteroid).count(), 3);
        assert_eq!(layers.last(), Some(&Layer::Projectile));
    }

    #[test]
    fn test_grid_is_culled_to_viewport() {
        let state = small_world();
        let mut platform = platform();
        let offset = viewport_offset(state.ship.pos, platform.viewport_size());
        draw_world(&mut platform, &state, offset);

        let grid = platform
            .current_frame()
            .shapes
            .iter()
            .filter(|s| s.layer == Layer::Background)
            .count();
        // 1200 / 50 + 1 vertical and 900 / 50 + 1 horizontal lines
        assert_eq!(grid, 25 + 19);
    }

    #[test]
    fn test_grid_stops_at_world_edge() {
        let state = small_world();
        let mut platform = platform();
        // Ship in the top-left corner: half the screen shows outside the world
        let offset = viewport_offset(Vec2::new(0.0, 0.0), platform.viewport_size());
        draw_world(&mut platform, &state, offset);
        let grid = platform
            .current_frame()
            .shapes
            .iter()
            .filter(|s| s.layer == Layer::Background)
            .count();
        // x in 0..=600 and y in 0..=450
        assert_eq!(grid, 13 + 10);
    }

    #[test]
    fn test_ship_hidden_while_respawning() {
        let mut state = small_world();
        state.phase = GamePhase::Respawning;
        state.respawn_started_ms = 1000;
        let mut platform = platform();
        draw_world(&mut platform, &state, Vec2::ZERO);
        draw_hud(&mut platform, &state, 2500);

        let frame = platform.current_frame();
        assert!(frame.shapes.iter().all(|s| s.layer != Layer::Ship));
        let texts: Vec<&str> = frame.texts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Respawning in 2...", "Score: 0", "Lives: 3"]);
    }

    #[test]
    fn test_hud_positions() {
        let state = small_world();
        let mut platform = platform();
        draw_hud(&mut platform, &state, 0);
        let frame = platform.current_frame();
        assert_eq!(frame.texts[0].pos, Vec2::new(10.0, 10.0));
        assert_eq!(frame.texts[1].pos, Vec2::new(10.0, 40.0));
    }

    #[test]
    fn test_game_over_banner() {
        let mut platform = platform();
        draw_game_over(&mut platform);
        let text = &platform.current_frame().texts[0];
        assert_eq!(text.text, "Game Over");
        assert_eq!(text.style.size, TextSize::Banner);
        assert_eq!(text.pos, Vec2::new(600.0, 450.0));
    }
}
