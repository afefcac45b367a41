//! Fixed-tick frame loop
//!
//! One frame: wait for the tick, drain events, sample keys, advance the
//! world, draw it through the viewport, resolve collisions, draw the HUD,
//! present. The loop ends on an external quit or when the game is over.

use log::{info, warn};
use serde::Serialize;

use crate::error::PlatformError;
use crate::platform::{Key, Platform, PlatformEvent};
use crate::renderer::{draw_game_over, draw_hud, draw_world, viewport_offset};
use crate::sim::{GameEvent, GamePhase, GameState, Snapshot, TickInput, advance, resolve};

/// Blocking frame-rate regulator on the platform clock
#[derive(Debug, Clone)]
pub struct FrameRegulator {
    fps: u64,
    origin_ms: Option<u64>,
    ticks: u64,
}

impl FrameRegulator {
    pub fn new(fps: u32) -> Self {
        Self {
            fps: u64::from(fps.max(1)),
            origin_ms: None,
            ticks: 0,
        }
    }

    fn due_ms(&self, origin: u64) -> u64 {
        origin + self.ticks * 1000 / self.fps
    }

    /// Block until the next tick is due
    pub fn wait<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        let now = platform.now_millis();
        let origin = *self.origin_ms.get_or_insert(now);
        let due = self.due_ms(origin);

        if due > now {
            platform.sleep_ms(due - now);
        } else if now - due > 1000 / self.fps {
            warn!("Frame overran its budget by {} ms", now - due);
            // Resync instead of bursting to catch up
            self.origin_ms = Some(now);
            self.ticks = 0;
        }
        self.ticks += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitReason {
    Quit,
    GameOver,
}

/// How a session ended
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub reason: ExitReason,
    pub snapshot: Snapshot,
    pub frames: u64,
    pub shots_fired: u64,
    pub asteroids_destroyed: u64,
}

fn sample_input<P: Platform + ?Sized>(platform: &P) -> TickInput {
    TickInput {
        left: platform.is_key_down(Key::Left),
        right: platform.is_key_down(Key::Right),
        thrust: platform.is_key_down(Key::Thrust),
        fire: platform.is_key_down(Key::Fire),
        now_ms: platform.now_millis(),
    }
}

/// Run the game loop until quit or game over
pub fn run<P: Platform + ?Sized>(
    platform: &mut P,
    state: &mut GameState,
) -> Result<SessionOutcome, PlatformError> {
    info!(
        "Session started: seed {}, {} asteroids, {} lives",
        state.seed,
        state.asteroids.len(),
        state.lives
    );

    let mut regulator = FrameRegulator::new(state.tuning.fps);
    let mut frames = 0u64;
    let mut shots_fired = 0u64;
    let mut asteroids_destroyed = 0u64;

    let reason = loop {
        regulator.wait(platform);

        if platform.poll_events().contains(&PlatformEvent::Quit) {
            info!("Quit after {} frames", frames);
            break ExitReason::Quit;
        }

        let input = sample_input(platform);
        for event in advance(state, &input) {
            if matches!(event, GameEvent::ProjectileFired { .. }) {
                shots_fired += 1;
            }
        }

        // Ship position is left alone while respawning, so the view holds still
        let offset = viewport_offset(state.ship.pos, platform.viewport_size());
        draw_world(platform, state, offset);

        for event in resolve(state, input.now_ms) {
            if matches!(event, GameEvent::AsteroidDestroyed { .. }) {
                asteroids_destroyed += 1;
            }
        }

        draw_hud(platform, state, input.now_ms);
        platform.present()?;
        frames += 1;

        if state.phase == GamePhase::GameOver {
            break ExitReason::GameOver;
        }
    };

    if reason == ExitReason::GameOver {
        draw_game_over(platform);
        platform.present()?;
        platform.sleep_ms(state.tuning.game_over_display_ms);
        info!("Game over screen shown, final score {}", state.score);
    }

    Ok(SessionOutcome {
        reason,
        snapshot: state.snapshot(),
        frames,
        shots_fired,
        asteroids_destroyed,
    })
}
