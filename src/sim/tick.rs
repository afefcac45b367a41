//! Fixed timestep simulation tick
//!
//! One tick is split in two so the frame loop can draw the moved world
//! before collisions are resolved:
//! - `advance`: input, ship, projectiles (plus pruning), asteroids
//! - `resolve`: collision pass and phase transitions
//!
//! `tick` runs both back to back.

use log::{debug, info};

use super::collision::detect_collisions;
use super::state::{GameEvent, GamePhase, GameState, Turn};

/// Input sampled for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Monotonic clock reading for this tick (ms)
    pub now_ms: u64,
}

/// Motion phase of a tick
pub fn advance(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;
    let world = state.tuning.world_size();

    if state.ship_active() {
        if input.left {
            state.ship.rotate(Turn::Left);
        }
        if input.right {
            state.ship.rotate(Turn::Right);
        }
        if input.thrust {
            state.ship.accelerate();
        }
        if input.fire
            && let Some(projectile_id) = try_fire(state, input.now_ms)
        {
            events.push(GameEvent::ProjectileFired { projectile_id });
        }
        state.ship.update(world);
    }

    for projectile in &mut state.projectiles {
        projectile.update();
    }
    state
        .projectiles
        .retain(|p| !p.is_expired(world.x, world.y));

    for asteroid in &mut state.asteroids {
        asteroid.update(world);
    }

    events
}

/// Fire if the cooldown has elapsed; otherwise the press is dropped
fn try_fire(state: &mut GameState, now_ms: u64) -> Option<u32> {
    if now_ms.saturating_sub(state.last_fire_ms) > state.tuning.fire_cooldown_ms {
        state.last_fire_ms = now_ms;
        Some(state.spawn_projectile())
    } else {
        None
    }
}

/// Collision and state-machine phase of a tick
pub fn resolve(state: &mut GameState, now_ms: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::GameOver => {}

        GamePhase::Playing => {
            let ship_shape = state.ship.shape();
            let report = detect_collisions(
                Some((&ship_shape, state.ship.pos)),
                &state.asteroids,
                &state.projectiles,
            );

            if let Some((asteroid_id, at)) = report.ship_hit {
                state.lives = state.lives.saturating_sub(1);
                debug!("Ship hit by asteroid {} at {:?}", asteroid_id, at);
                events.push(GameEvent::ShipHit {
                    asteroid_id,
                    at,
                    lives_left: state.lives,
                });

                if state.lives > 0 {
                    state.phase = GamePhase::Respawning;
                    state.respawn_started_ms = now_ms;
                    info!("Ship lost, {} lives left", state.lives);
                } else {
                    state.phase = GamePhase::GameOver;
                    info!("Game over with score {}", state.score);
                }
            }

            // Removals are applied after the scan so ids stay valid throughout
            for kill in &report.kills {
                state.projectiles.retain(|p| p.id != kill.projectile_id);
                let Some(idx) = state.asteroids.iter().position(|a| a.id == kill.asteroid_id)
                else {
                    continue;
                };
                let asteroid = state.asteroids.remove(idx);
                let fragments = asteroid.break_apart(state.rng_mut());
                let children = fragments.len();
                for fragment in fragments {
                    state.add_asteroid(fragment);
                }
                if asteroid.tier == 1 {
                    state.score += 1;
                }
                debug!(
                    "Projectile {} destroyed tier {} asteroid {}",
                    kill.projectile_id, asteroid.tier, asteroid.id
                );
                events.push(GameEvent::AsteroidDestroyed {
                    asteroid_id: asteroid.id,
                    tier: asteroid.tier,
                    children,
                });
            }

            if state.phase == GamePhase::GameOver {
                events.push(GameEvent::GameOver { score: state.score });
            }
        }

        GamePhase::Respawning => {
            if now_ms >= state.respawn_deadline_ms() {
                state.reset_ship();
                state.phase = GamePhase::Playing;
                info!("Ship respawned");
                events.push(GameEvent::ShipRespawned);
            }
        }
    }

    events
}

/// Advance the game state by one full tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = advance(state, input);
    events.extend(resolve(state, input.now_ms));
    events
}
