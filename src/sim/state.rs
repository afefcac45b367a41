//! Game state and core simulation types
//!
//! Everything a session needs lives in `GameState`; the frame loop owns it
//! and hands it to the tick functions by exclusive reference.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::polygon::Polygon;
use crate::consts::*;
use crate::error::TuningError;
use crate::tuning::Tuning;
use crate::{Bounds, clamp_speed, heading_to_delta, wrap_position};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ship is live: updated, drawn and collidable
    Playing,
    /// Ship destroyed, waiting out the respawn delay
    Respawning,
    /// No lives left (terminal)
    GameOver,
}

/// Turn direction for the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

/// Things that happened during a tick, in the order they were applied
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ProjectileFired { projectile_id: u32 },
    ShipHit { asteroid_id: u32, at: Vec2, lives_left: u8 },
    AsteroidDestroyed { asteroid_id: u32, tier: u8, children: usize },
    ShipRespawned,
    GameOver { score: u64 },
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    /// Center in world space
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees, 0 = up, clockwise positive
    pub heading: f32,
}

impl Ship {
    /// Fresh ship at rest, facing up
    pub fn spawn(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            heading: 0.0,
        }
    }

    /// Unrotated silhouette: a triangle with its nose up inside a SHIP_SIZE square
    pub fn base_shape() -> Polygon {
        let half = SHIP_SIZE / 2.0;
        Polygon::new(vec![
            Vec2::new(0.0, -half),
            Vec2::new(-half, half),
            Vec2::new(half, half),
        ])
    }

    /// Silhouette rotated to the current heading
    pub fn shape(&self) -> Polygon {
        Self::base_shape().rotated(self.heading)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.pos, self.shape().half_extents())
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn rotate(&mut self, turn: Turn) {
        match turn {
            Turn::Left => self.heading -= SHIP_ROTATION_SPEED,
            Turn::Right => self.heading += SHIP_ROTATION_SPEED,
        }
        self.heading = self.heading.rem_euclid(360.0);
    }

    /// Thrust along the heading, then cap the speed
    pub fn accelerate(&mut self) {
        self.vel += SHIP_ACCELERATION * heading_to_delta(self.heading);
        self.vel = clamp_speed(self.vel, SHIP_MAX_SPEED);
    }

    /// Friction, integrate, wrap
    pub fn update(&mut self, world: Vec2) {
        self.vel *= SHIP_FRICTION;
        self.pos += self.vel;
        self.pos = wrap_position(self.pos, self.shape().half_extents(), world.x, world.y);
    }
}

/// A rock drifting through the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Size class: 3 = largest and slowest, 1 = smallest
    pub tier: u8,
    shape: Polygon,
}

impl Asteroid {
    /// New rock at `pos` with a random drift and silhouette.
    ///
    /// The id is assigned when the rock joins a `GameState`.
    pub fn new(pos: Vec2, tier: u8, rng: &mut impl Rng) -> Self {
        let tier = tier.clamp(ASTEROID_MIN_TIER, ASTEROID_MAX_TIER);
        // Larger rocks drift slower
        let pace = (ASTEROID_MAX_TIER + 1 - tier) as f32;
        let vel = Vec2::new(
            rng.random_range(-1.0_f32..=1.0) * pace,
            rng.random_range(-1.0_f32..=1.0) * pace,
        );

        Self {
            id: 0,
            pos,
            vel,
            tier,
            shape: Self::rock_shape(tier, rng),
        }
    }

    /// Irregular outline: ASTEROID_VERTICES evenly spaced spokes with jittered length
    fn rock_shape(tier: u8, rng: &mut impl Rng) -> Polygon {
        let nominal = asteroid_size(tier) as i32 / 2;
        let points = (0..ASTEROID_VERTICES)
            .map(|i| {
                let theta = i as f32 * std::f32::consts::TAU / ASTEROID_VERTICES as f32;
                let radius = rng.random_range(nominal - ASTEROID_RADIUS_JITTER..=nominal) as f32;
                Vec2::new(radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        Polygon::new(points)
    }

    #[inline]
    pub fn shape(&self) -> &Polygon {
        &self.shape
    }

    #[inline]
    pub fn size(&self) -> f32 {
        asteroid_size(self.tier)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.pos, Vec2::splat(self.size() / 2.0))
    }

    pub fn update(&mut self, world: Vec2) {
        self.pos += self.vel;
        self.pos = wrap_position(self.pos, Vec2::splat(self.size() / 2.0), world.x, world.y);
    }

    /// Fragments left behind when this rock is shot.
    ///
    /// Tier 3 splits in two, tier 2 in three, tier 1 leaves nothing. Each
    /// fragment starts at the parent's position with its own drift and shape.
    pub fn break_apart(&self, rng: &mut impl Rng) -> Vec<Asteroid> {
        if self.tier <= ASTEROID_MIN_TIER {
            return Vec::new();
        }
        let count = if self.tier == 2 { 3 } else { 2 };
        (0..count)
            .map(|_| Asteroid::new(self.pos, self.tier - 1, rng))
            .collect()
    }
}

/// A shot fired from the ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub heading: f32,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, heading: f32) -> Self {
        Self {
            id,
            pos,
            vel: PROJECTILE_SPEED * heading_to_delta(heading),
            heading,
        }
    }

    pub fn shape() -> Polygon {
        Polygon::regular(PROJECTILE_RADIUS, PROJECTILE_SEGMENTS)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.pos, Vec2::splat(PROJECTILE_RADIUS))
    }

    /// Straight line, no wrap
    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    /// Projectiles never re-enter: once fully outside the world they are gone
    pub fn is_expired(&self, width: f32, height: f32) -> bool {
        self.bounds().is_outside(width, height)
    }
}

/// Serializable summary of a session (for logs and tests)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub seed: u64,
    pub ticks: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub asteroids: usize,
    pub projectiles: usize,
    pub ship: Ship,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    rng: Pcg32,
    /// Tier-1 rocks destroyed
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    /// Clock time (ms) of the hit that started the current respawn
    pub respawn_started_ms: u64,
    /// Clock time (ms) of the last accepted shot
    pub last_fire_ms: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ship: Ship,
    /// Live rocks (insertion order is iteration order)
    pub asteroids: Vec<Asteroid>,
    /// Live shots (insertion order is iteration order)
    pub projectiles: Vec<Projectile>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// New session with default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// New session from a balance table that has not been checked yet
    pub fn try_with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::with_tuning(seed, tuning))
    }

    /// New session: ship at the world center, tier-3 rocks scattered at random.
    ///
    /// `tuning` must already be valid (`Tuning::default()`, `Tuning::from_json`
    /// or `validate`); a non-positive world size panics while scattering.
    /// Use `try_with_tuning` for unchecked input.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            lives: tuning.starting_lives,
            phase: GamePhase::Playing,
            respawn_started_ms: 0,
            last_fire_ms: 0,
            time_ticks: 0,
            ship: Ship::spawn(tuning.world_center()),
            asteroids: Vec::with_capacity(tuning.starting_asteroids * 2),
            projectiles: Vec::new(),
            next_id: 1,
            tuning,
        };

        let world = state.tuning.world_size();
        for _ in 0..state.tuning.starting_asteroids {
            let pos = Vec2::new(
                state.rng.random_range(0.0..=world.x),
                state.rng.random_range(0.0..=world.y),
            );
            let asteroid = Asteroid::new(pos, ASTEROID_MAX_TIER, &mut state.rng);
            state.add_asteroid(asteroid);
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Insert a rock, giving it a fresh ID
    pub fn add_asteroid(&mut self, mut asteroid: Asteroid) -> u32 {
        asteroid.id = self.next_entity_id();
        let id = asteroid.id;
        self.asteroids.push(asteroid);
        id
    }

    /// Insert a rock of `tier` at `pos` drawn from the session RNG
    pub fn spawn_asteroid(&mut self, pos: Vec2, tier: u8) -> u32 {
        let asteroid = Asteroid::new(pos, tier, &mut self.rng);
        self.add_asteroid(asteroid)
    }

    /// Fire from the ship's center along its heading
    pub fn spawn_projectile(&mut self) -> u32 {
        let id = self.next_entity_id();
        self.projectiles
            .push(Projectile::new(id, self.ship.pos, self.ship.heading));
        id
    }

    /// Ship takes part in update, drawing and collisions only while playing
    #[inline]
    pub fn ship_active(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Clock time (ms) at which the ship comes back
    pub fn respawn_deadline_ms(&self) -> u64 {
        self.respawn_started_ms + self.tuning.respawn_ms
    }

    /// Whole seconds shown on the respawn countdown
    pub fn respawn_countdown(&self, now_ms: u64) -> u64 {
        let elapsed = now_ms.saturating_sub(self.respawn_started_ms);
        (self.tuning.respawn_ms / 1000).saturating_sub(elapsed / 1000)
    }

    /// Put a brand new ship at the world center
    pub fn reset_ship(&mut self) {
        self.ship = Ship::spawn(self.tuning.world_center());
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seed: self.seed,
            ticks: self.time_ticks,
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            asteroids: self.asteroids.len(),
            projectiles: self.projectiles.len(),
            ship: self.ship.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WORLD: Vec2 = Vec2::new(5000.0, 4000.0);

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_unchecked_tuning_is_rejected() {
        let tuning = Tuning {
            world_width: -5000.0,
            ..Tuning::default()
        };
        assert!(matches!(
            GameState::try_with_tuning(1, tuning),
            Err(TuningError::NonPositive {
                field: "world_width",
                ..
            })
        ));

        let state = GameState::try_with_tuning(1, Tuning::default()).unwrap();
        assert_eq!(state.asteroids.len(), 40);
    }

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.asteroids.len(), 40);
        assert!(state.asteroids.iter().all(|a| a.tier == 3));
        assert_eq!(state.ship.pos, Vec2::new(2500.0, 2000.0));
        assert_eq!(state.ship.vel, Vec2::ZERO);
        assert_eq!(state.ship.heading, 0.0);
    }

    #[test]
    fn test_asteroid_ids_unique() {
        let state = GameState::new(3);
        let mut ids: Vec<u32> = state.asteroids.iter().map(|a| a.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 40);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = GameState::new(99);
        let b = GameState::new(99);
        assert_eq!(a.asteroids, b.asteroids);
    }

    #[test]
    fn test_ship_rotation_steps() {
        let mut ship = Ship::spawn(Vec2::ZERO);
        ship.rotate(Turn::Right);
        assert_eq!(ship.heading, 3.0);
        ship.rotate(Turn::Left);
        ship.rotate(Turn::Left);
        assert_eq!(ship.heading, 357.0);
    }

    #[test]
    fn test_ship_accelerates_along_heading() {
        let mut ship = Ship::spawn(Vec2::new(100.0, 100.0));
        ship.accelerate();
        assert!(ship.vel.x.abs() < 1e-6);
        assert!((ship.vel.y + SHIP_ACCELERATION).abs() < 1e-6);
    }

    #[test]
    fn test_ship_friction_decays() {
        let mut ship = Ship::spawn(Vec2::new(100.0, 100.0));
        ship.vel = Vec2::new(2.0, 0.0);
        ship.update(WORLD);
        assert!((ship.vel.x - 1.98).abs() < 1e-6);
        assert!((ship.pos.x - 101.98).abs() < 1e-4);
    }

    #[test]
    fn test_ship_wraps_after_full_exit() {
        let mut ship = Ship::spawn(Vec2::new(5009.0, 100.0));
        ship.vel = Vec2::new(2.0, 0.0);
        ship.update(WORLD);
        // Left edge was at 5000.98 > 5000: right edge now sits on 0
        assert!((ship.bounds().max.x).abs() < 1e-3);
        assert!((ship.vel.x - 1.98).abs() < 1e-6, "velocity preserved");
    }

    #[test]
    fn test_asteroid_shape_within_bounds() {
        let mut rng = rng();
        for tier in 1..=3 {
            let a = Asteroid::new(Vec2::ZERO, tier, &mut rng);
            let half = asteroid_size(tier) / 2.0;
            assert_eq!(a.shape().points().len(), ASTEROID_VERTICES);
            for p in a.shape().points() {
                let r = p.length();
                assert!(r >= half - 10.0 - 1e-3 && r <= half + 1e-3, "tier {tier} r {r}");
            }
            assert!(a.shape().area().abs() > 0.0);
        }
    }

    #[test]
    fn test_asteroid_speed_scales_with_tier() {
        let mut rng = rng();
        for _ in 0..50 {
            let big = Asteroid::new(Vec2::ZERO, 3, &mut rng);
            assert!(big.vel.x.abs() <= 1.0 && big.vel.y.abs() <= 1.0);
            let small = Asteroid::new(Vec2::ZERO, 1, &mut rng);
            assert!(small.vel.x.abs() <= 3.0 && small.vel.y.abs() <= 3.0);
        }
    }

    #[test]
    fn test_break_apart_counts() {
        let mut rng = rng();
        let big = Asteroid::new(Vec2::new(300.0, 300.0), 3, &mut rng);
        let kids = big.break_apart(&mut rng);
        assert_eq!(kids.len(), 2);
        assert!(kids.iter().all(|k| k.tier == 2 && k.pos == big.pos));

        let mid = Asteroid::new(Vec2::new(10.0, 10.0), 2, &mut rng);
        let kids = mid.break_apart(&mut rng);
        assert_eq!(kids.len(), 3);
        assert!(kids.iter().all(|k| k.tier == 1));

        let small = Asteroid::new(Vec2::ZERO, 1, &mut rng);
        assert!(small.break_apart(&mut rng).is_empty());
    }

    #[test]
    fn test_projectile_flies_straight_and_expires() {
        let mut p = Projectile::new(1, Vec2::new(10.0, 10.0), 0.0);
        p.update();
        assert!((p.pos - Vec2::new(10.0, 0.0)).length() < 1e-5);
        // Straddling the top edge: still live
        assert!(!p.is_expired(5000.0, 4000.0));
        p.update();
        assert!(p.is_expired(5000.0, 4000.0));
    }

    #[test]
    fn test_respawn_countdown() {
        let mut state = GameState::new(1);
        state.respawn_started_ms = 10_000;
        assert_eq!(state.respawn_countdown(10_000), 3);
        assert_eq!(state.respawn_countdown(10_999), 3);
        assert_eq!(state.respawn_countdown(11_000), 2);
        assert_eq!(state.respawn_countdown(12_500), 1);
        assert_eq!(state.respawn_deadline_ms(), 13_000);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(5);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.asteroids, 40);
        assert_eq!(back.phase, GamePhase::Playing);
    }

    proptest! {
        #[test]
        fn prop_ship_speed_never_exceeds_max(moves in proptest::collection::vec(0u8..4, 1..400)) {
            let mut ship = Ship::spawn(WORLD / 2.0);
            for m in moves {
                match m {
                    0 => ship.rotate(Turn::Left),
                    1 => ship.rotate(Turn::Right),
                    2 => ship.accelerate(),
                    _ => {}
                }
                ship.update(WORLD);
                prop_assert!(ship.speed() <= SHIP_MAX_SPEED + 1e-4);
            }
        }

        #[test]
        fn prop_fragmentation_lowers_tier(seed in any::<u64>(), tier in 1u8..=3) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let parent = Asteroid::new(Vec2::ZERO, tier, &mut rng);
            for child in parent.break_apart(&mut rng) {
                prop_assert_eq!(child.tier, tier - 1);
                prop_assert!((1..=3).contains(&child.tier));
            }
        }
    }
}
