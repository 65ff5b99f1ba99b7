//! Neon Dodge - A single-screen arcade dodger
//!
//! Core modules:
//! - `sim`: Simulation (clock, input, player, spawner, collisions, run state)
//! - `game`: Frame driver tying the simulation to input, storage and overlays
//! - `renderer`: Render snapshots and the Canvas 2D painter
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `tuning`: Data-driven game balance

pub mod best_score;
pub mod game;
pub mod persistence;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use best_score::BestScore;
pub use game::Game;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest delta-time a single simulation step may consume
    pub const MAX_DT: f32 = 1.0 / 30.0;
    /// Delta used for the very first frame (no previous timestamp yet)
    pub const FIRST_FRAME_DT: f32 = 1.0 / 60.0;

    /// Minimum logical arena size
    pub const MIN_ARENA_WIDTH: f32 = 320.0;
    pub const MIN_ARENA_HEIGHT: f32 = 180.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 16.0;
    /// Acceleration from full intent (units/s²)
    pub const PLAYER_ACCEL: f32 = 900.0;
    pub const PLAYER_MAX_SPEED: f32 = 380.0;
    /// Per-step velocity multiplier when there is no input
    pub const PLAYER_FRICTION: f32 = 0.9;
    /// Intent magnitude below which the player counts as idle
    pub const INPUT_DEADZONE: f32 = 0.05;

    /// Spawner defaults
    pub const SPAWN_BASE_INTERVAL: f32 = 0.9;
    pub const SPAWN_MIN_INTERVAL: f32 = 0.25;
    /// Seconds shaved off the target interval per second survived
    pub const SPAWN_RAMP_RATE: f32 = 0.03;
    /// Fraction of the gap to the target interval closed each step
    pub const SPAWN_SMOOTHING: f32 = 0.02;

    /// Enemy defaults
    pub const ENEMY_MIN_SPEED: f32 = 120.0;
    pub const ENEMY_MAX_SPEED: f32 = 240.0;
    /// Extra speed per second survived, capped at `ENEMY_SPEED_BONUS_CAP`
    pub const ENEMY_SPEED_RAMP: f32 = 6.0;
    pub const ENEMY_SPEED_BONUS_CAP: f32 = 200.0;
    pub const ENEMY_MIN_RADIUS: f32 = 10.0;
    pub const ENEMY_MAX_RADIUS: f32 = 22.0;
    pub const ENEMY_LIFETIME: f32 = 10.0;
    /// How far outside the arena enemies appear
    pub const ENEMY_SPAWN_OFFSET: f32 = 30.0;
    /// How far outside the arena enemies may drift before being culled
    pub const ENEMY_CULL_MARGIN: f32 = 80.0;
    /// Share of the arena (nearest the spawn edge) never used as an aim point
    pub const ENEMY_AIM_NEAR_SKIP: f32 = 0.3;

    /// Overlap forgiveness subtracted from the radius sum
    pub const COLLISION_FORGIVENESS: f32 = 1.0;
    /// Score reference rate (points per simulated second)
    pub const SCORE_RATE: f32 = 60.0;

    /// Virtual joystick travel in pixels
    pub const JOYSTICK_RADIUS: f32 = 45.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Rescale `v` so its length is at most 1, keeping its direction
#[inline]
pub fn limit_to_unit(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > 1.0 { v / len } else { v }
}
