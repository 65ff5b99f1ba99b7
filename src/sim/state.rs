//! Game state and core simulation types
//!
//! [`GameState`] is the owned simulation context: one player, the live
//! enemies, the spawner and the run bookkeeping. Only the step mutates it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawner::{Spawner, spawn_enemy};
use crate::consts::{MIN_ARENA_HEIGHT, MIN_ARENA_WIDTH};
use crate::tuning::Tuning;

/// Current run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Nothing started yet, arena empty
    Init,
    /// Active gameplay
    Running,
    /// Frozen, state retained
    Paused,
    /// Run ended; waits for start/reset
    GameOver,
}

/// Notable transitions reported by the step and by commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A fresh run began (start or reset)
    Started,
    Paused,
    Resumed,
    /// The player was hit
    GameOver { score: u64, time: f32 },
}

/// Logical playfield, in CSS-pixel-like units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size from a host container, floored to whole units with a 320x180 minimum
    pub fn from_container(width: f32, height: f32) -> Self {
        Self {
            width: width.floor().max(MIN_ARENA_WIDTH),
            height: height.floor().max(MIN_ARENA_HEIGHT),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Keep a circle of `radius` fully inside the arena
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            pos.x.min(self.width - radius).max(radius),
            pos.y.min(self.height - radius).max(radius),
        )
    }

    /// True once `pos` lies more than `margin` outside any side
    pub fn is_far_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.width + margin
            || pos.y < -margin
            || pos.y > self.height + margin
    }
}

/// The player's orb
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Acceleration at full intent (units/s²)
    pub accel: f32,
    pub max_speed: f32,
    /// Per-step velocity multiplier applied while idle
    pub friction: f32,
    /// Intent magnitude below which the player counts as idle
    pub deadzone: f32,
}

impl Player {
    pub fn new(tuning: &Tuning, pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: tuning.player_radius,
            accel: tuning.player_accel,
            max_speed: tuning.player_max_speed,
            friction: tuning.player_friction,
            deadzone: tuning.input_deadzone,
        }
    }

    /// Advance one step from an intent vector (magnitude <= 1).
    ///
    /// Friction is a flat per-call multiply, so idle deceleration depends on
    /// frame rate. Walls stop the position but leave velocity untouched.
    pub fn integrate(&mut self, intent: Vec2, dt: f32, arena: &Arena) {
        self.vel += intent * self.accel * dt;

        let speed = self.vel.length();
        if speed > self.max_speed {
            self.vel *= self.max_speed / speed;
        }

        self.pos += self.vel * dt;

        if intent.length() < self.deadzone {
            self.vel *= self.friction;
        }

        self.pos = arena.clamp_circle(self.pos, self.radius);
    }
}

/// Cosmetic enemy tint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hue {
    Cyan,
    Magenta,
}

impl Hue {
    /// HSL hue angle in degrees
    pub fn degrees(self) -> u16 {
        match self {
            Hue::Cyan => 185,
            Hue::Magenta => 305,
        }
    }
}

/// A drifting enemy orb
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hue: Hue,
    /// Seconds left before expiry
    pub life: f32,
}

impl Enemy {
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.life -= dt;
    }

    /// Expired or drifted past the cull margin
    pub fn is_gone(&self, arena: &Arena, margin: f32) -> bool {
        self.life <= 0.0 || arena.is_far_outside(self.pos, margin)
    }
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub arena: Arena,
    pub mode: RunMode,
    /// Seconds survived this run
    pub time: f32,
    pub score: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub spawner: Spawner,
}

impl GameState {
    /// Create a state in [`RunMode::Init`]
    pub fn new(seed: u64, arena: Arena, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning, arena.center()),
            spawner: Spawner::new(&tuning),
            tuning,
            arena,
            mode: RunMode::Init,
            time: 0.0,
            score: 0,
            enemies: Vec::new(),
        }
    }

    /// Zero the run: player to centre, no enemies, clock/score/spawner reset.
    /// The mode is left to the caller.
    pub fn reset(&mut self) {
        self.player = Player::new(&self.tuning, self.arena.center());
        self.enemies.clear();
        self.time = 0.0;
        self.score = 0;
        self.spawner.reset();
    }

    /// Adopt a new container size. Takes effect on the next step.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena = Arena::from_container(width, height);
        log::debug!("Arena resized to {}x{}", self.arena.width, self.arena.height);
    }

    /// Create one enemy for the current elapsed time
    pub fn spawn_enemy(&mut self) {
        let enemy = spawn_enemy(&mut self.rng, &self.arena, self.time, &self.tuning);
        log::debug!(
            "Spawned enemy at ({:.0}, {:.0}) r={:.1} speed={:.0}",
            enemy.pos.x,
            enemy.pos.y,
            enemy.radius,
            enemy.vel.length()
        );
        self.enemies.push(enemy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arena() -> Arena {
        Arena::new(800.0, 600.0)
    }

    #[test]
    fn test_arena_floor_and_minimum() {
        let a = Arena::from_container(1024.7, 700.2);
        assert_eq!(a, Arena::new(1024.0, 700.0));
        let small = Arena::from_container(100.0, 50.0);
        assert_eq!(small, Arena::new(320.0, 180.0));
    }

    #[test]
    fn test_player_accelerates_with_intent() {
        let mut p = Player::new(&Tuning::default(), Vec2::new(400.0, 300.0));
        p.integrate(Vec2::new(1.0, 0.0), 0.1, &arena());
        // 900 * 0.1 = 90 units/s, then 9 units moved, no friction
        assert!((p.vel.x - 90.0).abs() < 1e-4);
        assert!((p.pos.x - 409.0).abs() < 1e-4);
    }

    #[test]
    fn test_player_speed_capped() {
        let mut p = Player::new(&Tuning::default(), Vec2::new(400.0, 300.0));
        p.vel = Vec2::new(370.0, 0.0);
        p.integrate(Vec2::new(0.6, 0.8), 0.1, &arena());
        assert!((p.vel.length() - p.max_speed).abs() < 1e-3);
    }

    #[test]
    fn test_friction_applied_once_when_idle() {
        let mut p = Player::new(&Tuning::default(), Vec2::new(400.0, 300.0));
        p.vel = Vec2::new(100.0, -50.0);
        p.integrate(Vec2::new(0.04, 0.0), 0.0, &arena());
        let expected = Vec2::new(100.0 + 0.0, -50.0) * 0.9;
        assert!((p.vel - expected).length() < 1e-4);
    }

    #[test]
    fn test_no_friction_with_input() {
        let mut p = Player::new(&Tuning::default(), Vec2::new(400.0, 300.0));
        p.vel = Vec2::new(100.0, 0.0);
        p.integrate(Vec2::new(0.05, 0.0), 0.0, &arena());
        assert_eq!(p.vel, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_wall_stops_position_not_velocity() {
        let mut p = Player::new(&Tuning::default(), Vec2::new(790.0, 300.0));
        p.vel = Vec2::new(300.0, 0.0);
        p.integrate(Vec2::new(1.0, 0.0), 0.1, &arena());
        assert_eq!(p.pos.x, 800.0 - p.radius);
        assert!(p.vel.x > 0.0);
    }

    #[test]
    fn test_enemy_expiry_and_cull() {
        let a = arena();
        let mut e = Enemy {
            pos: Vec2::new(-70.0, 100.0),
            vel: Vec2::new(-200.0, 0.0),
            radius: 12.0,
            hue: Hue::Cyan,
            life: 10.0,
        };
        assert!(!e.is_gone(&a, 80.0));
        e.advance(0.1);
        assert!(e.is_gone(&a, 80.0));

        let mut old = Enemy {
            pos: Vec2::new(400.0, 300.0),
            vel: Vec2::ZERO,
            radius: 12.0,
            hue: Hue::Magenta,
            life: 0.01,
        };
        old.advance(0.02);
        assert!(old.is_gone(&a, 80.0));
    }

    #[test]
    fn test_reset_recenters_player() {
        let mut state = GameState::new(1, arena(), Tuning::default());
        state.player.pos = Vec2::new(20.0, 20.0);
        state.player.vel = Vec2::new(5.0, 5.0);
        state.score = 99;
        state.time = 3.0;
        state.spawn_enemy();
        state.reset();
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.time, 0.0);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            start_x in 16.0f32..784.0,
            start_y in 16.0f32..584.0,
            intents in proptest::collection::vec((-1.0f32..1.0, -1.0f32..1.0), 1..120),
            dt in 0.001f32..0.034,
        ) {
            let a = arena();
            let mut p = Player::new(&Tuning::default(), Vec2::new(start_x, start_y));
            for (ix, iy) in intents {
                let intent = crate::limit_to_unit(Vec2::new(ix, iy));
                p.integrate(intent, dt, &a);
                prop_assert!(p.pos.x >= p.radius && p.pos.x <= a.width - p.radius);
                prop_assert!(p.pos.y >= p.radius && p.pos.y <= a.height - p.radius);
            }
        }
    }
}
