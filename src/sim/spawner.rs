//! Enemy spawning and difficulty ramp
//!
//! The spawn interval eases toward a target that shrinks with survival time.
//! The easing closes a fixed fraction of the gap per step (not per second), so
//! the ramp feels slightly different at other frame rates.

use glam::Vec2;
use rand::Rng;

use super::state::{Arena, Enemy, Hue};
use crate::lerp;
use crate::tuning::Tuning;

/// Arena side an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Direction pointing from this edge into the arena
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(0.0, 1.0),
            Edge::Right => Vec2::new(-1.0, 0.0),
            Edge::Bottom => Vec2::new(0.0, -1.0),
            Edge::Left => Vec2::new(1.0, 0.0),
        }
    }
}

/// Spawn timer state
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    /// Seconds accumulated since the last spawn
    pub timer: f32,
    /// Current spawn interval (seconds)
    pub interval: f32,
    base_interval: f32,
    min_interval: f32,
    ramp_rate: f32,
    smoothing: f32,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            timer: 0.0,
            interval: tuning.spawn_base_interval,
            base_interval: tuning.spawn_base_interval,
            min_interval: tuning.spawn_min_interval,
            ramp_rate: tuning.spawn_ramp_rate,
            smoothing: tuning.spawn_smoothing,
        }
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.interval = self.base_interval;
    }

    pub fn min_interval(&self) -> f32 {
        self.min_interval
    }

    pub fn base_interval(&self) -> f32 {
        self.base_interval
    }

    /// Interval the spawner is easing toward after `elapsed` seconds
    pub fn target_interval(&self, elapsed: f32) -> f32 {
        (self.base_interval - elapsed * self.ramp_rate)
            .max(self.min_interval)
            .min(self.base_interval)
    }

    /// Advance the timer and ease the interval. Returns how many enemies are due.
    pub fn update(&mut self, elapsed: f32, dt: f32) -> u32 {
        self.timer += dt;

        let target = self.target_interval(elapsed);
        self.interval = lerp(self.interval, target, self.smoothing)
            .max(self.min_interval)
            .min(self.base_interval);

        let mut due = 0;
        while self.timer >= self.interval {
            self.timer -= self.interval;
            due += 1;
        }
        due
    }
}

/// Build one enemy just outside a random edge, aimed into the arena.
///
/// The aim point skips the part of the arena nearest the spawn edge, so every
/// enemy crosses toward the far side.
pub fn spawn_enemy<R: Rng>(rng: &mut R, arena: &Arena, elapsed: f32, tuning: &Tuning) -> Enemy {
    let (w, h) = (arena.width, arena.height);
    let off = tuning.enemy_spawn_offset;
    let skip = tuning.enemy_aim_near_skip;

    let radius = rng.random_range(tuning.enemy_min_radius..=tuning.enemy_max_radius);
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let speed = rng.random_range(tuning.enemy_min_speed..=tuning.enemy_max_speed)
        + (elapsed * tuning.enemy_speed_ramp).min(tuning.enemy_speed_bonus_cap);

    let (pos, target) = match edge {
        Edge::Top => (
            Vec2::new(rng.random_range(-off..=w + off), -off),
            Vec2::new(rng.random_range(0.0..=w), rng.random_range(h * skip..=h)),
        ),
        Edge::Right => (
            Vec2::new(w + off, rng.random_range(-off..=h + off)),
            Vec2::new(rng.random_range(0.0..=w * (1.0 - skip)), rng.random_range(0.0..=h)),
        ),
        Edge::Bottom => (
            Vec2::new(rng.random_range(-off..=w + off), h + off),
            Vec2::new(rng.random_range(0.0..=w), rng.random_range(0.0..=h * (1.0 - skip))),
        ),
        Edge::Left => (
            Vec2::new(-off, rng.random_range(-off..=h + off)),
            Vec2::new(rng.random_range(w * skip..=w), rng.random_range(0.0..=h)),
        ),
    };

    let hue = if rng.random_bool(0.5) {
        Hue::Cyan
    } else {
        Hue::Magenta
    };

    Enemy {
        pos,
        vel: (target - pos).normalize_or_zero() * speed,
        radius,
        hue,
        life: tuning.enemy_lifetime,
    }
}
