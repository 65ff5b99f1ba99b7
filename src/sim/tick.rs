//! Simulation step
//!
//! One call per display frame while running:
//! time → spawner → intent → player → enemies → collision → score.

use super::collision::first_collision;
use super::input::InputState;
use super::state::{GameEvent, GameState, RunMode};

/// Commands exposed to buttons and hotkeys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin a fresh run (ignored while already running)
    Start,
    /// Running <-> Paused
    TogglePause,
    /// Begin a fresh run from any mode
    Reset,
    /// Show the how-to-play overlay; no effect on the simulation
    ShowInfo,
}

impl Command {
    /// Map a DOM `KeyboardEvent.key` value to a hotkey command
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "p" | "P" => Some(Command::TogglePause),
            "r" | "R" => Some(Command::Reset),
            _ => None,
        }
    }
}

/// Apply a run-state command. Returns the resulting transition, if any.
pub fn apply_command(state: &mut GameState, command: Command) -> Option<GameEvent> {
    match (command, state.mode) {
        (Command::Start, RunMode::Running) => None,
        (Command::Start, _) | (Command::Reset, _) => {
            state.reset();
            state.mode = RunMode::Running;
            log::info!("Run started (seed {})", state.seed);
            Some(GameEvent::Started)
        }
        (Command::TogglePause, RunMode::Running) => {
            state.mode = RunMode::Paused;
            log::info!("Paused at {:.1}s", state.time);
            Some(GameEvent::Paused)
        }
        (Command::TogglePause, RunMode::Paused) => {
            state.mode = RunMode::Running;
            log::info!("Resumed");
            Some(GameEvent::Resumed)
        }
        (Command::TogglePause, _) | (Command::ShowInfo, _) => None,
    }
}

/// Points earned by one step: whole 60 Hz frames covered by `dt`, at least one
#[inline]
pub fn score_for_step(dt: f32, rate: f32) -> u64 {
    ((dt * rate).floor() as u64).max(1)
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &InputState, dt: f32) -> Option<GameEvent> {
    // Frozen unless running
    if state.mode != RunMode::Running {
        return None;
    }

    state.time += dt;

    // Difficulty ramp and spawns
    let due = state.spawner.update(state.time, dt);
    for _ in 0..due {
        state.spawn_enemy();
    }

    let intent = input.intent();
    let arena = state.arena;
    state.player.integrate(intent, dt, &arena);

    // Move enemies, dropping the expired and the far off-screen in one pass
    let margin = state.tuning.enemy_cull_margin;
    state.enemies.retain_mut(|e| {
        e.advance(dt);
        !e.is_gone(&arena, margin)
    });

    if first_collision(&state.player, &state.enemies, state.tuning.collision_forgiveness).is_some()
    {
        state.mode = RunMode::GameOver;
        log::info!(
            "Game over: score {} after {:.1}s",
            state.score,
            state.time
        );
        return Some(GameEvent::GameOver {
            score: state.score,
            time: state.time,
        });
    }

    state.score += score_for_step(dt, state.tuning.score_rate);
    None
}
