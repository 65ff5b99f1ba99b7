//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One step per display frame, delta clamped by the clock
//! - Seeded RNG only
//! - Input read once per step from a stable snapshot

pub mod clock;
pub mod collision;
pub mod input;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::{FrameClock, frame_delta};
pub use collision::{circles_overlap, first_collision};
pub use input::{InputEvent, InputQueue, InputState, Joystick, Key, KeyboardState};
pub use spawner::{Edge, Spawner};
pub use state::{Arena, Enemy, GameEvent, GameState, Hue, Player, RunMode};
pub use tick::{Command, apply_command, tick};
