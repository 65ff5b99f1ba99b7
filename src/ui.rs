//! Overlay and HUD text
//!
//! The DOM glue only copies these strings; which overlay shows is decided by
//! the frame driver from game events.

use crate::sim::RunMode;

/// Centered message panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Hidden,
    /// Shown before the first run
    Title,
    Paused,
    GameOver { score: u64 },
    HowToPlay,
}

impl Overlay {
    pub fn is_visible(&self) -> bool {
        *self != Overlay::Hidden
    }

    pub fn title(&self) -> &'static str {
        match self {
            Overlay::Hidden => "",
            Overlay::Title => "Neon Dodge",
            Overlay::Paused => "Paused",
            Overlay::GameOver { .. } => "Game Over",
            Overlay::HowToPlay => "How to Play",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Overlay::Hidden => String::new(),
            Overlay::Title => {
                "Use WASD or Arrow Keys to move. Avoid everything. Survive to score!".to_string()
            }
            Overlay::Paused => {
                "Take a breath. Press P or click Resume to continue.".to_string()
            }
            Overlay::GameOver { score } => format!("Score: {}", score),
            Overlay::HowToPlay => {
                "Move to avoid the neon orbs. Survive as long as possible to increase your score!"
                    .to_string()
            }
        }
    }
}

/// Label for the pause/resume button
pub fn pause_label(mode: RunMode) -> &'static str {
    match mode {
        RunMode::Paused => "Resume",
        _ => "Pause",
    }
}
