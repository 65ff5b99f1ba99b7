//! Read-only frame data for painters
//!
//! Captured from the simulation once per frame. Painters never write back.

use glam::Vec2;

use crate::lerp;
use crate::sim::{GameState, Joystick, RunMode};

/// Player gradient start colour
pub const PLAYER_COLOR_A: &str = "#00e5ff";
/// Player gradient end colour
pub const PLAYER_COLOR_B: &str = "#ff00e5";
/// Radius of the white core drawn over the player
pub const PLAYER_CORE_RADIUS: f32 = 4.0;
/// Background grid cell size
pub const GRID_SPACING: f32 = 40.0;
/// Background grid scroll speed (units/s)
pub const GRID_SCROLL: Vec2 = Vec2::new(30.0, 18.0);

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    /// Glow blur radius; pulses with time
    pub glow: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyView {
    pub pos: Vec2,
    pub radius: f32,
    /// HSL hue angle in degrees
    pub hue: u16,
}

/// Everything a painter needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub width: f32,
    pub height: f32,
    /// Seconds survived (drives pulsing and grid scroll)
    pub time: f32,
    /// First grid line offset on each axis
    pub grid_offset: Vec2,
    /// `None` before the first run
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    /// Joystick knob displacement in pixels
    pub joystick_knob: Vec2,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, joystick: &Joystick) -> Self {
        let player = (state.mode != RunMode::Init).then(|| PlayerView {
            pos: state.player.pos,
            radius: state.player.radius,
            glow: glow_radius(state.time),
        });

        Self {
            width: state.arena.width,
            height: state.arena.height,
            time: state.time,
            grid_offset: grid_offset(state.time),
            player,
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    pos: e.pos,
                    radius: e.radius,
                    hue: e.hue.degrees(),
                })
                .collect(),
            joystick_knob: joystick.knob_offset(),
        }
    }
}

/// Player glow radius, oscillating between 8 and 20
pub fn glow_radius(time: f32) -> f32 {
    let t = ((time * 6.0).sin() + 1.0) * 0.5;
    lerp(8.0, 20.0, t)
}

/// Offset of the first grid line, scrolling up-left over time
pub fn grid_offset(time: f32) -> Vec2 {
    Vec2::new(
        -(time * GRID_SCROLL.x) % GRID_SPACING,
        -(time * GRID_SCROLL.y) % GRID_SPACING,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Arena, Command, Enemy, Hue, apply_command};
    use crate::tuning::Tuning;

    #[test]
    fn test_glow_range() {
        for i in 0..200 {
            let g = glow_radius(i as f32 * 0.05);
            assert!((8.0..=20.0).contains(&g));
        }
        assert!((glow_radius(0.0) - 14.0).abs() < 1e-4);
    }

    #[test]
    fn test_grid_offset_wraps() {
        let off = grid_offset(2.0);
        // 60 % 40 = 20, 36 % 40 = 36
        assert!((off.x + 20.0).abs() < 1e-4);
        assert!((off.y + 36.0).abs() < 1e-4);
        assert!(off.x > -GRID_SPACING && off.x <= 0.0);
    }

    #[test]
    fn test_capture() {
        let mut state = GameState::new(1, Arena::new(640.0, 360.0), Tuning::default());
        let stick = Joystick::new(45.0);

        let idle = RenderSnapshot::capture(&state, &stick);
        assert!(idle.player.is_none());

        apply_command(&mut state, Command::Start);
        state.enemies.push(Enemy {
            pos: Vec2::new(5.0, 6.0),
            vel: Vec2::ZERO,
            radius: 12.0,
            hue: Hue::Magenta,
            life: 3.0,
        });
        let frame = RenderSnapshot::capture(&state, &stick);
        assert_eq!(frame.width, 640.0);
        assert_eq!(frame.player.map(|p| p.pos), Some(Vec2::new(320.0, 180.0)));
        assert_eq!(frame.enemies.len(), 1);
        assert_eq!(frame.enemies[0].hue, 305);
    }
}
