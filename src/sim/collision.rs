//! Collision detection
//!
//! Plain circle-circle overlap sampled once per step. Fast enemies can tunnel
//! through the player between steps; that is accepted.

use glam::Vec2;

use super::state::{Enemy, Player};

/// Circles overlap when their centres are closer than the radius sum minus
/// `forgiveness`. Touching exactly at the threshold is not a hit.
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32, forgiveness: f32) -> bool {
    a.distance(b) < a_radius + b_radius - forgiveness
}

/// Index of the first enemy (in list order) touching the player
pub fn first_collision(player: &Player, enemies: &[Enemy], forgiveness: f32) -> Option<usize> {
    enemies
        .iter()
        .position(|e| circles_overlap(player.pos, player.radius, e.pos, e.radius, forgiveness))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Hue;
    use crate::tuning::Tuning;

    fn enemy_at(x: f32, y: f32, radius: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius,
            hue: Hue::Cyan,
            life: 10.0,
        }
    }

    #[test]
    fn test_overlapping_enemy_hits() {
        let player = Player::new(&Tuning::default(), Vec2::new(100.0, 100.0));
        let enemies = [enemy_at(110.0, 100.0, 10.0)];
        assert_eq!(first_collision(&player, &enemies, 1.0), Some(0));
    }

    #[test]
    fn test_threshold_boundary() {
        let p = Vec2::new(100.0, 100.0);
        // threshold = 16 + 10 - 1 = 25
        assert!(circles_overlap(p, 16.0, Vec2::new(124.99, 100.0), 10.0, 1.0));
        assert!(!circles_overlap(p, 16.0, Vec2::new(125.0, 100.0), 10.0, 1.0));
        assert!(!circles_overlap(p, 16.0, Vec2::new(125.01, 100.0), 10.0, 1.0));
    }

    #[test]
    fn test_first_in_list_order() {
        let player = Player::new(&Tuning::default(), Vec2::new(100.0, 100.0));
        let enemies = [
            enemy_at(300.0, 300.0, 10.0),
            enemy_at(115.0, 100.0, 10.0),
            enemy_at(100.0, 100.0, 10.0),
        ];
        assert_eq!(first_collision(&player, &enemies, 1.0), Some(1));
    }

    #[test]
    fn test_no_enemies_no_hit() {
        let player = Player::new(&Tuning::default(), Vec2::new(100.0, 100.0));
        assert_eq!(first_collision(&player, &[], 1.0), None);
    }
}
