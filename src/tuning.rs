//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors from loading a tuning document
#[derive(Debug)]
pub enum TuningError {
    /// The document was not valid JSON for [`Tuning`]
    Parse(serde_json::Error),
    /// A field is outside its allowed range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TuningError::Parse(err) => write!(f, "tuning is not valid JSON: {}", err),
            TuningError::Invalid { field, reason } => {
                write!(f, "tuning field `{}` {}", field, reason)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Clock ===
    pub max_dt: f32,

    // === Player ===
    pub player_radius: f32,
    pub player_accel: f32,
    pub player_max_speed: f32,
    pub player_friction: f32,
    pub input_deadzone: f32,

    // === Spawner ===
    pub spawn_base_interval: f32,
    pub spawn_min_interval: f32,
    pub spawn_ramp_rate: f32,
    pub spawn_smoothing: f32,

    // === Enemies ===
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,
    pub enemy_speed_ramp: f32,
    pub enemy_speed_bonus_cap: f32,
    pub enemy_min_radius: f32,
    pub enemy_max_radius: f32,
    pub enemy_lifetime: f32,
    pub enemy_spawn_offset: f32,
    pub enemy_cull_margin: f32,
    pub enemy_aim_near_skip: f32,

    // === Scoring ===
    pub collision_forgiveness: f32,
    pub score_rate: f32,

    // === Input ===
    pub joystick_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_dt: MAX_DT,

            player_radius: PLAYER_RADIUS,
            player_accel: PLAYER_ACCEL,
            player_max_speed: PLAYER_MAX_SPEED,
            player_friction: PLAYER_FRICTION,
            input_deadzone: INPUT_DEADZONE,

            spawn_base_interval: SPAWN_BASE_INTERVAL,
            spawn_min_interval: SPAWN_MIN_INTERVAL,
            spawn_ramp_rate: SPAWN_RAMP_RATE,
            spawn_smoothing: SPAWN_SMOOTHING,

            enemy_min_speed: ENEMY_MIN_SPEED,
            enemy_max_speed: ENEMY_MAX_SPEED,
            enemy_speed_ramp: ENEMY_SPEED_RAMP,
            enemy_speed_bonus_cap: ENEMY_SPEED_BONUS_CAP,
            enemy_min_radius: ENEMY_MIN_RADIUS,
            enemy_max_radius: ENEMY_MAX_RADIUS,
            enemy_lifetime: ENEMY_LIFETIME,
            enemy_spawn_offset: ENEMY_SPAWN_OFFSET,
            enemy_cull_margin: ENEMY_CULL_MARGIN,
            enemy_aim_near_skip: ENEMY_AIM_NEAR_SKIP,

            collision_forgiveness: COLLISION_FORGIVENESS,
            score_rate: SCORE_RATE,

            joystick_radius: JOYSTICK_RADIUS,
        }
    }
}

impl Tuning {
    /// Parse a JSON document (missing fields keep their defaults) and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every field is inside the range the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("max_dt", self.max_dt)?;
        positive("player_radius", self.player_radius)?;
        positive("player_accel", self.player_accel)?;
        positive("player_max_speed", self.player_max_speed)?;
        unit_closed("player_friction", self.player_friction)?;
        non_negative("input_deadzone", self.input_deadzone)?;

        positive("spawn_base_interval", self.spawn_base_interval)?;
        positive("spawn_min_interval", self.spawn_min_interval)?;
        if self.spawn_min_interval > self.spawn_base_interval {
            return Err(TuningError::Invalid {
                field: "spawn_min_interval",
                reason: "must not exceed spawn_base_interval",
            });
        }
        non_negative("spawn_ramp_rate", self.spawn_ramp_rate)?;
        if !(self.spawn_smoothing > 0.0 && self.spawn_smoothing <= 1.0) {
            return Err(TuningError::Invalid {
                field: "spawn_smoothing",
                reason: "must be in (0, 1]",
            });
        }

        positive("enemy_min_speed", self.enemy_min_speed)?;
        ordered("enemy_max_speed", self.enemy_min_speed, self.enemy_max_speed)?;
        non_negative("enemy_speed_ramp", self.enemy_speed_ramp)?;
        non_negative("enemy_speed_bonus_cap", self.enemy_speed_bonus_cap)?;
        positive("enemy_min_radius", self.enemy_min_radius)?;
        ordered("enemy_max_radius", self.enemy_min_radius, self.enemy_max_radius)?;
        positive("enemy_lifetime", self.enemy_lifetime)?;
        non_negative("enemy_spawn_offset", self.enemy_spawn_offset)?;
        if self.enemy_cull_margin < self.enemy_spawn_offset {
            return Err(TuningError::Invalid {
                field: "enemy_cull_margin",
                reason: "must be at least enemy_spawn_offset",
            });
        }
        if !(0.0..1.0).contains(&self.enemy_aim_near_skip) {
            return Err(TuningError::Invalid {
                field: "enemy_aim_near_skip",
                reason: "must be in [0, 1)",
            });
        }

        non_negative("collision_forgiveness", self.collision_forgiveness)?;
        positive("score_rate", self.score_rate)?;
        positive("joystick_radius", self.joystick_radius)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be a positive number",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be zero or positive",
        })
    }
}

fn unit_closed(field: &'static str, value: f32) -> Result<(), TuningError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be in [0, 1]",
        })
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), TuningError> {
    if max >= min && max.is_finite() {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must not be below its minimum",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_max_speed": 500.0 }"#).unwrap();
        assert_eq!(tuning.player_max_speed, 500.0);
        assert_eq!(tuning.player_accel, PLAYER_ACCEL);
        assert_eq!(tuning.spawn_base_interval, SPAWN_BASE_INTERVAL);
    }

    #[test]
    fn test_rejects_min_interval_above_base() {
        let err = Tuning::from_json(r#"{ "spawn_min_interval": 2.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "spawn_min_interval",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_friction() {
        let err = Tuning::from_json(r#"{ "player_friction": 1.5 }"#).unwrap_err();
        assert!(err.to_string().contains("player_friction"));
    }

    #[test]
    fn test_parse_error_has_source() {
        use std::error::Error;

        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.source().is_some());
    }
}
