//! Global gameplay tuning settings (decoupled from UI)

use bevy::log::{info, warn};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Path to global gameplay tuning config
pub const GAMEPLAY_TUNING_FILE: &str = "config/gameplay_tuning.json";

/// How shot power maps to launch velocity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotModel {
    /// Pick a flight time from power, back-solve the launch so the ball
    /// reaches the rim center after exactly that many ticks
    #[default]
    FlightTime,
    /// Scale fixed horizontal/vertical speeds by power
    Linear,
}

// Serde default functions so partial config files stay valid
fn default_gravity() -> f32 {
    GRAVITY
}
fn default_ball_radius() -> f32 {
    BALL_RADIUS
}
fn default_floor_restitution() -> f32 {
    FLOOR_RESTITUTION
}
fn default_floor_friction() -> f32 {
    FLOOR_FRICTION
}
fn default_stop_speed() -> f32 {
    STOP_SPEED
}
fn default_wall_damping() -> f32 {
    WALL_DAMPING
}
fn default_backboard_damping() -> f32 {
    BACKBOARD_DAMPING
}
fn default_rim_damping() -> f32 {
    RIM_DAMPING
}
fn default_max_flight_secs() -> f32 {
    MAX_FLIGHT_SECS
}
fn default_move_step() -> f32 {
    BALL_MOVE_STEP
}
fn default_flight_time_slow() -> f32 {
    SHOT_FLIGHT_TIME_SLOW
}
fn default_flight_time_fast() -> f32 {
    SHOT_FLIGHT_TIME_FAST
}
fn default_linear_horizontal() -> f32 {
    SHOT_LINEAR_HORIZONTAL
}
fn default_linear_vertical() -> f32 {
    SHOT_LINEAR_VERTICAL
}
fn default_made_radius() -> f32 {
    MADE_SHOT_RADIUS
}
fn default_made_height_tolerance() -> f32 {
    MADE_HEIGHT_TOLERANCE
}
fn default_made_max_horizontal_speed() -> f32 {
    MADE_MAX_HORIZONTAL_SPEED
}

/// Serializable tuning values stored in config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameplayTuning {
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    #[serde(default = "default_ball_radius")]
    pub ball_radius: f32,
    #[serde(default = "default_floor_restitution")]
    pub floor_restitution: f32,
    #[serde(default = "default_floor_friction")]
    pub floor_friction: f32,
    #[serde(default = "default_stop_speed")]
    pub stop_speed: f32,
    #[serde(default = "default_wall_damping")]
    pub wall_damping: f32,
    #[serde(default = "default_backboard_damping")]
    pub backboard_damping: f32,
    #[serde(default = "default_rim_damping")]
    pub rim_damping: f32,
    #[serde(default = "default_max_flight_secs")]
    pub max_flight_secs: f32,
    #[serde(default = "default_move_step")]
    pub move_step: f32,
    // Shot release
    #[serde(default)]
    pub shot_model: ShotModel,
    #[serde(default = "default_flight_time_slow")]
    pub flight_time_slow: f32,
    #[serde(default = "default_flight_time_fast")]
    pub flight_time_fast: f32,
    #[serde(default = "default_linear_horizontal")]
    pub linear_horizontal_speed: f32,
    #[serde(default = "default_linear_vertical")]
    pub linear_vertical_speed: f32,
    // Classification
    #[serde(default = "default_made_radius")]
    pub made_radius: f32,
    #[serde(default = "default_made_height_tolerance")]
    pub made_height_tolerance: f32,
    #[serde(default = "default_made_max_horizontal_speed")]
    pub made_max_horizontal_speed: f32,
}

impl Default for GameplayTuning {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            ball_radius: default_ball_radius(),
            floor_restitution: default_floor_restitution(),
            floor_friction: default_floor_friction(),
            stop_speed: default_stop_speed(),
            wall_damping: default_wall_damping(),
            backboard_damping: default_backboard_damping(),
            rim_damping: default_rim_damping(),
            max_flight_secs: default_max_flight_secs(),
            move_step: default_move_step(),
            shot_model: ShotModel::default(),
            flight_time_slow: default_flight_time_slow(),
            flight_time_fast: default_flight_time_fast(),
            linear_horizontal_speed: default_linear_horizontal(),
            linear_vertical_speed: default_linear_vertical(),
            made_radius: default_made_radius(),
            made_height_tolerance: default_made_height_tolerance(),
            made_max_horizontal_speed: default_made_max_horizontal_speed(),
        }
    }
}

/// Replace a value that fails `valid` with its default, recording the field name
fn fix(name: &str, value: f32, default: f32, valid: bool, fixed: &mut Vec<String>) -> f32 {
    if value.is_finite() && valid {
        value
    } else {
        fixed.push(format!("{} ({} -> {})", name, value, default));
        default
    }
}

impl GameplayTuning {
    /// Return a copy with every non-finite or out-of-range value replaced by
    /// its default, plus a description of each replacement.
    pub fn sanitized(&self) -> (Self, Vec<String>) {
        let d = Self::default();
        let mut fixed = Vec::new();
        let unit = |v: f32| (0.0..=1.0).contains(&v);

        let flight_time_slow = fix(
            "flight_time_slow",
            self.flight_time_slow,
            d.flight_time_slow,
            self.flight_time_slow > 0.0,
            &mut fixed,
        );
        let flight_time_fast = fix(
            "flight_time_fast",
            self.flight_time_fast,
            d.flight_time_fast,
            self.flight_time_fast > 0.0 && self.flight_time_fast <= flight_time_slow,
            &mut fixed,
        )
        .min(flight_time_slow);

        let tuning = Self {
            gravity: fix("gravity", self.gravity, d.gravity, self.gravity < 0.0, &mut fixed),
            ball_radius: fix(
                "ball_radius",
                self.ball_radius,
                d.ball_radius,
                self.ball_radius > 0.0 && self.ball_radius < COURT_HALF_WIDTH,
                &mut fixed,
            ),
            floor_restitution: fix(
                "floor_restitution",
                self.floor_restitution,
                d.floor_restitution,
                unit(self.floor_restitution),
                &mut fixed,
            ),
            floor_friction: fix(
                "floor_friction",
                self.floor_friction,
                d.floor_friction,
                unit(self.floor_friction),
                &mut fixed,
            ),
            stop_speed: fix(
                "stop_speed",
                self.stop_speed,
                d.stop_speed,
                self.stop_speed >= 0.0,
                &mut fixed,
            ),
            wall_damping: fix(
                "wall_damping",
                self.wall_damping,
                d.wall_damping,
                unit(self.wall_damping),
                &mut fixed,
            ),
            backboard_damping: fix(
                "backboard_damping",
                self.backboard_damping,
                d.backboard_damping,
                unit(self.backboard_damping),
                &mut fixed,
            ),
            rim_damping: fix(
                "rim_damping",
                self.rim_damping,
                d.rim_damping,
                unit(self.rim_damping),
                &mut fixed,
            ),
            max_flight_secs: fix(
                "max_flight_secs",
                self.max_flight_secs,
                d.max_flight_secs,
                self.max_flight_secs > 0.0,
                &mut fixed,
            ),
            move_step: fix(
                "move_step",
                self.move_step,
                d.move_step,
                self.move_step >= 0.0,
                &mut fixed,
            ),
            shot_model: self.shot_model,
            flight_time_slow,
            flight_time_fast,
            linear_horizontal_speed: fix(
                "linear_horizontal_speed",
                self.linear_horizontal_speed,
                d.linear_horizontal_speed,
                self.linear_horizontal_speed >= 0.0,
                &mut fixed,
            ),
            linear_vertical_speed: fix(
                "linear_vertical_speed",
                self.linear_vertical_speed,
                d.linear_vertical_speed,
                self.linear_vertical_speed >= 0.0,
                &mut fixed,
            ),
            made_radius: fix(
                "made_radius",
                self.made_radius,
                d.made_radius,
                self.made_radius > 0.0,
                &mut fixed,
            ),
            made_height_tolerance: fix(
                "made_height_tolerance",
                self.made_height_tolerance,
                d.made_height_tolerance,
                self.made_height_tolerance > 0.0,
                &mut fixed,
            ),
            made_max_horizontal_speed: fix(
                "made_max_horizontal_speed",
                self.made_max_horizontal_speed,
                d.made_max_horizontal_speed,
                self.made_max_horizontal_speed > 0.0,
                &mut fixed,
            ),
        };

        (tuning, fixed)
    }

    pub fn apply_to(&self, tweaks: &mut PhysicsTweaks) {
        tweaks.gravity = self.gravity;
        tweaks.ball_radius = self.ball_radius;
        tweaks.floor_restitution = self.floor_restitution;
        tweaks.floor_friction = self.floor_friction;
        tweaks.stop_speed = self.stop_speed;
        tweaks.wall_damping = self.wall_damping;
        tweaks.backboard_damping = self.backboard_damping;
        tweaks.rim_damping = self.rim_damping;
        tweaks.max_flight_secs = self.max_flight_secs;
        tweaks.move_step = self.move_step;
        tweaks.shot_model = self.shot_model;
        tweaks.flight_time_slow = self.flight_time_slow;
        tweaks.flight_time_fast = self.flight_time_fast;
        tweaks.linear_horizontal_speed = self.linear_horizontal_speed;
        tweaks.linear_vertical_speed = self.linear_vertical_speed;
        tweaks.made_radius = self.made_radius;
        tweaks.made_height_tolerance = self.made_height_tolerance;
        tweaks.made_max_horizontal_speed = self.made_max_horizontal_speed;
    }

    /// Apply on top of a running session. The ball radius is fixed once the
    /// ball mesh exists, so it keeps its current value; returns true when the
    /// file asks for a different one.
    pub fn apply_live(&self, tweaks: &mut PhysicsTweaks) -> bool {
        let radius = tweaks.ball_radius;
        self.apply_to(tweaks);
        tweaks.ball_radius = radius;
        self.ball_radius != radius
    }
}

/// Runtime physics values read by the simulation step
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PhysicsTweaks {
    pub gravity: f32,
    pub ball_radius: f32,
    pub floor_restitution: f32,
    pub floor_friction: f32,
    pub stop_speed: f32,
    pub wall_damping: f32,
    pub backboard_damping: f32,
    pub rim_damping: f32,
    pub max_flight_secs: f32,
    pub move_step: f32,
    pub shot_model: ShotModel,
    pub flight_time_slow: f32,
    pub flight_time_fast: f32,
    pub linear_horizontal_speed: f32,
    pub linear_vertical_speed: f32,
    pub made_radius: f32,
    pub made_height_tolerance: f32,
    pub made_max_horizontal_speed: f32,
}

impl Default for PhysicsTweaks {
    fn default() -> Self {
        let defaults = GameplayTuning::default();
        Self {
            gravity: defaults.gravity,
            ball_radius: defaults.ball_radius,
            floor_restitution: defaults.floor_restitution,
            floor_friction: defaults.floor_friction,
            stop_speed: defaults.stop_speed,
            wall_damping: defaults.wall_damping,
            backboard_damping: defaults.backboard_damping,
            rim_damping: defaults.rim_damping,
            max_flight_secs: defaults.max_flight_secs,
            move_step: defaults.move_step,
            shot_model: defaults.shot_model,
            flight_time_slow: defaults.flight_time_slow,
            flight_time_fast: defaults.flight_time_fast,
            linear_horizontal_speed: defaults.linear_horizontal_speed,
            linear_vertical_speed: defaults.linear_vertical_speed,
            made_radius: defaults.made_radius,
            made_height_tolerance: defaults.made_height_tolerance,
            made_max_horizontal_speed: defaults.made_max_horizontal_speed,
        }
    }
}

impl PhysicsTweaks {
    /// Height of the ball center when resting on the floor
    pub fn rest_height(&self) -> f32 {
        self.ball_radius + FLOOR_SURFACE_Y
    }
}

pub fn load_gameplay_tuning_from_file(path: &str) -> Result<GameplayTuning, String> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    parse_gameplay_tuning(&contents).map_err(|e| format!("Failed to parse {}: {}", path, e))
}

/// Parse and sanitize tuning JSON
pub fn parse_gameplay_tuning(contents: &str) -> Result<GameplayTuning, String> {
    let raw: GameplayTuning = serde_json::from_str(contents).map_err(|e| e.to_string())?;
    let (tuning, fixed) = raw.sanitized();
    for field in fixed {
        warn!("Invalid tuning value replaced with default: {}", field);
    }
    Ok(tuning)
}

pub fn apply_tuning_file(path: &str, tweaks: &mut PhysicsTweaks) -> Result<(), String> {
    match load_gameplay_tuning_from_file(path) {
        Ok(tuning) => {
            tuning.apply_to(tweaks);
            info!("Loaded gameplay tuning from {}", path);
            Ok(())
        }
        Err(err) => {
            GameplayTuning::default().apply_to(tweaks);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let tuning = parse_gameplay_tuning(r#"{ "gravity": -12.0, "shot_model": "linear" }"#)
            .unwrap();
        assert_eq!(tuning.gravity, -12.0);
        assert_eq!(tuning.shot_model, ShotModel::Linear);
        assert_eq!(tuning.ball_radius, BALL_RADIUS);
        assert_eq!(tuning.rim_damping, RIM_DAMPING);
    }

    #[test]
    fn test_invalid_values_replaced() {
        let raw = GameplayTuning {
            gravity: 9.8,
            rim_damping: 1.5,
            ball_radius: f32::NAN,
            ..Default::default()
        };
        let (tuning, fixed) = raw.sanitized();
        assert_eq!(tuning.gravity, GRAVITY);
        assert_eq!(tuning.rim_damping, RIM_DAMPING);
        assert_eq!(tuning.ball_radius, BALL_RADIUS);
        assert_eq!(fixed.len(), 3);
    }

    #[test]
    fn test_flight_time_order_enforced() {
        let raw = GameplayTuning {
            flight_time_slow: 1.0,
            flight_time_fast: 2.0,
            ..Default::default()
        };
        let (tuning, _) = raw.sanitized();
        assert_eq!(tuning.flight_time_slow, 1.0);
        assert_eq!(tuning.flight_time_fast, 1.0);
    }

    #[test]
    fn test_apply_to_tweaks() {
        let tuning = GameplayTuning {
            ball_radius: 0.5,
            ..Default::default()
        };
        let mut tweaks = PhysicsTweaks::default();
        tuning.apply_to(&mut tweaks);
        assert_eq!(tweaks.ball_radius, 0.5);
        assert!((tweaks.rest_height() - (0.5 + FLOOR_SURFACE_Y)).abs() < 1e-6);
    }
}
