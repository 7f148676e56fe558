//! Event type definitions for the logging system

use serde::{Deserialize, Serialize};

use crate::tuning::GameplayTuning;
use crate::world::Basket;

/// All game events that flow through the bus and into the event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Session Events ===
    /// Session started (generated once per game launch)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,
    },
    /// Tuning snapshot (logged after session start and on hot reload)
    Config(GameplayTuning),

    // === Shot Events ===
    /// Ball left the floor toward a hoop
    ShotRelease {
        target: Basket,
        power: f32,
        velocity: (f32, f32, f32),
    },
    /// First tick of a rim contact episode
    RimTouch { hoop: Basket },
    /// First tick of a backboard contact episode
    BackboardTouch { hoop: Basket },
    /// Floor bounce with the vertical impact speed
    Bounce { speed: f32 },
    /// Shot went in
    Scored {
        hoop: Basket,
        swish: bool,
        made: u32,
        attempts: u32,
        points: u32,
    },
    /// Downward rim-plane crossing that did not score
    Missed { hoop: Basket, distance: f32 },
    /// Ball came to rest and the attempt ended
    Settled { scored: bool },

    // === Control Events ===
    /// Ball returned to center court
    Reset,
    /// Shot power changed
    PowerChange { power: f32 },
    /// Game clock reached zero
    ClockExpired,

    // === Debug/Tick Events ===
    /// Ball state sample (rate-limited by the logger)
    Tick {
        frame: u64,
        ball_pos: (f32, f32, f32),
        ball_vel: (f32, f32, f32),
        airborne: bool,
    },
}

impl GameEvent {
    /// Get the event type code for compact serialization
    pub fn type_code(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "SE",
            GameEvent::Config(_) => "CF",
            GameEvent::ShotRelease { .. } => "SR",
            GameEvent::RimTouch { .. } => "RT",
            GameEvent::BackboardTouch { .. } => "BT",
            GameEvent::Bounce { .. } => "B",
            GameEvent::Scored { .. } => "SC",
            GameEvent::Missed { .. } => "MI",
            GameEvent::Settled { .. } => "ST",
            GameEvent::Reset => "RS",
            GameEvent::PowerChange { .. } => "PW",
            GameEvent::ClockExpired => "CE",
            GameEvent::Tick { .. } => "T",
        }
    }

    /// Short name used by scenario expectations (`expect_events`)
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "session_start",
            GameEvent::Config(_) => "config",
            GameEvent::ShotRelease { .. } => "shot_release",
            GameEvent::RimTouch { .. } => "rim_touch",
            GameEvent::BackboardTouch { .. } => "backboard_touch",
            GameEvent::Bounce { .. } => "bounce",
            GameEvent::Scored { swish: true, .. } => "swish",
            GameEvent::Scored { swish: false, .. } => "assisted",
            GameEvent::Missed { .. } => "missed",
            GameEvent::Settled { .. } => "settled",
            GameEvent::Reset => "reset",
            GameEvent::PowerChange { .. } => "power_change",
            GameEvent::ClockExpired => "clock_expired",
            GameEvent::Tick { .. } => "tick",
        }
    }
}
