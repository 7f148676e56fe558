//! Hoopshot - a single-ball basketball shooting sim built with Bevy
//!
//! The ball-flight and scoring core (`ball`, `shooting`, `scoring`,
//! `simulation`) is plain Rust on plain structs, stepped at a fixed 60 Hz.
//! The Bevy app, the scenario runner and the headless sweep all drive the
//! same `GameSim`.

// Core modules
pub mod config_watcher;
pub mod constants;
pub mod countdown;
pub mod events;
pub mod helpers;
pub mod simulation;
pub mod testing;
pub mod tuning;

// Game logic modules
pub mod ball;
pub mod input;
pub mod scoring;
pub mod shooting;
pub mod ui;
pub mod world;

// Re-export commonly used types for convenience
pub use ball::{Ball, BallSnapshot, BallState, BallTrail, ShotAttempt};
pub use config_watcher::ConfigWatcher;
pub use constants::*;
pub use countdown::{GameClock, advance_game_clock};
pub use events::{BusEvent, EventBus, EventLogConfig, EventLogger, GameEvent, update_event_bus_time};
pub use helpers::*;
pub use input::PlayerInput;
pub use scoring::{Score, ShotOutcome};
pub use shooting::{ShotPlan, plan_shot};
pub use simulation::{GameSim, simulation_tick};
pub use tuning::{GameplayTuning, PhysicsTweaks, ShotModel};
pub use ui::{FeedbackBanner, SoundCue};
pub use world::{Backboard, Basket, Court, Hoop, RimRing};
