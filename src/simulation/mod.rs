//! Simulation module - the fixed-step game aggregate and headless sweeps
//!
//! `GameSim` is the whole ball-flight and scoring state machine. It runs the
//! same way inside the Bevy app, the scenario runner, and the power sweep.

pub mod config;
pub mod step;
pub mod sweep;

pub use config::{SWEEP_SETTINGS_FILE, SweepConfig};
pub use step::{GameSim, simulation_tick};
pub use sweep::{PowerBucket, ShotSample, SweepReport, init_parallel, run_sweep, simulate_shot};
