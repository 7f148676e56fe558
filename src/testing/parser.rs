//! TOML test file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::tuning::ShotModel;

/// Complete test definition from TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub setup: TestSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    pub expect: TestExpectations,
}

/// Test setup configuration
#[derive(Debug, Default, Deserialize)]
pub struct TestSetup {
    /// Starting shot power (default 0.5)
    pub power: Option<f32>,
    /// Override the default shot model
    pub shot_model: Option<ShotModel>,
    /// Tuning JSON to load instead of built-in defaults
    pub tuning_file: Option<String>,
    pub ball: Option<BallSetup>,
}

/// Starting ball placement. With `launch_target` set the ball starts
/// airborne with the given velocity (counts as an attempt).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BallSetup {
    #[serde(default)]
    pub x: f32,
    /// Center height; defaults to resting on the floor
    pub y: Option<f32>,
    #[serde(default)]
    pub z: f32,
    #[serde(default)]
    pub velocity: [f32; 3],
    pub launch_target: Option<String>,
}

/// Input changes at a specific frame
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    // Held flags persist until changed
    pub move_left: Option<bool>,
    pub move_right: Option<bool>,
    pub move_forward: Option<bool>,
    pub move_back: Option<bool>,
    // One-shot actions
    #[serde(default)]
    pub shoot: bool,
    #[serde(default)]
    pub reset: bool,
    #[serde(default)]
    pub power_up: u32,
    #[serde(default)]
    pub power_down: u32,
}

/// Expected test outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// Event names that must never appear
    #[serde(default)]
    pub forbid: Vec<String>,
    /// Multiple state assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
}

/// Expected event in sequence
#[derive(Debug, Deserialize)]
pub struct ExpectedEvent {
    pub event: String,
    pub hoop: Option<String>,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

/// State assertion after simulation
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

/// Parse a test file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    parse_test_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Parse a test definition from TOML text
pub fn parse_test_str(content: &str) -> Result<TestDefinition, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}
