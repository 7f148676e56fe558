//! Scenario testing system for deterministic game testing
//!
//! Scenario files script frame-by-frame input against a headless `GameSim`
//! and assert on the emitted event sequence and on world state.

pub mod assertions;
pub mod input;
pub mod parser;
pub mod runner;

pub use assertions::{AssertionError, CapturedEvent, WorldState, check_forbidden, check_sequence, check_state};
pub use input::{ScriptedInputs, input_injection};
pub use parser::{
    BallSetup, ExpectedEvent, FrameInput, StateAssertion, TestDefinition, TestExpectations, TestSetup,
    parse_test_file, parse_test_str,
};
pub use runner::{TestResult, run_test};

use std::fs;
use std::path::{Path, PathBuf};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";

/// All `.toml` scenarios under `base` (recursing into category folders),
/// sorted, optionally filtered by a substring of the relative path
pub fn discover_scenarios(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut tests = Vec::new();
    discover_recursive(base, base, filter, &mut tests);
    tests.sort();
    tests
}

fn discover_recursive(base: &Path, current: &Path, filter: Option<&str>, tests: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(current) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            discover_recursive(base, &path, filter, tests);
        } else if path.extension().is_some_and(|e| e == "toml") {
            if let Some(f) = filter {
                let rel = path.strip_prefix(base).unwrap_or(&path).to_string_lossy();
                if !rel.contains(f) {
                    continue;
                }
            }
            tests.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_scenarios_pass() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(SCENARIOS_DIR);
        let paths = discover_scenarios(&dir, None);
        assert!(!paths.is_empty());
        assert!(discover_scenarios(&dir, Some("shooting/")).len() < paths.len());

        for path in paths {
            let def = parse_test_file(&path).unwrap();
            match run_test(&def) {
                TestResult::Pass { .. } => {}
                other => panic!("{} failed: {:?}", path.display(), other),
            }
        }
    }
}
