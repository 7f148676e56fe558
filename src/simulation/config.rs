//! Shot sweep configuration

use serde::{Deserialize, Serialize};

use crate::tuning::ShotModel;

/// Configuration for a headless power sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Number of evenly spaced power values in 0..=1 (at least 2)
    pub power_steps: u32,
    /// Grid columns along X on the right half court
    pub grid_x: u32,
    /// Grid rows along Z
    pub grid_z: u32,
    /// Use this many random positions instead of the grid
    pub random_positions: Option<u32>,
    /// RNG seed for random positions (None = fresh entropy)
    pub seed: Option<u64>,
    /// Override the tuning file's shot model
    pub shot_model: Option<ShotModel>,
    /// Tuning JSON to load (None = built-in defaults)
    pub tuning_file: Option<String>,
    /// Output JSON report to file (None = stdout table only)
    pub output_file: Option<String>,
    /// Suppress progress output
    pub quiet: bool,
    /// Number of worker threads (0 = rayon default)
    pub parallel: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            power_steps: 11,
            grid_x: 6,
            grid_z: 5,
            random_positions: None,
            seed: None,
            shot_model: None,
            tuning_file: None,
            output_file: None,
            quiet: false,
            parallel: 0,
        }
    }
}

/// Local sweep settings (optional)
pub const SWEEP_SETTINGS_FILE: &str = "config/sweep_settings.json";

impl SweepConfig {
    /// Load configuration from a JSON settings file
    pub fn from_file(path: &str) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", path, e))
    }

    /// Power values covered by the sweep
    pub fn powers(&self) -> Vec<f32> {
        let steps = self.power_steps.max(2);
        (0..steps)
            .map(|i| i as f32 / (steps - 1) as f32)
            .collect()
    }

    /// Parse configuration from command line arguments
    pub fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::from_arg_list(&args[1..])
    }

    /// Settings file first (if any), then command line overrides
    pub fn from_arg_list(args: &[String]) -> Self {
        let mut config = Self::from_file(SWEEP_SETTINGS_FILE).unwrap_or_default();

        if let Some(i) = args.iter().position(|a| a == "--settings") {
            match args.get(i + 1).map(|path| Self::from_file(path)) {
                Some(Ok(loaded)) => config = loaded,
                Some(Err(e)) => eprintln!("Warning: {}", e),
                None => eprintln!("Warning: --settings needs a path"),
            }
        }

        let mut i = 0;
        while i < args.len() {
            let value = args.get(i + 1);
            match args[i].as_str() {
                "--settings" => {
                    i += 1;
                }
                "--powers" => {
                    if let Some(v) = value {
                        config.power_steps = v.parse().unwrap_or(config.power_steps);
                        i += 1;
                    }
                }
                "--grid" => {
                    // Format: 6x5
                    if let Some((x, z)) = value.and_then(|v| v.split_once('x')) {
                        config.grid_x = x.parse().unwrap_or(config.grid_x);
                        config.grid_z = z.parse().unwrap_or(config.grid_z);
                        i += 1;
                    }
                }
                "--random" => {
                    if let Some(v) = value {
                        config.random_positions = v.parse().ok();
                        i += 1;
                    }
                }
                "--seed" => {
                    if let Some(v) = value {
                        config.seed = v.parse().ok();
                        i += 1;
                    }
                }
                "--model" => {
                    if let Some(v) = value {
                        config.shot_model = match v.as_str() {
                            "flight_time" | "flight-time" => Some(ShotModel::FlightTime),
                            "linear" => Some(ShotModel::Linear),
                            other => {
                                eprintln!("Warning: unknown shot model '{}'", other);
                                config.shot_model
                            }
                        };
                        i += 1;
                    }
                }
                "--tuning" => {
                    if let Some(v) = value {
                        config.tuning_file = Some(v.clone());
                        i += 1;
                    }
                }
                "--output" => {
                    if let Some(v) = value {
                        config.output_file = Some(v.clone());
                        i += 1;
                    }
                }
                "--quiet" | "-q" => {
                    config.quiet = true;
                }
                "--parallel" => {
                    if let Some(v) = value {
                        config.parallel = v.parse().unwrap_or(0);
                        i += 1;
                    }
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {}
            }
            i += 1;
        }

        config
    }
}

fn print_help() {
    println!(
        r#"Shot Sweep - headless make-rate sweep over shot power

USAGE:
    cargo run --bin simulate -- [OPTIONS]

OPTIONS:
    --settings <FILE>   Load settings from JSON file (CLI args override file settings)
    --powers <N>        Number of power values in 0..=1 (default: 11)
    --grid <XxZ>        Position grid on the right half court (default: 6x5)
    --random <N>        Use N random positions instead of the grid
    --seed <N>          RNG seed for random positions
    --model <NAME>      Shot model: flight_time | linear
    --tuning <FILE>     Gameplay tuning JSON to load
    --output <FILE>     Write the JSON report to a file
    --quiet, -q         Suppress progress output
    --parallel <N>      Worker threads (default: all cores)
    --help, -h          Show this help

EXAMPLES:
    cargo run --bin simulate -- --powers 21 --grid 10x7
    cargo run --bin simulate -- --random 500 --seed 42 --model linear --output sweep.json
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cli_overrides() {
        let config = SweepConfig::from_arg_list(&args(&[
            "--powers", "5", "--grid", "3x2", "--seed", "7", "--model", "linear", "-q",
        ]));
        assert_eq!(config.power_steps, 5);
        assert_eq!((config.grid_x, config.grid_z), (3, 2));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.shot_model, Some(ShotModel::Linear));
        assert!(config.quiet);
    }

    #[test]
    fn test_powers_cover_range() {
        let config = SweepConfig {
            power_steps: 5,
            ..Default::default()
        };
        assert_eq!(config.powers(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_partial_json() {
        let config: SweepConfig = serde_json::from_str(r#"{ "grid_x": 2 }"#).unwrap();
        assert_eq!(config.grid_x, 2);
        assert_eq!(config.power_steps, 11);
    }
}
