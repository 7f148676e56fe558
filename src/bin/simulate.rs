//! Shot Sweep Tool - headless make-rate sweep over shot power
//!
//! Fires every power value from a grid (or random set) of court positions
//! without rendering and reports make/swish rates per power.
//!
//! Usage:
//!   cargo run --bin simulate -- --help
//!   cargo run --bin simulate -- --powers 21 --grid 10x7
//!   cargo run --bin simulate -- --random 500 --seed 42 --model linear

use hoopshot::simulation::{SweepConfig, init_parallel, run_sweep};
use hoopshot::tuning::{PhysicsTweaks, apply_tuning_file};

fn main() {
    let config = SweepConfig::from_args();
    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &SweepConfig) -> Result<(), String> {
    let mut tweaks = PhysicsTweaks::default();
    if let Some(path) = &config.tuning_file {
        apply_tuning_file(path, &mut tweaks)?;
    }
    if let Some(model) = config.shot_model {
        tweaks.shot_model = model;
    }

    init_parallel(config.parallel)?;

    let report = run_sweep(config, &tweaks);
    report.print_table();

    if let Some(path) = &config.output_file {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize report: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path, e))?;
        if !config.quiet {
            println!("\nReport written to {}", path);
        }
    }
    Ok(())
}
