//! Scenario test runner CLI
//!
//! Usage:
//!   cargo run --bin test-scenarios                      # Run all scenarios
//!   cargo run --bin test-scenarios -- shooting/         # Run one category
//!   cargo run --bin test-scenarios -- reset_mid_flight  # Run by name
//!   cargo run --bin test-scenarios -- --list            # List without running
//!   cargo run --bin test-scenarios -- --verbose         # Expected/actual on failure

use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use hoopshot::testing::{SCENARIOS_DIR, TestResult, discover_scenarios, parse_test_file, run_test};

#[derive(Default)]
struct Tally {
    passed: u32,
    failed: u32,
    errors: u32,
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let list_only = args.iter().any(|a| a == "--list");
    let filter = args.iter().find(|a| !a.starts_with('-')).cloned();

    let base = Path::new(SCENARIOS_DIR);
    let scenarios = discover_scenarios(base, filter.as_deref());
    if scenarios.is_empty() {
        println!("No scenarios found under {}", SCENARIOS_DIR);
        if let Some(f) = filter {
            println!("Filter: {}", f);
        }
        std::process::exit(1);
    }

    println!("Hoopshot scenarios ({})", scenarios.len());
    println!("==================\n");

    // Category (parent folder) -> tally, printed in path order
    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();
    let mut current_category: Option<String> = None;

    for path in &scenarios {
        let rel = path.strip_prefix(base).unwrap_or(path);
        let category = rel
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();
        let name = rel
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        if current_category.as_deref() != Some(category.as_str()) {
            println!("{}/", if category.is_empty() { "." } else { &category });
            current_category = Some(category.clone());
        }

        let def = match parse_test_file(path) {
            Ok(def) => def,
            Err(message) => {
                print_result(&name, &TestResult::Error { message }, verbose);
                tallies.entry(category).or_default().errors += 1;
                continue;
            }
        };

        if list_only {
            println!("  {:<32} {}", name, def.description.as_deref().unwrap_or(&def.name));
            continue;
        }

        let result = run_test(&def);
        let tally = tallies.entry(category).or_default();
        match &result {
            TestResult::Pass { .. } => tally.passed += 1,
            TestResult::Fail { .. } => tally.failed += 1,
            TestResult::Error { .. } => tally.errors += 1,
        }
        print_result(&name, &result, verbose);
    }

    if list_only {
        return;
    }

    println!("\n==================");
    let mut total = Tally::default();
    for (category, tally) in &tallies {
        println!(
            "{:<12} {} passed, {} failed, {} errors",
            category, tally.passed, tally.failed, tally.errors
        );
        total.passed += tally.passed;
        total.failed += tally.failed;
        total.errors += tally.errors;
    }
    println!(
        "Total: {} passed, {} failed, {} errors",
        total.passed, total.failed, total.errors
    );

    if total.failed > 0 || total.errors > 0 {
        std::process::exit(1);
    }
}

fn print_result(name: &str, result: &TestResult, verbose: bool) {
    let dots = ".".repeat(40 - name.len().min(39));

    match result {
        TestResult::Pass { frames } => println!("  {} {} PASS ({} frames)", name, dots, frames),
        TestResult::Fail { error } => {
            println!("  {} {} FAIL", name, dots);
            if verbose {
                println!("    {}", error);
            } else {
                println!("    {}", error.message);
            }
        }
        TestResult::Error { message } => {
            println!("  {} {} ERROR", name, dots);
            println!("    {}", message);
        }
    }
}
