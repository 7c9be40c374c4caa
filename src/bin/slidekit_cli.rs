//! CLI tool for slidekit - runs a gallery scenario and outputs the layout as JSON
//!
//! Usage:
//!   slidekit_cli <scenario.json>              # Output JSON to stdout
//!   slidekit_cli <scenario.json> -o out.json  # Output JSON to file
//!
//! Set `RUST_LOG=slidekit=debug` to trace the layout pipeline on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use slidekit::Scenario;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: slidekit_cli <scenario.json> [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    // Read scenario
    let scenario = match Scenario::from_path(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    // Run
    let snapshot = match scenario.run() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error running scenario: {}", e);
            std::process::exit(1);
        }
    };

    let json = match snapshot.to_json_pretty() {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
