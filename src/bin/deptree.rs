//! Deptree CLI Binary
//!
//! Command-line interface for scanning and searching dependency snapshots.

use clap::Parser;
use deptree::logging::init_logging;
use deptree::tooling::cli::{Cli, CliContext};
use std::io::IsTerminal;
use std::process;

fn main() {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let context = match CliContext::new(config) {
        Ok(ctx) => ctx.with_color(std::io::stdout().is_terminal()),
        Err(e) => {
            eprintln!("Error initializing: {}", e);
            process::exit(1);
        }
    };

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    if let Err(e) = context.execute(&cli.command, stdin.lock(), &mut stdout) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
