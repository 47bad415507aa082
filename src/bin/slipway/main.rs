//! slipway CLI - platform detection and environment staging

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("slipway=debug")
    } else {
        EnvFilter::new("slipway=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Detect(args) => commands::detect::execute(args),
        Commands::Doctor(args) => commands::doctor::execute(args),
        Commands::Flags(args) => commands::flags::execute(args),
        Commands::Stage(args) => commands::stage::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
