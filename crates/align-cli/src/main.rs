//! agent-align CLI
//!
//! Keeps the MCP server definitions of several coding agents in sync.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow().bold(), e);
    }

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    tracing::debug!("Verbose mode enabled");
    match cli.command {
        Some(Commands::Sync(args)) => commands::run_sync(&args),
        Some(Commands::Agents) => commands::run_agents(),
        None => commands::run_sync(&cli.sync),
    }
}
