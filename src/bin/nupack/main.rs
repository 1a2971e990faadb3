//! nupack CLI - nuspec manifest builder and NuGet pack driver

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
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("nupack=debug")
    } else {
        EnvFilter::new("nupack=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Project(args) => commands::project::execute(args),
        Commands::Solution(args) => commands::solution::execute(args),
        Commands::Push(args) => commands::push::execute(args),
    }
}
