//! AOC CLI - run, verify, submit and scaffold Advent of Code solutions

mod aggregator;
mod cli;
mod commands;
mod config;
mod error;
mod executor;
mod output;
mod scaffold;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::{RegistryBuilder, SolverRegistry};
use clap::Parser;
use cli::{Cli, Command};
use config::Config;
use error::CliError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warn, raised to info/debug by `-v`/`-vv`
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::from_cli(&cli);
    log::debug!("data directory: {}", config.data_dir.display());

    match cli.command {
        Command::Run(args) => commands::run(&args, &config, &build_registry()?),
        Command::Verify(args) => commands::verify(args, &config, build_registry()?),
        Command::Submit(args) => commands::submit(&args, &config, &build_registry()?),
        Command::List(args) => commands::list(&args, &config, &build_registry()?),
        Command::NewDay(args) => commands::new_day(&args, &config),
    }
}

/// Registry of every solver linked in through plugins
fn build_registry() -> Result<SolverRegistry, CliError> {
    let registry = RegistryBuilder::new().register_all_plugins()?.build();
    log::info!("{} solver(s) registered", registry.len());
    Ok(registry)
}
