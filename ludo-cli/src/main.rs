//! LUDO CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the game server
//! - simulate: Play random games through the engine and report statistics

mod server;
mod simulate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ludo_core::GameConfig;

#[derive(Parser)]
#[command(name = "ludo")]
#[command(about = "LUDO race-and-capture board game server and simulator")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Random seed for reproducible dice
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the game server
    Serve(server::ServerArgs),
    /// Play random games and report statistics
    Simulate(simulate::SimulateArgs),
}

/// Game shape flags shared by every command
#[derive(Args, Clone, Debug)]
pub struct GameArgs {
    /// Players per game (2-4)
    #[arg(long, default_value = "4")]
    pub players: usize,

    /// Counters per player
    #[arg(long, default_value = "4")]
    pub counters: usize,

    /// JSON game config file (overrides --players/--counters)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl GameArgs {
    /// Resolve into a validated game config
    pub fn to_config(&self, seed: Option<u64>) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("Failed to load game config: {}", path.display()))?,
            None => GameConfig::new(self.players, self.counters),
        };
        if seed.is_some() {
            config.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Serve(args) => server::run(args, cli.seed),
        Commands::Simulate(args) => simulate::run(args, cli.seed),
    }
}
