//! Command line arguments.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use despair_runtime::SimulatorConfig;

/// Headless Dungeon Despair simulator
#[derive(Debug, Parser)]
#[command(name = "despair")]
#[command(about = "Simulate parties of heroes through the preset dungeon", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Number of runs to simulate
    #[arg(short, long, env = "DESPAIR_RUNS", default_value_t = 10)]
    pub runs: usize,

    /// Who plays both sides
    #[arg(short, long, value_enum, default_value_t = Players::Random)]
    pub players: Players,

    /// Seed of the first run; run `i` uses `seed + i`
    #[arg(short, long, env = "DESPAIR_SEED", default_value_t = 0)]
    pub seed: u64,

    /// Steps after which a run is cut short
    #[arg(long, env = "DESPAIR_MAX_STEPS", default_value_t = SimulatorConfig::DEFAULT_MAX_STEPS)]
    pub max_steps: usize,

    /// TOML file overriding the stress table
    #[arg(short, long, env = "DESPAIR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Mirror logs to this file (default: platform cache directory)
    #[arg(long, conflicts_with = "no_log_file")]
    pub log_file: Option<PathBuf>,

    /// Only log to stderr
    #[arg(long)]
    pub no_log_file: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Players {
    /// Uniformly random choices
    Random,
    /// Greedy stress-driven AI
    Ai,
}

impl Players {
    pub fn label(self) -> &'static str {
        match self {
            Players::Random => "random",
            Players::Ai => "ai",
        }
    }
}
