//! Headless simulator entry point.
//!
//! Plays the preset party through the preset dungeon a number of times and
//! emits a JSON report of the stress each run accumulated.
mod args;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use despair_content::{ConfigLoader, preset_session};
use despair_core::{GameConfig, compute_seed};
use despair_runtime::{GreedyProvider, RandomProvider, Simulator, SimulatorConfig};

use args::{Cli, Players};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::init(cli.log_file.as_deref(), cli.no_log_file)?;

    let game_config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => GameConfig::default(),
    };
    let simulator = build_simulator(&cli, game_config)?;

    tracing::info!(
        "Simulating {} runs with {} players (seed {}, max {} steps)",
        cli.runs,
        cli.players.label(),
        cli.seed,
        cli.max_steps
    );
    let seed = cli.seed;
    let report = simulator
        .run_batch(cli.runs, |run| {
            Ok(preset_session(seed.wrapping_add(run as u64))?)
        })
        .await?;

    let summary = &report.summary;
    tracing::info!(
        "Done: {} cleared, {} wiped, {} timed out, mean stress {:.1}",
        summary.cleared,
        summary.wiped,
        summary.timed_out,
        summary.mean_final_stress
    );

    let json = report.to_json()?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn build_simulator(cli: &Cli, game_config: GameConfig) -> Result<Simulator> {
    let builder = Simulator::builder()
        .config(SimulatorConfig {
            game_config,
            max_steps: cli.max_steps,
        })
        .players(cli.players.label());

    let builder = match cli.players {
        Players::Random => builder
            .hero_provider(RandomProvider::seeded(compute_seed(cli.seed, 0, 0, 1)))
            .enemy_provider(RandomProvider::seeded(compute_seed(cli.seed, 0, 0, 2))),
        Players::Ai => builder
            .hero_provider(GreedyProvider::new())
            .enemy_provider(GreedyProvider::new()),
    };
    Ok(builder.build()?)
}
