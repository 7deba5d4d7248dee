//! Experiment runner binary.
//!
//! Reads the experiment setup from the environment (and `.env`), plays a batch
//! of games with the configured agents, and writes the agent logs plus a
//! `summary.json` into the experiment directory.
//!
//! ```bash
//! NUM_GAMES=10 GAME_PRESET=five_member GAME_SEED=7 cargo run -p amongagents-client
//! ```
mod config;
mod dirs;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use game_core::{MapOracle, Role};
use runtime::{AgentLog, BatchConfig, FileAgentLog, GameSummary, run_batch};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging()?;
    let config = CliConfig::from_env();

    let game = config.load_game()?;
    let map: Arc<dyn MapOracle> = Arc::new(config.load_map()?);
    let agents = config.agents()?;
    if agents.needs_completion_client() {
        // No completion transport ships with this binary.
        bail!(
            "agent preset '{}' needs an LLM completion client",
            config.agent_preset
        );
    }

    std::fs::create_dir_all(&config.experiment_path).with_context(|| {
        format!(
            "failed to create experiment directory {}",
            config.experiment_path.display()
        )
    })?;
    let log = Arc::new(FileAgentLog::create(&config.experiment_path)?);

    tracing::info!(
        games = config.num_games,
        players = game.num_players,
        impostors = game.num_impostors,
        seed = game.seed,
        output = %config.experiment_path.display(),
        "starting experiment"
    );

    let batch = BatchConfig::new(config.num_games, game, agents)
        .with_max_concurrent(config.max_concurrent);
    let agent_log: Arc<dyn AgentLog> = log.clone();
    let summaries = run_batch(batch, map, agent_log, None).await?;

    let summary_path = config.experiment_path.join("summary.json");
    std::fs::write(&summary_path, serde_json::to_string_pretty(&summaries)?)
        .with_context(|| format!("failed to write {}", summary_path.display()))?;

    report(&summaries);
    tracing::info!(
        summary = %summary_path.display(),
        agent_log = %log.full_path().display(),
        "experiment finished"
    );
    Ok(())
}

fn report(summaries: &[GameSummary]) {
    let crew_wins = summaries
        .iter()
        .filter(|summary| summary.winner == Role::Crewmate)
        .count();
    for summary in summaries {
        tracing::info!(
            game = summary.game_index,
            winner = %summary.winner,
            reason = %summary.reason,
            timesteps = summary.timesteps,
            "result"
        );
    }
    tracing::info!(
        crewmate_wins = crew_wins,
        impostor_wins = summaries.len() - crew_wins,
        "totals"
    );
}

/// Setup logging to both stderr and a daily log file
fn setup_logging() -> Result<()> {
    let log_dir = dirs::log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "amongagents.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    // Leak the guard to keep file writer alive
    std::mem::forget(guard);

    tracing::info!("Log directory: {}", log_dir.display());
    Ok(())
}
