//! Concurrent execution of independent games.
//!
//! Games share nothing mutable: each owns its state and agents, and only the
//! immutable map and the agent log sink are shared across tasks.
use std::sync::Arc;

use tokio::task::JoinSet;

use game_core::{GameConfig, MapOracle};

use crate::api::{Result, RuntimeError};
use crate::config::AgentConfig;
use crate::game::{Game, GameSummary};
use crate::providers::CompletionClient;
use crate::repository::AgentLog;

/// Settings for a batch of games.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    pub games: usize,
    /// Template for every game; game `i` (1-based) is seeded with `seed + i`.
    pub game: GameConfig,
    pub agents: AgentConfig,
    /// Upper bound on games running at once.
    pub max_concurrent: usize,
}

impl BatchConfig {
    pub const DEFAULT_MAX_CONCURRENT: usize = 8;

    pub fn new(games: usize, game: GameConfig, agents: AgentConfig) -> Self {
        Self {
            games,
            game,
            agents,
            max_concurrent: Self::DEFAULT_MAX_CONCURRENT,
        }
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    fn game_config(&self, index: usize) -> GameConfig {
        let seed = self.game.seed.wrapping_add(index as u64);
        self.game.clone().with_seed(seed)
    }
}

/// Runs every game of the batch and returns the summaries ordered by index.
///
/// # Errors
///
/// The first setup or engine failure aborts the remaining games.
pub async fn run_batch(
    config: BatchConfig,
    map: Arc<dyn MapOracle>,
    log: Arc<dyn AgentLog>,
    completion: Option<Arc<dyn CompletionClient>>,
) -> Result<Vec<GameSummary>> {
    let limit = config.max_concurrent.max(1);
    let mut workers = JoinSet::new();
    let mut summaries = Vec::with_capacity(config.games);

    tracing::info!(
        target: "runtime::game",
        games = config.games,
        players = config.game.num_players,
        impostors = config.game.num_impostors,
        "starting batch"
    );

    for index in 1..=config.games {
        let mut builder = Game::builder()
            .index(index)
            .config(config.game_config(index))
            .map(map.clone())
            .agents(config.agents.clone())
            .log(log.clone());
        if let Some(client) = &completion {
            builder = builder.completion_client(client.clone());
        }
        let mut game = builder.build()?;

        if workers.len() >= limit {
            collect(&mut workers, &mut summaries).await?;
        }
        workers.spawn(async move { game.run().await });
    }

    while !workers.is_empty() {
        collect(&mut workers, &mut summaries).await?;
    }

    log.flush()?;
    summaries.sort_by_key(|summary| summary.game_index);
    Ok(summaries)
}

async fn collect(
    workers: &mut JoinSet<Result<GameSummary>>,
    summaries: &mut Vec<GameSummary>,
) -> Result<()> {
    let Some(joined) = workers.join_next().await else {
        return Ok(());
    };
    let summary = joined.map_err(RuntimeError::WorkerJoin)??;
    tracing::info!(
        target: "runtime::game",
        game = summary.game_index,
        winner = %summary.winner,
        reason = %summary.reason,
        "batch game done"
    );
    summaries.push(summary);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn games_get_consecutive_seeds() {
        let config = BatchConfig::new(
            3,
            GameConfig::five_member().with_seed(100),
            AgentConfig::default(),
        );
        assert_eq!(config.game_config(1).seed, 101);
        assert_eq!(config.game_config(3).seed, 103);
        assert_eq!(config.with_max_concurrent(0).max_concurrent, 1);
    }
}
