//! Experiment configuration read from the process environment.
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use game_content::{ConfigLoader, MapLoader, StaticMap};
use game_core::GameConfig;
use runtime::{AgentConfig, BatchConfig};

use crate::dirs;

/// Settings for one experiment run.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub experiment_path: PathBuf,
    pub num_games: usize,
    pub game_preset: String,
    pub game_config: Option<PathBuf>,
    pub map_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub decision_timeout: Option<Duration>,
    pub agent_preset: String,
    pub max_concurrent: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            experiment_path: dirs::data_dir().join("experiments"),
            num_games: 1,
            game_preset: "seven_member".to_string(),
            game_config: None,
            map_path: None,
            seed: None,
            decision_timeout: None,
            agent_preset: "all_random".to_string(),
            max_concurrent: BatchConfig::DEFAULT_MAX_CONCURRENT,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `EXPERIMENT_PATH` - Output directory for agent logs and the summary
    /// - `NUM_GAMES` - Games to play (default: 1)
    /// - `GAME_PRESET` - `five_member`, `seven_member` or `nine_member` (default: seven_member)
    /// - `GAME_CONFIG` - TOML game configuration, overrides `GAME_PRESET`
    /// - `MAP_PATH` - RON map layout (default: built-in Skeld)
    /// - `GAME_SEED` - Base seed; game `i` plays with `seed + i`
    /// - `DECISION_TIMEOUT_MS` - Per-decision timeout (default: 60000)
    /// - `AGENT_PRESET` - `all_random`, `all_llm`, `crewmate_llm` or `impostor_llm`
    /// - `MAX_CONCURRENT` - Games running at once (default: 8)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("EXPERIMENT_PATH") {
            config.experiment_path = PathBuf::from(path);
        }
        if let Some(games) = read_env::<usize>("NUM_GAMES") {
            config.num_games = games.max(1);
        }
        if let Ok(preset) = env::var("GAME_PRESET") {
            config.game_preset = preset;
        }
        config.game_config = env::var("GAME_CONFIG").ok().map(PathBuf::from);
        config.map_path = env::var("MAP_PATH").ok().map(PathBuf::from);
        config.seed = read_env::<u64>("GAME_SEED");
        config.decision_timeout = read_env::<u64>("DECISION_TIMEOUT_MS").map(Duration::from_millis);
        if let Ok(preset) = env::var("AGENT_PRESET") {
            config.agent_preset = preset;
        }
        if let Some(limit) = read_env::<usize>("MAX_CONCURRENT") {
            config.max_concurrent = limit.max(1);
        }

        config
    }

    pub fn load_game(&self) -> Result<GameConfig> {
        let mut game = match &self.game_config {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("failed to load game config {}", path.display()))?,
            None => ConfigLoader::preset(&self.game_preset)?,
        };
        if let Some(seed) = self.seed {
            game.seed = seed;
        }
        Ok(game)
    }

    pub fn load_map(&self) -> Result<StaticMap> {
        match &self.map_path {
            Some(path) => MapLoader::load(path)
                .with_context(|| format!("failed to load map {}", path.display())),
            None => Ok(StaticMap::skeld()),
        }
    }

    pub fn agents(&self) -> Result<AgentConfig> {
        let mut agents = AgentConfig::preset(&self.agent_preset)
            .with_context(|| format!("unknown agent preset '{}'", self.agent_preset))?;
        if let Some(timeout) = self.decision_timeout {
            agents = agents.with_decision_timeout(timeout);
        }
        Ok(agents)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    parse_value(key, &env::var(key).ok()?)
}

fn parse_value<T>(key: &str, raw: &str) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, value = raw, error = %e, "ignoring unparsable environment value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_values_fall_back() {
        assert_eq!(parse_value::<usize>("NUM_GAMES", " 12 "), Some(12));
        assert_eq!(parse_value::<usize>("NUM_GAMES", "ten"), None);
        assert_eq!(parse_value::<u64>("GAME_SEED", "-1"), None);
    }

    #[test]
    fn defaults_play_one_seven_player_game() {
        let config = CliConfig::default();
        assert_eq!(config.num_games, 1);
        assert_eq!(config.load_game().unwrap(), GameConfig::seven_member());
        assert_eq!(config.agents().unwrap(), AgentConfig::all_random());
    }
}
