//! Game configuration loader.

use std::path::Path;

use game_core::{GameConfig, GamePreset};

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to the seven-player defaults. The result is
    /// validated before it is returned.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid game config: {}", e))?;
        Ok(config)
    }

    /// Named preset, see [`GamePreset`] for the accepted names.
    pub fn preset(name: &str) -> LoadResult<GameConfig> {
        let preset: GamePreset = name
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown game preset '{}'", name))?;
        Ok(preset.config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::BodyDiscovery;

    #[test]
    fn bundled_config_is_the_seven_player_preset() {
        let config = ConfigLoader::parse(include_str!("../../data/config.toml")).unwrap();
        assert_eq!(config, GameConfig::seven_member());
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config = ConfigLoader::parse(
            r#"
            num_players = 5
            num_impostors = 1
            body_discovery = "automatic"
            "#,
        )
        .unwrap();
        assert_eq!(config.num_players, 5);
        assert_eq!(config.discussion_rounds, GameConfig::DEFAULT_DISCUSSION_ROUNDS);
        assert_eq!(config.body_discovery, BodyDiscovery::Automatic);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(ConfigLoader::parse("num_players = 3\nnum_impostors = 3").is_err());
    }

    #[test]
    fn presets_by_name() {
        assert_eq!(ConfigLoader::preset("Nine").unwrap(), GameConfig::nine_member());
        assert_eq!(ConfigLoader::preset("7").unwrap(), GameConfig::seven_member());
        assert!(ConfigLoader::preset("eleven").is_err());
    }
}
