//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_auto_transitions == 0 {
            anyhow::bail!("max_auto_transitions must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("max_spawn_count = 5").unwrap();

        assert_eq!(config.max_spawn_count, 5);
        assert_eq!(
            config.max_auto_transitions,
            GameConfig::DEFAULT_MAX_AUTO_TRANSITIONS
        );
    }

    #[test]
    fn zero_transition_limit_is_rejected() {
        assert!(ConfigLoader::parse("max_auto_transitions = 0").is_err());
    }
}
