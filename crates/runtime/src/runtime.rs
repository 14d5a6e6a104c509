//! Runtime configuration shared by the pipeline builder and embedding clients.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use game_core::GameConfig;

use crate::pipeline::{AcknowledgmentGate, AdmissionGate, OpenGate};
use crate::repository::{FileStateRepository, InMemoryStateRepo, Result, StateRepository};

/// Runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Command kinds that must be acknowledged before the next submission.
    pub acknowledgment_commands: Vec<String>,
    /// Persist state under this directory; in memory when `None`.
    pub state_dir: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Reads overrides from the environment, falling back to defaults.
    ///
    /// - `MAX_AUTO_TRANSITIONS`, `MAX_SPAWN_COUNT`: numeric limits
    /// - `ACK_COMMANDS`: comma-separated command kinds
    /// - `STATE_DIR`: directory for the file repository
    pub fn from_env() -> Self {
        let mut game_config = GameConfig::default();
        if let Some(limit) = read_env("MAX_AUTO_TRANSITIONS") {
            game_config.max_auto_transitions = limit;
        }
        if let Some(limit) = read_env("MAX_SPAWN_COUNT") {
            game_config.max_spawn_count = limit;
        }

        let acknowledgment_commands = std::env::var("ACK_COMMANDS")
            .map(|value| parse_list(&value))
            .unwrap_or_default();

        let state_dir = std::env::var("STATE_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Self {
            game_config,
            acknowledgment_commands,
            state_dir,
        }
    }

    pub fn with_game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = game_config;
        self
    }

    pub fn with_acknowledgment_commands<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.acknowledgment_commands = kinds.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(dir.into());
        self
    }

    /// Gate implied by the acknowledgment list.
    pub fn gate(&self) -> Box<dyn AdmissionGate> {
        if self.acknowledgment_commands.is_empty() {
            Box::new(OpenGate)
        } else {
            Box::new(AcknowledgmentGate::new(
                self.acknowledgment_commands.iter().cloned(),
            ))
        }
    }

    /// Repository implied by `state_dir`.
    pub fn repository(&self) -> Result<Arc<dyn StateRepository>> {
        Ok(match &self.state_dir {
            Some(dir) => Arc::new(FileStateRepository::new(dir)?),
            None => Arc::new(InMemoryStateRepo::new()),
        })
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    let value = std::env::var(key).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(target: "runtime::config", key, value = %value, "Ignoring unparsable value");
            None
        }
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}
