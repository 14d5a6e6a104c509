//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::GameState;

use crate::repository::{RepositoryError, Result, StateRepository};

/// File-based implementation of StateRepository.
///
/// Stores the game state as a single bincode file, replaced atomically on
/// every save (write to a temp file, then rename).
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    const FILE_NAME: &'static str = "state.bin";

    /// Create a new file-based state repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::io(&base_dir))?;
        Ok(Self { base_dir })
    }

    /// Path of the state file.
    pub fn state_path(&self) -> PathBuf {
        self.base_dir.join(Self::FILE_NAME)
    }
}

impl StateRepository for FileStateRepository {
    fn load(&self) -> Result<GameState> {
        let path = self.state_path();

        if !path.exists() {
            return Ok(GameState::empty());
        }

        let bytes = fs::read(&path).map_err(RepositoryError::io(&path))?;
        let state: GameState =
            bincode::deserialize(&bytes).map_err(|e| RepositoryError::Decode {
                path: path.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            target: "runtime::repository",
            path = %path.display(),
            entities = state.entity_count(),
            "Loaded state"
        );

        Ok(state)
    }

    fn save(&self, state: &GameState) -> Result<()> {
        let path = self.state_path();
        let temp_path = path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(state).map_err(|e| RepositoryError::Encode(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::io(&temp_path))?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::io(&path))?;

        tracing::debug!(
            target: "runtime::repository",
            path = %path.display(),
            entities = state.entity_count(),
            "Saved state"
        );

        Ok(())
    }

    fn exists(&self) -> bool {
        self.state_path().exists()
    }
}
