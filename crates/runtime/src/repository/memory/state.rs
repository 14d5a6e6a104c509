//! In-memory StateRepository implementation for tests and local runs.

use std::sync::RwLock;

use game_core::GameState;

use crate::repository::{RepositoryError, Result, StateRepository};

/// In-memory implementation of StateRepository.
///
/// Cloning a [`GameState`] is cheap (persistent maps), so loads hand out
/// copies without locking the writer out for long.
pub struct InMemoryStateRepo {
    state: RwLock<Option<GameState>>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(None),
        }
    }

    /// Create with an initial state.
    pub fn with_initial_state(initial_state: GameState) -> Self {
        Self {
            state: RwLock::new(Some(initial_state)),
        }
    }
}

impl Default for InMemoryStateRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn load(&self) -> Result<GameState> {
        let state = self
            .state
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(state.clone().unwrap_or_default())
    }

    fn save(&self, state: &GameState) -> Result<()> {
        let mut slot = self
            .state
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(state.clone());
        Ok(())
    }

    fn exists(&self) -> bool {
        self.state
            .read()
            .map(|state| state.is_some())
            .unwrap_or(false)
    }
}
