//! Repository contract for the canonical game state.

use game_core::GameState;

use super::Result;

/// Owner of the canonical [`GameState`].
///
/// The pipeline loads once at the start of a submission and saves once at the
/// end; it never keeps its own copy between calls.
pub trait StateRepository: Send + Sync {
    /// Returns the stored state, or an empty state if nothing was saved yet.
    fn load(&self) -> Result<GameState>;

    /// Replaces the stored state.
    fn save(&self, state: &GameState) -> Result<()>;

    /// Whether a state has been saved.
    fn exists(&self) -> bool;
}
