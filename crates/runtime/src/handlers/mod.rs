//! Reference handlers for the built-in commands.
//!
//! Each handler reads the state and answers with decisions; none of them
//! mutates anything. Games register their own handlers next to these.

mod movement;
mod phase;
mod spawn;

pub use movement::MoveHandler;
pub use phase::EndPhaseHandler;
pub use spawn::SpawnHandler;

use std::sync::Arc;

use game_core::{CatalogOracle, GameConfig, HandlerRegistry, RegistrationError};

/// Registry holding the spawn, move and end-phase handlers.
pub fn default_handlers(
    catalog: Arc<dyn CatalogOracle>,
    config: &GameConfig,
) -> Result<HandlerRegistry, RegistrationError> {
    let mut registry = HandlerRegistry::new();
    registry.register(SpawnHandler::new(catalog).with_max_count(config.max_spawn_count))?;
    registry.register(MoveHandler)?;
    registry.register(EndPhaseHandler)?;
    Ok(registry)
}
