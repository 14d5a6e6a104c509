//! Handler for [`EndPhaseCommand`].

use game_core::{CommandHandler, CommandResult, EndPhaseCommand, GameState};

/// Accepts the request; whether the phase actually ends is up to the
/// current leaf.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndPhaseHandler;

impl CommandHandler<EndPhaseCommand> for EndPhaseHandler {
    fn handle(&self, _command: &EndPhaseCommand, _state: &GameState) -> CommandResult {
        CommandResult::ok().with_tag("end_phase")
    }
}
