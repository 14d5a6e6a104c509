//! Handler for [`MoveCommand`].

use game_core::{
    CommandHandler, CommandRejection, CommandResult, CommandType, DecisionKind, DecisionOrigin,
    DecisionType, GameState, MoveCommand, MoveEntityDecision,
};

/// Moves an existing entity onto a tile no other agent stands on.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveHandler;

impl CommandHandler<MoveCommand> for MoveHandler {
    fn handle(&self, command: &MoveCommand, state: &GameState) -> CommandResult {
        if state.entity_kind(command.entity).is_none() {
            return CommandResult::failure(CommandRejection::Failed(format!(
                "entity {} does not exist",
                command.entity
            )));
        }
        if state
            .agent_at(command.to)
            .is_some_and(|agent| agent.id != command.entity)
        {
            return CommandResult::failure(CommandRejection::Failed(format!(
                "tile {} is occupied",
                command.to
            )));
        }

        CommandResult::ok()
            .with_decision(MoveEntityDecision::new(
                command.entity,
                command.to,
                DecisionOrigin::Command(MoveCommand::KIND),
            ))
            .with_tag("movement")
    }

    fn produces(&self) -> &[DecisionKind] {
        &[MoveEntityDecision::KIND]
    }
}
