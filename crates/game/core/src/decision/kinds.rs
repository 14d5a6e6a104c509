//! Built-in decision types and their appliers.

use crate::state::{EntityId, GameState, NodeId, Position};

use super::{Applied, ApplyError, DecisionMeta, DecisionOrigin, DecisionType, Effect};

/// Moves the flow's phase pointer. Only the flow controller constructs it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetPhaseDecision {
    pub phase: NodeId,
    pub meta: DecisionMeta,
}
crate::impl_decision!(SetPhaseDecision => "core.set_phase");

impl SetPhaseDecision {
    pub(crate) fn new(phase: NodeId) -> Self {
        Self {
            phase,
            meta: DecisionMeta::immediate(DecisionOrigin::System),
        }
    }
}

pub(crate) fn apply_set_phase(
    decision: &SetPhaseDecision,
    mut state: GameState,
) -> Result<Applied, ApplyError> {
    let from = state.set_current_phase(decision.phase);
    Ok(Applied::new(state).with_effect(Effect::PhaseChanged {
        from,
        to: decision.phase,
    }))
}

/// Relocates an agent or prop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveEntityDecision {
    pub entity: EntityId,
    pub to: Position,
    pub meta: DecisionMeta,
}
crate::impl_decision!(MoveEntityDecision => "core.move_entity");

impl MoveEntityDecision {
    pub fn new(entity: EntityId, to: Position, origin: DecisionOrigin) -> Self {
        Self {
            entity,
            to,
            meta: DecisionMeta::immediate(origin),
        }
    }

    /// Postpones the move until the end of the submission.
    pub fn deferred(mut self) -> Self {
        self.meta = DecisionMeta::deferred(self.meta.origin);
        self
    }
}

pub(crate) fn apply_move_entity(
    decision: &MoveEntityDecision,
    mut state: GameState,
) -> Result<Applied, ApplyError> {
    let from = state
        .set_entity_position(decision.entity, decision.to)
        .ok_or_else(|| {
            ApplyError::rejected(
                MoveEntityDecision::KIND,
                format!("entity {} does not exist", decision.entity),
            )
        })?;

    Ok(Applied::new(state).with_effect(Effect::EntityMoved {
        id: decision.entity,
        from,
        to: decision.to,
    }))
}

/// Deletes an agent or prop from the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoveEntityDecision {
    pub entity: EntityId,
    pub meta: DecisionMeta,
}
crate::impl_decision!(RemoveEntityDecision => "core.remove_entity");

impl RemoveEntityDecision {
    pub fn new(entity: EntityId, origin: DecisionOrigin) -> Self {
        Self {
            entity,
            meta: DecisionMeta::immediate(origin),
        }
    }

    pub fn deferred(mut self) -> Self {
        self.meta = DecisionMeta::deferred(self.meta.origin);
        self
    }
}

pub(crate) fn apply_remove_entity(
    decision: &RemoveEntityDecision,
    mut state: GameState,
) -> Result<Applied, ApplyError> {
    let kind = state.remove_entity(decision.entity).ok_or_else(|| {
        ApplyError::rejected(
            RemoveEntityDecision::KIND,
            format!("entity {} does not exist", decision.entity),
        )
    })?;

    Ok(Applied::new(state).with_effect(Effect::EntityRemoved {
        id: decision.entity,
        kind,
    }))
}
