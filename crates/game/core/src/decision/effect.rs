use crate::state::{DefinitionId, EntityId, EntityKind, NodeId, Position};

/// Externally observable fact describing something that already happened.
///
/// Effects are produced by appliers (and by the flow controller when the flow
/// ends). They never mutate anything; subscribers only read them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    EntitySpawned {
        id: EntityId,
        kind: EntityKind,
        definition: DefinitionId,
        position: Position,
    },

    EntityMoved {
        id: EntityId,
        from: Position,
        to: Position,
    },

    EntityRemoved {
        id: EntityId,
        kind: EntityKind,
    },

    PhaseChanged {
        from: Option<NodeId>,
        to: NodeId,
    },

    /// The flow walked past its terminal leaf; `at` stays current.
    FlowCompleted {
        at: NodeId,
    },

    /// Free-form fact for game-specific appliers.
    Note {
        topic: String,
        message: String,
    },
}

impl Effect {
    /// Entity this effect is about, if any.
    pub fn entity(&self) -> Option<EntityId> {
        match self {
            Effect::EntitySpawned { id, .. }
            | Effect::EntityMoved { id, .. }
            | Effect::EntityRemoved { id, .. } => Some(*id),
            Effect::PhaseChanged { .. } | Effect::FlowCompleted { .. } | Effect::Note { .. } => {
                None
            }
        }
    }

    /// Whether this effect concerns the phase flow rather than entities.
    pub fn is_flow(&self) -> bool {
        matches!(
            self,
            Effect::PhaseChanged { .. } | Effect::FlowCompleted { .. }
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::EntitySpawned { .. } => "entity_spawned",
            Effect::EntityMoved { .. } => "entity_moved",
            Effect::EntityRemoved { .. } => "entity_removed",
            Effect::PhaseChanged { .. } => "phase_changed",
            Effect::FlowCompleted { .. } => "flow_completed",
            Effect::Note { .. } => "note",
        }
    }
}
