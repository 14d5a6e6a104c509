//! Commands the engine ships with.

use crate::spawn::SpawnRequest;
use crate::state::{EntityId, Position};

/// Spawns entities from catalog definitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnCommand {
    pub requests: Vec<SpawnRequest>,
}
crate::impl_command!(SpawnCommand => "core.spawn");

impl SpawnCommand {
    pub fn new(requests: Vec<SpawnRequest>) -> Self {
        Self { requests }
    }

    pub fn single(request: SpawnRequest) -> Self {
        Self {
            requests: vec![request],
        }
    }
}

/// Moves one entity to a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveCommand {
    pub entity: EntityId,
    pub to: Position,
}
crate::impl_command!(MoveCommand => "core.move");

impl MoveCommand {
    pub fn new(entity: EntityId, to: Position) -> Self {
        Self { entity, to }
    }
}

/// Asks the current phase to hand over to the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EndPhaseCommand;
crate::impl_command!(EndPhaseCommand => "core.end_phase");

/// Clears a pending acknowledgment. Intercepted by the pipeline and never
/// routed to a handler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AcknowledgeCommand;
crate::impl_command!(AcknowledgeCommand => "core.acknowledge");
