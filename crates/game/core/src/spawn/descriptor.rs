use crate::decision::{BoxedDecision, DecisionMeta, DecisionOrigin};
use crate::state::{DefinitionId, EntityKind, Position};

use super::{Blueprint, SpawnDecision};

/// One fully merged entity to create, produced by preprocessing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnDescriptor {
    pub definition: DefinitionId,
    /// Tile asked for by the request; strategies may replace it.
    pub position: Option<Position>,
    pub blueprint: Blueprint,
}

impl SpawnDescriptor {
    pub fn entity_kind(&self) -> EntityKind {
        self.blueprint.entity_kind()
    }

    /// Tile the entity will occupy: the chosen position or the origin.
    pub fn resolved_position(&self) -> Position {
        self.position.unwrap_or(Position::ORIGIN)
    }

    /// Wraps the descriptor in the matching immediate `SpawnDecision`.
    pub fn into_decision(self, origin: DecisionOrigin) -> BoxedDecision {
        let position = self.resolved_position();
        let meta = DecisionMeta::immediate(origin);
        match self.blueprint {
            Blueprint::Agent(blueprint) => Box::new(SpawnDecision {
                definition: self.definition,
                position,
                blueprint,
                meta,
            }),
            Blueprint::Prop(blueprint) => Box::new(SpawnDecision {
                definition: self.definition,
                position,
                blueprint,
                meta,
            }),
        }
    }
}
