//! Spawn decisions and the generic per-kind applier.

use core::any::Any;
use core::marker::PhantomData;

use crate::decision::{
    Applied, Applier, ApplyError, Decision, DecisionKind, DecisionMeta, DecisionType, Effect,
};
use crate::state::{DefinitionId, GameState, Position};

use super::SpawnBlueprint;

/// Applyable "create this entity here" intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnDecision<B: SpawnBlueprint> {
    pub definition: DefinitionId,
    pub position: Position,
    pub blueprint: B,
    pub meta: DecisionMeta,
}

impl<B: SpawnBlueprint> DecisionType for SpawnDecision<B> {
    const KIND: DecisionKind = B::DECISION_KIND;
}

impl<B: SpawnBlueprint> Decision for SpawnDecision<B> {
    fn kind(&self) -> DecisionKind {
        B::DECISION_KIND
    }

    fn meta(&self) -> DecisionMeta {
        self.meta
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Allocates an id, instantiates `B`, inserts it, emits `EntitySpawned`.
pub struct SpawnApplier<B> {
    _blueprint: PhantomData<fn() -> B>,
}

impl<B: SpawnBlueprint> SpawnApplier<B> {
    pub fn new() -> Self {
        Self {
            _blueprint: PhantomData,
        }
    }
}

impl<B: SpawnBlueprint> Default for SpawnApplier<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: SpawnBlueprint> Applier<SpawnDecision<B>> for SpawnApplier<B> {
    fn apply(
        &self,
        decision: &SpawnDecision<B>,
        mut state: GameState,
    ) -> Result<Applied, ApplyError> {
        let id = state.allocate_entity_id();
        decision
            .blueprint
            .insert_into(&mut state, id, &decision.definition, decision.position);

        Ok(Applied::new(state).with_effect(Effect::EntitySpawned {
            id,
            kind: B::ENTITY_KIND,
            definition: decision.definition.clone(),
            position: decision.position,
        }))
    }
}
