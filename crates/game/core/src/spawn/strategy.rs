//! Placement and filtering policies applied between preprocessing and
//! decision creation.

use std::collections::{BTreeSet, HashSet};

use crate::decision::{BoxedDecision, DecisionOrigin};
use crate::state::{DefinitionId, GameState, Position};

use super::SpawnDescriptor;

/// Game-specific policy adjusting descriptors before they become decisions.
pub trait SpawnStrategy: Send + Sync {
    fn process(&self, descriptors: Vec<SpawnDescriptor>, state: &GameState)
    -> Vec<SpawnDescriptor>;

    fn to_decisions(
        &self,
        descriptors: Vec<SpawnDescriptor>,
        origin: DecisionOrigin,
    ) -> Vec<BoxedDecision> {
        descriptors
            .into_iter()
            .map(|descriptor| descriptor.into_decision(origin))
            .collect()
    }
}

/// Leaves descriptors untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThroughStrategy;

impl SpawnStrategy for PassThroughStrategy {
    fn process(
        &self,
        descriptors: Vec<SpawnDescriptor>,
        _state: &GameState,
    ) -> Vec<SpawnDescriptor> {
        descriptors
    }
}

/// Sends selected definitions to one fixed tile, ignoring requested positions.
#[derive(Clone, Debug)]
pub struct DesignatedTileStrategy {
    tile: Position,
    /// `None` selects every definition.
    definitions: Option<BTreeSet<DefinitionId>>,
}

impl DesignatedTileStrategy {
    /// Every spawn lands on `tile`.
    pub fn all(tile: Position) -> Self {
        Self {
            tile,
            definitions: None,
        }
    }

    /// Only the listed definitions land on `tile`.
    pub fn for_definitions<I, D>(tile: Position, definitions: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<DefinitionId>,
    {
        Self {
            tile,
            definitions: Some(definitions.into_iter().map(Into::into).collect()),
        }
    }

    fn selects(&self, definition: &DefinitionId) -> bool {
        self.definitions
            .as_ref()
            .is_none_or(|selected| selected.contains(definition))
    }
}

impl SpawnStrategy for DesignatedTileStrategy {
    fn process(
        &self,
        mut descriptors: Vec<SpawnDescriptor>,
        _state: &GameState,
    ) -> Vec<SpawnDescriptor> {
        for descriptor in &mut descriptors {
            if self.selects(&descriptor.definition) {
                descriptor.position = Some(self.tile);
            }
        }
        descriptors
    }
}

/// Drops descriptors whose tile is already occupied, either in the state or
/// by an earlier descriptor of the same batch.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkipOccupiedStrategy;

impl SpawnStrategy for SkipOccupiedStrategy {
    fn process(
        &self,
        descriptors: Vec<SpawnDescriptor>,
        state: &GameState,
    ) -> Vec<SpawnDescriptor> {
        let mut claimed = HashSet::new();
        descriptors
            .into_iter()
            .filter(|descriptor| {
                let tile = descriptor.resolved_position();
                !state.is_occupied(tile) && claimed.insert(tile)
            })
            .collect()
    }
}

/// Runs strategies in order, each seeing the previous one's output.
#[derive(Default)]
pub struct StrategyChain {
    stages: Vec<Box<dyn SpawnStrategy>>,
}

impl StrategyChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, strategy: impl SpawnStrategy + 'static) -> Self {
        self.stages.push(Box::new(strategy));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl SpawnStrategy for StrategyChain {
    fn process(&self, descriptors: Vec<SpawnDescriptor>, state: &GameState) -> Vec<SpawnDescriptor> {
        self.stages
            .iter()
            .fold(descriptors, |descriptors, stage| stage.process(descriptors, state))
    }
}
