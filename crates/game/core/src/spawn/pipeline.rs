//! Request → descriptor → strategy → decision.

use crate::config::GameConfig;
use crate::decision::{BoxedDecision, DecisionOrigin};
use crate::env::{CatalogOracle, DefinitionKind, OracleError};
use crate::state::{DefinitionId, GameState};

use super::{
    AgentBlueprint, Blueprint, PassThroughStrategy, PropBlueprint, SpawnDescriptor, SpawnRequest,
    SpawnStrategy,
};

/// A request that produced no descriptors because its definition is unusable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRequest {
    /// Position of the request in its batch.
    pub index: usize,
    pub definition: DefinitionId,
    pub error: OracleError,
}

/// An override key the definition's mapping did not recognise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoredOverride {
    pub index: usize,
    pub key: String,
}

/// Preprocessing output: descriptors in request order plus what was dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnPlan {
    pub descriptors: Vec<SpawnDescriptor>,
    pub skipped: Vec<SkippedRequest>,
    pub ignored_overrides: Vec<IgnoredOverride>,
}

/// Decisions ready for the applier registry, with the plan's diagnostics.
#[derive(Debug, Default)]
pub struct SpawnBatch {
    pub decisions: Vec<BoxedDecision>,
    pub skipped: Vec<SkippedRequest>,
    pub ignored_overrides: Vec<IgnoredOverride>,
}

/// Spawn pipeline with a pluggable strategy stage.
pub struct SpawnPipeline {
    strategy: Box<dyn SpawnStrategy>,
    max_count: u32,
}

impl SpawnPipeline {
    pub fn new(strategy: impl SpawnStrategy + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
            max_count: GameConfig::DEFAULT_MAX_SPAWN_COUNT,
        }
    }

    /// Caps the `count` of any single request.
    pub fn with_max_count(mut self, max_count: u32) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Expands requests into descriptors.
    ///
    /// Unknown definitions skip their request only; `count == 0` yields
    /// nothing; counts above the cap are clamped.
    pub fn preprocess(&self, requests: &[SpawnRequest], catalog: &dyn CatalogOracle) -> SpawnPlan {
        let mut plan = SpawnPlan::default();

        for (index, request) in requests.iter().enumerate() {
            let definition = match catalog.require(&request.definition) {
                Ok(definition) => definition,
                Err(error) => {
                    plan.skipped.push(SkippedRequest {
                        index,
                        definition: request.definition.clone(),
                        error,
                    });
                    continue;
                }
            };

            let (blueprint, ignored) = match &definition.kind {
                DefinitionKind::Agent(template) => {
                    let mut blueprint = AgentBlueprint::from_template(template);
                    let ignored = blueprint.apply_overrides(&request.overrides);
                    (Blueprint::Agent(blueprint), ignored)
                }
                DefinitionKind::Prop(template) => {
                    let mut blueprint = PropBlueprint::from_template(template);
                    let ignored = blueprint.apply_overrides(&request.overrides);
                    (Blueprint::Prop(blueprint), ignored)
                }
            };
            plan.ignored_overrides
                .extend(ignored.into_iter().map(|key| IgnoredOverride { index, key }));

            let count = request.count.min(self.max_count);
            plan.descriptors
                .extend((0..count).map(|_| SpawnDescriptor {
                    definition: definition.id.clone(),
                    position: request.position,
                    blueprint: blueprint.clone(),
                }));
        }

        plan
    }

    /// Runs all stages and returns decisions in request order.
    pub fn run(
        &self,
        requests: &[SpawnRequest],
        catalog: &dyn CatalogOracle,
        state: &GameState,
        origin: DecisionOrigin,
    ) -> SpawnBatch {
        let SpawnPlan {
            descriptors,
            skipped,
            ignored_overrides,
        } = self.preprocess(requests, catalog);

        let descriptors = self.strategy.process(descriptors, state);
        SpawnBatch {
            decisions: self.strategy.to_decisions(descriptors, origin),
            skipped,
            ignored_overrides,
        }
    }
}

impl Default for SpawnPipeline {
    fn default() -> Self {
        Self::new(PassThroughStrategy)
    }
}

impl std::fmt::Debug for SpawnPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpawnPipeline")
            .field("max_count", &self.max_count)
            .finish_non_exhaustive()
    }
}
