//! Handler for [`SpawnCommand`].

use std::sync::Arc;

use game_core::{
    AgentBlueprint, CatalogOracle, CommandHandler, CommandResult, CommandType, DecisionKind,
    DecisionOrigin, GameState, PropBlueprint, SpawnBlueprint, SpawnCommand, SpawnPipeline,
};
use tracing::{debug, warn};

/// Runs the spawn pipeline against the catalog.
///
/// Requests with unknown or unusable definitions are skipped and logged; the
/// rest of the batch still spawns.
pub struct SpawnHandler {
    catalog: Arc<dyn CatalogOracle>,
    pipeline: SpawnPipeline,
}

impl SpawnHandler {
    const PRODUCES: &'static [DecisionKind] = &[
        <AgentBlueprint as SpawnBlueprint>::DECISION_KIND,
        <PropBlueprint as SpawnBlueprint>::DECISION_KIND,
    ];

    pub fn new(catalog: Arc<dyn CatalogOracle>) -> Self {
        Self {
            catalog,
            pipeline: SpawnPipeline::default(),
        }
    }

    /// Replaces the pipeline, e.g. to install a placement strategy.
    pub fn with_pipeline(mut self, pipeline: SpawnPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn with_max_count(mut self, max_count: u32) -> Self {
        self.pipeline = self.pipeline.with_max_count(max_count);
        self
    }
}

impl CommandHandler<SpawnCommand> for SpawnHandler {
    fn handle(&self, command: &SpawnCommand, state: &GameState) -> CommandResult {
        let batch = self.pipeline.run(
            &command.requests,
            self.catalog.as_ref(),
            state,
            DecisionOrigin::Command(SpawnCommand::KIND),
        );

        for skipped in &batch.skipped {
            warn!(
                target: "runtime::spawn",
                index = skipped.index,
                definition = %skipped.definition,
                error = %skipped.error,
                "Skipping spawn request"
            );
        }
        for ignored in &batch.ignored_overrides {
            debug!(
                target: "runtime::spawn",
                index = ignored.index,
                key = %ignored.key,
                "Ignoring unknown override"
            );
        }

        CommandResult::with_decisions(batch.decisions).with_tag("spawn")
    }

    fn produces(&self) -> &[DecisionKind] {
        Self::PRODUCES
    }
}
