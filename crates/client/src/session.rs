//! Session assembly and script execution.

use std::sync::Arc;

use anyhow::Context;
use game_content::ContentFactory;
use game_core::{Effect, GameError};
use runtime::{CatalogOracleImpl, CommandPipeline, PipelineBuilder, default_handlers};

use crate::config::ClientConfig;
use crate::script::ScriptStep;

/// What one scripted step did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub index: usize,
    pub command: &'static str,
    pub success: bool,
    /// Rejection error code for failed steps.
    pub error_code: Option<&'static str>,
    pub phase: Option<String>,
}

/// A pipeline assembled from content.
pub struct Session {
    pipeline: CommandPipeline,
}

impl Session {
    /// Loads content and builds the pipeline.
    pub fn assemble(config: &ClientConfig) -> anyhow::Result<Self> {
        let content = match &config.content_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        };

        let game_config = content.load_config()?;
        let catalog: CatalogOracleImpl = content.load_catalog()?.into_iter().collect();
        tracing::info!(
            definitions = catalog.len(),
            content = %content.data_dir().display(),
            "Content loaded"
        );

        let handlers = default_handlers(Arc::new(catalog), &game_config)?;
        let flow = content.load_flow(&handlers.kinds())?;

        let mut runtime_config = config.runtime.clone();
        runtime_config.game_config = game_config;

        let pipeline = PipelineBuilder::new()
            .config(runtime_config)
            .handlers(handlers)
            .flow(flow)
            .build()
            .context("Failed to build command pipeline")?;

        Ok(Self { pipeline })
    }

    /// Forwards every effect to `callback`, starting with the next command.
    pub fn on_effect(&mut self, callback: impl FnMut(&Effect) + Send + 'static) {
        self.pipeline.subscribe(callback);
    }

    /// Runs the steps in order. Rejected steps are reported and the script
    /// continues; runtime errors stop it.
    pub fn run(&mut self, steps: Vec<ScriptStep>) -> anyhow::Result<Vec<StepOutcome>> {
        let mut outcomes = Vec::with_capacity(steps.len());

        for (index, step) in steps.into_iter().enumerate() {
            let command = step.into_command();
            let kind = command.kind();
            let result = self
                .pipeline
                .submit(command.as_ref())
                .with_context(|| format!("Step {index} ({kind}) failed"))?;

            if let Some(error) = &result.error {
                tracing::warn!(index, command = %kind, code = error.error_code(), "{error}");
            }

            outcomes.push(StepOutcome {
                index,
                command: kind.as_str(),
                success: result.is_success(),
                error_code: result.error.as_ref().map(GameError::error_code),
                phase: self.pipeline.current_phase().map(str::to_owned),
            });
        }

        Ok(outcomes)
    }

    pub fn pipeline(&self) -> &CommandPipeline {
        &self.pipeline
    }
}
