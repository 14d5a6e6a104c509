//! Assembly and startup verification of a [`CommandPipeline`].

use std::sync::Arc;

use game_core::{
    AcknowledgeCommand, Applier, ApplierRegistry, CommandHandler, CommandKind, CommandType,
    DecisionType, FlowController, FlowOutcome, FsmTree, HandlerRegistry, RegistrationError,
};
use tracing::info;

use crate::api::{Result, RuntimeError};
use crate::events::EffectBus;
use crate::repository::StateRepository;
use crate::runtime::RuntimeConfig;

use super::{AdmissionGate, CommandPipeline};

/// Builder for [`CommandPipeline`].
///
/// Only the flow tree is required. Appliers default to the core set, the gate
/// and repository default to what the [`RuntimeConfig`] implies.
pub struct PipelineBuilder {
    config: RuntimeConfig,
    handlers: HandlerRegistry,
    appliers: ApplierRegistry,
    tree: Option<FsmTree>,
    gate: Option<Box<dyn AdmissionGate>>,
    repository: Option<Arc<dyn StateRepository>>,
    bus: EffectBus,
    registration_error: Option<RegistrationError>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            handlers: HandlerRegistry::new(),
            appliers: ApplierRegistry::with_core_appliers(),
            tree: None,
            gate: None,
            repository: None,
            bus: EffectBus::new(),
            registration_error: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers the handler for command type `C`. A duplicate is reported
    /// by [`build`](Self::build).
    pub fn handler<C, H>(mut self, handler: H) -> Self
    where
        C: CommandType,
        H: CommandHandler<C>,
    {
        if let Err(error) = self.handlers.register::<C, H>(handler) {
            self.registration_error.get_or_insert(error);
        }
        self
    }

    /// Replaces the handler registry wholesale.
    pub fn handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = handlers;
        self
    }

    /// Registers an extra applier on top of the current registry.
    pub fn applier<D, A>(mut self, applier: A) -> Self
    where
        D: DecisionType,
        A: Applier<D>,
    {
        if let Err(error) = self.appliers.register::<D, A>(applier) {
            self.registration_error.get_or_insert(error);
        }
        self
    }

    /// Replaces the applier registry wholesale (including the core appliers).
    pub fn appliers(mut self, appliers: ApplierRegistry) -> Self {
        self.appliers = appliers;
        self
    }

    pub fn flow(mut self, tree: FsmTree) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn gate(mut self, gate: impl AdmissionGate + 'static) -> Self {
        self.gate = Some(Box::new(gate));
        self
    }

    pub fn repository(mut self, repository: Arc<dyn StateRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Uses a bus that already has subscribers, so they see the effects of
    /// entering the first phase.
    pub fn bus(mut self, bus: EffectBus) -> Self {
        self.bus = bus;
        self
    }

    /// Verifies the wiring, enters the first phase and persists that state.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::Registration`] for a duplicate handler or applier
    /// - [`RuntimeError::MissingComponent`] without a flow tree
    /// - [`RuntimeError::Wiring`] if a phase allows a command nobody handles,
    ///   or anything may produce a decision nobody applies
    /// - whatever entering the first phase or saving the state raises
    pub fn build(self) -> Result<CommandPipeline> {
        let Self {
            config,
            handlers,
            appliers,
            tree,
            gate,
            repository,
            mut bus,
            registration_error,
        } = self;

        if let Some(error) = registration_error {
            return Err(error.into());
        }
        let tree = tree.ok_or(RuntimeError::MissingComponent("flow tree"))?;
        verify_wiring(&handlers, &appliers, &tree)?;

        let repository = match repository {
            Some(repository) => repository,
            None => config.repository()?,
        };
        let gate = gate.unwrap_or_else(|| config.gate());

        let mut flow = FlowController::new(tree, &config.game_config);
        let FlowOutcome {
            applied,
            deferred,
            current,
            ..
        } = flow.start(repository.load()?, &appliers)?;
        let (state, mut effects) = applied.into_parts();
        let flushed = appliers.apply_all(deferred.iter().map(|decision| decision.as_ref()), state)?;
        let (state, deferred_effects) = flushed.into_parts();
        effects.extend(deferred_effects);

        repository.save(&state)?;
        flow.commit(current);

        info!(
            target: "runtime::pipeline",
            phase = flow.current_name().unwrap_or_default(),
            handlers = handlers.kinds().len(),
            appliers = appliers.len(),
            "Pipeline ready"
        );
        bus.publish_all(&effects);

        Ok(CommandPipeline {
            handlers,
            appliers,
            flow,
            gate,
            repository,
            bus,
            pending_acknowledgment: false,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects every missing handler or applier instead of stopping at the first.
fn verify_wiring(
    handlers: &HandlerRegistry,
    appliers: &ApplierRegistry,
    tree: &FsmTree,
) -> Result<()> {
    let mut issues = Vec::new();

    for id in tree.leaves() {
        let Some(leaf) = tree.leaf(id) else {
            continue;
        };
        let path = tree.path(id);

        for &kind in leaf.allowed_commands() {
            if !is_intercepted(kind) && !handlers.contains(kind) {
                issues.push(format!(
                    "phase '{path}' allows '{kind}' but no handler is registered"
                ));
            }
        }
        for &kind in leaf.produces() {
            if !appliers.contains(kind) {
                issues.push(format!(
                    "phase '{path}' may produce '{kind}' but no applier is registered"
                ));
            }
        }
    }

    for command in handlers.kinds() {
        for &kind in handlers.produces(command) {
            if !appliers.contains(kind) {
                issues.push(format!(
                    "handler for '{command}' may produce '{kind}' but no applier is registered"
                ));
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(RuntimeError::Wiring { issues })
    }
}

fn is_intercepted(kind: CommandKind) -> bool {
    kind == AcknowledgeCommand::KIND
}
