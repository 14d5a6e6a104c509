//! The command pipeline: the only entry point that changes the game.
//!
//! [`CommandPipeline::submit`] runs one command to completion: admission,
//! phase legality, the handler, immediate decisions, the flow reaction,
//! deferred decisions, then a single save. Effects reach the bus only after
//! the save succeeds. A submission either commits entirely or leaves no trace.

mod builder;
mod gate;

pub use builder::PipelineBuilder;
pub use gate::{AcknowledgmentGate, Admission, AdmissionGate, OpenGate};

use std::sync::Arc;

use game_core::{
    AcknowledgeCommand, Applied, ApplierRegistry, Command, CommandKind, CommandRejection,
    CommandResult, CommandType, Decision, Effect, FlowController, GameState, HandlerRegistry,
    NodeId,
};
use tracing::{debug, info, warn};

use crate::api::{Result, RuntimeError};
use crate::events::{EffectBus, SubscriptionId, Topic};
use crate::repository::StateRepository;

/// Everything a successful submission produced, not yet persisted.
struct Submission {
    state: GameState,
    effects: Vec<Effect>,
    current: NodeId,
    entered: usize,
    completed: bool,
}

/// Drives commands through handlers, appliers and the phase flow.
///
/// Build one with [`PipelineBuilder`]. The pipeline is synchronous and not
/// re-entrant: `submit` takes `&mut self`.
pub struct CommandPipeline {
    handlers: HandlerRegistry,
    appliers: ApplierRegistry,
    flow: FlowController,
    gate: Box<dyn AdmissionGate>,
    repository: Arc<dyn StateRepository>,
    bus: EffectBus,
    pending_acknowledgment: bool,
}

impl CommandPipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Submits one command.
    ///
    /// Rejections (acknowledgment, admission, phase legality, handler or
    /// applier refusals) come back as a failed [`CommandResult`] with nothing
    /// changed.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::NoHandlerRegistered`] if nothing handles the kind
    /// - [`RuntimeError::Flow`] if the flow loops or a hook cannot be applied
    ///   for a reason other than a domain rejection
    /// - [`RuntimeError::Repository`] if the state cannot be loaded or saved
    pub fn submit(&mut self, command: &dyn Command) -> Result<CommandResult> {
        let kind = command.kind();

        if kind == AcknowledgeCommand::KIND {
            return Ok(if self.acknowledge() {
                CommandResult::ok().with_tag("acknowledged")
            } else {
                CommandResult::failure(CommandRejection::NoPendingAcknowledgment)
            });
        }

        if self.pending_acknowledgment {
            debug!(
                target: "runtime::pipeline",
                command = %kind,
                "Rejected while awaiting acknowledgment"
            );
            return Ok(CommandResult::failure(
                CommandRejection::AwaitingAcknowledgment,
            ));
        }

        if !self.handlers.contains(kind) {
            return Err(RuntimeError::NoHandlerRegistered { kind });
        }

        let admission = self.gate.validate(command);
        if !admission.allowed {
            let reason = admission
                .reason
                .unwrap_or_else(|| "refused by admission gate".to_owned());
            debug!(target: "runtime::pipeline", command = %kind, %reason, "Denied");
            return Ok(CommandResult::failure(CommandRejection::Denied(reason)));
        }

        if !self.flow.is_allowed(kind) {
            let phase = self.current_phase().unwrap_or("<not started>").to_owned();
            debug!(target: "runtime::pipeline", command = %kind, %phase, "Not allowed in phase");
            return Ok(CommandResult::failure(CommandRejection::NotAllowed {
                command: kind,
                phase,
            }));
        }

        let state = self.repository.load()?;
        let result = self.handlers.handle(command, &state)?;
        if !result.is_success() {
            debug!(
                target: "runtime::pipeline",
                command = %kind,
                error = ?result.error,
                "Handler refused command"
            );
            return Ok(result);
        }

        let submission = match self.execute(command, &result, state) {
            Ok(submission) => submission,
            Err(error) => {
                if let Some(rejection) = error.as_rejection() {
                    warn!(
                        target: "runtime::pipeline",
                        command = %kind,
                        error = %rejection,
                        "Decision rejected; submission rolled back"
                    );
                    return Ok(CommandResult::failure(CommandRejection::ApplyFailed(
                        rejection.to_string(),
                    )));
                }
                return Err(error);
            }
        };

        self.repository.save(&submission.state)?;
        self.flow.commit(submission.current);
        if admission.requires_acknowledgment {
            self.pending_acknowledgment = true;
        }

        if submission.entered > 0 || submission.completed {
            debug!(
                target: "runtime::flow",
                phase = self.current_phase().unwrap_or_default(),
                entered = submission.entered,
                completed = submission.completed,
                "Flow advanced"
            );
        }
        info!(
            target: "runtime::pipeline",
            command = %kind,
            decisions = result.decisions.len(),
            effects = submission.effects.len(),
            awaiting_ack = self.pending_acknowledgment,
            "Command executed"
        );

        self.bus.publish_all(&submission.effects);
        Ok(result)
    }

    /// Clears a pending acknowledgment; returns whether one was pending.
    pub fn acknowledge(&mut self) -> bool {
        std::mem::take(&mut self.pending_acknowledgment)
    }

    pub fn is_awaiting_acknowledgment(&self) -> bool {
        self.pending_acknowledgment
    }

    /// Name of the current leaf.
    pub fn current_phase(&self) -> Option<&str> {
        self.flow.current_name()
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.flow.current()
    }

    /// Command kinds the current leaf accepts.
    pub fn allowed_commands(&self) -> &[CommandKind] {
        self.flow.allowed_commands()
    }

    pub fn flow(&self) -> &FlowController {
        &self.flow
    }

    /// Reads the persisted state.
    pub fn state(&self) -> Result<GameState> {
        Ok(self.repository.load()?)
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&Effect) + Send + 'static) -> SubscriptionId {
        self.bus.subscribe(callback)
    }

    pub fn subscribe_topic(
        &mut self,
        topic: Topic,
        callback: impl FnMut(&Effect) + Send + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe_topic(topic, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Applies the handler's decisions, runs the flow, then flushes deferred
    /// decisions. Touches neither the repository nor `self`.
    fn execute(
        &self,
        command: &dyn Command,
        result: &CommandResult,
        state: GameState,
    ) -> Result<Submission> {
        let mut applied = Applied::new(state);
        let mut deferred: Vec<&dyn Decision> = Vec::new();
        for decision in &result.decisions {
            if decision.is_deferred() {
                deferred.push(decision.as_ref());
            } else {
                applied = self.appliers.fold(decision.as_ref(), applied)?;
            }
        }

        let (state, mut effects) = applied.into_parts();
        let outcome = self
            .flow
            .on_command_executed(command, result, state, &self.appliers)?;
        let (state, flow_effects) = outcome.applied.into_parts();
        effects.extend(flow_effects);

        deferred.extend(outcome.deferred.iter().map(|decision| decision.as_ref()));
        let flushed = self.appliers.apply_all(deferred, state)?;
        let (state, deferred_effects) = flushed.into_parts();
        effects.extend(deferred_effects);

        Ok(Submission {
            state,
            effects,
            current: outcome.current,
            entered: outcome.entered.len(),
            completed: outcome.completed,
        })
    }
}

impl std::fmt::Debug for CommandPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandPipeline")
            .field("handlers", &self.handlers)
            .field("appliers", &self.appliers)
            .field("flow", &self.flow)
            .field("bus", &self.bus)
            .field("pending_acknowledgment", &self.pending_acknowledgment)
            .finish_non_exhaustive()
    }
}
