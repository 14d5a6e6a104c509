use crate::command::{Command, CommandKind, CommandResult};
use crate::decision::{BoxedDecision, Decision, DecisionKind};
use crate::state::{GameState, NodeId};

/// What a leaf wants after seeing a command outcome.
#[derive(Debug, Default)]
pub struct LeafReaction {
    pub decisions: Vec<BoxedDecision>,
    pub transition_requested: bool,
}

impl LeafReaction {
    /// No decisions, stay on this leaf.
    pub fn stay() -> Self {
        Self::default()
    }

    /// No decisions, move on to the next leaf.
    pub fn advance() -> Self {
        Self {
            decisions: Vec::new(),
            transition_requested: true,
        }
    }

    pub fn with_decision(mut self, decision: impl Decision) -> Self {
        self.decisions.push(Box::new(decision));
        self
    }

    pub fn with_decisions(mut self, decisions: impl IntoIterator<Item = BoxedDecision>) -> Self {
        self.decisions.extend(decisions);
        self
    }
}

/// Behaviour of a leaf node, the only node kind that can be current.
///
/// Hooks return decisions rather than touching the state, so every change
/// still goes through the applier registry. `node` is the leaf's own id,
/// handy for [`DecisionOrigin::Phase`](crate::decision::DecisionOrigin::Phase).
pub trait FlowLeaf: Send + Sync {
    /// Command kinds legal while this leaf is current.
    fn allowed_commands(&self) -> &[CommandKind];

    fn on_enter(&self, _node: NodeId, _state: &GameState) -> Vec<BoxedDecision> {
        Vec::new()
    }

    fn on_exit(&self, _node: NodeId, _state: &GameState) -> Vec<BoxedDecision> {
        Vec::new()
    }

    fn on_command_executed(
        &self,
        node: NodeId,
        command: &dyn Command,
        result: &CommandResult,
        state: &GameState,
    ) -> LeafReaction;

    /// Called instead of [`on_command_executed`](Self::on_command_executed)
    /// when the leaf was entered during the same submission, so the outcome
    /// belongs to an earlier phase. Requesting a transition here chains the
    /// leaf through as a pass-through phase.
    fn on_command_forwarded(
        &self,
        node: NodeId,
        command: &dyn Command,
        result: &CommandResult,
        state: &GameState,
    ) -> LeafReaction {
        self.on_command_executed(node, command, result, state)
    }

    /// Decision kinds the hooks may emit; verified when the pipeline is built.
    fn produces(&self) -> &[DecisionKind] {
        &[]
    }
}
