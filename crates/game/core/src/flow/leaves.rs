//! Reusable leaf implementations.

use std::fmt;

use crate::command::{Command, CommandKind, CommandResult};
use crate::decision::{BoxedDecision, DecisionKind};
use crate::state::{GameState, NodeId};

use super::{FlowLeaf, LeafReaction};

type HookFn = Box<dyn Fn(NodeId, &GameState) -> Vec<BoxedDecision> + Send + Sync>;

/// When a [`PhaseLeaf`] asks to move on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AdvanceOn {
    /// Only an explicit transition elsewhere ends the phase.
    #[default]
    Never,
    /// Any command offered to the leaf.
    Any,
    /// Only the listed command kinds, and only when executed in this phase.
    Kinds(Vec<CommandKind>),
}

impl AdvanceOn {
    fn matches(&self, kind: CommandKind) -> bool {
        match self {
            AdvanceOn::Never => false,
            AdvanceOn::Any => true,
            AdvanceOn::Kinds(kinds) => kinds.contains(&kind),
        }
    }

    /// Outcomes forwarded from an earlier phase only chain through `Any`.
    fn matches_forwarded(&self) -> bool {
        matches!(self, AdvanceOn::Any)
    }
}

/// Configurable leaf: an allowed command set, an advance rule, and optional
/// enter/exit decision factories.
///
/// ```ignore
/// let setup = PhaseLeaf::new()
///     .allow(SpawnCommand::KIND)
///     .allow(EndPhaseCommand::KIND)
///     .advance_on(EndPhaseCommand::KIND);
/// ```
#[derive(Default)]
pub struct PhaseLeaf {
    allowed: Vec<CommandKind>,
    advance: AdvanceOn,
    on_enter: Vec<HookFn>,
    on_exit: Vec<HookFn>,
    produces: Vec<DecisionKind>,
}

impl PhaseLeaf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(mut self, kind: CommandKind) -> Self {
        if !self.allowed.contains(&kind) {
            self.allowed.push(kind);
        }
        self
    }

    pub fn allow_all(self, kinds: impl IntoIterator<Item = CommandKind>) -> Self {
        kinds.into_iter().fold(self, Self::allow)
    }

    /// Requests a transition after `kind` executes while this leaf is
    /// current. The kind is also allowed.
    pub fn advance_on(mut self, kind: CommandKind) -> Self {
        self = self.allow(kind);
        match &mut self.advance {
            AdvanceOn::Kinds(kinds) => kinds.push(kind),
            other => *other = AdvanceOn::Kinds(vec![kind]),
        }
        self
    }

    /// Requests a transition after every command offered to the leaf,
    /// including outcomes forwarded from a previous phase in the same chain.
    pub fn advance_on_any(mut self) -> Self {
        self.advance = AdvanceOn::Any;
        self
    }

    /// Adds an enter hook; `produces` lists the decision kinds it may emit.
    pub fn on_enter<F>(mut self, produces: &[DecisionKind], hook: F) -> Self
    where
        F: Fn(NodeId, &GameState) -> Vec<BoxedDecision> + Send + Sync + 'static,
    {
        self.produces.extend_from_slice(produces);
        self.on_enter.push(Box::new(hook));
        self
    }

    pub fn on_exit<F>(mut self, produces: &[DecisionKind], hook: F) -> Self
    where
        F: Fn(NodeId, &GameState) -> Vec<BoxedDecision> + Send + Sync + 'static,
    {
        self.produces.extend_from_slice(produces);
        self.on_exit.push(Box::new(hook));
        self
    }

    pub fn advance_rule(&self) -> &AdvanceOn {
        &self.advance
    }
}

fn run_hooks(hooks: &[HookFn], node: NodeId, state: &GameState) -> Vec<BoxedDecision> {
    hooks.iter().flat_map(|hook| hook(node, state)).collect()
}

impl FlowLeaf for PhaseLeaf {
    fn allowed_commands(&self) -> &[CommandKind] {
        &self.allowed
    }

    fn on_enter(&self, node: NodeId, state: &GameState) -> Vec<BoxedDecision> {
        run_hooks(&self.on_enter, node, state)
    }

    fn on_exit(&self, node: NodeId, state: &GameState) -> Vec<BoxedDecision> {
        run_hooks(&self.on_exit, node, state)
    }

    fn on_command_executed(
        &self,
        _node: NodeId,
        command: &dyn Command,
        _result: &CommandResult,
        _state: &GameState,
    ) -> LeafReaction {
        if self.advance.matches(command.kind()) {
            LeafReaction::advance()
        } else {
            LeafReaction::stay()
        }
    }

    fn on_command_forwarded(
        &self,
        _node: NodeId,
        _command: &dyn Command,
        _result: &CommandResult,
        _state: &GameState,
    ) -> LeafReaction {
        if self.advance.matches_forwarded() {
            LeafReaction::advance()
        } else {
            LeafReaction::stay()
        }
    }

    fn produces(&self) -> &[DecisionKind] {
        &self.produces
    }
}

impl fmt::Debug for PhaseLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseLeaf")
            .field("allowed", &self.allowed)
            .field("advance", &self.advance)
            .field("on_enter", &self.on_enter.len())
            .field("on_exit", &self.on_exit.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandType, EndPhaseCommand, MoveCommand};
    use crate::state::{EntityId, Position};

    #[test]
    fn advance_on_implies_allow() {
        let leaf = PhaseLeaf::new()
            .allow(MoveCommand::KIND)
            .advance_on(EndPhaseCommand::KIND);

        assert_eq!(
            leaf.allowed_commands(),
            &[MoveCommand::KIND, EndPhaseCommand::KIND]
        );

        let state = GameState::empty();
        let result = CommandResult::ok();
        let moved = leaf.on_command_executed(
            NodeId(1),
            &MoveCommand::new(EntityId(1), Position::ORIGIN),
            &result,
            &state,
        );
        let ended = leaf.on_command_executed(NodeId(1), &EndPhaseCommand, &result, &state);

        assert!(!moved.transition_requested);
        assert!(ended.transition_requested);
    }

    #[test]
    fn forwarded_outcome_only_chains_through_any() {
        let state = GameState::empty();
        let result = CommandResult::ok();
        let on_kind = PhaseLeaf::new().advance_on(EndPhaseCommand::KIND);
        let on_any = PhaseLeaf::new().advance_on_any();

        let kind_reaction =
            on_kind.on_command_forwarded(NodeId(2), &EndPhaseCommand, &result, &state);
        let any_reaction =
            on_any.on_command_forwarded(NodeId(2), &EndPhaseCommand, &result, &state);

        assert!(!kind_reaction.transition_requested);
        assert!(any_reaction.transition_requested);
    }
}
