//! Drives the phase tree: entering the first leaf, reacting to commands, and
//! walking through auto-transitions.
//!
//! The controller never stores intermediate results. Every operation takes an
//! owned snapshot, returns a [`FlowOutcome`], and leaves `self` untouched; the
//! caller persists the outcome and then calls [`FlowController::commit`].

use crate::command::{Command, CommandKind, CommandResult};
use crate::config::GameConfig;
use crate::decision::{Applied, ApplierRegistry, BoxedDecision, Effect, SetPhaseDecision};
use crate::state::{GameState, NodeId};

use super::{FlowError, FsmTree};

/// Result of a flow operation, not yet committed.
#[derive(Debug)]
pub struct FlowOutcome {
    /// State and effects after every immediate decision.
    pub applied: Applied,
    /// Deferred decisions produced by hooks and leaves, in production order.
    pub deferred: Vec<BoxedDecision>,
    /// Leaf that is current once the outcome is committed.
    pub current: NodeId,
    /// Leaves entered, in order.
    pub entered: Vec<NodeId>,
    /// Whether a transition was requested on the terminal leaf.
    pub completed: bool,
}

#[derive(Debug)]
pub struct FlowController {
    tree: FsmTree,
    current: Option<NodeId>,
    max_auto_transitions: u32,
}

impl FlowController {
    pub fn new(tree: FsmTree, config: &GameConfig) -> Self {
        Self {
            tree,
            current: None,
            max_auto_transitions: config.max_auto_transitions,
        }
    }

    pub fn tree(&self) -> &FsmTree {
        &self.tree
    }

    pub fn max_auto_transitions(&self) -> u32 {
        self.max_auto_transitions
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.and_then(|id| self.tree.name(id))
    }

    /// Commands the current leaf accepts; empty before the flow starts.
    pub fn allowed_commands(&self) -> &[CommandKind] {
        self.current
            .map(|id| self.tree.allowed_commands(id))
            .unwrap_or(&[])
    }

    pub fn is_allowed(&self, kind: CommandKind) -> bool {
        self.allowed_commands().contains(&kind)
    }

    pub fn is_terminal(&self) -> bool {
        self.current.is_some_and(|id| self.tree.is_terminal(id))
    }

    /// Makes `node` current. Call only with an outcome's `current` after the
    /// outcome's state has been persisted.
    pub fn commit(&mut self, node: NodeId) {
        self.current = Some(node);
    }

    /// Enters the initial leaf, or resumes at the leaf recorded in `state`.
    ///
    /// Resuming runs no hooks and emits nothing.
    pub fn start(
        &self,
        state: GameState,
        registry: &ApplierRegistry,
    ) -> Result<FlowOutcome, FlowError> {
        if let Some(phase) = state.current_phase().filter(|phase| self.tree.is_leaf(*phase)) {
            return Ok(FlowOutcome {
                applied: Applied::new(state),
                deferred: Vec::new(),
                current: phase,
                entered: Vec::new(),
                completed: false,
            });
        }

        let first = self.tree.first_leaf().ok_or(FlowError::EmptyTree)?;
        let mut deferred = Vec::new();
        let applied = self.transition(None, first, Applied::new(state), &mut deferred, registry)?;
        Ok(FlowOutcome {
            applied,
            deferred,
            current: first,
            entered: vec![first],
            completed: false,
        })
    }

    /// Offers a handled command to the current leaf and follows any
    /// transitions it requests. Each newly entered leaf sees the outcome
    /// through [`on_command_forwarded`](super::FlowLeaf::on_command_forwarded)
    /// and may chain further.
    ///
    /// # Errors
    ///
    /// - [`FlowError::InfiniteLoopDetected`] after more than
    ///   `max_auto_transitions` transitions
    /// - [`FlowError::Apply`] if a hook decision cannot be applied
    pub fn on_command_executed(
        &self,
        command: &dyn Command,
        result: &CommandResult,
        state: GameState,
        registry: &ApplierRegistry,
    ) -> Result<FlowOutcome, FlowError> {
        let mut node = self.current.ok_or(FlowError::NotStarted)?;
        let mut acc = Applied::new(state);
        let mut deferred = Vec::new();
        let mut entered = Vec::new();
        let mut completed = false;
        let mut chain = vec![node];

        loop {
            let leaf = self.tree.leaf(node).ok_or(FlowError::NotALeaf(node))?;
            let reaction = if entered.is_empty() {
                leaf.on_command_executed(node, command, result, &acc.state)
            } else {
                leaf.on_command_forwarded(node, command, result, &acc.state)
            };
            acc = apply_decisions(reaction.decisions, acc, &mut deferred, registry)?;

            if !reaction.transition_requested {
                break;
            }
            let Some(next) = self.tree.next_leaf(node) else {
                acc.effects.push(Effect::FlowCompleted { at: node });
                completed = true;
                break;
            };

            chain.push(next);
            if entered.len() as u32 >= self.max_auto_transitions {
                return Err(FlowError::InfiniteLoopDetected {
                    limit: self.max_auto_transitions,
                    chain: self.describe_loop(&chain),
                });
            }

            acc = self.transition(Some(node), next, acc, &mut deferred, registry)?;
            entered.push(next);
            node = next;
        }

        Ok(FlowOutcome {
            applied: acc,
            deferred,
            current: node,
            entered,
            completed,
        })
    }

    /// One atomic `from → to` step: exit decisions, enter decisions, then the
    /// phase pointer update. Does not change `self.current`.
    pub fn transition(
        &self,
        from: Option<NodeId>,
        to: NodeId,
        mut acc: Applied,
        deferred: &mut Vec<BoxedDecision>,
        registry: &ApplierRegistry,
    ) -> Result<Applied, FlowError> {
        if let Some(from) = from {
            let leaf = self.tree.leaf(from).ok_or(FlowError::NotALeaf(from))?;
            let exit = leaf.on_exit(from, &acc.state);
            acc = apply_decisions(exit, acc, deferred, registry)?;
        }

        let leaf = self.tree.leaf(to).ok_or(FlowError::NotALeaf(to))?;
        let enter = leaf.on_enter(to, &acc.state);
        acc = apply_decisions(enter, acc, deferred, registry)?;

        Ok(registry.fold(&SetPhaseDecision::new(to), acc)?)
    }

    /// Trims the visited chain to its repeating tail for the diagnostic.
    fn describe_loop(&self, chain: &[NodeId]) -> Vec<String> {
        let start = chain
            .split_last()
            .and_then(|(last, before)| before.iter().rposition(|id| id == last))
            .unwrap_or(0);
        chain[start..]
            .iter()
            .map(|id| self.tree.path(*id))
            .collect()
    }
}

fn apply_decisions(
    decisions: Vec<BoxedDecision>,
    mut acc: Applied,
    deferred: &mut Vec<BoxedDecision>,
    registry: &ApplierRegistry,
) -> Result<Applied, FlowError> {
    for decision in decisions {
        if decision.is_deferred() {
            deferred.push(decision);
        } else {
            acc = registry.fold(decision.as_ref(), acc)?;
        }
    }
    Ok(acc)
}
