use std::collections::BTreeSet;

use crate::decision::{BoxedDecision, Decision, DecisionKind};
use crate::error::{ErrorSeverity, GameError};

use super::CommandKind;

/// Why a command did not change the game.
///
/// Every variant is a value the caller can branch on; none of them leaves a
/// trace in the state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandRejection {
    /// An acknowledgment is outstanding; only the acknowledgment is accepted.
    #[error("awaiting acknowledgment of the previous command")]
    AwaitingAcknowledgment,

    #[error("no acknowledgment is pending")]
    NoPendingAcknowledgment,

    /// The current leaf does not list the command kind.
    #[error("command '{command}' is not allowed in phase '{phase}'")]
    NotAllowed { command: CommandKind, phase: String },

    /// The admission gate refused the command.
    #[error("command denied: {0}")]
    Denied(String),

    /// The handler refused the command.
    #[error("command failed: {0}")]
    Failed(String),

    /// An applier rejected one of the produced decisions; nothing was applied.
    #[error("decision could not be applied: {0}")]
    ApplyFailed(String),
}

impl GameError for CommandRejection {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CommandRejection::AwaitingAcknowledgment
            | CommandRejection::NoPendingAcknowledgment => ErrorSeverity::Recoverable,
            CommandRejection::NotAllowed { .. }
            | CommandRejection::Denied(_)
            | CommandRejection::Failed(_)
            | CommandRejection::ApplyFailed(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CommandRejection::AwaitingAcknowledgment => "COMMAND_AWAITING_ACKNOWLEDGMENT",
            CommandRejection::NoPendingAcknowledgment => "COMMAND_NO_PENDING_ACKNOWLEDGMENT",
            CommandRejection::NotAllowed { .. } => "COMMAND_NOT_ALLOWED",
            CommandRejection::Denied(_) => "COMMAND_DENIED",
            CommandRejection::Failed(_) => "COMMAND_FAILED",
            CommandRejection::ApplyFailed(_) => "COMMAND_APPLY_FAILED",
        }
    }
}

/// Outcome of handling one command: success flag, optional rejection,
/// decisions in production order, and descriptive tags.
#[derive(Debug, Default)]
pub struct CommandResult {
    pub success: bool,
    pub error: Option<CommandRejection>,
    pub decisions: Vec<BoxedDecision>,
    pub tags: BTreeSet<String>,
}

impl CommandResult {
    /// Successful result with no decisions yet.
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn with_decisions(decisions: Vec<BoxedDecision>) -> Self {
        Self {
            success: true,
            decisions,
            ..Self::default()
        }
    }

    pub fn failure(reason: CommandRejection) -> Self {
        Self {
            success: false,
            error: Some(reason),
            ..Self::default()
        }
    }

    pub fn with_decision(mut self, decision: impl Decision) -> Self {
        self.decisions.push(Box::new(decision));
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Kinds of the carried decisions, in order.
    pub fn decision_kinds(&self) -> impl Iterator<Item = DecisionKind> + '_ {
        self.decisions.iter().map(|decision| decision.kind())
    }
}
