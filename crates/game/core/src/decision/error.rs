//! Registry and applier errors.

use crate::command::CommandKind;
use crate::error::{ErrorSeverity, GameError};

use super::DecisionKind;

/// Errors raised while applying a decision.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    /// Wiring error: the decision kind has no applier.
    #[error("no applier registered for decision kind '{kind}'")]
    NoApplierRegistered { kind: DecisionKind },

    /// Wiring error: two decision types share one tag, so the registered
    /// applier received a type it does not understand.
    #[error("decision kind '{kind}' is claimed by more than one decision type")]
    KindMismatch { kind: DecisionKind },

    /// The applier refused the decision against this state
    /// (e.g. the target entity no longer exists).
    #[error("decision '{kind}' rejected: {reason}")]
    Rejected { kind: DecisionKind, reason: String },
}

impl ApplyError {
    pub fn rejected(kind: DecisionKind, reason: impl Into<String>) -> Self {
        Self::Rejected {
            kind,
            reason: reason.into(),
        }
    }
}

impl GameError for ApplyError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ApplyError::NoApplierRegistered { .. } | ApplyError::KindMismatch { .. } => {
                ErrorSeverity::Configuration
            }
            ApplyError::Rejected { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApplyError::NoApplierRegistered { .. } => "APPLY_NO_APPLIER_REGISTERED",
            ApplyError::KindMismatch { .. } => "APPLY_KIND_MISMATCH",
            ApplyError::Rejected { .. } => "APPLY_REJECTED",
        }
    }
}

/// Startup configuration errors raised by the dispatch tables.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("an applier for decision kind '{kind}' is already registered")]
    DuplicateApplier { kind: DecisionKind },

    #[error("a handler for command kind '{kind}' is already registered")]
    DuplicateHandler { kind: CommandKind },
}

impl GameError for RegistrationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            RegistrationError::DuplicateApplier { .. } => "REGISTRATION_DUPLICATE_APPLIER",
            RegistrationError::DuplicateHandler { .. } => "REGISTRATION_DUPLICATE_HANDLER",
        }
    }
}
