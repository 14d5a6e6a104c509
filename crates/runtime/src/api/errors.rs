//! Unified error types surfaced by the runtime API.
//!
//! Wraps wiring, flow, applier and repository failures so clients can bubble
//! them up with consistent context. Rejections a caller can branch on never
//! appear here; they travel inside [`CommandResult`](game_core::CommandResult).
use game_core::{
    ApplyError, CommandKind, DispatchError, ErrorSeverity, FlowError, GameError,
    RegistrationError,
};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no handler registered for command kind '{kind}'")]
    NoHandlerRegistered { kind: CommandKind },

    #[error("command kind '{kind}' is claimed by more than one command type")]
    HandlerKindMismatch { kind: CommandKind },

    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error(transparent)]
    Apply(#[from] ApplyError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("pipeline wiring is incomplete:\n  {}", .issues.join("\n  "))]
    Wiring { issues: Vec<String> },

    #[error("pipeline requires a {0} before building")]
    MissingComponent(&'static str),
}

impl From<DispatchError> for RuntimeError {
    fn from(error: DispatchError) -> Self {
        match error {
            DispatchError::NoHandlerRegistered { kind } => Self::NoHandlerRegistered { kind },
            DispatchError::KindMismatch { kind } => Self::HandlerKindMismatch { kind },
        }
    }
}

impl RuntimeError {
    /// Returns the applier's domain rejection if that is all this error is.
    ///
    /// Such rejections abort a submission but are reported to the caller as a
    /// failed result rather than as a runtime failure.
    pub fn as_rejection(&self) -> Option<&ApplyError> {
        match self {
            RuntimeError::Apply(error @ ApplyError::Rejected { .. })
            | RuntimeError::Flow(FlowError::Apply(error @ ApplyError::Rejected { .. })) => {
                Some(error)
            }
            _ => None,
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Flow(error) => error.severity(),
            RuntimeError::Apply(error) => error.severity(),
            RuntimeError::Registration(error) => error.severity(),
            RuntimeError::Repository(_) => ErrorSeverity::Fatal,
            RuntimeError::NoHandlerRegistered { .. }
            | RuntimeError::HandlerKindMismatch { .. }
            | RuntimeError::Wiring { .. }
            | RuntimeError::MissingComponent(_) => ErrorSeverity::Configuration,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::NoHandlerRegistered { .. } => "RUNTIME_NO_HANDLER_REGISTERED",
            RuntimeError::HandlerKindMismatch { .. } => "RUNTIME_HANDLER_KIND_MISMATCH",
            RuntimeError::Flow(error) => error.error_code(),
            RuntimeError::Apply(error) => error.error_code(),
            RuntimeError::Repository(_) => "RUNTIME_REPOSITORY",
            RuntimeError::Registration(error) => error.error_code(),
            RuntimeError::Wiring { .. } => "RUNTIME_WIRING",
            RuntimeError::MissingComponent(_) => "RUNTIME_MISSING_COMPONENT",
        }
    }
}
