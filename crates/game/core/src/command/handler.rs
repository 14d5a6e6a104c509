//! Handler contract and the command kind → handler dispatch table.

use std::collections::HashMap;

use crate::decision::{DecisionKind, RegistrationError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::GameState;

use super::{Command, CommandKind, CommandResult, CommandType, downcast};

/// Translates one command type into a [`CommandResult`].
///
/// Handlers read the state but never change it; every change travels as a
/// decision in the result.
pub trait CommandHandler<C: CommandType>: Send + Sync + 'static {
    fn handle(&self, command: &C, state: &GameState) -> CommandResult;

    /// Decision kinds this handler may emit. Checked against the applier
    /// registry when the pipeline is built.
    fn produces(&self) -> &[DecisionKind] {
        &[]
    }
}

/// Errors raised while routing a command to its handler.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("no handler registered for command kind '{kind}'")]
    NoHandlerRegistered { kind: CommandKind },

    #[error("command kind '{kind}' is claimed by more than one command type")]
    KindMismatch { kind: CommandKind },
}

impl GameError for DispatchError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            DispatchError::NoHandlerRegistered { .. } => "DISPATCH_NO_HANDLER_REGISTERED",
            DispatchError::KindMismatch { .. } => "DISPATCH_KIND_MISMATCH",
        }
    }
}

type ErasedHandler =
    Box<dyn Fn(&dyn Command, &GameState) -> Result<CommandResult, DispatchError> + Send + Sync>;

struct HandlerEntry {
    handle: ErasedHandler,
    produces: Vec<DecisionKind>,
}

/// Explicit dispatch table from [`CommandKind`] to handler.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<CommandKind, HandlerEntry>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the single handler for command type `C`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::DuplicateHandler`] if `C::KIND` already has one.
    pub fn register<C, H>(&mut self, handler: H) -> Result<(), RegistrationError>
    where
        C: CommandType,
        H: CommandHandler<C>,
    {
        if self.handlers.contains_key(&C::KIND) {
            return Err(RegistrationError::DuplicateHandler { kind: C::KIND });
        }

        let produces = handler.produces().to_vec();
        let handle: ErasedHandler = Box::new(move |command, state| {
            let typed =
                downcast::<C>(command).ok_or(DispatchError::KindMismatch { kind: C::KIND })?;
            Ok(handler.handle(typed, state))
        });
        self.handlers
            .insert(C::KIND, HandlerEntry { handle, produces });
        Ok(())
    }

    pub fn contains(&self, kind: CommandKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Registered kinds in sorted order.
    pub fn kinds(&self) -> Vec<CommandKind> {
        let mut kinds: Vec<_> = self.handlers.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Decision kinds the handler for `kind` declared it may produce.
    pub fn produces(&self, kind: CommandKind) -> &[DecisionKind] {
        self.handlers
            .get(&kind)
            .map(|entry| entry.produces.as_slice())
            .unwrap_or(&[])
    }

    /// Routes the command to its handler.
    pub fn handle(
        &self,
        command: &dyn Command,
        state: &GameState,
    ) -> Result<CommandResult, DispatchError> {
        let kind = command.kind();
        let entry = self
            .handlers
            .get(&kind)
            .ok_or(DispatchError::NoHandlerRegistered { kind })?;
        (entry.handle)(command, state)
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
