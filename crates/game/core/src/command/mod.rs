//! Command contracts: requests, handlers, and the typed dispatch table.
//!
//! A [`Command`] is an immutable request. Exactly one [`CommandHandler`] per
//! [`CommandKind`] turns it into a [`CommandResult`] carrying decisions; the
//! handler never mutates state itself.

mod handler;
mod kinds;
mod result;

pub use handler::{CommandHandler, DispatchError, HandlerRegistry};
pub use kinds::{AcknowledgeCommand, EndPhaseCommand, MoveCommand, SpawnCommand};
pub use result::{CommandRejection, CommandResult};

use core::any::Any;
use core::fmt;

/// Explicit type tag of a command, used as the dispatch key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommandKind(pub &'static str);

impl CommandKind {
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Immutable, self-typed request to change the game.
pub trait Command: fmt::Debug + Send + Sync + 'static {
    fn kind(&self) -> CommandKind;

    fn as_any(&self) -> &dyn Any;
}

/// Statically known tag of a concrete command type.
pub trait CommandType: Command + Sized {
    const KIND: CommandKind;
}

/// Implements [`Command`] and [`CommandType`] for a plain type.
///
/// ```ignore
/// #[derive(Debug)]
/// pub struct OpenDoorCommand { pub door: EntityId }
/// game_core::impl_command!(OpenDoorCommand => "door.open");
/// ```
#[macro_export]
macro_rules! impl_command {
    ($ty:ty => $kind:literal) => {
        impl $crate::command::CommandType for $ty {
            const KIND: $crate::command::CommandKind = $crate::command::CommandKind($kind);
        }

        impl $crate::command::Command for $ty {
            fn kind(&self) -> $crate::command::CommandKind {
                <Self as $crate::command::CommandType>::KIND
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }
    };
}

/// Downcasts a type-erased command to `C` if the tags agree.
pub fn downcast<C: CommandType>(command: &dyn Command) -> Option<&C> {
    if command.kind() != C::KIND {
        return None;
    }
    command.as_any().downcast_ref::<C>()
}
