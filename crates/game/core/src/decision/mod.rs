//! Decision / applier protocol: the only sanctioned way to change
//! [`GameState`](crate::state::GameState).
//!
//! - [`Decision`]: immutable mutation intent produced by handlers, leaves and strategies
//! - [`Applier`]: pure function `(decision, state) -> (state', effects)`
//! - [`ApplierRegistry`]: dispatch table keyed by [`DecisionKind`], built once at startup
//! - [`Effect`]: informative fact emitted by appliers, never mutates anything
//!
//! Extending game behavior means adding a new decision type plus its applier
//! and registering it; the pipeline and the flow controller never change.

mod effect;
mod error;
mod kinds;
mod registry;

pub use effect::Effect;
pub use error::{ApplyError, RegistrationError};
pub use kinds::{MoveEntityDecision, RemoveEntityDecision, SetPhaseDecision};
pub use registry::{Applied, Applier, ApplierRegistry};

use core::any::Any;
use core::fmt;

use crate::command::CommandKind;
use crate::state::NodeId;

/// Explicit type tag of a decision, used as the dispatch key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecisionKind(pub &'static str);

impl DecisionKind {
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// When a decision is applied relative to the command/transition cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DecisionTiming {
    /// Applied as soon as it is produced, in production order.
    #[default]
    Immediate,
    /// Queued and flushed at the end of the current submission, after all
    /// immediate decisions and any triggered transitions.
    Deferred,
}

/// Who produced a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecisionOrigin {
    /// A command handler (or a leaf reacting to that command).
    Command(CommandKind),
    /// A flow node's enter/exit hook.
    Phase(NodeId),
    /// The engine itself (phase pointer updates).
    System,
}

impl fmt::Display for DecisionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionOrigin::Command(kind) => write!(f, "command:{kind}"),
            DecisionOrigin::Phase(node) => write!(f, "phase:{node}"),
            DecisionOrigin::System => f.write_str("system"),
        }
    }
}

/// Timing marker plus origin identity carried by every decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecisionMeta {
    pub timing: DecisionTiming,
    pub origin: DecisionOrigin,
}

impl DecisionMeta {
    pub const fn immediate(origin: DecisionOrigin) -> Self {
        Self {
            timing: DecisionTiming::Immediate,
            origin,
        }
    }

    pub const fn deferred(origin: DecisionOrigin) -> Self {
        Self {
            timing: DecisionTiming::Deferred,
            origin,
        }
    }
}

/// Immutable description of a state change to apply.
///
/// Implement it with [`impl_decision!`](crate::impl_decision) for plain structs
/// that carry a `meta: DecisionMeta` field.
pub trait Decision: fmt::Debug + Send + Sync + 'static {
    fn kind(&self) -> DecisionKind;

    fn meta(&self) -> DecisionMeta;

    /// Upcast used by the registry to recover the concrete type after the
    /// tag lookup.
    fn as_any(&self) -> &dyn Any;

    fn timing(&self) -> DecisionTiming {
        self.meta().timing
    }

    fn origin(&self) -> DecisionOrigin {
        self.meta().origin
    }

    fn is_deferred(&self) -> bool {
        self.timing() == DecisionTiming::Deferred
    }
}

/// Statically known tag of a concrete decision type.
pub trait DecisionType: Decision + Sized {
    const KIND: DecisionKind;
}

/// Owned, type-erased decision as carried by results and leaf reactions.
pub type BoxedDecision = Box<dyn Decision>;

/// Implements [`Decision`] and [`DecisionType`] for a struct with a
/// `meta: DecisionMeta` field.
///
/// ```ignore
/// #[derive(Debug)]
/// pub struct OpenDoorDecision { pub door: EntityId, pub meta: DecisionMeta }
/// game_core::impl_decision!(OpenDoorDecision => "door.open");
/// ```
#[macro_export]
macro_rules! impl_decision {
    ($ty:ty => $kind:literal) => {
        impl $crate::decision::DecisionType for $ty {
            const KIND: $crate::decision::DecisionKind = $crate::decision::DecisionKind($kind);
        }

        impl $crate::decision::Decision for $ty {
            fn kind(&self) -> $crate::decision::DecisionKind {
                <Self as $crate::decision::DecisionType>::KIND
            }

            fn meta(&self) -> $crate::decision::DecisionMeta {
                self.meta
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }
    };
}
