//! Pre-execution admission checks.

use std::collections::BTreeSet;

use game_core::Command;

/// Verdict of an [`AdmissionGate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Admission {
    pub allowed: bool,
    /// Once the command succeeds, nothing else is accepted until it is
    /// acknowledged.
    pub requires_acknowledgment: bool,
    pub reason: Option<String>,
}

impl Admission {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            requires_acknowledgment: false,
            reason: None,
        }
    }

    pub fn allow_with_acknowledgment() -> Self {
        Self {
            requires_acknowledgment: true,
            ..Self::allow()
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            requires_acknowledgment: false,
            reason: Some(reason.into()),
        }
    }
}

/// Decides whether a command may run at all, before phase legality.
pub trait AdmissionGate: Send + Sync {
    fn validate(&self, command: &dyn Command) -> Admission;
}

impl<F> AdmissionGate for F
where
    F: Fn(&dyn Command) -> Admission + Send + Sync,
{
    fn validate(&self, command: &dyn Command) -> Admission {
        self(command)
    }
}

/// Admits everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

impl AdmissionGate for OpenGate {
    fn validate(&self, _command: &dyn Command) -> Admission {
        Admission::allow()
    }
}

/// Admits everything and asks for acknowledgment after the listed kinds.
#[derive(Debug, Clone, Default)]
pub struct AcknowledgmentGate {
    kinds: BTreeSet<String>,
}

impl AcknowledgmentGate {
    pub fn new<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kinds: kinds.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl AdmissionGate for AcknowledgmentGate {
    fn validate(&self, command: &dyn Command) -> Admission {
        if self.kinds.contains(command.kind().as_str()) {
            Admission::allow_with_acknowledgment()
        } else {
            Admission::allow()
        }
    }
}

#[cfg(test)]
mod tests {
    use game_core::{EndPhaseCommand, EntityId, MoveCommand, Position};

    use super::*;

    #[test]
    fn acknowledgment_gate_flags_listed_kinds_only() {
        let gate = AcknowledgmentGate::new(["core.end_phase"]);

        assert!(gate.validate(&EndPhaseCommand).requires_acknowledgment);
        let admission = gate.validate(&MoveCommand::new(EntityId(1), Position::ORIGIN));
        assert_eq!(admission, Admission::allow());
    }

    #[test]
    fn closures_are_gates() {
        let gate = |command: &dyn Command| {
            if command.kind().as_str() == "core.move" {
                Admission::deny("movement is locked")
            } else {
                Admission::allow()
            }
        };

        let admission = gate.validate(&MoveCommand::new(EntityId(1), Position::ORIGIN));
        assert!(!admission.allowed);
        assert_eq!(admission.reason.as_deref(), Some("movement is locked"));
    }
}
