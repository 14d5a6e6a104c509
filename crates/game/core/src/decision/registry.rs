//! Decision kind → applier dispatch table.

use std::collections::HashMap;

use crate::spawn::{AgentBlueprint, PropBlueprint, SpawnApplier, SpawnDecision};
use crate::state::GameState;

use super::kinds::{apply_move_entity, apply_remove_entity, apply_set_phase};
use super::{ApplyError, Decision, DecisionKind, DecisionType, Effect, RegistrationError};

/// New snapshot plus the effects produced while reaching it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    pub state: GameState,
    pub effects: Vec<Effect>,
}

impl Applied {
    /// Wraps a state with no effects yet.
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn into_parts(self) -> (GameState, Vec<Effect>) {
        (self.state, self.effects)
    }
}

/// Pure mutation function for one concrete decision type.
///
/// Closures `Fn(&D, GameState) -> Result<Applied, ApplyError>` implement this
/// trait, so most appliers are plain functions.
pub trait Applier<D: DecisionType>: Send + Sync + 'static {
    fn apply(&self, decision: &D, state: GameState) -> Result<Applied, ApplyError>;
}

impl<D, F> Applier<D> for F
where
    D: DecisionType,
    F: Fn(&D, GameState) -> Result<Applied, ApplyError> + Send + Sync + 'static,
{
    fn apply(&self, decision: &D, state: GameState) -> Result<Applied, ApplyError> {
        self(decision, state)
    }
}

type ErasedApplier =
    Box<dyn Fn(&dyn Decision, GameState) -> Result<Applied, ApplyError> + Send + Sync>;

/// Explicit dispatch table from [`DecisionKind`] to applier.
///
/// Constructed once at startup and owned by whoever drives the pipeline;
/// there is no process-wide registry.
#[derive(Default)]
pub struct ApplierRegistry {
    appliers: HashMap<DecisionKind, ErasedApplier>,
}

impl ApplierRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the engine's built-in appliers:
    /// phase pointer, entity movement/removal, and agent/prop spawning.
    pub fn with_core_appliers() -> Self {
        let mut registry = Self::new();
        registry.insert(apply_set_phase);
        registry.insert(apply_move_entity);
        registry.insert(apply_remove_entity);
        registry.insert::<SpawnDecision<AgentBlueprint>, _>(SpawnApplier::new());
        registry.insert::<SpawnDecision<PropBlueprint>, _>(SpawnApplier::new());
        registry
    }

    /// Registers the applier for decision type `D`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::DuplicateApplier`] if `D::KIND` already has one.
    pub fn register<D, A>(&mut self, applier: A) -> Result<(), RegistrationError>
    where
        D: DecisionType,
        A: Applier<D>,
    {
        if self.appliers.contains_key(&D::KIND) {
            return Err(RegistrationError::DuplicateApplier { kind: D::KIND });
        }
        self.insert(applier);
        Ok(())
    }

    pub fn contains(&self, kind: DecisionKind) -> bool {
        self.appliers.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.appliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appliers.is_empty()
    }

    /// Registered kinds in sorted order (for diagnostics).
    pub fn kinds(&self) -> Vec<DecisionKind> {
        let mut kinds: Vec<_> = self.appliers.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Applies one decision to an owned snapshot.
    ///
    /// # Errors
    ///
    /// - [`ApplyError::NoApplierRegistered`] if the kind is unknown (wiring bug)
    /// - whatever the applier itself returns
    pub fn apply(&self, decision: &dyn Decision, state: GameState) -> Result<Applied, ApplyError> {
        let kind = decision.kind();
        let applier = self
            .appliers
            .get(&kind)
            .ok_or(ApplyError::NoApplierRegistered { kind })?;
        applier(decision, state)
    }

    /// Applies `decision` on top of `acc`, appending its effects.
    pub fn fold(&self, decision: &dyn Decision, acc: Applied) -> Result<Applied, ApplyError> {
        let Applied { state, mut effects } = acc;
        let step = self.apply(decision, state)?;
        effects.extend(step.effects);
        Ok(Applied {
            state: step.state,
            effects,
        })
    }

    /// Applies decisions in order, folding each into the same snapshot.
    pub fn apply_all<'d, I>(&self, decisions: I, state: GameState) -> Result<Applied, ApplyError>
    where
        I: IntoIterator<Item = &'d dyn Decision>,
    {
        decisions
            .into_iter()
            .try_fold(Applied::new(state), |acc, decision| self.fold(decision, acc))
    }

    fn insert<D, A>(&mut self, applier: A)
    where
        D: DecisionType,
        A: Applier<D>,
    {
        let erased: ErasedApplier = Box::new(move |decision, state| {
            let typed = decision
                .as_any()
                .downcast_ref::<D>()
                .ok_or(ApplyError::KindMismatch { kind: D::KIND })?;
            applier.apply(typed, state)
        });
        self.appliers.insert(D::KIND, erased);
    }
}

impl std::fmt::Debug for ApplierRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplierRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
