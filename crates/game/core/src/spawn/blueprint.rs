//! Per-kind blueprints and their explicit override mappings.

use core::fmt;

use crate::decision::DecisionKind;
use crate::env::{AgentTemplate, PropTemplate};
use crate::state::{
    AgentState, AgentStats, DefinitionId, EntityId, EntityKind, Faction, GameState, Position,
    PropKind, PropState,
};

use super::Overrides;

/// Fully merged creation data for one entity kind.
pub trait SpawnBlueprint: Clone + fmt::Debug + Send + Sync + 'static {
    /// Tag of `SpawnDecision<Self>`.
    const DECISION_KIND: DecisionKind;
    const ENTITY_KIND: EntityKind;

    /// Builds the concrete entity and inserts it into `state`.
    fn insert_into(
        &self,
        state: &mut GameState,
        id: EntityId,
        definition: &DefinitionId,
        position: Position,
    );
}

/// Agent creation data: template defaults merged with overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentBlueprint {
    pub stats: AgentStats,
    pub faction: Faction,
}

impl AgentBlueprint {
    pub fn from_template(template: &AgentTemplate) -> Self {
        Self {
            stats: template.stats,
            faction: template.faction,
        }
    }

    /// Applies recognised overrides and returns the keys that were ignored.
    ///
    /// Recognised keys: `max_hp`, `hp`, `movement`, `attack`, `faction`.
    /// `max_hp` also refills `hp`; `hp` is capped at `max_hp`.
    pub fn apply_overrides(&mut self, overrides: &Overrides) -> Vec<String> {
        let mut ignored = Vec::new();

        // max_hp first so a later `hp` is capped against the new maximum.
        if let Some(value) = overrides.get("max_hp") {
            match value.as_i32() {
                Some(max_hp) => {
                    self.stats.max_hp = max_hp;
                    self.stats.hp = max_hp;
                }
                None => ignored.push("max_hp".to_owned()),
            }
        }

        for (key, value) in overrides {
            let max_hp = self.stats.max_hp;
            let recognised = match key.as_str() {
                "max_hp" => continue,
                "hp" => assign(&mut self.stats.hp, value.as_i32().map(|hp| hp.min(max_hp))),
                "movement" => assign(&mut self.stats.movement, value.as_u32()),
                "attack" => assign(&mut self.stats.attack, value.as_i32()),
                "faction" => assign(
                    &mut self.faction,
                    value.as_text().and_then(|text| text.parse().ok()),
                ),
                _ => false,
            };
            if !recognised {
                ignored.push(key.clone());
            }
        }

        ignored
    }
}

impl SpawnBlueprint for AgentBlueprint {
    const DECISION_KIND: DecisionKind = DecisionKind("core.spawn_agent");
    const ENTITY_KIND: EntityKind = EntityKind::Agent;

    fn insert_into(
        &self,
        state: &mut GameState,
        id: EntityId,
        definition: &DefinitionId,
        position: Position,
    ) {
        state.insert_agent(AgentState::new(
            id,
            definition.clone(),
            position,
            self.faction,
            self.stats,
        ));
    }
}

/// Prop creation data: template defaults merged with overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropBlueprint {
    pub kind: PropKind,
    pub is_active: bool,
}

impl PropBlueprint {
    pub fn from_template(template: &PropTemplate) -> Self {
        Self {
            kind: template.kind,
            is_active: template.is_active,
        }
    }

    /// Recognised keys: `kind`, `active`.
    pub fn apply_overrides(&mut self, overrides: &Overrides) -> Vec<String> {
        let mut ignored = Vec::new();
        for (key, value) in overrides {
            let recognised = match key.as_str() {
                "kind" => assign(
                    &mut self.kind,
                    value.as_text().and_then(|text| text.parse().ok()),
                ),
                "active" => assign(&mut self.is_active, value.as_bool()),
                _ => false,
            };
            if !recognised {
                ignored.push(key.clone());
            }
        }
        ignored
    }
}

impl SpawnBlueprint for PropBlueprint {
    const DECISION_KIND: DecisionKind = DecisionKind("core.spawn_prop");
    const ENTITY_KIND: EntityKind = EntityKind::Prop;

    fn insert_into(
        &self,
        state: &mut GameState,
        id: EntityId,
        definition: &DefinitionId,
        position: Position,
    ) {
        state.insert_prop(PropState::new(
            id,
            definition.clone(),
            position,
            self.kind,
            self.is_active,
        ));
    }
}

fn assign<T>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

/// Blueprint of either kind, as carried by a descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Blueprint {
    Agent(AgentBlueprint),
    Prop(PropBlueprint),
}

impl Blueprint {
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            Blueprint::Agent(_) => EntityKind::Agent,
            Blueprint::Prop(_) => EntityKind::Prop,
        }
    }
}
