use super::{DefinitionId, EntityId, Position};

/// Combat-relevant numbers carried by every agent.
///
/// The core only stores them; formulas that consume them live in game rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStats {
    pub hp: i32,
    pub max_hp: i32,
    pub movement: u32,
    pub attack: i32,
}

impl AgentStats {
    pub const fn new(max_hp: i32, movement: u32, attack: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            movement,
            attack,
        }
    }
}

impl Default for AgentStats {
    fn default() -> Self {
        Self::new(10, 4, 1)
    }
}

/// Allegiance of an agent.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    #[default]
    Neutral,
    Player,
    Hostile,
    Friendly,
}

/// A mobile, acting entity (survivor, zombie, turret...).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub id: EntityId,
    pub definition: DefinitionId,
    pub position: Position,
    pub faction: Faction,
    pub stats: AgentStats,
}

impl AgentState {
    pub fn new(
        id: EntityId,
        definition: DefinitionId,
        position: Position,
        faction: Faction,
        stats: AgentStats,
    ) -> Self {
        Self {
            id,
            definition,
            position,
            faction,
            stats,
        }
    }

    /// Quick check if the agent is alive.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.stats.hp > 0
    }
}

/// Non-agent entities such as doors, switches, or hazards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropState {
    pub id: EntityId,
    pub definition: DefinitionId,
    pub position: Position,
    pub kind: PropKind,
    pub is_active: bool,
}

impl PropState {
    pub fn new(
        id: EntityId,
        definition: DefinitionId,
        position: Position,
        kind: PropKind,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            definition,
            position,
            kind,
            is_active,
        }
    }
}

/// Enumerates the basic prop categories. Extend as needed by gameplay.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PropKind {
    Door,
    Switch,
    Hazard,
    Objective,
    #[default]
    Other,
}

/// Which state collection an entity lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    Agent,
    Prop,
}
