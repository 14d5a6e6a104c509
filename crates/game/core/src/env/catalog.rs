//! Definition catalog: data-driven templates for everything that can spawn.
//!
//! Definitions are authored in content files (see `game-content`) and served
//! to the spawn pipeline through [`CatalogOracle`] by definition id
//! (e.g. `"zombie"`, `"supply_crate"`).

use crate::state::{AgentStats, DefinitionId, EntityKind, Faction, PropKind};

use super::OracleError;

/// Defaults for a spawned agent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentTemplate {
    pub stats: AgentStats,
    pub faction: Faction,
}

/// Defaults for a spawned prop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropTemplate {
    pub kind: PropKind,
    pub is_active: bool,
}

/// What a definition spawns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefinitionKind {
    Agent(AgentTemplate),
    Prop(PropTemplate),
}

impl DefinitionKind {
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            DefinitionKind::Agent(_) => EntityKind::Agent,
            DefinitionKind::Prop(_) => EntityKind::Prop,
        }
    }
}

/// One catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Definition {
    pub id: DefinitionId,
    pub kind: DefinitionKind,
}

impl Definition {
    pub fn agent(id: impl Into<String>, template: AgentTemplate) -> Self {
        Self {
            id: DefinitionId::new(id),
            kind: DefinitionKind::Agent(template),
        }
    }

    pub fn prop(id: impl Into<String>, template: PropTemplate) -> Self {
        Self {
            id: DefinitionId::new(id),
            kind: DefinitionKind::Prop(template),
        }
    }

    pub fn entity_kind(&self) -> EntityKind {
        self.kind.entity_kind()
    }
}

/// Read-only lookup of definitions by id.
pub trait CatalogOracle: Send + Sync {
    /// Returns the definition if the catalog knows the id.
    fn definition(&self, id: &DefinitionId) -> Option<Definition>;

    /// Returns all known definition ids.
    fn all_ids(&self) -> Vec<DefinitionId> {
        Vec::new()
    }

    /// Like [`definition`](Self::definition) but reports absence as an error.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::DefinitionNotFound` if the id is unknown.
    fn require(&self, id: &DefinitionId) -> Result<Definition, OracleError> {
        self.definition(id)
            .ok_or_else(|| OracleError::DefinitionNotFound(id.clone()))
    }
}
