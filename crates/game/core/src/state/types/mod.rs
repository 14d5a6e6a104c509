pub mod common;
pub mod entities;

// Re-export common types
pub use common::{DefinitionId, EntityId, NodeId, Position};

// Re-export entity types
pub use entities::{AgentState, AgentStats, EntityKind, Faction, PropKind, PropState};
