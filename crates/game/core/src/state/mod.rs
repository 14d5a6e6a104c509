//! Authoritative game state representation.
//!
//! [`GameState`] is a value: every processed command produces a whole new
//! snapshot. Entity collections are persistent maps (`im::OrdMap`), so cloning
//! a snapshot is O(1) and a new snapshot shares everything it did not change
//! with its predecessor. Appliers receive an owned snapshot, edit it through
//! the methods below, and hand it back; whoever still holds the previous
//! snapshot never observes those edits.
pub mod types;

use im::OrdMap;

pub use types::{
    AgentState, AgentStats, DefinitionId, EntityId, EntityKind, Faction, NodeId, Position,
    PropKind, PropState,
};

/// Canonical snapshot of the game: entities plus the current phase pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Sequential entity ID allocator (monotonically increasing, never reused).
    next_entity_id: u32,

    agents: OrdMap<EntityId, AgentState>,
    props: OrdMap<EntityId, PropState>,

    /// Flow node the game is currently in. `None` until the flow is started.
    current_phase: Option<NodeId>,
}

impl GameState {
    /// Creates an empty state: no entities, no phase.
    pub fn empty() -> Self {
        Self {
            next_entity_id: EntityId::FIRST.0,
            agents: OrdMap::new(),
            props: OrdMap::new(),
            current_phase: None,
        }
    }

    // ===== queries =====

    pub fn current_phase(&self) -> Option<NodeId> {
        self.current_phase
    }

    pub fn agent(&self, id: EntityId) -> Option<&AgentState> {
        self.agents.get(&id)
    }

    pub fn prop(&self, id: EntityId) -> Option<&PropState> {
        self.props.get(&id)
    }

    /// Agents in ascending id order.
    pub fn agents(&self) -> impl Iterator<Item = &AgentState> {
        self.agents.values()
    }

    /// Props in ascending id order.
    pub fn props(&self) -> impl Iterator<Item = &PropState> {
        self.props.values()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn prop_count(&self) -> usize {
        self.props.len()
    }

    pub fn entity_count(&self) -> usize {
        self.agents.len() + self.props.len()
    }

    /// Returns which collection holds the entity, if any.
    pub fn entity_kind(&self, id: EntityId) -> Option<EntityKind> {
        if self.agents.contains_key(&id) {
            Some(EntityKind::Agent)
        } else if self.props.contains_key(&id) {
            Some(EntityKind::Prop)
        } else {
            None
        }
    }

    pub fn entity_position(&self, id: EntityId) -> Option<Position> {
        self.agent(id)
            .map(|agent| agent.position)
            .or_else(|| self.prop(id).map(|prop| prop.position))
    }

    /// Returns the first agent standing on `position`.
    pub fn agent_at(&self, position: Position) -> Option<&AgentState> {
        self.agents.values().find(|agent| agent.position == position)
    }

    /// Whether any entity (agent or prop) occupies the tile.
    pub fn is_occupied(&self, position: Position) -> bool {
        self.agent_at(position).is_some()
            || self.props.values().any(|prop| prop.position == position)
    }

    /// Peeks at the identifier the next allocation will return.
    pub fn next_entity_id(&self) -> EntityId {
        EntityId(self.next_entity_id)
    }

    // ===== edits (applier-facing) =====

    /// Allocates a new unique EntityId.
    ///
    /// # Panics
    ///
    /// Panics if the id space is exhausted.
    pub fn allocate_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self
            .next_entity_id
            .checked_add(1)
            .expect("EntityId overflow");
        id
    }

    /// Inserts or replaces an agent.
    pub fn insert_agent(&mut self, agent: AgentState) {
        self.bump_allocator(agent.id);
        self.agents.insert(agent.id, agent);
    }

    /// Inserts or replaces a prop.
    pub fn insert_prop(&mut self, prop: PropState) {
        self.bump_allocator(prop.id);
        self.props.insert(prop.id, prop);
    }

    /// Removes an entity from whichever collection holds it.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<EntityKind> {
        if self.agents.remove(&id).is_some() {
            Some(EntityKind::Agent)
        } else if self.props.remove(&id).is_some() {
            Some(EntityKind::Prop)
        } else {
            None
        }
    }

    /// Moves an entity and returns its previous position.
    pub fn set_entity_position(&mut self, id: EntityId, position: Position) -> Option<Position> {
        if let Some(agent) = self.agents.get_mut(&id) {
            return Some(std::mem::replace(&mut agent.position, position));
        }
        self.props
            .get_mut(&id)
            .map(|prop| std::mem::replace(&mut prop.position, position))
    }

    /// Phase pointer updates are reserved for the flow's internal decision.
    pub(crate) fn set_current_phase(&mut self, phase: NodeId) -> Option<NodeId> {
        self.current_phase.replace(phase)
    }

    fn bump_allocator(&mut self, id: EntityId) {
        if id.0 >= self.next_entity_id {
            self.next_entity_id = id.0.saturating_add(1);
        }
    }
}

#[cfg(feature = "serde")]
impl GameState {
    /// SHA-256 over the bincode encoding of this snapshot.
    ///
    /// Two snapshots with equal roots are bit-for-bit identical, which is how
    /// determinism of transitions and decision replays is checked.
    ///
    /// # Errors
    ///
    /// Returns the bincode error if the snapshot cannot be encoded.
    pub fn state_root(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        // OrdMap serializes in key order, so the encoding is canonical.
        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::empty()
    }
}
