//! Catalog oracle implementing [`game_core::CatalogOracle`].

use std::collections::HashMap;

use game_core::{CatalogOracle, Definition, DefinitionId};

/// Oracle providing entity definitions.
#[derive(Debug, Clone, Default)]
pub struct CatalogOracleImpl {
    definitions: HashMap<DefinitionId, Definition>,
}

impl CatalogOracleImpl {
    /// Create an empty oracle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, replacing any earlier one with the same id.
    pub fn add(&mut self, definition: Definition) {
        self.definitions.insert(definition.id.clone(), definition);
    }

    /// Check if a definition exists.
    pub fn contains(&self, id: &str) -> bool {
        self.definitions.contains_key(&DefinitionId::from(id))
    }

    /// Get number of definitions in catalog.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl FromIterator<Definition> for CatalogOracleImpl {
    fn from_iter<I: IntoIterator<Item = Definition>>(definitions: I) -> Self {
        let mut oracle = Self::new();
        for definition in definitions {
            oracle.add(definition);
        }
        oracle
    }
}

impl CatalogOracle for CatalogOracleImpl {
    fn definition(&self, id: &DefinitionId) -> Option<Definition> {
        self.definitions.get(id).cloned()
    }

    fn all_ids(&self) -> Vec<DefinitionId> {
        let mut ids: Vec<_> = self.definitions.keys().cloned().collect();
        ids.sort();
        ids
    }
}
