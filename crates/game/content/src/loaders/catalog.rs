//! Entity catalog loader.
//!
//! Loads agent and prop definitions from RON files.

use std::collections::BTreeSet;
use std::path::Path;

use game_core::Definition;

use crate::loaders::{LoadResult, read_file};

/// Loader for the definition catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load the catalog from a RON file.
    ///
    /// RON format: `Vec<Definition>`, e.g.
    ///
    /// ```text
    /// [
    ///     (id: "zombie", kind: Agent((
    ///         stats: (hp: 8, max_hp: 8, movement: 3, attack: 2),
    ///         faction: Hostile,
    ///     ))),
    ///     (id: "supply_crate", kind: Prop((kind: Objective, is_active: true))),
    /// ]
    /// ```
    pub fn load(path: &Path) -> LoadResult<Vec<Definition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse catalog RON. Duplicate ids are an error.
    pub fn parse(content: &str) -> LoadResult<Vec<Definition>> {
        let definitions: Vec<Definition> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for definition in &definitions {
            if !seen.insert(&definition.id) {
                anyhow::bail!("Duplicate definition id '{}' in catalog", definition.id);
            }
        }

        Ok(definitions)
    }
}

#[cfg(test)]
mod tests {
    use game_core::{DefinitionKind, EntityKind, Faction, PropKind};

    use super::*;

    #[test]
    fn parses_agents_and_props() {
        let definitions = CatalogLoader::parse(
            r#"[
                (id: "zombie", kind: Agent((
                    stats: (hp: 8, max_hp: 8, movement: 3, attack: 2),
                    faction: Hostile,
                ))),
                (id: "door", kind: Prop((kind: Door, is_active: false))),
            ]"#,
        )
        .unwrap();

        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].id.as_str(), "zombie");
        assert!(matches!(
            &definitions[0].kind,
            DefinitionKind::Agent(template) if template.faction == Faction::Hostile
        ));
        assert_eq!(definitions[1].entity_kind(), EntityKind::Prop);
        assert!(matches!(
            &definitions[1].kind,
            DefinitionKind::Prop(template) if template.kind == PropKind::Door
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = CatalogLoader::parse(
            r#"[
                (id: "door", kind: Prop((kind: Door, is_active: false))),
                (id: "door", kind: Prop((kind: Door, is_active: true))),
            ]"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("door"));
    }
}
