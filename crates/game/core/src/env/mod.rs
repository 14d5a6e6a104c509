//! Traits describing read-only game data.
//!
//! Oracles expose static content (definition templates) so the core can
//! consult it without coupling to a concrete loader or storage format.
mod catalog;
mod error;

pub use catalog::{AgentTemplate, CatalogOracle, Definition, DefinitionKind, PropTemplate};
pub use error::OracleError;
