//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Entity definitions (catalog, data-driven via RON)
//! - Phase flow trees (data-driven via TOML)
//! - Game configuration (data-driven via TOML)
//!
//! Content is consumed by the runtime's oracles and pipeline builder and never
//! appears in game state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, FlowLoader, FlowSpec, NodeSpec};
