//! Content loaders for reading game data from files.
//!
//! Each loader offers `load(path)` for files on disk and `parse(str)` for
//! embedded or generated content.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod flow;

pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use flow::{FlowLoader, FlowSpec, NodeSpec, NodeSpecKind};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
