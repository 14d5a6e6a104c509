//! Content factory for loading a whole content set from a data directory.

use std::path::{Path, PathBuf};

use game_core::{CommandKind, Definition, FsmTree, GameConfig};

use crate::loaders::{CatalogLoader, ConfigLoader, FlowLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── catalog.ron
/// └── flow.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the content bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load entity definitions from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<Vec<Definition>> {
        CatalogLoader::load(&self.data_dir.join("catalog.ron"))
    }

    /// Load the phase tree from `flow.toml`, resolving command names against `known`.
    pub fn load_flow(&self, known: &[CommandKind]) -> LoadResult<FsmTree> {
        FlowLoader::load(&self.data_dir.join("flow.toml"), known)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
