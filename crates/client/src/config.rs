//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use runtime::RuntimeConfig;

/// Configuration required to assemble and drive a session.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    /// Directory holding `config.toml`, `catalog.ron` and `flow.toml`;
    /// the bundled content when `None`.
    pub content_dir: Option<PathBuf>,
    /// JSON script to run; the bundled demo when `None`.
    pub script: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables (besides those read by [`RuntimeConfig::from_env`]):
    /// - `CONTENT_DIR` - Content data directory (default: bundled content)
    /// - `PERSIST_STATE` - Save state under the platform data directory when
    ///   `STATE_DIR` is unset (default: false)
    pub fn from_env() -> Self {
        let mut runtime = RuntimeConfig::from_env();

        let persist = read_env::<bool>("PERSIST_STATE").unwrap_or(false);
        if persist && runtime.state_dir.is_none() {
            runtime.state_dir = Some(data_dir());
        }

        Self {
            runtime,
            content_dir: env::var("CONTENT_DIR").ok().map(PathBuf::from),
            script: None,
        }
    }

    pub fn with_script(mut self, script: Option<PathBuf>) -> Self {
        self.script = script;
        self
    }
}

/// Platform data directory for saved state.
///
/// - Linux: `~/.local/share/tactics` (or `$XDG_DATA_HOME/tactics`)
/// - macOS: `~/Library/Application Support/tactics`
/// - Fallback: `./save_data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "tactics")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
