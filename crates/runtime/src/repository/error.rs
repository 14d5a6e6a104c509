//! Failures of the state store.

use std::path::PathBuf;

use game_core::{ErrorSeverity, GameError};

/// Why a snapshot could not be read or written.
///
/// Every variant is fatal for the submission that hit it: the pipeline never
/// commits a phase or publishes effects for a state it could not persist.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("state repository lock was poisoned")]
    LockPoisoned,

    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode snapshot: {0}")]
    Encode(String),

    /// The stored bytes are not a snapshot this build understands.
    #[error("cannot decode '{}': {message}", path.display())]
    Decode { path: PathBuf, message: String },
}

impl RepositoryError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| RepositoryError::Io { path, source }
    }
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            RepositoryError::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            RepositoryError::Io { .. } => "REPOSITORY_IO",
            RepositoryError::Encode(_) => "REPOSITORY_ENCODE",
            RepositoryError::Decode { .. } => "REPOSITORY_DECODE",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
