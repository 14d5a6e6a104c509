//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{DefinitionId, EntityKind};

/// Errors that occur when reading catalog data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// The catalog has no entry for the id.
    #[error("definition '{0}' not found")]
    DefinitionNotFound(DefinitionId),

    /// The entry exists but describes another entity kind.
    #[error("definition '{id}' is not a {expected} definition")]
    WrongDefinitionKind { id: DefinitionId, expected: EntityKind },
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::DefinitionNotFound(_) => "ORACLE_DEFINITION_NOT_FOUND",
            OracleError::WrongDefinitionKind { .. } => "ORACLE_WRONG_DEFINITION_KIND",
        }
    }
}
