//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g. `ApplyError`, `FlowError`) live next to the
//! components that raise them. This module provides the classification shared
//! by all of them so the runtime can decide between "return a failed result"
//! and "abort: the wiring is broken".

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may retry later or submit something else
/// - **Validation**: invalid input that should be rejected without retry
/// - **Configuration**: incorrect wiring detected at run time; a startup check
///   should have caught it
/// - **Fatal**: structural failure, processing cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - e.g. submitting while an acknowledgment is pending.
    Recoverable,

    /// Validation error - e.g. moving an entity that does not exist.
    Validation,

    /// Configuration error - e.g. a decision kind without an applier.
    Configuration,

    /// Fatal error - e.g. the flow tree loops without end.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the caller can branch on this error as a value.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates broken wiring or structure.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for categorization, metrics, and testing. Defaults to the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
