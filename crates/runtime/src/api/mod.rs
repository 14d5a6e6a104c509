//! Public API surface: error types shared by every runtime component.
mod errors;

pub use errors::{RepositoryError, Result, RuntimeError};
