//! Composition root for running scripted sessions.
//!
//! Loads content, assembles the [`runtime::CommandPipeline`], and feeds it a
//! script. The binary in `main.rs` adds logging and prints effects.

pub mod config;
pub mod script;
pub mod session;

pub use config::ClientConfig;
pub use session::{Session, StepOutcome};
