//! Runtime orchestration for the deterministic phase-driven game core.
//!
//! This crate wires handlers, appliers and the flow tree into a
//! [`CommandPipeline`], persists state through a [`StateRepository`], and
//! publishes effects on an [`EffectBus`].
//!
//! Modules are organized by responsibility:
//! - [`pipeline`] hosts the command pipeline, its builder, and admission gates
//! - [`api`] exposes the error types downstream clients interact with
//! - [`events`] provides the topic-based effect bus
//! - [`handlers`] ships handlers for the built-in commands
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
//! - [`runtime`] holds environment-driven configuration
pub mod api;
pub mod events;
pub mod handlers;
pub mod oracle;
pub mod pipeline;
pub mod repository;
pub mod runtime;

pub use api::{Result, RuntimeError};
pub use events::{EffectBus, SubscriptionId, Topic};
pub use handlers::{EndPhaseHandler, MoveHandler, SpawnHandler, default_handlers};
pub use oracle::CatalogOracleImpl;
pub use pipeline::{
    AcknowledgmentGate, Admission, AdmissionGate, CommandPipeline, OpenGate, PipelineBuilder,
};
pub use repository::{
    FileStateRepository, InMemoryStateRepo, RepositoryError, StateRepository,
};
pub use runtime::RuntimeConfig;
