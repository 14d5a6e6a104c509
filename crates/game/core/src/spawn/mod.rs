//! Spawn pipeline: the canonical request → strategy → applier extension.
//!
//! 1. **Preprocess**: each [`SpawnRequest`] is resolved against the catalog
//!    and expanded into `count` [`SpawnDescriptor`]s, merging template defaults
//!    with overrides through an explicit mapping per blueprint kind.
//! 2. **Strategy**: a [`SpawnStrategy`] rewrites or filters descriptors.
//! 3. **Decision**: each descriptor becomes a [`SpawnDecision`].
//! 4. **Apply**: the generic [`SpawnApplier`] for the blueprint kind inserts the
//!    entity and emits `EntitySpawned`.
mod blueprint;
mod decision;
mod descriptor;
mod pipeline;
mod request;
mod strategy;

pub use blueprint::{AgentBlueprint, Blueprint, PropBlueprint, SpawnBlueprint};
pub use decision::{SpawnApplier, SpawnDecision};
pub use descriptor::SpawnDescriptor;
pub use pipeline::{IgnoredOverride, SkippedRequest, SpawnBatch, SpawnPipeline, SpawnPlan};
pub use request::{OverrideValue, Overrides, SpawnRequest};
pub use strategy::{
    DesignatedTileStrategy, PassThroughStrategy, SkipOccupiedStrategy, SpawnStrategy,
    StrategyChain,
};
