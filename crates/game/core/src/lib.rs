//! Deterministic orchestration core for a turn-based tactical game.
//!
//! `game-core` defines the canonical data and contracts (state snapshots,
//! commands, decisions, the phase tree, the spawn pipeline) and exposes pure
//! APIs that the runtime drives. All state mutation flows through the
//! [`ApplierRegistry`]; supporting crates depend on the types re-exported here.
pub mod command;
pub mod config;
pub mod decision;
pub mod env;
pub mod error;
pub mod flow;
pub mod spawn;
pub mod state;

pub use command::{
    AcknowledgeCommand, Command, CommandHandler, CommandKind, CommandRejection, CommandResult,
    CommandType, DispatchError, EndPhaseCommand, HandlerRegistry, MoveCommand, SpawnCommand,
};
pub use config::GameConfig;
pub use decision::{
    Applied, Applier, ApplierRegistry, ApplyError, BoxedDecision, Decision, DecisionKind,
    DecisionMeta, DecisionOrigin, DecisionTiming, DecisionType, Effect, MoveEntityDecision,
    RegistrationError, RemoveEntityDecision, SetPhaseDecision,
};
pub use env::{AgentTemplate, CatalogOracle, Definition, DefinitionKind, OracleError, PropTemplate};
pub use error::{ErrorSeverity, GameError};
pub use flow::{
    AdvanceOn, FlowController, FlowError, FlowLeaf, FlowOutcome, FsmNode, FsmTree,
    FsmTreeBuilder, LeafReaction, NodeKind, PhaseLeaf,
};
pub use spawn::{
    AgentBlueprint, Blueprint, DesignatedTileStrategy, OverrideValue, Overrides,
    PassThroughStrategy, PropBlueprint, SkipOccupiedStrategy, SpawnApplier, SpawnBatch,
    SpawnBlueprint, SpawnDecision, SpawnDescriptor, SpawnPipeline, SpawnPlan, SpawnRequest,
    SpawnStrategy, StrategyChain,
};
pub use state::{
    AgentState, AgentStats, DefinitionId, EntityId, EntityKind, Faction, GameState, NodeId,
    Position, PropKind, PropState,
};
