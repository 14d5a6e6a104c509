//! Hierarchical phase flow.
//!
//! The game's phase structure is a tree of [`FsmNode`]s. Branches group
//! phases; leaves are the phases themselves and the only nodes that can be
//! current. The current leaf decides which commands are legal and whether a
//! handled command moves the game on to the next leaf.
mod controller;
mod error;
mod leaves;
mod node;
mod tree;

pub use controller::{FlowController, FlowOutcome};
pub use error::FlowError;
pub use leaves::{AdvanceOn, PhaseLeaf};
pub use node::{FlowLeaf, LeafReaction};
pub use tree::{FsmNode, FsmTree, FsmTreeBuilder, NodeKind};
