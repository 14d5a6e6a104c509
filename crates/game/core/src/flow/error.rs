//! Flow tree construction and traversal errors.

use crate::decision::ApplyError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::NodeId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// Auto-transitions within one submission exceeded the configured cap.
    #[error("flow exceeded {limit} automatic transitions; looping chain: {}", .chain.join(" -> "))]
    InfiniteLoopDetected { limit: u32, chain: Vec<String> },

    #[error(transparent)]
    Apply(#[from] ApplyError),

    #[error("flow tree has no leaf")]
    EmptyTree,

    #[error("branch '{0}' contains no leaf")]
    EmptyBranch(String),

    #[error("node name '{0}' is used more than once")]
    DuplicateNodeName(String),

    #[error("flow tree exceeds {max} nodes")]
    TooManyNodes { max: usize },

    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("node {0} is not a branch")]
    NotABranch(NodeId),

    #[error("node {0} is not a leaf")]
    NotALeaf(NodeId),

    #[error("flow has not been started")]
    NotStarted,
}

impl GameError for FlowError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            FlowError::InfiniteLoopDetected { .. } => ErrorSeverity::Fatal,
            FlowError::Apply(error) => error.severity(),
            FlowError::EmptyTree
            | FlowError::EmptyBranch(_)
            | FlowError::DuplicateNodeName(_)
            | FlowError::TooManyNodes { .. }
            | FlowError::UnknownNode(_)
            | FlowError::NotABranch(_)
            | FlowError::NotALeaf(_)
            | FlowError::NotStarted => ErrorSeverity::Configuration,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            FlowError::InfiniteLoopDetected { .. } => "FLOW_INFINITE_LOOP_DETECTED",
            FlowError::Apply(error) => error.error_code(),
            FlowError::EmptyTree => "FLOW_EMPTY_TREE",
            FlowError::EmptyBranch(_) => "FLOW_EMPTY_BRANCH",
            FlowError::DuplicateNodeName(_) => "FLOW_DUPLICATE_NODE_NAME",
            FlowError::TooManyNodes { .. } => "FLOW_TOO_MANY_NODES",
            FlowError::UnknownNode(_) => "FLOW_UNKNOWN_NODE",
            FlowError::NotABranch(_) => "FLOW_NOT_A_BRANCH",
            FlowError::NotALeaf(_) => "FLOW_NOT_A_LEAF",
            FlowError::NotStarted => "FLOW_NOT_STARTED",
        }
    }
}
