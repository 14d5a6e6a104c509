//! Phase flow loader.
//!
//! Builds an [`FsmTree`] of [`PhaseLeaf`]s from a TOML description. Nodes are
//! listed in pre-order; a node's parent must appear before it.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{CommandKind, FsmTree, NodeId, PhaseLeaf};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Top-level flow document.
///
/// ```toml
/// root = "game"
///
/// [[nodes]]
/// name = "setup"
/// allow = ["core.spawn"]
/// advance_on = ["core.end_phase"]
///
/// [[nodes]]
/// name = "rounds"
/// kind = "repeating"
///
/// [[nodes]]
/// name = "turn"
/// parent = "rounds"
/// allow = ["core.move"]
/// advance_on = ["core.end_phase"]
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct FlowSpec {
    pub root: String,
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeSpecKind {
    #[default]
    Leaf,
    Branch,
    Repeating,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NodeSpec {
    pub name: String,
    /// Defaults to the root.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub kind: NodeSpecKind,
    #[serde(default)]
    pub allow: Vec<String>,
    #[serde(default)]
    pub advance_on: Vec<String>,
    #[serde(default)]
    pub advance_on_any: bool,
}

/// Loader for phase flow trees from TOML files.
pub struct FlowLoader;

impl FlowLoader {
    /// Load and build a flow tree.
    ///
    /// Command names are resolved against `known`, normally the kinds the
    /// pipeline has handlers for; an unknown name is an error.
    pub fn load(path: &Path, known: &[CommandKind]) -> LoadResult<FsmTree> {
        let content = read_file(path)?;
        Self::parse(&content, known)
    }

    pub fn parse(content: &str, known: &[CommandKind]) -> LoadResult<FsmTree> {
        let spec: FlowSpec = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse flow TOML: {}", e))?;
        Self::build(&spec, known)
    }

    pub fn build(spec: &FlowSpec, known: &[CommandKind]) -> LoadResult<FsmTree> {
        let mut builder = FsmTree::builder(spec.root.as_str());
        let mut ids: BTreeMap<&str, NodeId> = BTreeMap::new();
        ids.insert(spec.root.as_str(), builder.root());

        for node in &spec.nodes {
            let parent = match &node.parent {
                Some(name) => *ids.get(name.as_str()).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Node '{}' names parent '{}' which is not declared before it",
                        node.name,
                        name
                    )
                })?,
                None => builder.root(),
            };

            let id = match node.kind {
                NodeSpecKind::Leaf => builder.leaf(parent, node.name.as_str(), leaf(node, known)?),
                NodeSpecKind::Branch => builder.branch(parent, node.name.as_str()),
                NodeSpecKind::Repeating => builder.repeating_branch(parent, node.name.as_str()),
            }
            .map_err(|e| anyhow::anyhow!("Invalid flow node '{}': {}", node.name, e))?;
            ids.insert(node.name.as_str(), id);
        }

        builder
            .build()
            .map_err(|e| anyhow::anyhow!("Invalid flow tree: {}", e))
    }
}

fn leaf(node: &NodeSpec, known: &[CommandKind]) -> LoadResult<PhaseLeaf> {
    let mut leaf = PhaseLeaf::new();
    for name in &node.allow {
        leaf = leaf.allow(resolve(name, &node.name, known)?);
    }
    for name in &node.advance_on {
        leaf = leaf.advance_on(resolve(name, &node.name, known)?);
    }
    if node.advance_on_any {
        leaf = leaf.advance_on_any();
    }
    Ok(leaf)
}

fn resolve(name: &str, node: &str, known: &[CommandKind]) -> LoadResult<CommandKind> {
    known
        .iter()
        .copied()
        .find(|kind| kind.as_str() == name)
        .ok_or_else(|| anyhow::anyhow!("Node '{}' refers to unknown command '{}'", node, name))
}
