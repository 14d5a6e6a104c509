//! Arena-backed phase tree.
//!
//! Nodes live in one flat `Vec`; parent, first-child and next-sibling links
//! are [`NodeId`] indices, so the tree has no ownership cycles. It is built
//! once through [`FsmTreeBuilder`] and never changes afterwards.

use std::collections::HashSet;

use crate::command::CommandKind;
use crate::config::GameConfig;
use crate::state::NodeId;

use super::{FlowError, FlowLeaf};

pub enum NodeKind {
    /// Grouping node. A repeating branch starts over at its first child
    /// once its last child is done (e.g. rounds of a battle).
    Branch { repeating: bool },
    Leaf(Box<dyn FlowLeaf>),
}

pub struct FsmNode {
    name: String,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
    kind: NodeKind,
}

impl FsmNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn is_repeating(&self) -> bool {
        matches!(self.kind, NodeKind::Branch { repeating: true })
    }

    pub fn leaf(&self) -> Option<&dyn FlowLeaf> {
        match &self.kind {
            NodeKind::Leaf(leaf) => Some(leaf.as_ref()),
            NodeKind::Branch { .. } => None,
        }
    }
}

impl std::fmt::Debug for FsmNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.kind {
            NodeKind::Branch { repeating: false } => "branch",
            NodeKind::Branch { repeating: true } => "repeating_branch",
            NodeKind::Leaf(_) => "leaf",
        };
        f.debug_struct("FsmNode")
            .field("name", &self.name)
            .field("kind", &kind)
            .field("parent", &self.parent)
            .field("first_child", &self.first_child)
            .field("next_sibling", &self.next_sibling)
            .finish()
    }
}

/// Immutable phase tree. The root is always [`FsmTree::ROOT`].
#[derive(Debug)]
pub struct FsmTree {
    nodes: Vec<FsmNode>,
}

impl FsmTree {
    pub const ROOT: NodeId = NodeId(0);

    pub fn builder(root_name: impl Into<String>) -> FsmTreeBuilder {
        FsmTreeBuilder::new(root_name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&FsmNode> {
        self.nodes.get(id.index())
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(FsmNode::name)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(|index| NodeId(index as u16))
    }

    pub fn leaf(&self, id: NodeId) -> Option<&dyn FlowLeaf> {
        self.node(id).and_then(FsmNode::leaf)
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(FsmNode::is_leaf)
    }

    /// Leaf ids in pre-order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_leaf())
            .map(|(index, _)| NodeId(index as u16))
    }

    /// Commands allowed by the leaf, empty for branches and unknown ids.
    pub fn allowed_commands(&self, id: NodeId) -> &[CommandKind] {
        self.leaf(id).map(|leaf| leaf.allowed_commands()).unwrap_or(&[])
    }

    /// Next node in traversal order:
    ///
    /// 1. a branch with children → its first child
    /// 2. otherwise the next sibling
    /// 3. otherwise climb ancestors until one has a next sibling (a repeating
    ///    ancestor restarts at its own first child instead)
    /// 4. otherwise `None`
    pub fn get_next(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id)?;
        if let (NodeKind::Branch { .. }, Some(child)) = (&node.kind, node.first_child) {
            return Some(child);
        }
        if let Some(sibling) = node.next_sibling {
            return Some(sibling);
        }

        let mut ancestor = node.parent;
        while let Some(parent_id) = ancestor {
            let parent = &self.nodes[parent_id.index()];
            if parent.is_repeating() {
                return parent.first_child;
            }
            if let Some(sibling) = parent.next_sibling {
                return Some(sibling);
            }
            ancestor = parent.parent;
        }
        None
    }

    /// First leaf reached by walking [`get_next`](Self::get_next) from `id`
    /// (exclusive).
    pub fn next_leaf(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = id;
        // Every branch holds a leaf, so a leaf is reached long before this.
        for _ in 0..=self.nodes.len() * 2 {
            cursor = self.get_next(cursor)?;
            if self.is_leaf(cursor) {
                return Some(cursor);
            }
        }
        None
    }

    /// Initial leaf: first leaf in pre-order from the root.
    pub fn first_leaf(&self) -> Option<NodeId> {
        self.next_leaf(Self::ROOT)
    }

    /// A leaf with no reachable next leaf.
    pub fn is_terminal(&self, id: NodeId) -> bool {
        self.is_leaf(id) && self.next_leaf(id).is_none()
    }

    /// Names from the root down to `id`, joined with `/`.
    pub fn path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(node) = self.node(current) else {
                break;
            };
            names.push(node.name.as_str());
            cursor = node.parent;
        }
        names.reverse();
        names.join("/")
    }
}

/// Incremental builder for [`FsmTree`].
///
/// Children are appended in call order; sibling order is traversal order.
pub struct FsmTreeBuilder {
    nodes: Vec<FsmNode>,
    last_child: Vec<Option<NodeId>>,
    names: HashSet<String>,
}

impl FsmTreeBuilder {
    /// Starts a tree whose root is a plain branch named `root_name`.
    pub fn new(root_name: impl Into<String>) -> Self {
        let name = root_name.into();
        let mut names = HashSet::new();
        names.insert(name.clone());
        Self {
            nodes: vec![FsmNode {
                name,
                parent: None,
                first_child: None,
                next_sibling: None,
                kind: NodeKind::Branch { repeating: false },
            }],
            last_child: vec![None],
            names,
        }
    }

    pub fn root(&self) -> NodeId {
        FsmTree::ROOT
    }

    pub fn branch(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId, FlowError> {
        self.push(parent, name.into(), NodeKind::Branch { repeating: false })
    }

    pub fn repeating_branch(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
    ) -> Result<NodeId, FlowError> {
        self.push(parent, name.into(), NodeKind::Branch { repeating: true })
    }

    pub fn leaf(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        leaf: impl FlowLeaf + 'static,
    ) -> Result<NodeId, FlowError> {
        self.push(parent, name.into(), NodeKind::Leaf(Box::new(leaf)))
    }

    /// Validates and freezes the tree.
    ///
    /// # Errors
    ///
    /// - [`FlowError::EmptyTree`] if there is no leaf at all
    /// - [`FlowError::EmptyBranch`] if some branch has no leaf beneath it
    pub fn build(self) -> Result<FsmTree, FlowError> {
        let tree = FsmTree { nodes: self.nodes };
        if tree.leaves().next().is_none() {
            return Err(FlowError::EmptyTree);
        }

        let mut holds_leaf = vec![false; tree.nodes.len()];
        for leaf in tree.leaves() {
            let mut cursor = Some(leaf);
            while let Some(id) = cursor {
                if holds_leaf[id.index()] {
                    break;
                }
                holds_leaf[id.index()] = true;
                cursor = tree.nodes[id.index()].parent;
            }
        }
        if let Some(index) = holds_leaf.iter().position(|holds| !holds) {
            return Err(FlowError::EmptyBranch(tree.nodes[index].name.clone()));
        }

        Ok(tree)
    }

    fn push(&mut self, parent: NodeId, name: String, kind: NodeKind) -> Result<NodeId, FlowError> {
        match self.nodes.get(parent.index()) {
            None => return Err(FlowError::UnknownNode(parent)),
            Some(node) if node.is_leaf() => return Err(FlowError::NotABranch(parent)),
            Some(_) => {}
        }
        if self.nodes.len() >= GameConfig::MAX_FLOW_NODES {
            return Err(FlowError::TooManyNodes {
                max: GameConfig::MAX_FLOW_NODES,
            });
        }
        if !self.names.insert(name.clone()) {
            return Err(FlowError::DuplicateNodeName(name));
        }

        let id = NodeId(self.nodes.len() as u16);
        self.nodes.push(FsmNode {
            name,
            parent: Some(parent),
            first_child: None,
            next_sibling: None,
            kind,
        });
        self.last_child.push(None);

        match self.last_child[parent.index()].replace(id) {
            Some(previous) => self.nodes[previous.index()].next_sibling = Some(id),
            None => self.nodes[parent.index()].first_child = Some(id),
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::PhaseLeaf;

    /// root
    /// ├── setup (leaf)
    /// ├── battle (repeating)
    /// │   ├── player_turn (leaf)
    /// │   └── enemy (branch)
    /// │       └── enemy_turn (leaf)
    /// └── debrief (leaf)
    fn campaign(battle_repeats: bool) -> FsmTree {
        let mut builder = FsmTree::builder("root");
        let root = builder.root();
        builder.leaf(root, "setup", PhaseLeaf::new()).unwrap();
        let battle = if battle_repeats {
            builder.repeating_branch(root, "battle").unwrap()
        } else {
            builder.branch(root, "battle").unwrap()
        };
        builder.leaf(battle, "player_turn", PhaseLeaf::new()).unwrap();
        let enemy = builder.branch(battle, "enemy").unwrap();
        builder.leaf(enemy, "enemy_turn", PhaseLeaf::new()).unwrap();
        builder.leaf(root, "debrief", PhaseLeaf::new()).unwrap();
        builder.build().unwrap()
    }

    fn id(tree: &FsmTree, name: &str) -> NodeId {
        tree.find(name).unwrap()
    }

    #[test]
    fn get_next_follows_child_sibling_and_climb_rules() {
        let tree = campaign(false);

        assert_eq!(tree.get_next(FsmTree::ROOT), Some(id(&tree, "setup")));
        assert_eq!(tree.get_next(id(&tree, "setup")), Some(id(&tree, "battle")));
        assert_eq!(tree.get_next(id(&tree, "battle")), Some(id(&tree, "player_turn")));
        assert_eq!(tree.get_next(id(&tree, "player_turn")), Some(id(&tree, "enemy")));
        assert_eq!(tree.get_next(id(&tree, "enemy_turn")), Some(id(&tree, "debrief")));
        assert_eq!(tree.get_next(id(&tree, "debrief")), None);
    }

    #[test]
    fn next_leaf_skips_structural_nodes() {
        let tree = campaign(false);

        assert_eq!(tree.first_leaf(), Some(id(&tree, "setup")));
        assert_eq!(tree.next_leaf(id(&tree, "setup")), Some(id(&tree, "player_turn")));
        assert_eq!(tree.next_leaf(id(&tree, "player_turn")), Some(id(&tree, "enemy_turn")));
        assert!(tree.is_terminal(id(&tree, "debrief")));
        assert!(!tree.is_terminal(id(&tree, "enemy_turn")));
    }

    #[test]
    fn repeating_branch_restarts_at_first_child() {
        let tree = campaign(true);

        assert_eq!(tree.next_leaf(id(&tree, "enemy_turn")), Some(id(&tree, "player_turn")));
        assert!(tree.leaves().all(|leaf| leaf == id(&tree, "debrief") || !tree.is_terminal(leaf)));
    }

    #[test]
    fn path_lists_ancestors() {
        let tree = campaign(false);
        assert_eq!(tree.path(id(&tree, "enemy_turn")), "root/battle/enemy/enemy_turn");
    }

    #[test]
    fn builder_rejects_duplicates_and_empty_shapes() {
        let mut builder = FsmTree::builder("root");
        let root = builder.root();
        let play = builder.leaf(root, "play", PhaseLeaf::new()).unwrap();
        assert_eq!(
            builder.leaf(root, "play", PhaseLeaf::new()).unwrap_err(),
            FlowError::DuplicateNodeName("play".into())
        );
        assert_eq!(
            builder.branch(play, "inner").unwrap_err(),
            FlowError::NotABranch(play)
        );

        assert_eq!(FsmTree::builder("root").build().unwrap_err(), FlowError::EmptyTree);

        let mut builder = FsmTree::builder("root");
        let root = builder.root();
        builder.leaf(root, "play", PhaseLeaf::new()).unwrap();
        builder.branch(root, "hollow").unwrap();
        assert_eq!(
            builder.build().unwrap_err(),
            FlowError::EmptyBranch("hollow".into())
        );
    }
}
