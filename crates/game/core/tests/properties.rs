//! Property tests for tree traversal and decision application.

use game_core::{
    AgentState, AgentStats, ApplierRegistry, Decision, DecisionOrigin, DefinitionId, EntityId,
    Faction, FsmTree, GameConfig, GameState, MoveEntityDecision, NodeId, PhaseLeaf, Position,
    RemoveEntityDecision,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Shape {
    Leaf,
    Branch,
    Repeating,
}

fn shape(allow_repeating: bool) -> impl Strategy<Value = Shape> {
    if allow_repeating {
        prop_oneof![
            3 => Just(Shape::Leaf),
            2 => Just(Shape::Branch),
            1 => Just(Shape::Repeating),
        ]
        .boxed()
    } else {
        prop_oneof![3 => Just(Shape::Leaf), 2 => Just(Shape::Branch)].boxed()
    }
}

/// Builds a tree from `(parent selector, shape)` pairs, then gives every
/// branch one extra leaf so the tree is always valid.
fn build_tree(ops: &[(usize, Shape)]) -> FsmTree {
    let mut builder = FsmTree::builder("root");
    let mut branches = vec![builder.root()];

    for (index, (selector, shape)) in ops.iter().enumerate() {
        let parent = branches[selector % branches.len()];
        let name = format!("n{index}");
        match shape {
            Shape::Leaf => {
                builder.leaf(parent, name, PhaseLeaf::new()).unwrap();
            }
            Shape::Branch => branches.push(builder.branch(parent, name).unwrap()),
            Shape::Repeating => branches.push(builder.repeating_branch(parent, name).unwrap()),
        }
    }
    for (index, branch) in branches.iter().enumerate() {
        builder
            .leaf(*branch, format!("pad{index}"), PhaseLeaf::new())
            .unwrap();
    }

    builder.build().unwrap()
}

proptest! {
    #[test]
    fn walk_without_repeating_branches_reaches_a_terminal_leaf(
        ops in prop::collection::vec((any::<usize>(), shape(false)), 0..40)
    ) {
        let tree = build_tree(&ops);
        let leaf_count = tree.leaves().count();

        let mut current = tree.first_leaf().unwrap();
        let mut steps = 0;
        while let Some(next) = tree.next_leaf(current) {
            prop_assert!(tree.is_leaf(next));
            current = next;
            steps += 1;
            prop_assert!(steps < leaf_count);
        }
        prop_assert!(tree.is_terminal(current));
    }

    #[test]
    fn walk_with_repeating_branches_is_bounded_by_the_guard(
        ops in prop::collection::vec((any::<usize>(), shape(true)), 0..40)
    ) {
        let tree = build_tree(&ops);
        let guard = GameConfig::DEFAULT_MAX_AUTO_TRANSITIONS;

        let mut current = tree.first_leaf().unwrap();
        for _ in 0..guard {
            match tree.next_leaf(current) {
                Some(next) => {
                    prop_assert!(tree.is_leaf(next));
                    current = next;
                }
                None => {
                    prop_assert!(tree.is_terminal(current));
                    break;
                }
            }
        }
    }

    #[test]
    fn get_next_never_leaves_the_arena(
        ops in prop::collection::vec((any::<usize>(), shape(true)), 0..40)
    ) {
        let tree = build_tree(&ops);
        for index in 0..tree.len() {
            if let Some(next) = tree.get_next(NodeId(index as u16)) {
                prop_assert!(next.index() < tree.len());
            }
        }
    }

    #[test]
    fn identical_decision_lists_yield_identical_states(
        moves in prop::collection::vec((1u32..6, -5i32..5, -5i32..5, any::<bool>()), 0..30)
    ) {
        let mut initial = GameState::empty();
        for id in 1..=5 {
            initial.insert_agent(AgentState::new(
                EntityId(id),
                DefinitionId::from("drone"),
                Position::ORIGIN,
                Faction::Neutral,
                AgentStats::default(),
            ));
        }

        let decisions: Vec<Box<dyn Decision>> = moves
            .iter()
            .map(|&(id, x, y, remove)| -> Box<dyn Decision> {
                if remove {
                    Box::new(RemoveEntityDecision::new(EntityId(id), DecisionOrigin::System))
                } else {
                    Box::new(MoveEntityDecision::new(
                        EntityId(id),
                        Position::new(x, y),
                        DecisionOrigin::System,
                    ))
                }
            })
            .collect();

        let registry = ApplierRegistry::with_core_appliers();
        let first = registry.apply_all(decisions.iter().map(|d| d.as_ref()), initial.clone());
        let second = registry.apply_all(decisions.iter().map(|d| d.as_ref()), initial);

        prop_assert_eq!(first, second);
    }
}
