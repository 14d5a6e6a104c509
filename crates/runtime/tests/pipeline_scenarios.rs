//! End-to-end behaviour of the command pipeline.

mod common;

use common::{InitCommand, Recorder, catalog, setup_play_tree, standard_builder};
use game_core::{
    AcknowledgeCommand, Command, CommandHandler, CommandRejection, CommandResult, CommandType,
    DecisionKind, DecisionOrigin, DecisionType, Effect, EndPhaseCommand, EntityId, FlowError,
    FsmTree, GameConfig, GameState, MoveCommand, MoveEntityDecision, PhaseLeaf,
    RemoveEntityDecision, SpawnCommand, SpawnRequest,
};
use runtime::{
    Admission, CommandPipeline, EffectBus, MoveHandler, PipelineBuilder, RuntimeConfig,
    RuntimeError, SpawnHandler, Topic,
};

fn play_pipeline() -> CommandPipeline {
    let mut pipeline = standard_builder()
        .flow(setup_play_tree())
        .build()
        .expect("pipeline builds");
    pipeline.submit(&InitCommand).expect("init succeeds");
    pipeline
}

fn spawn(definition: &str, count: u32) -> SpawnCommand {
    SpawnCommand::single(SpawnRequest::new(definition).with_count(count))
}

// ============================================================================
// Flow
// ============================================================================

#[test]
fn scenario_a_setup_hands_over_to_play() {
    let recorder = Recorder::default();
    let mut bus = EffectBus::new();
    bus.subscribe(recorder.sink());

    let mut pipeline = standard_builder()
        .flow(setup_play_tree())
        .bus(bus)
        .build()
        .expect("pipeline builds");

    assert_eq!(pipeline.current_phase(), Some("setup"));
    assert_eq!(recorder.names(), vec!["phase_changed"]);

    let result = pipeline.submit(&InitCommand).expect("submit");
    assert!(result.is_success());
    assert!(result.has_tag("init"));

    assert_eq!(pipeline.current_phase(), Some("play"));
    let play = pipeline.flow().tree().find("play");
    assert_eq!(pipeline.state().unwrap().current_phase(), play);
    assert_eq!(
        recorder.take(),
        vec![Effect::PhaseChanged {
            from: pipeline.flow().tree().find("setup"),
            to: play.unwrap(),
        }]
    );
}

#[test]
fn scenario_b_disallowed_command_leaves_phase_and_state() {
    let mut pipeline = standard_builder()
        .flow(setup_play_tree())
        .build()
        .expect("pipeline builds");
    let before = pipeline.state().unwrap();

    let result = pipeline
        .submit(&MoveCommand::new(EntityId(1), game_core::Position::new(1, 1)))
        .expect("submit");

    assert!(!result.is_success());
    assert_eq!(
        result.error,
        Some(CommandRejection::NotAllowed {
            command: MoveCommand::KIND,
            phase: "setup".into(),
        })
    );
    assert_eq!(pipeline.current_phase(), Some("setup"));
    assert_eq!(pipeline.state().unwrap(), before);
}

#[test]
fn scenario_f_self_transitioning_flow_fails_fast() {
    let mut builder = FsmTree::builder("game");
    let root = builder.root();
    let rounds = builder.repeating_branch(root, "rounds").unwrap();
    builder
        .leaf(
            rounds,
            "turn",
            PhaseLeaf::new()
                .allow(EndPhaseCommand::KIND)
                .advance_on_any(),
        )
        .unwrap();

    let config = RuntimeConfig::default()
        .with_game_config(GameConfig::default().with_max_auto_transitions(8));
    let mut pipeline = standard_builder()
        .config(config)
        .flow(builder.build().unwrap())
        .build()
        .expect("pipeline builds");
    let before = pipeline.state().unwrap();

    let err = pipeline.submit(&EndPhaseCommand).unwrap_err();

    match err {
        RuntimeError::Flow(FlowError::InfiniteLoopDetected { limit, chain }) => {
            assert_eq!(limit, 8);
            assert!(chain.iter().all(|node| node == "game/rounds/turn"));
        }
        other => panic!("expected loop detection, got {other:?}"),
    }
    assert_eq!(pipeline.current_phase(), Some("turn"));
    assert_eq!(pipeline.state().unwrap(), before);
}

#[test]
fn terminal_leaf_completes_flow_and_stays() {
    let mut pipeline = play_pipeline();
    pipeline.submit(&EndPhaseCommand).expect("to epilogue");
    assert_eq!(pipeline.current_phase(), Some("epilogue"));
    assert!(pipeline.flow().is_terminal());

    let recorder = Recorder::default();
    pipeline.subscribe_topic(Topic::Flow, recorder.sink());
    let result = pipeline.submit(&EndPhaseCommand).expect("submit");

    assert!(result.is_success());
    assert_eq!(pipeline.current_phase(), Some("epilogue"));
    assert_eq!(
        recorder.take(),
        vec![Effect::FlowCompleted {
            at: pipeline.current_node().unwrap()
        }]
    );
}

#[test]
fn consecutive_leaves_sharing_an_advance_kind_step_once_per_command() {
    let mut builder = FsmTree::builder("game");
    let root = builder.root();
    for name in ["player_turn", "enemy_turn", "debrief"] {
        builder
            .leaf(root, name, PhaseLeaf::new().advance_on(EndPhaseCommand::KIND))
            .unwrap();
    }
    let mut pipeline = standard_builder()
        .flow(builder.build().unwrap())
        .build()
        .expect("pipeline builds");
    assert_eq!(pipeline.current_phase(), Some("player_turn"));

    pipeline.submit(&EndPhaseCommand).expect("submit");
    assert_eq!(pipeline.current_phase(), Some("enemy_turn"));

    pipeline.submit(&EndPhaseCommand).expect("submit");
    assert_eq!(pipeline.current_phase(), Some("debrief"));
}

#[test]
fn repeating_rounds_advance_one_turn_per_end_phase() {
    let mut builder = FsmTree::builder("skirmish");
    let root = builder.root();
    builder
        .leaf(root, "deployment", PhaseLeaf::new().advance_on(EndPhaseCommand::KIND))
        .unwrap();
    let rounds = builder.repeating_branch(root, "rounds").unwrap();
    builder
        .leaf(
            rounds,
            "player_turn",
            PhaseLeaf::new()
                .allow(MoveCommand::KIND)
                .advance_on(EndPhaseCommand::KIND),
        )
        .unwrap();
    builder
        .leaf(rounds, "upkeep", PhaseLeaf::new().advance_on_any())
        .unwrap();
    builder
        .leaf(rounds, "enemy_turn", PhaseLeaf::new().advance_on(EndPhaseCommand::KIND))
        .unwrap();

    let recorder = Recorder::default();
    let mut pipeline = standard_builder()
        .flow(builder.build().unwrap())
        .build()
        .expect("pipeline builds");
    pipeline.subscribe_topic(Topic::Flow, recorder.sink());

    let mut visited = Vec::new();
    for _ in 0..5 {
        let result = pipeline.submit(&EndPhaseCommand).expect("submit");
        assert!(result.is_success());
        visited.push(pipeline.current_phase().unwrap().to_owned());
    }

    assert_eq!(
        visited,
        vec!["player_turn", "enemy_turn", "player_turn", "enemy_turn", "player_turn"]
    );
    // Every hand-over from player_turn also enters the pass-through upkeep leaf.
    let changes = recorder
        .take()
        .iter()
        .filter(|effect| matches!(effect, Effect::PhaseChanged { .. }))
        .count();
    assert_eq!(changes, 7);
}

// ============================================================================
// Spawning
// ============================================================================

#[test]
fn scenario_c_count_spawns_that_many_entities_in_order() {
    let mut pipeline = play_pipeline();
    let recorder = Recorder::default();
    pipeline.subscribe_topic(Topic::Entities, recorder.sink());

    let result = pipeline.submit(&spawn("zombie", 3)).expect("submit");

    assert!(result.is_success());
    assert_eq!(result.decisions.len(), 3);

    let state = pipeline.state().unwrap();
    assert_eq!(state.agent_count(), 3);

    let spawned: Vec<_> = recorder
        .take()
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::EntitySpawned { id, definition, .. } => Some((id, definition)),
            _ => None,
        })
        .collect();
    assert_eq!(
        spawned.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
        vec![EntityId(1), EntityId(2), EntityId(3)]
    );
    assert!(spawned.iter().all(|(_, def)| def.as_str() == "zombie"));
}

#[test]
fn scenario_d_unknown_definition_is_skipped_and_siblings_spawn() {
    let mut pipeline = play_pipeline();

    let command = SpawnCommand::new(vec![
        SpawnRequest::new("ghost").with_count(2),
        SpawnRequest::new("survivor"),
        SpawnRequest::new("supply_crate"),
    ]);
    let result = pipeline.submit(&command).expect("submit");

    assert!(result.is_success());
    assert_eq!(result.decisions.len(), 2);

    let state = pipeline.state().unwrap();
    assert_eq!(state.agent_count(), 1);
    assert_eq!(state.prop_count(), 1);
}

#[test]
fn spawn_count_is_clamped_by_config() {
    let mut pipeline = PipelineBuilder::new()
        .handler(common::InitHandler)
        .handler(SpawnHandler::new(catalog()).with_max_count(2))
        .handler(MoveHandler)
        .handler(runtime::EndPhaseHandler)
        .flow(setup_play_tree())
        .build()
        .expect("pipeline builds");
    pipeline.submit(&InitCommand).unwrap();

    pipeline.submit(&spawn("zombie", 50)).unwrap();

    assert_eq!(pipeline.state().unwrap().agent_count(), 2);
}

// ============================================================================
// Acknowledgment
// ============================================================================

#[test]
fn scenario_e_acknowledgment_gates_the_next_command() {
    let config = RuntimeConfig::default().with_acknowledgment_commands(["core.spawn"]);
    let mut pipeline = standard_builder()
        .config(config)
        .flow(setup_play_tree())
        .build()
        .expect("pipeline builds");
    pipeline.submit(&InitCommand).unwrap();
    assert!(!pipeline.is_awaiting_acknowledgment());

    let result = pipeline.submit(&spawn("survivor", 1)).unwrap();
    assert!(result.is_success());
    assert!(pipeline.is_awaiting_acknowledgment());

    let before = pipeline.state().unwrap();
    let blocked = pipeline
        .submit(&MoveCommand::new(EntityId(1), game_core::Position::new(2, 2)))
        .unwrap();
    assert_eq!(
        blocked.error,
        Some(CommandRejection::AwaitingAcknowledgment)
    );
    assert_eq!(pipeline.state().unwrap(), before);

    let ack = pipeline.submit(&AcknowledgeCommand).unwrap();
    assert!(ack.has_tag("acknowledged"));
    assert!(!pipeline.is_awaiting_acknowledgment());

    let moved = pipeline
        .submit(&MoveCommand::new(EntityId(1), game_core::Position::new(2, 2)))
        .unwrap();
    assert!(moved.is_success());
    assert_eq!(
        pipeline.state().unwrap().entity_position(EntityId(1)),
        Some(game_core::Position::new(2, 2))
    );
}

#[test]
fn acknowledging_without_pending_is_a_rejection() {
    let mut pipeline = play_pipeline();

    assert!(!pipeline.acknowledge());
    let result = pipeline.submit(&AcknowledgeCommand).unwrap();
    assert_eq!(
        result.error,
        Some(CommandRejection::NoPendingAcknowledgment)
    );
}

#[test]
fn failed_command_does_not_request_acknowledgment() {
    let config = RuntimeConfig::default().with_acknowledgment_commands(["core.move"]);
    let mut pipeline = standard_builder()
        .config(config)
        .flow(setup_play_tree())
        .build()
        .unwrap();
    pipeline.submit(&InitCommand).unwrap();

    let result = pipeline
        .submit(&MoveCommand::new(EntityId(7), game_core::Position::ORIGIN))
        .unwrap();

    assert!(!result.is_success());
    assert!(!pipeline.is_awaiting_acknowledgment());
}

// ============================================================================
// Admission and dispatch
// ============================================================================

#[test]
fn gate_denial_is_reported_with_reason() {
    let mut pipeline = standard_builder()
        .flow(setup_play_tree())
        .gate(|command: &dyn Command| {
            if command.kind() == InitCommand::KIND {
                Admission::deny("lobby is not full")
            } else {
                Admission::allow()
            }
        })
        .build()
        .unwrap();

    let result = pipeline.submit(&InitCommand).unwrap();

    assert_eq!(
        result.error,
        Some(CommandRejection::Denied("lobby is not full".into()))
    );
    assert_eq!(pipeline.current_phase(), Some("setup"));
}

#[test]
fn command_without_handler_is_fatal() {
    #[derive(Debug)]
    struct Unhandled;
    game_core::impl_command!(Unhandled => "test.unhandled");

    let mut pipeline = play_pipeline();

    let err = pipeline.submit(&Unhandled).unwrap_err();
    assert!(matches!(err, RuntimeError::NoHandlerRegistered { kind } if kind == Unhandled::KIND));
}

#[test]
fn handler_refusal_is_returned_as_is() {
    let mut pipeline = play_pipeline();
    pipeline.submit(&spawn("survivor", 2)).unwrap();
    let before = pipeline.state().unwrap();

    // entity 2 spawned on the origin next to entity 1
    let result = pipeline
        .submit(&MoveCommand::new(EntityId(1), game_core::Position::new(-3, 4)))
        .unwrap();
    assert!(result.is_success());

    let blocked = pipeline
        .submit(&MoveCommand::new(EntityId(2), game_core::Position::new(-3, 4)))
        .unwrap();
    assert!(matches!(blocked.error, Some(CommandRejection::Failed(_))));
    assert_ne!(pipeline.state().unwrap(), before);
    assert_eq!(
        pipeline.state().unwrap().entity_position(EntityId(2)),
        before.entity_position(EntityId(2))
    );
}

// ============================================================================
// Decisions
// ============================================================================

/// Removes an entity that may not exist.
#[derive(Debug)]
struct VanishCommand(EntityId);
game_core::impl_command!(VanishCommand => "test.vanish");

struct VanishHandler;

impl CommandHandler<VanishCommand> for VanishHandler {
    fn handle(&self, command: &VanishCommand, _state: &GameState) -> CommandResult {
        CommandResult::ok().with_decision(RemoveEntityDecision::new(
            command.0,
            DecisionOrigin::Command(VanishCommand::KIND),
        ))
    }

    fn produces(&self) -> &[DecisionKind] {
        &[RemoveEntityDecision::KIND]
    }
}

#[test]
fn rejected_decision_rolls_back_the_whole_submission() {
    let mut builder = FsmTree::builder("game");
    let root = builder.root();
    builder
        .leaf(
            root,
            "play",
            PhaseLeaf::new()
                .allow(SpawnCommand::KIND)
                .advance_on(VanishCommand::KIND),
        )
        .unwrap();
    builder.leaf(root, "after", PhaseLeaf::new()).unwrap();

    let mut pipeline = PipelineBuilder::new()
        .handler(SpawnHandler::new(catalog()))
        .handler(VanishHandler)
        .flow(builder.build().unwrap())
        .build()
        .unwrap();
    pipeline.submit(&spawn("zombie", 1)).unwrap();
    let before = pipeline.state().unwrap();
    let recorder = Recorder::default();
    pipeline.subscribe(recorder.sink());

    let result = pipeline.submit(&VanishCommand(EntityId(99))).unwrap();

    assert!(matches!(result.error, Some(CommandRejection::ApplyFailed(_))));
    assert_eq!(pipeline.current_phase(), Some("play"));
    assert_eq!(pipeline.state().unwrap(), before);
    assert!(recorder.take().is_empty());

    let result = pipeline.submit(&VanishCommand(EntityId(1))).unwrap();
    assert!(result.is_success());
    assert_eq!(pipeline.current_phase(), Some("after"));
    assert_eq!(pipeline.state().unwrap().agent_count(), 0);
}

/// Moves an entity now and again at the end of the submission.
#[derive(Debug)]
struct ShoveCommand(EntityId);
game_core::impl_command!(ShoveCommand => "test.shove");

struct ShoveHandler;

impl CommandHandler<ShoveCommand> for ShoveHandler {
    fn handle(&self, command: &ShoveCommand, _state: &GameState) -> CommandResult {
        let origin = DecisionOrigin::Command(ShoveCommand::KIND);
        CommandResult::ok()
            .with_decision(
                MoveEntityDecision::new(command.0, game_core::Position::new(5, 5), origin)
                    .deferred(),
            )
            .with_decision(MoveEntityDecision::new(
                command.0,
                game_core::Position::new(1, 1),
                origin,
            ))
    }

    fn produces(&self) -> &[DecisionKind] {
        &[MoveEntityDecision::KIND]
    }
}

// Deferred decisions are assumed to flush after the immediate ones and after
// any transition the command triggered: handler first, then flow.
#[test]
fn deferred_decisions_flush_after_transitions() {
    let mut builder = FsmTree::builder("game");
    let root = builder.root();
    builder
        .leaf(
            root,
            "play",
            PhaseLeaf::new()
                .allow(SpawnCommand::KIND)
                .advance_on(ShoveCommand::KIND),
        )
        .unwrap();
    builder
        .leaf(
            root,
            "resolve",
            PhaseLeaf::new().on_enter(&[MoveEntityDecision::KIND], |node, _| {
                vec![Box::new(
                    MoveEntityDecision::new(
                        EntityId(1),
                        game_core::Position::new(9, 9),
                        DecisionOrigin::Phase(node),
                    )
                    .deferred(),
                )]
            }),
        )
        .unwrap();

    let mut pipeline = PipelineBuilder::new()
        .handler(SpawnHandler::new(catalog()))
        .handler(ShoveHandler)
        .flow(builder.build().unwrap())
        .build()
        .unwrap();
    pipeline.submit(&spawn("survivor", 1)).unwrap();
    let recorder = Recorder::default();
    pipeline.subscribe(recorder.sink());

    pipeline.submit(&ShoveCommand(EntityId(1))).unwrap();

    let moves: Vec<_> = recorder
        .take()
        .into_iter()
        .map(|effect| match effect {
            Effect::EntityMoved { to, .. } => format!("move {to}"),
            other => other.as_str().to_owned(),
        })
        .collect();
    assert_eq!(
        moves,
        vec![
            format!("move {}", game_core::Position::new(1, 1)),
            "phase_changed".to_owned(),
            format!("move {}", game_core::Position::new(5, 5)),
            format!("move {}", game_core::Position::new(9, 9)),
        ]
    );
    assert_eq!(pipeline.current_phase(), Some("resolve"));
}

#[test]
fn identical_command_sequences_reach_identical_states() {
    fn run() -> [u8; 32] {
        let mut pipeline = play_pipeline();
        pipeline.submit(&spawn("zombie", 2)).unwrap();
        pipeline.submit(&spawn("supply_crate", 1)).unwrap();
        pipeline
            .submit(&MoveCommand::new(EntityId(2), game_core::Position::new(3, -1)))
            .unwrap();
        pipeline.submit(&EndPhaseCommand).unwrap();
        pipeline.state().unwrap().state_root().unwrap()
    }

    let first = run();
    let second = run();
    assert_eq!(hex::encode(first), hex::encode(second));
    assert_ne!(first, GameState::empty().state_root().unwrap());
}

// ============================================================================
// Wiring
// ============================================================================

#[test]
fn leaf_allowing_unhandled_command_fails_verification() {
    let err = PipelineBuilder::new()
        .handler(common::InitHandler)
        .flow(setup_play_tree())
        .build()
        .unwrap_err();

    let RuntimeError::Wiring { issues } = err else {
        panic!("expected wiring error, got {err:?}");
    };
    assert!(issues.iter().any(|issue| issue.contains("'core.move'")));
    assert!(issues.iter().any(|issue| issue.contains("'core.spawn'")));
    assert!(issues.iter().all(|issue| !issue.contains("test.init")));
}

#[test]
fn produced_kind_without_applier_fails_verification() {
    let mut builder = FsmTree::builder("game");
    let root = builder.root();
    builder
        .leaf(root, "play", PhaseLeaf::new().allow(VanishCommand::KIND))
        .unwrap();

    let err = PipelineBuilder::new()
        .appliers(game_core::ApplierRegistry::new())
        .handler(VanishHandler)
        .flow(builder.build().unwrap())
        .build()
        .unwrap_err();

    let RuntimeError::Wiring { issues } = err else {
        panic!("expected wiring error, got {err:?}");
    };
    assert_eq!(
        issues,
        vec![format!(
            "handler for 'test.vanish' may produce '{}' but no applier is registered",
            RemoveEntityDecision::KIND
        )]
    );
}

#[test]
fn duplicate_handler_and_missing_tree_are_reported() {
    let err = PipelineBuilder::new()
        .handler(MoveHandler)
        .handler(MoveHandler)
        .flow(setup_play_tree())
        .build()
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Registration(_)));

    let err = standard_builder().build().unwrap_err();
    assert!(matches!(err, RuntimeError::MissingComponent("flow tree")));
}
