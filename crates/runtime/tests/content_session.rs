//! A session driven entirely by the bundled content files.

use std::sync::Arc;

use game_content::ContentFactory;
use game_core::{
    EndPhaseCommand, EntityId, Faction, MoveCommand, Position, SpawnCommand, SpawnRequest,
};
use runtime::{CatalogOracleImpl, PipelineBuilder, RuntimeConfig, default_handlers};

fn bundled_pipeline() -> runtime::CommandPipeline {
    let content = ContentFactory::bundled();
    let game_config = content.load_config().expect("config");
    let catalog: CatalogOracleImpl = content
        .load_catalog()
        .expect("catalog")
        .into_iter()
        .collect();

    let handlers = default_handlers(Arc::new(catalog), &game_config).expect("handlers");
    let flow = content.load_flow(&handlers.kinds()).expect("flow");

    PipelineBuilder::new()
        .config(RuntimeConfig::default().with_game_config(game_config))
        .handlers(handlers)
        .flow(flow)
        .build()
        .expect("pipeline builds")
}

#[test]
fn deployment_then_alternating_turns() {
    let mut pipeline = bundled_pipeline();
    assert_eq!(pipeline.current_phase(), Some("deployment"));

    let deploy = SpawnCommand::new(vec![
        SpawnRequest::new("survivor").at(Position::new(1, 1)),
        SpawnRequest::new("medic")
            .at(Position::new(1, 2))
            .with_override("max_hp", 15_i64),
    ]);
    assert!(pipeline.submit(&deploy).unwrap().is_success());
    pipeline.submit(&EndPhaseCommand).unwrap();
    assert_eq!(pipeline.current_phase(), Some("player_turn"));

    let moved = pipeline
        .submit(&MoveCommand::new(EntityId(1), Position::new(2, 1)))
        .unwrap();
    assert!(moved.is_success());
    pipeline.submit(&EndPhaseCommand).unwrap();
    assert_eq!(pipeline.current_phase(), Some("enemy_turn"));

    let horde = SpawnCommand::single(
        SpawnRequest::new("zombie")
            .with_count(3)
            .at(Position::new(8, 8)),
    );
    pipeline.submit(&horde).unwrap();
    pipeline.submit(&EndPhaseCommand).unwrap();
    assert_eq!(pipeline.current_phase(), Some("player_turn"));

    let state = pipeline.state().unwrap();
    assert_eq!(state.agent_count(), 5);
    assert_eq!(
        state
            .agents()
            .filter(|agent| agent.faction == Faction::Hostile)
            .count(),
        3
    );
    assert_eq!(state.agent(EntityId(2)).map(|agent| agent.stats.max_hp), Some(15));
    assert_eq!(state.entity_position(EntityId(1)), Some(Position::new(2, 1)));
}

#[test]
fn spawning_is_not_allowed_on_the_player_turn() {
    let mut pipeline = bundled_pipeline();
    pipeline.submit(&EndPhaseCommand).unwrap();

    let result = pipeline
        .submit(&SpawnCommand::single(SpawnRequest::new("zombie")))
        .unwrap();

    assert!(!result.is_success());
    assert_eq!(pipeline.state().unwrap().agent_count(), 0);
}
