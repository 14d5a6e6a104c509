//! Fixtures shared by the runtime integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use game_core::{
    AgentStats, AgentTemplate, CatalogOracle, CommandHandler, CommandResult, CommandType,
    Definition, EndPhaseCommand, Effect, Faction, FsmTree, GameState, MoveCommand, PhaseLeaf,
    PropKind, PropTemplate, SpawnCommand,
};
use runtime::{CatalogOracleImpl, EndPhaseHandler, MoveHandler, PipelineBuilder, SpawnHandler};

/// Leaves the setup phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitCommand;
game_core::impl_command!(InitCommand => "test.init");

pub struct InitHandler;

impl CommandHandler<InitCommand> for InitHandler {
    fn handle(&self, _command: &InitCommand, _state: &GameState) -> CommandResult {
        CommandResult::ok().with_tag("init")
    }
}

pub fn catalog() -> Arc<dyn CatalogOracle> {
    let oracle: CatalogOracleImpl = [
        Definition::agent(
            "zombie",
            AgentTemplate {
                stats: AgentStats::new(8, 3, 2),
                faction: Faction::Hostile,
            },
        ),
        Definition::agent(
            "survivor",
            AgentTemplate {
                stats: AgentStats::new(12, 4, 3),
                faction: Faction::Player,
            },
        ),
        Definition::prop(
            "supply_crate",
            PropTemplate {
                kind: PropKind::Objective,
                is_active: true,
            },
        ),
    ]
    .into_iter()
    .collect();
    Arc::new(oracle)
}

/// `game/setup` (advances on init) then `game/play` (spawn, move, end phase)
/// then `game/epilogue` (move, end phase).
pub fn setup_play_tree() -> FsmTree {
    let mut builder = FsmTree::builder("game");
    let root = builder.root();
    builder
        .leaf(root, "setup", PhaseLeaf::new().advance_on(InitCommand::KIND))
        .expect("setup leaf");
    builder
        .leaf(
            root,
            "play",
            PhaseLeaf::new()
                .allow(SpawnCommand::KIND)
                .allow(MoveCommand::KIND)
                .advance_on(EndPhaseCommand::KIND),
        )
        .expect("play leaf");
    builder
        .leaf(
            root,
            "epilogue",
            PhaseLeaf::new()
                .allow(MoveCommand::KIND)
                .advance_on(EndPhaseCommand::KIND),
        )
        .expect("epilogue leaf");
    builder.build().expect("tree is valid")
}

/// Builder with the init, spawn, move and end-phase handlers.
pub fn standard_builder() -> PipelineBuilder {
    PipelineBuilder::new()
        .handler(InitHandler)
        .handler(SpawnHandler::new(catalog()))
        .handler(MoveHandler)
        .handler(EndPhaseHandler)
}

/// Effect sink for subscriptions.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Effect>>>);

impl Recorder {
    pub fn sink(&self) -> impl FnMut(&Effect) + Send + 'static {
        let effects = Arc::clone(&self.0);
        move |effect| effects.lock().expect("recorder lock").push(effect.clone())
    }

    pub fn take(&self) -> Vec<Effect> {
        std::mem::take(&mut *self.0.lock().expect("recorder lock"))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.take().iter().map(Effect::as_str).collect()
    }
}
