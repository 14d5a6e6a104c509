//! Scripted command sequences.
//!
//! A script is a JSON array of steps:
//!
//! ```json
//! [
//!   { "spawn": [{ "definition": "zombie", "count": 2, "position": { "x": 4, "y": 4 } }] },
//!   { "move": { "entity": 1, "to": { "x": 1, "y": 0 } } },
//!   "end_phase",
//!   "acknowledge"
//! ]
//! ```

use std::path::Path;

use anyhow::Context;
use game_core::{
    AcknowledgeCommand, Command, EndPhaseCommand, EntityId, MoveCommand, Position, SpawnCommand,
    SpawnRequest,
};
use serde::Deserialize;

/// One scripted command.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStep {
    Spawn(Vec<SpawnRequest>),
    Move { entity: EntityId, to: Position },
    EndPhase,
    Acknowledge,
}

impl ScriptStep {
    pub fn into_command(self) -> Box<dyn Command> {
        match self {
            ScriptStep::Spawn(requests) => Box::new(SpawnCommand::new(requests)),
            ScriptStep::Move { entity, to } => Box::new(MoveCommand::new(entity, to)),
            ScriptStep::EndPhase => Box::new(EndPhaseCommand),
            ScriptStep::Acknowledge => Box::new(AcknowledgeCommand),
        }
    }
}

const DEMO: &str = include_str!("../scripts/demo.json");

pub fn parse(content: &str) -> anyhow::Result<Vec<ScriptStep>> {
    serde_json::from_str(content).context("Failed to parse script JSON")
}

pub fn load(path: &Path) -> anyhow::Result<Vec<ScriptStep>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    parse(&content)
}

/// The bundled demo session.
pub fn demo() -> anyhow::Result<Vec<ScriptStep>> {
    parse(DEMO)
}
