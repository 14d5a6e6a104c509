//! Tactics client binary.
//!
//! Runs a scripted session against the bundled (or `CONTENT_DIR`) content and
//! prints every effect as a JSON line on stdout. Logs go to stderr.
//!
//! ```bash
//! # bundled demo
//! cargo run -p tactics-client
//!
//! # custom script, spawns need acknowledging, verbose logs
//! ACK_COMMANDS=core.spawn RUST_LOG=runtime=debug cargo run -p tactics-client -- my_script.json
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use tactics_client::{ClientConfig, Session, script};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = ClientConfig::from_env().with_script(std::env::args_os().nth(1).map(PathBuf::from));
    tracing::info!(
        state_dir = ?config.runtime.state_dir,
        acknowledgment = ?config.runtime.acknowledgment_commands,
        "Starting session"
    );

    let steps = match &config.script {
        Some(path) => script::load(path)?,
        None => script::demo()?,
    };

    let mut session = Session::assemble(&config)?;
    tracing::info!(phase = ?session.pipeline().current_phase(), "Session ready");

    session.on_effect(|effect| match serde_json::to_string(effect) {
        Ok(line) => {
            let _ = writeln!(std::io::stdout().lock(), "{line}");
        }
        Err(e) => tracing::error!("Failed to encode effect: {e}"),
    });

    let outcomes = session.run(steps)?;
    let rejected = outcomes.iter().filter(|outcome| !outcome.success).count();
    tracing::info!(
        steps = outcomes.len(),
        rejected,
        phase = ?session.pipeline().current_phase(),
        "Session finished"
    );

    Ok(())
}

/// Logs to stderr, filtered by `RUST_LOG` (default: info).
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
