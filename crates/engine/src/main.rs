//! Metallic Guardian Engine - Main entry point.
//!
//! Prepares a roster file and prints each actor's derived data together with
//! the opening turn order:
//!
//! ```text
//! metallic-guardian-engine [ROSTER]
//! ```
//!
//! Without an argument the roster path is read from `MG_ROSTER_PATH`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metallic_guardian_domain::Actor;
use metallic_guardian_engine::infrastructure::{
    config::{EngineConfig, ROSTER_PATH_VAR},
    memory::InMemoryActorRepo,
    roster::load_roster,
};
use metallic_guardian_engine::use_cases::TurnEntry;
use metallic_guardian_engine::App;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    system: String,
    actors: Vec<Actor>,
    turn_order: Vec<TurnEntry>,
}

fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metallic_guardian_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = EngineConfig::from_env();
    let roster_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.roster_path.clone())
        .with_context(|| format!("no roster given: pass a path or set {}", ROSTER_PATH_VAR))?;

    let actors = load_roster(&roster_path)
        .with_context(|| format!("failed to load roster {}", roster_path.display()))?;
    let repo = Arc::new(InMemoryActorRepo::from_actors(actors));
    let app = App::new(repo, &config);

    let actors = app.use_cases.preparation.prepare_all()?;

    let combat = &app.use_cases.combat;
    let combat_id = combat.create_combat();
    for actor in &actors {
        combat.add_combatant(combat_id, actor.id)?;
    }
    if actors.is_empty() {
        tracing::warn!("Roster is empty; combat not started");
    } else {
        combat.start_combat(combat_id)?;
    }

    let report = Report {
        system: app.system.display_name().to_string(),
        turn_order: combat.turn_order(combat_id)?,
        actors,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
