//! Roster files: a JSON array of actors in the host's document shape.

use std::path::Path;

use metallic_guardian_domain::Actor;

use crate::infrastructure::ports::RepoError;

/// Read a roster file.
pub fn load_roster(path: &Path) -> Result<Vec<Actor>, RepoError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| RepoError::storage("load_roster", format!("{}: {}", path.display(), e)))?;
    let actors: Vec<Actor> = serde_json::from_str(&raw).map_err(RepoError::serialization)?;
    tracing::info!(path = %path.display(), actors = actors.len(), "Loaded roster");
    Ok(actors)
}

/// Write a roster file, pretty-printed.
pub fn save_roster(path: &Path, actors: &[Actor]) -> Result<(), RepoError> {
    let json = serde_json::to_string_pretty(actors).map_err(RepoError::serialization)?;
    std::fs::write(path, json)
        .map_err(|e| RepoError::storage("save_roster", format!("{}: {}", path.display(), e)))
}
