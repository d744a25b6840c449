//! Combat tracker errors.

use crate::infrastructure::ports::RepoError;
use metallic_guardian_domain::{ActorId, CombatId, DomainError};

/// Errors from turn tracker commands.
#[derive(Debug, thiserror::Error)]
pub enum CombatError {
    #[error("No active combat with id {0}")]
    CombatNotFound(CombatId),

    #[error("Actor not found: {0}")]
    ActorNotFound(ActorId),

    #[error("Actor {0} is not in this combat")]
    ActorNotInCombat(ActorId),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
