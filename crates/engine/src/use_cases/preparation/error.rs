//! Preparation errors.

use crate::infrastructure::ports::RepoError;
use metallic_guardian_domain::{ActorId, DomainError};

/// Errors that can occur while preparing derived data.
#[derive(Debug, thiserror::Error)]
pub enum PreparationError {
    #[error("Actor not found: {0}")]
    ActorNotFound(ActorId),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
