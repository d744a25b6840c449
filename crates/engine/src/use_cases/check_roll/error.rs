//! Check roll errors.

use crate::infrastructure::ports::RepoError;
use metallic_guardian_domain::{ActorId, DomainError, ItemId};

#[derive(Debug, thiserror::Error)]
pub enum CheckRollError {
    #[error("Actor not found: {0}")]
    ActorNotFound(ActorId),

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Item {0} is not a weapon")]
    NotAWeapon(ItemId),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
