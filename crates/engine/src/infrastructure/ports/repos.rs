//! Repository port traits for actor storage.

use metallic_guardian_domain::{Actor, ActorId};

use super::error::RepoError;

// =============================================================================
// Actor Storage
// =============================================================================

/// The host's document store, reduced to what derivation needs.
///
/// Saved actors are stored whole: raw fields, derived fields and owned items.
#[cfg_attr(test, mockall::automock)]
pub trait ActorRepo: Send + Sync {
    fn get(&self, id: ActorId) -> Result<Option<Actor>, RepoError>;
    fn save(&self, actor: &Actor) -> Result<(), RepoError>;
    fn delete(&self, id: ActorId) -> Result<(), RepoError>;
    fn list(&self) -> Result<Vec<Actor>, RepoError>;
}
