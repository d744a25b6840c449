//! Guardian sheet errors.

use crate::infrastructure::ports::RepoError;
use crate::use_cases::preparation::PreparationError;
use metallic_guardian_domain::{ActorId, DomainError, ItemId};

/// Errors from sheet actions.
#[derive(Debug, thiserror::Error)]
pub enum GuardianSheetError {
    #[error("Actor not found: {0}")]
    ActorNotFound(ActorId),

    /// The dropped actor cannot pilot a guardian
    #[error("Invalid pilot: {0}")]
    InvalidPilot(String),

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    #[error("Preparation failed: {0}")]
    Preparation(#[from] PreparationError),
}

impl GuardianSheetError {
    /// Whether the host should show this as a warning and carry on.
    ///
    /// Rejected user input aborts only the requested action; storage
    /// failures do not fall in this class.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::ActorNotFound(_)
                | Self::InvalidPilot(_)
                | Self::ItemNotFound(_)
                | Self::Domain(_)
        )
    }
}
