//! Guardian sheet actions.
//!
//! Pilot drop/removal, model removal and equip toggles. Every successful
//! action saves the actor and re-prepares it so derived fields never lag
//! behind the change.

mod error;

pub use error::GuardianSheetError;

use std::sync::Arc;

use metallic_guardian_domain::{
    Actor, ActorId, ActorKind, DomainError, GuardianData, ItemId, ItemKind, PilotLink,
};

use crate::infrastructure::ports::ActorRepo;
use crate::use_cases::preparation::Preparation;

/// Sheet actions over the actor store.
pub struct GuardianSheet {
    repo: Arc<dyn ActorRepo>,
    preparation: Arc<Preparation>,
}

impl GuardianSheet {
    pub fn new(repo: Arc<dyn ActorRepo>, preparation: Arc<Preparation>) -> Self {
        Self { repo, preparation }
    }

    /// Link `candidate` as the guardian's pilot.
    ///
    /// The candidate must be a stored linkage actor. Nothing is written when
    /// it is rejected.
    pub fn assign_pilot(
        &self,
        guardian_id: ActorId,
        candidate_id: ActorId,
    ) -> Result<Actor, GuardianSheetError> {
        let mut guardian = self.load(guardian_id)?;

        let candidate = self.repo.get(candidate_id)?.ok_or_else(|| {
            GuardianSheetError::InvalidPilot(format!("no actor with id {}", candidate_id))
        })?;
        if candidate.kind() != ActorKind::Linkage {
            return Err(GuardianSheetError::InvalidPilot(format!(
                "{} is a {} actor, only linkage actors can pilot",
                candidate.name,
                candidate.kind()
            )));
        }

        guardian_data(&mut guardian)?.pilot = PilotLink::to(candidate.id, candidate.name.clone());
        self.repo.save(&guardian)?;

        tracing::info!(
            guardian_id = %guardian_id,
            pilot_id = %candidate_id,
            pilot = %candidate.name,
            "Pilot assigned"
        );

        Ok(self.preparation.prepare(guardian_id)?)
    }

    /// Clear the guardian's pilot link.
    pub fn remove_pilot(&self, guardian_id: ActorId) -> Result<Actor, GuardianSheetError> {
        let mut guardian = self.load(guardian_id)?;
        guardian_data(&mut guardian)?.pilot = PilotLink::default();
        self.repo.save(&guardian)?;

        tracing::info!(guardian_id = %guardian_id, "Pilot removed");
        Ok(self.preparation.prepare(guardian_id)?)
    }

    /// Delete every model item the guardian owns.
    pub fn remove_model(&self, guardian_id: ActorId) -> Result<Actor, GuardianSheetError> {
        let mut guardian = self.load(guardian_id)?;
        guardian_data(&mut guardian)?;

        let removed = guardian.remove_items_of(ItemKind::GuardianModel);
        self.repo.save(&guardian)?;

        tracing::info!(guardian_id = %guardian_id, removed, "Model removed");
        Ok(self.preparation.prepare(guardian_id)?)
    }

    /// Flip an item's equip flag. Works for any actor that owns the item.
    pub fn set_equipped(
        &self,
        actor_id: ActorId,
        item_id: ItemId,
        equipped: bool,
    ) -> Result<Actor, GuardianSheetError> {
        let mut actor = self.load(actor_id)?;
        actor
            .item_mut(item_id)
            .ok_or(GuardianSheetError::ItemNotFound(item_id))?
            .set_equipped(equipped)?;
        self.repo.save(&actor)?;

        tracing::debug!(actor_id = %actor_id, item_id = %item_id, equipped, "Equip toggled");
        Ok(self.preparation.prepare(actor_id)?)
    }

    fn load(&self, id: ActorId) -> Result<Actor, GuardianSheetError> {
        self.repo
            .get(id)?
            .ok_or(GuardianSheetError::ActorNotFound(id))
    }
}

fn guardian_data(actor: &mut Actor) -> Result<&mut GuardianData, DomainError> {
    let actual = actor.kind().as_str();
    actor
        .as_guardian_mut()
        .ok_or_else(|| DomainError::wrong_actor_type("guardian", actual))
}
