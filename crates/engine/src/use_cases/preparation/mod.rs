//! Preparation use cases.
//!
//! Loads actors from the store, recomputes their derived fields and saves
//! them back. Guardians read their pilot through the store; the pilot is
//! re-derived first so the guardian never sees stale numbers.

mod error;

pub use error::PreparationError;

use std::sync::Arc;

use metallic_guardian_domain::{Actor, ActorId, ActorKind, GameSystem, NoActors, PilotSnapshot};

use crate::infrastructure::ports::ActorRepo;

/// Derivation over the actor store.
pub struct Preparation {
    repo: Arc<dyn ActorRepo>,
    system: Arc<dyn GameSystem>,
}

impl Preparation {
    pub fn new(repo: Arc<dyn ActorRepo>, system: Arc<dyn GameSystem>) -> Self {
        Self { repo, system }
    }

    /// Derive one actor and save it.
    pub fn prepare(&self, id: ActorId) -> Result<Actor, PreparationError> {
        let mut actor = self
            .repo
            .get(id)?
            .ok_or(PreparationError::ActorNotFound(id))?;

        let resolver = |pilot_id: ActorId| self.settled_pilot(pilot_id);
        self.system.prepare_derived_data(&mut actor, &resolver);
        self.repo.save(&actor)?;

        Ok(actor)
    }

    /// Derive every stored actor, pilots before everything else.
    ///
    /// Returns the prepared actors with pilots first, each group in store order.
    pub fn prepare_all(&self) -> Result<Vec<Actor>, PreparationError> {
        let (mut pilots, mut others): (Vec<Actor>, Vec<Actor>) = self
            .repo
            .list()?
            .into_iter()
            .partition(|actor| actor.kind() == ActorKind::Linkage);

        for pilot in &mut pilots {
            self.system.prepare_derived_data(pilot, &NoActors);
            self.repo.save(pilot)?;
        }

        for actor in &mut others {
            self.system.prepare_derived_data(actor, &pilots);
            self.repo.save(actor)?;
        }

        tracing::info!(
            pilots = pilots.len(),
            others = others.len(),
            "Prepared all actors"
        );

        pilots.extend(others);
        Ok(pilots)
    }

    /// A pilot's snapshot after re-deriving it, or `None` when the id does
    /// not name a pilot in the store.
    fn settled_pilot(&self, id: ActorId) -> Option<PilotSnapshot> {
        match self.repo.get(id) {
            Ok(Some(mut pilot)) if pilot.kind() == ActorKind::Linkage => {
                self.system.prepare_derived_data(&mut pilot, &NoActors);
                PilotSnapshot::of(&pilot)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(pilot_id = %id, error = %e, "Failed to load pilot");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockActorRepo, RepoError};
    use metallic_guardian_domain::{
        Attributes, BattleStat, GuardianData, Item, ItemData, LinkageData, MetallicGuardianSystem,
        ModelData, NpcData, PilotLink, StatBonuses,
    };
    use mockall::predicate::*;

    fn pilot() -> Actor {
        Actor::linkage(
            "Rin",
            LinkageData {
                attributes: Attributes::from_values([12, 9, 9, 6, 9, 6]),
                ..LinkageData::default()
            },
        )
    }

    fn guardian(pilot: &Actor) -> Actor {
        Actor::guardian(
            "Unit-01",
            GuardianData {
                pilot: PilotLink::to(pilot.id, pilot.name.clone()),
                ..GuardianData::default()
            },
        )
        .with_item(Item::new(
            "Frame",
            ItemData::GuardianModel(ModelData {
                battle_stats: StatBonuses::zero().with(BattleStat::Durability, 20),
                size: "M".to_string(),
                ..ModelData::default()
            }),
        ))
    }

    fn use_case(repo: MockActorRepo) -> Preparation {
        Preparation::new(Arc::new(repo), Arc::new(MetallicGuardianSystem::new()))
    }

    #[test]
    fn prepare_guardian_reads_freshly_derived_pilot() {
        // Stored pilot has never been prepared: all derived fields are 0
        let rin = pilot();
        let mech = guardian(&rin);
        let (rin_id, mech_id) = (rin.id, mech.id);

        let mut repo = MockActorRepo::new();
        repo.expect_get()
            .with(eq(mech_id))
            .returning(move |_| Ok(Some(mech.clone())));
        repo.expect_get()
            .with(eq(rin_id))
            .returning(move |_| Ok(Some(rin.clone())));
        repo.expect_save()
            .withf(move |actor| actor.id == mech_id)
            .times(1)
            .returning(|_| Ok(()));

        let prepared = use_case(repo).prepare(mech_id).unwrap();
        let data = prepared.as_guardian().unwrap();
        assert_eq!(data.attributes.str.modifier, 4);
        assert_eq!(data.battle_stats.durability.total, 32);
        assert_eq!(data.hp.max, 32);
        assert_eq!(data.size, "M");
    }

    #[test]
    fn dangling_pilot_derives_with_zero_pilot_terms() {
        let rin = pilot();
        let mech = guardian(&rin);
        let (rin_id, mech_id) = (rin.id, mech.id);

        let mut repo = MockActorRepo::new();
        repo.expect_get()
            .with(eq(mech_id))
            .returning(move |_| Ok(Some(mech.clone())));
        repo.expect_get().with(eq(rin_id)).returning(|_| Ok(None));
        repo.expect_save().returning(|_| Ok(()));

        let prepared = use_case(repo).prepare(mech_id).unwrap();
        let data = prepared.as_guardian().unwrap();
        assert_eq!(data.attributes.str.modifier, 0);
        assert_eq!(data.battle_stats.durability.total, 20);
    }

    #[test]
    fn pilot_lookup_errors_degrade_to_unlinked() {
        let rin = pilot();
        let mech = guardian(&rin);
        let (rin_id, mech_id) = (rin.id, mech.id);

        let mut repo = MockActorRepo::new();
        repo.expect_get()
            .with(eq(mech_id))
            .returning(move |_| Ok(Some(mech.clone())));
        repo.expect_get()
            .with(eq(rin_id))
            .returning(|_| Err(RepoError::storage("get", "offline")));
        repo.expect_save().returning(|_| Ok(()));

        let prepared = use_case(repo).prepare(mech_id).unwrap();
        assert_eq!(prepared.as_guardian().unwrap().hp.max, 20);
    }

    #[test]
    fn missing_actor_is_not_found() {
        let mut repo = MockActorRepo::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_save().never();

        let result = use_case(repo).prepare(ActorId::new());
        assert!(matches!(result, Err(PreparationError::ActorNotFound(_))));
    }

    #[test]
    fn prepare_all_derives_pilots_first() {
        let rin = pilot();
        let mech = guardian(&rin);
        let npc = Actor::npc(
            "Officer",
            NpcData {
                cr: Some(3.0),
                ..NpcData::default()
            },
        );
        // Guardian listed before its pilot
        let stored = vec![mech.clone(), npc.clone(), rin.clone()];

        let mut repo = MockActorRepo::new();
        repo.expect_list().returning(move || Ok(stored.clone()));
        repo.expect_save().times(3).returning(|_| Ok(()));

        let prepared = use_case(repo).prepare_all().unwrap();
        let names: Vec<&str> = prepared.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Rin", "Unit-01", "Officer"]);

        let mech = prepared[1].as_guardian().unwrap();
        assert_eq!(mech.battle_stats.durability.total, 32);
        assert_eq!(mech.battle_stats.accuracy.total, 3);
    }
}
