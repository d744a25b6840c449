//! Combat tracker use cases.
//!
//! Encounters live in memory keyed by `CombatId`. Initiative is read from
//! the actors as stored, so callers prepare actors before rolling.

mod error;

pub use error::CombatError;

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;

use metallic_guardian_domain::{
    ActorId, Combat, CombatEvent, CombatId, CombatantId, DomainError, InitiativeInput,
    InitiativeRoll, InitiativeRules,
};

use crate::infrastructure::ports::ActorRepo;

/// Initiative inputs of every stored actor, read once per command.
type InitiativeSources = HashMap<ActorId, InitiativeInput>;

/// One row of the turn tracker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnEntry {
    pub combatant_id: CombatantId,
    pub actor_id: ActorId,
    pub name: String,
    pub initiative: Option<f64>,
    pub defeated: bool,
    pub active: bool,
}

/// Turn tracker over the actor store.
pub struct CombatTracker {
    repo: Arc<dyn ActorRepo>,
    rules: InitiativeRules,
    encounters: DashMap<CombatId, Combat>,
}

impl CombatTracker {
    pub fn new(repo: Arc<dyn ActorRepo>, rules: InitiativeRules) -> Self {
        Self {
            repo,
            rules,
            encounters: DashMap::new(),
        }
    }

    // =========================================================================
    // Encounters
    // =========================================================================

    pub fn create_combat(&self) -> CombatId {
        let combat = Combat::new();
        let id = combat.id();
        self.encounters.insert(id, combat);
        tracing::debug!(combat_id = %id, "Combat created");
        id
    }

    /// Snapshot of an encounter.
    pub fn combat(&self, combat_id: CombatId) -> Result<Combat, CombatError> {
        self.encounters
            .get(&combat_id)
            .map(|combat| combat.value().clone())
            .ok_or(CombatError::CombatNotFound(combat_id))
    }

    /// End an encounter and forget it.
    pub fn end_combat(&self, combat_id: CombatId) -> Result<CombatEvent, CombatError> {
        let (_, mut combat) = self
            .encounters
            .remove(&combat_id)
            .ok_or(CombatError::CombatNotFound(combat_id))?;
        let event = combat.end_combat();
        tracing::info!(combat_id = %combat_id, ?event, "Combat ended");
        Ok(event)
    }

    // =========================================================================
    // Roster
    // =========================================================================

    pub fn add_combatant(
        &self,
        combat_id: CombatId,
        actor_id: ActorId,
    ) -> Result<CombatantId, CombatError> {
        let actor = self
            .repo
            .get(actor_id)?
            .ok_or(CombatError::ActorNotFound(actor_id))?;
        let mut combat = self.encounter(combat_id)?;
        Ok(combat.add_combatant(actor.id, actor.name))
    }

    pub fn set_defeated(
        &self,
        combat_id: CombatId,
        combatant_id: CombatantId,
        defeated: bool,
    ) -> Result<(), CombatError> {
        self.encounter(combat_id)?
            .set_defeated(combatant_id, defeated)?;
        Ok(())
    }

    /// Turn order with the active combatant flagged.
    pub fn turn_order(&self, combat_id: CombatId) -> Result<Vec<TurnEntry>, CombatError> {
        let combat = self
            .encounters
            .get(&combat_id)
            .ok_or(CombatError::CombatNotFound(combat_id))?;
        let active = combat.active_combatant().map(|c| c.id());

        Ok(combat
            .turns()
            .into_iter()
            .map(|c| TurnEntry {
                combatant_id: c.id(),
                actor_id: c.actor_id(),
                name: c.name().to_string(),
                initiative: c.initiative(),
                defeated: c.is_defeated(),
                active: Some(c.id()) == active,
            })
            .collect())
    }

    // =========================================================================
    // Initiative, rounds and turns
    // =========================================================================

    /// Roll initiative for some combatants, keeping the active turn.
    pub fn roll_initiative(
        &self,
        combat_id: CombatId,
        ids: &[CombatantId],
    ) -> Result<Vec<InitiativeRoll>, CombatError> {
        let sources = self.initiative_sources()?;
        let rolls = self.encounter(combat_id)?.roll_initiative(
            ids,
            |actor_id| lookup(&sources, actor_id),
            &self.rules,
            true,
        )?;
        tracing::debug!(combat_id = %combat_id, rolled = rolls.len(), "Initiative rolled");
        Ok(rolls)
    }

    pub fn start_combat(&self, combat_id: CombatId) -> Result<CombatEvent, CombatError> {
        self.advance(combat_id, |combat, sources, rules| {
            combat.start_combat(|id| lookup(sources, id), rules)
        })
    }

    pub fn next_round(&self, combat_id: CombatId) -> Result<CombatEvent, CombatError> {
        self.advance(combat_id, |combat, sources, rules| {
            combat.next_round(|id| lookup(sources, id), rules)
        })
    }

    pub fn previous_round(&self, combat_id: CombatId) -> Result<CombatEvent, CombatError> {
        self.advance(combat_id, |combat, sources, rules| {
            combat.previous_round(|id| lookup(sources, id), rules)
        })
    }

    pub fn next_turn(&self, combat_id: CombatId) -> Result<CombatEvent, CombatError> {
        self.advance(combat_id, |combat, sources, rules| {
            combat.next_turn(|id| lookup(sources, id), rules)
        })
    }

    /// Copy an actor's sheet initiative (`initiative.added`, or the flat
    /// score for NPCs and enemies) onto its combatant.
    pub fn register_sheet_initiative(
        &self,
        combat_id: CombatId,
        actor_id: ActorId,
    ) -> Result<f64, CombatError> {
        let actor = self
            .repo
            .get(actor_id)?
            .ok_or(CombatError::ActorNotFound(actor_id))?;
        let value = actor
            .battle_stats()
            .map(|stats| f64::from(stats.initiative.added))
            .unwrap_or_else(|| actor.initiative_score());

        let mut combat = self.encounter(combat_id)?;
        let combatant_id = combat
            .combatant_for_actor(actor_id)
            .map(|c| c.id())
            .ok_or(CombatError::ActorNotInCombat(actor_id))?;
        combat.set_initiative(combatant_id, value)?;

        tracing::info!(
            combat_id = %combat_id,
            actor_id = %actor_id,
            initiative = value,
            "Sheet initiative registered"
        );
        Ok(value)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn encounter(
        &self,
        combat_id: CombatId,
    ) -> Result<dashmap::mapref::one::RefMut<'_, CombatId, Combat>, CombatError> {
        self.encounters
            .get_mut(&combat_id)
            .ok_or(CombatError::CombatNotFound(combat_id))
    }

    fn advance(
        &self,
        combat_id: CombatId,
        step: impl FnOnce(
            &mut Combat,
            &InitiativeSources,
            &InitiativeRules,
        ) -> Result<CombatEvent, DomainError>,
    ) -> Result<CombatEvent, CombatError> {
        let sources = self.initiative_sources()?;
        let mut combat = self.encounter(combat_id)?;
        let event = step(&mut *combat, &sources, &self.rules)?;
        tracing::info!(combat_id = %combat_id, ?event, "Combat advanced");
        Ok(event)
    }

    fn initiative_sources(&self) -> Result<InitiativeSources, CombatError> {
        Ok(self
            .repo
            .list()?
            .iter()
            .map(|actor| (actor.id, InitiativeInput::from(actor)))
            .collect())
    }
}

fn lookup(sources: &InitiativeSources, actor_id: ActorId) -> Option<InitiativeInput> {
    let input = sources.get(&actor_id).copied();
    if input.is_none() {
        tracing::warn!(actor_id = %actor_id, "Combatant actor missing; initiative 0");
    }
    input
}
