//! Combat aggregate - encounter roster, round and turn tracking
//!
//! # Design
//!
//! - **Private fields**: round, turn and roster only change through methods
//! - **Turn order is derived**: combatants are stored in insertion order and
//!   sorted on demand (initiative descending, unset last, then name, then id)
//! - **Active turn is sticky**: bulk initiative changes keep the acting
//!   combatant acting, even when the order shifts under it
//! - **Domain events**: round and turn changes return a `CombatEvent`

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::events::{CombatEvent, InitiativeRoll};
use crate::game_systems::{InitiativeInput, InitiativeRules};
use crate::ids::{ActorId, CombatId, CombatantId};

/// One participant in an encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    id: CombatantId,
    actor_id: ActorId,
    name: String,
    initiative: Option<f64>,
    defeated: bool,
}

impl Combatant {
    pub fn new(actor_id: ActorId, name: impl Into<String>) -> Self {
        Self {
            id: CombatantId::new(),
            actor_id,
            name: name.into(),
            initiative: None,
            defeated: false,
        }
    }

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn actor_id(&self) -> ActorId {
        self.actor_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initiative(&self) -> Option<f64> {
        self.initiative
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    fn turn_order(&self, other: &Self) -> Ordering {
        let by_initiative = match (self.initiative, other.initiative) {
            (Some(a), Some(b)) => b.total_cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_initiative
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// A combat encounter.
///
/// # Invariants
///
/// - `turn` indexes into `turns()`; it is 0 whenever the roster is empty
/// - `round` is 0 until the encounter starts and never goes negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combat {
    id: CombatId,
    round: u32,
    turn: usize,
    started: bool,
    combatants: Vec<Combatant>,
}

impl Default for Combat {
    fn default() -> Self {
        Self::new()
    }
}

impl Combat {
    pub fn new() -> Self {
        Self {
            id: CombatId::new(),
            round: 0,
            turn: 0,
            started: false,
            combatants: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> CombatId {
        self.id
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Combatants in insertion order.
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn combatant_for_actor(&self, actor_id: ActorId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.actor_id == actor_id)
    }

    /// Combatants in turn order.
    pub fn turns(&self) -> Vec<&Combatant> {
        let mut turns: Vec<&Combatant> = self.combatants.iter().collect();
        turns.sort_by(|a, b| a.turn_order(b));
        turns
    }

    /// The combatant whose turn it is, once the encounter has started.
    pub fn active_combatant(&self) -> Option<&Combatant> {
        if !self.started {
            return None;
        }
        self.turns().get(self.turn).copied()
    }

    // =========================================================================
    // Roster
    // =========================================================================

    pub fn add_combatant(&mut self, actor_id: ActorId, name: impl Into<String>) -> CombatantId {
        let combatant = Combatant::new(actor_id, name);
        let id = combatant.id;
        self.preserving_active_turn(|combat| combat.combatants.push(combatant));
        id
    }

    pub fn set_defeated(&mut self, id: CombatantId, defeated: bool) -> Result<(), DomainError> {
        let combatant = self.combatant_mut(id)?;
        combatant.defeated = defeated;
        Ok(())
    }

    /// Set one combatant's initiative directly, keeping the active turn.
    pub fn set_initiative(&mut self, id: CombatantId, value: f64) -> Result<(), DomainError> {
        self.combatant_mut(id)?;
        self.preserving_active_turn(|combat| {
            if let Some(combatant) = combat.combatants.iter_mut().find(|c| c.id == id) {
                combatant.initiative = Some(value);
            }
        });
        Ok(())
    }

    // =========================================================================
    // Initiative
    // =========================================================================

    /// Assign fresh initiative to the given combatants.
    ///
    /// Every id must belong to this encounter; nothing changes otherwise.
    /// Defeated combatants keep their current value. `sources` looks up an
    /// actor's initiative input; a missing actor rolls a plain 0. With
    /// `update_turn`, the acting combatant keeps acting after the reorder.
    pub fn roll_initiative(
        &mut self,
        ids: &[CombatantId],
        sources: impl Fn(ActorId) -> Option<InitiativeInput>,
        rules: &InitiativeRules,
        update_turn: bool,
    ) -> Result<Vec<InitiativeRoll>, DomainError> {
        let mut rolls = Vec::with_capacity(ids.len());
        for &id in ids {
            let combatant = self
                .combatant(id)
                .ok_or_else(|| DomainError::not_found("Combatant", id))?;
            if combatant.defeated {
                continue;
            }
            rolls.push(InitiativeRoll {
                combatant_id: id,
                initiative: rules.resolve(sources(combatant.actor_id)),
            });
        }

        let apply = |combat: &mut Combat| {
            for roll in &rolls {
                if let Some(c) = combat.combatants.iter_mut().find(|c| c.id == roll.combatant_id) {
                    c.initiative = Some(roll.initiative);
                }
            }
        };
        if update_turn {
            self.preserving_active_turn(apply);
        } else {
            apply(self);
        }

        Ok(rolls)
    }

    fn roll_all(
        &mut self,
        sources: impl Fn(ActorId) -> Option<InitiativeInput>,
        rules: &InitiativeRules,
    ) -> Result<Vec<InitiativeRoll>, DomainError> {
        let ids: Vec<CombatantId> = self.combatants.iter().map(|c| c.id).collect();
        self.roll_initiative(&ids, sources, rules, false)
    }

    // =========================================================================
    // Rounds and turns
    // =========================================================================

    /// Re-roll everyone and begin at round 1, first turn.
    pub fn start_combat(
        &mut self,
        sources: impl Fn(ActorId) -> Option<InitiativeInput>,
        rules: &InitiativeRules,
    ) -> Result<CombatEvent, DomainError> {
        if self.started {
            return Err(DomainError::invalid_state_transition(
                "Combat has already started",
            ));
        }
        if self.combatants.is_empty() {
            return Err(DomainError::validation(
                "Cannot start combat without combatants",
            ));
        }

        self.roll_all(sources, rules)?;
        self.started = true;
        self.round = 1;
        self.turn = 0;
        Ok(CombatEvent::Started { round: self.round })
    }

    /// Re-roll everyone and advance to the next round.
    pub fn next_round(
        &mut self,
        sources: impl Fn(ActorId) -> Option<InitiativeInput>,
        rules: &InitiativeRules,
    ) -> Result<CombatEvent, DomainError> {
        self.ensure_started()?;
        self.roll_all(sources, rules)?;
        self.round += 1;
        self.turn = 0;
        Ok(CombatEvent::RoundAdvanced { round: self.round })
    }

    /// Re-roll everyone and go back one round, to its last turn.
    pub fn previous_round(
        &mut self,
        sources: impl Fn(ActorId) -> Option<InitiativeInput>,
        rules: &InitiativeRules,
    ) -> Result<CombatEvent, DomainError> {
        self.ensure_started()?;
        self.roll_all(sources, rules)?;
        self.round = self.round.saturating_sub(1);
        self.turn = if self.round == 0 {
            0
        } else {
            self.combatants.len().saturating_sub(1)
        };
        Ok(CombatEvent::RoundRewound {
            round: self.round,
            turn: self.turn,
        })
    }

    /// Pass to the next combatant, rolling into a new round after the last.
    pub fn next_turn(
        &mut self,
        sources: impl Fn(ActorId) -> Option<InitiativeInput>,
        rules: &InitiativeRules,
    ) -> Result<CombatEvent, DomainError> {
        self.ensure_started()?;
        let next = self.turn + 1;
        if next >= self.combatants.len() {
            return self.next_round(sources, rules);
        }
        self.turn = next;
        Ok(CombatEvent::TurnAdvanced {
            round: self.round,
            turn: self.turn,
        })
    }

    /// End the encounter and clear the roster.
    pub fn end_combat(&mut self) -> CombatEvent {
        let rounds = self.round;
        self.combatants.clear();
        self.started = false;
        self.round = 0;
        self.turn = 0;
        CombatEvent::Ended { rounds }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn ensure_started(&self) -> Result<(), DomainError> {
        if self.started {
            Ok(())
        } else {
            Err(DomainError::invalid_state_transition(
                "Combat has not started",
            ))
        }
    }

    fn combatant_mut(&mut self, id: CombatantId) -> Result<&mut Combatant, DomainError> {
        self.combatants
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::not_found("Combatant", id))
    }

    /// Run a roster mutation, then point `turn` back at whoever was acting.
    fn preserving_active_turn(&mut self, mutate: impl FnOnce(&mut Self)) {
        let active = self.turns().get(self.turn).map(|c| c.id);
        mutate(self);
        if let Some(active) = active {
            if let Some(index) = self.turns().iter().position(|c| c.id == active) {
                self.turn = index;
            }
        }
    }
}
