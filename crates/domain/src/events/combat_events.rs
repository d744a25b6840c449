//! Combat-related domain events
//!
//! These enums communicate what happened when a combat encounter changed,
//! allowing callers to log or react to it.

use crate::ids::CombatantId;

/// Outcome of a combat state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatEvent {
    /// Combat began at round 1, first turn
    Started { round: u32 },
    /// Advanced to a new round; the first combatant acts
    RoundAdvanced { round: u32 },
    /// Went back a round; the last combatant acts
    RoundRewound { round: u32, turn: usize },
    /// Passed to the next combatant within the round
    TurnAdvanced { round: u32, turn: usize },
    /// Combat ended and the roster was cleared
    Ended { rounds: u32 },
}

/// A freshly assigned initiative value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitiativeRoll {
    pub combatant_id: CombatantId,
    pub initiative: f64,
}
