//! Initiative resolution for the turn tracker.

use crate::entities::{Actor, ActorKind};

/// What the resolver needs to know about a combatant's actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitiativeInput {
    pub kind: ActorKind,
    /// Derived `initiative.total` for pilots and guardians, flat scalar otherwise
    pub score: f64,
}

impl From<&Actor> for InitiativeInput {
    fn from(actor: &Actor) -> Self {
        Self {
            kind: actor.kind(),
            score: actor.initiative_score(),
        }
    }
}

/// Initiative tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitiativeRules {
    /// Added to pilots and guardians so they act before NPCs on ties
    pub tie_break: f64,
}

impl InitiativeRules {
    pub const DEFAULT_TIE_BREAK: f64 = 0.1;

    pub fn with_tie_break(tie_break: f64) -> Self {
        Self { tie_break }
    }

    /// Initiative assigned to a combatant. A combatant without an actor
    /// rolls a plain 0.
    pub fn resolve(&self, input: Option<InitiativeInput>) -> f64 {
        match input {
            Some(input) if input.kind.has_battle_stats() => input.score + self.tie_break,
            Some(input) => input.score,
            None => 0.0,
        }
    }
}

impl Default for InitiativeRules {
    fn default() -> Self {
        Self::with_tie_break(Self::DEFAULT_TIE_BREAK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(kind: ActorKind, score: f64) -> Option<InitiativeInput> {
        Some(InitiativeInput { kind, score })
    }

    #[test]
    fn pilots_and_guardians_get_the_tie_break() {
        let rules = InitiativeRules::default();
        assert_eq!(rules.resolve(input(ActorKind::Linkage, 5.0)), 5.0 + 0.1);
        assert_eq!(rules.resolve(input(ActorKind::Guardian, 5.0)), 5.0 + 0.1);
        assert_eq!(rules.resolve(input(ActorKind::Npc, 5.0)), 5.0);
        assert_eq!(rules.resolve(input(ActorKind::Enemy, 5.0)), 5.0);
        assert_eq!(rules.resolve(None), 0.0);
    }

    #[test]
    fn tie_break_is_configurable() {
        let rules = InitiativeRules::with_tie_break(0.5);
        assert_eq!(rules.resolve(input(ActorKind::Linkage, 2.0)), 2.5);
    }
}
