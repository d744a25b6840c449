//! Cross-actor lookups injected into derivation.
//!
//! A guardian links to its pilot by id only. Instead of reaching into a
//! global registry, derivation receives an `ActorResolver` and reads a
//! snapshot of the pilot's already-derived numbers.

use crate::entities::{Actor, LinkageData};
use crate::ids::ActorId;
use crate::value_objects::{AttributeMods, StatBonuses};

/// The parts of a derived pilot a guardian reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PilotSnapshot {
    pub attribute_mods: AttributeMods,
    /// `total` of each battle stat
    pub totals: StatBonuses,
}

impl PilotSnapshot {
    pub fn from_linkage(data: &LinkageData) -> Self {
        Self {
            attribute_mods: data.attributes.mods(),
            totals: data.battle_stats.totals(),
        }
    }

    /// Snapshot of a pilot actor; `None` for every other variant.
    pub fn of(actor: &Actor) -> Option<Self> {
        actor.as_linkage().map(Self::from_linkage)
    }
}

/// Lookup capability for pilot links.
pub trait ActorResolver {
    /// Snapshot of the pilot with `id`, or `None` when it does not exist or
    /// is not a pilot.
    fn pilot(&self, id: ActorId) -> Option<PilotSnapshot>;
}

impl<F> ActorResolver for F
where
    F: Fn(ActorId) -> Option<PilotSnapshot>,
{
    fn pilot(&self, id: ActorId) -> Option<PilotSnapshot> {
        self(id)
    }
}

/// Resolves from a list of already-prepared actors.
impl ActorResolver for Vec<Actor> {
    fn pilot(&self, id: ActorId) -> Option<PilotSnapshot> {
        self.iter()
            .find(|actor| actor.id == id)
            .and_then(PilotSnapshot::of)
    }
}

/// Resolver that knows no actors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActors;

impl ActorResolver for NoActors {
    fn pilot(&self, _id: ActorId) -> Option<PilotSnapshot> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{GuardianData, NpcData};
    use crate::value_objects::{Attribute, Attributes, BattleStat};

    #[test]
    fn only_pilots_resolve() {
        let mut data = LinkageData {
            attributes: Attributes::from_values([12, 9, 9, 6, 9, 6]),
            ..LinkageData::default()
        };
        data.battle_stats.accuracy.total = 3;
        let pilot = Actor::linkage("Rin", data);
        let mech = Actor::guardian("Unit-01", GuardianData::default());
        let npc = Actor::npc("Grunt", NpcData::default());
        let (pilot_id, mech_id, npc_id) = (pilot.id, mech.id, npc.id);
        let roster = vec![pilot, mech, npc];

        let snapshot = roster.pilot(pilot_id).unwrap();
        assert_eq!(snapshot.attribute_mods.get(Attribute::Str), 4);
        assert_eq!(snapshot.totals.get(BattleStat::Accuracy), 3);
        assert!(roster.pilot(mech_id).is_none());
        assert!(roster.pilot(npc_id).is_none());
        assert!(roster.pilot(ActorId::new()).is_none());
    }

    #[test]
    fn closures_are_resolvers() {
        let resolver = |_id: ActorId| Some(PilotSnapshot::default());
        assert!(resolver.pilot(ActorId::new()).is_some());
        assert!(NoActors.pilot(ActorId::new()).is_none());
    }
}
