//! Metallic Guardian rule system.
//!
//! Derivation is split per actor variant. `MetallicGuardianSystem` selects
//! the variant function from the actor's tag and hands it only the fields it
//! reads and writes; enemies have no derived fields.

mod check;
mod guardian;
mod initiative;
mod linkage;
mod npc;

pub use check::{damage_base, CheckTarget, DamageSlot};
pub use guardian::{prepare_guardian, GuardianEquipment};
pub use initiative::{InitiativeInput, InitiativeRules};
pub use linkage::{prepare_linkage, LinkageEquipment};
pub use npc::prepare_npc;

use super::resolver::ActorResolver;
use super::traits::{CalculationEngine, GameSystem};
use crate::entities::{Actor, ActorKind, ActorSystem};
use crate::value_objects::{attribute_modifier, Attribute, Attributes, BattleStat};

const ATTRIBUTE_NAMES: [&str; 6] = ["str", "dex", "per", "int", "wil", "luk"];

const BATTLE_STAT_NAMES: [&str; 10] = [
    "accuracy",
    "evasion",
    "artillery",
    "defense",
    "initiative",
    "field",
    "durability",
    "response",
    "damage",
    "speed",
];

/// Metallic Guardian game system.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetallicGuardianSystem;

impl MetallicGuardianSystem {
    pub fn new() -> Self {
        Self
    }
}

impl GameSystem for MetallicGuardianSystem {
    fn system_id(&self) -> &str {
        "metallic-guardian"
    }

    fn display_name(&self) -> &str {
        "Metallic Guardian"
    }

    fn calculation_engine(&self) -> &dyn CalculationEngine {
        self
    }

    fn attribute_names(&self) -> &[&str] {
        &ATTRIBUTE_NAMES
    }

    fn battle_stat_names(&self) -> &[&str] {
        &BATTLE_STAT_NAMES
    }

    fn prepare_derived_data(&self, actor: &mut Actor, resolver: &dyn ActorResolver) {
        let actor_id = actor.id;
        let kind = actor.kind();

        match &mut actor.system {
            ActorSystem::Linkage(data) => {
                let equipment = LinkageEquipment::from_items(&actor.items);
                prepare_linkage(self, data, &equipment);
            }
            ActorSystem::Guardian(data) => {
                let pilot = data.pilot.id.and_then(|pilot_id| {
                    let snapshot = resolver.pilot(pilot_id);
                    if snapshot.is_none() {
                        tracing::warn!(
                            actor_id = %actor_id,
                            pilot_id = %pilot_id,
                            "Pilot link does not resolve; using zero pilot terms"
                        );
                    }
                    snapshot
                });
                let equipment = GuardianEquipment::from_items(&actor.items);
                prepare_guardian(self, data, &equipment, pilot.as_ref());
            }
            ActorSystem::Npc(data) => prepare_npc(self, data),
            ActorSystem::Enemy(_) => {}
        }

        tracing::debug!(actor_id = %actor_id, kind = %kind, "Prepared derived data");
    }
}

impl CalculationEngine for MetallicGuardianSystem {
    fn attribute_modifier(&self, value: i32) -> i32 {
        attribute_modifier(value)
    }

    fn base_battle_stat(&self, stat: BattleStat, attributes: &Attributes) -> i32 {
        let m = |attribute: Attribute| attributes.get(attribute).modifier;
        match stat {
            BattleStat::Accuracy => (m(Attribute::Dex) + m(Attribute::Per)).div_euclid(2),
            BattleStat::Evasion => (m(Attribute::Dex) + m(Attribute::Luk)).div_euclid(2),
            BattleStat::Artillery => (m(Attribute::Per) + m(Attribute::Int)).div_euclid(2),
            BattleStat::Defense => (m(Attribute::Int) + m(Attribute::Luk)).div_euclid(2),
            BattleStat::Initiative => m(Attribute::Dex) + m(Attribute::Int),
            // Raw scores, not modifiers
            BattleStat::Durability => attributes.str.value,
            BattleStat::Response => attributes.wil.value,
            BattleStat::Field | BattleStat::Damage | BattleStat::Speed => 0,
        }
    }

    fn base_speed(&self, str_modifier: i32) -> i32 {
        str_modifier.div_euclid(3)
    }

    fn full_speed(&self, kind: ActorKind, speed: i32) -> i32 {
        match kind {
            ActorKind::Guardian => speed.saturating_mul(2),
            _ => speed.saturating_add(1),
        }
    }

    fn challenge_xp(&self, cr: f64) -> f64 {
        cr * cr * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        EnemyData, FlatBattleStats, GuardianData, Item, ItemData, LinkageData, ModelData, NpcData,
        PilotLink, ProtectionData, WeaponData,
    };
    use crate::game_systems::resolver::{NoActors, PilotSnapshot};
    use crate::value_objects::{attribute_modifier, DefenseBonuses, DefenseKind, StatBonuses};

    fn pilot() -> Actor {
        let data = LinkageData {
            attributes: Attributes::from_values([12, 9, 9, 6, 9, 6]),
            ..LinkageData::default()
        };
        Actor::linkage("Rin", data).with_item(Item::new(
            "Service Pistol",
            ItemData::HumanWeapon(
                WeaponData::new(StatBonuses::zero().with(BattleStat::Accuracy, 2)).equipped(),
            ),
        ))
    }

    #[test]
    fn system_identity() {
        let system = MetallicGuardianSystem::new();
        assert_eq!(system.system_id(), "metallic-guardian");
        assert_eq!(system.attribute_names().len(), 6);
        assert_eq!(system.battle_stat_names().len(), 10);
        assert_eq!(system.battle_stat_names()[4], "initiative");
    }

    #[test]
    fn base_formulas_follow_the_table() {
        let system = MetallicGuardianSystem::new();
        let mut attributes = Attributes::from_values([12, 9, 9, 6, 9, 6]);
        for attribute in Attribute::ALL {
            let score = attributes.get_mut(attribute);
            score.modifier = attribute_modifier(score.value);
        }

        let base = |stat| system.base_battle_stat(stat, &attributes);
        assert_eq!(base(BattleStat::Accuracy), 3);
        assert_eq!(base(BattleStat::Evasion), 2);
        assert_eq!(base(BattleStat::Artillery), 2);
        assert_eq!(base(BattleStat::Defense), 2);
        assert_eq!(base(BattleStat::Initiative), 5);
        assert_eq!(base(BattleStat::Durability), 12);
        assert_eq!(base(BattleStat::Response), 9);
        assert_eq!(base(BattleStat::Field), 0);
        assert_eq!(base(BattleStat::Damage), 0);
    }

    #[test]
    fn negative_modifiers_floor_in_base_formulas() {
        let system = MetallicGuardianSystem::new();
        let mut attributes = Attributes::default();
        attributes.dex.modifier = -1;
        attributes.per.modifier = 0;
        assert_eq!(system.base_battle_stat(BattleStat::Accuracy, &attributes), -1);
    }

    #[test]
    fn speed_scaling_differs_by_kind() {
        let system = MetallicGuardianSystem::new();
        for value in -5..=5 {
            assert_eq!(system.full_speed(ActorKind::Linkage, value), 1 + value);
            assert_eq!(system.full_speed(ActorKind::Guardian, value), 2 * value);
        }
        assert_eq!(system.base_speed(4), 1);
        assert_eq!(system.base_speed(-1), -1);
    }

    #[test]
    fn dispatch_prepares_linkage() {
        let system = MetallicGuardianSystem::new();
        let mut actor = pilot();
        system.prepare_derived_data(&mut actor, &NoActors);

        let data = actor.as_linkage().unwrap();
        assert_eq!(data.attributes.str.modifier, 4);
        assert_eq!(data.battle_stats.accuracy.base, 3);
        assert_eq!(data.battle_stats.accuracy.total, 3);
        assert_eq!(data.battle_stats.accuracy.added, 5);
        assert_eq!(data.battle_stats.durability.base, 12);
        assert_eq!(data.hp.max, 12);
    }

    #[test]
    fn dispatch_resolves_guardian_pilot() {
        let system = MetallicGuardianSystem::new();
        let mut rin = pilot();
        system.prepare_derived_data(&mut rin, &NoActors);

        let mut mech = Actor::guardian(
            "Unit-01",
            GuardianData {
                pilot: PilotLink::to(rin.id, "Rin"),
                ..GuardianData::default()
            },
        );
        let roster = vec![rin];
        system.prepare_derived_data(&mut mech, &roster);

        let data = mech.as_guardian().unwrap();
        assert_eq!(data.attributes.str.modifier, 4);
        // Pilot total, not the pilot's weapon-inclusive added
        assert_eq!(data.battle_stats.accuracy.total, 3);
        assert_eq!(data.hp.max, 12);
        assert_eq!(data.size, "");
    }

    #[test]
    fn dangling_pilot_link_uses_zero_terms() {
        let system = MetallicGuardianSystem::new();
        let mut mech = Actor::guardian(
            "Unit-02",
            GuardianData {
                pilot: PilotLink::to(crate::ids::ActorId::new(), "Gone"),
                ..GuardianData::default()
            },
        )
        .with_item(Item::new(
            "Frame",
            ItemData::GuardianModel(ModelData {
                battle_stats: StatBonuses::zero().with(BattleStat::Durability, 30),
                size: "M".to_string(),
                ..ModelData::default()
            }),
        ));
        system.prepare_derived_data(&mut mech, &NoActors);

        let data = mech.as_guardian().unwrap();
        assert_eq!(data.attributes.str.modifier, 0);
        assert_eq!(data.battle_stats.durability.total, 30);
        assert_eq!(data.hp.max, 30);
        assert_eq!(data.size, "M");
    }

    #[test]
    fn closure_resolver_feeds_guardian() {
        let system = MetallicGuardianSystem::new();
        let pilot_id = crate::ids::ActorId::new();
        let resolver = move |id| {
            (id == pilot_id).then(|| PilotSnapshot {
                totals: StatBonuses::zero().with(BattleStat::Initiative, 6),
                ..PilotSnapshot::default()
            })
        };
        let mut mech = Actor::guardian(
            "Unit-03",
            GuardianData {
                pilot: PilotLink::to(pilot_id, "Rin"),
                ..GuardianData::default()
            },
        );
        system.prepare_derived_data(&mut mech, &resolver);
        assert_eq!(mech.initiative_score(), 6.0);
    }

    #[test]
    fn dispatch_prepares_npc_and_leaves_enemy_alone() {
        let system = MetallicGuardianSystem::new();
        let mut npc = Actor::npc(
            "Officer",
            NpcData {
                cr: Some(5.0),
                ..NpcData::default()
            },
        );
        system.prepare_derived_data(&mut npc, &NoActors);
        match &npc.system {
            ActorSystem::Npc(data) => assert_eq!(data.xp, Some(2500.0)),
            other => panic!("unexpected variant: {:?}", other),
        }

        let mut enemy = Actor::enemy(
            "Drone",
            EnemyData {
                battle_stats: FlatBattleStats {
                    initiative: 3.0,
                    ..FlatBattleStats::default()
                },
                ..EnemyData::default()
            },
        );
        let before = enemy.clone();
        system.prepare_derived_data(&mut enemy, &NoActors);
        assert_eq!(enemy, before);
    }

    #[test]
    fn preparation_is_idempotent() {
        let system = MetallicGuardianSystem::new();
        let mut actor = pilot();
        system.prepare_derived_data(&mut actor, &NoActors);
        let once = actor.clone();
        system.prepare_derived_data(&mut actor, &NoActors);
        assert_eq!(actor, once);
        assert_eq!(
            serde_json::to_string(&actor).unwrap(),
            serde_json::to_string(&once).unwrap()
        );
    }

    #[test]
    fn guardian_preparation_is_idempotent() {
        let system = MetallicGuardianSystem::new();
        let mut rin = pilot();
        system.prepare_derived_data(&mut rin, &NoActors);

        let mut mech = Actor::guardian(
            "Unit-01",
            GuardianData {
                pilot: PilotLink::to(rin.id, "Rin"),
                ..GuardianData::default()
            },
        )
        .with_item(Item::new(
            "Frame",
            ItemData::GuardianModel(ModelData {
                battle_stats: StatBonuses::zero()
                    .with(BattleStat::Durability, 20)
                    .with(BattleStat::Speed, 1),
                defense: DefenseBonuses::zero().with(DefenseKind::Slash, 2),
                size: "L".to_string(),
                ..ModelData::default()
            }),
        ))
        .with_item(Item::new(
            "Booster",
            ItemData::GuardianOption(
                ProtectionData::new(
                    StatBonuses::zero().with(BattleStat::Evasion, 2),
                    DefenseBonuses::zero().with(DefenseKind::Fire, 1),
                )
                .equipped(),
            ),
        ));
        let roster = vec![rin];

        system.prepare_derived_data(&mut mech, &roster);
        let once = mech.clone();
        system.prepare_derived_data(&mut mech, &roster);
        assert_eq!(mech, once);
        assert_eq!(
            serde_json::to_string(&mech).unwrap(),
            serde_json::to_string(&once).unwrap()
        );

        let data = mech.as_guardian().unwrap();
        assert_eq!(data.attributes.str.modifier, 4);
        assert_eq!(data.battle_stats.evasion.total, 2 + 2);
        assert_eq!(data.hp.max, 12 + 20);
        assert_eq!(data.defense.slash.total, 2);
        assert_eq!(data.defense.fire.total, 1);
        assert_eq!(data.size, "L");
    }
}
