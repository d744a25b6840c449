//! Pilot (linkage) derivation.

use crate::entities::{ActorKind, Item, ItemKind, LinkageData};
use crate::game_systems::traits::CalculationEngine;
use crate::value_objects::{Attribute, BattleStat, DefenseBonuses, StatBonuses};

/// Summed contributions of a pilot's equipped weapons and armor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkageEquipment {
    pub weapons: StatBonuses,
    pub armor: StatBonuses,
    pub armor_defense: DefenseBonuses,
}

impl LinkageEquipment {
    pub fn from_items(items: &[Item]) -> Self {
        let equipped = |kind: ItemKind| {
            items
                .iter()
                .filter(move |item| item.kind() == kind && item.is_equipped())
        };

        Self {
            weapons: equipped(ItemKind::HumanWeapon).map(Item::battle_stats).sum(),
            armor: equipped(ItemKind::HumanArmor).map(Item::battle_stats).sum(),
            armor_defense: equipped(ItemKind::HumanArmor).map(Item::defense).sum(),
        }
    }
}

/// Derive every computed field of a pilot.
///
/// `base` comes from the formula table, `class` from the three class slots,
/// `total = base + class + mod` and `added` folds in equipped gear. `HP.max`
/// tracks `durability.added`.
pub fn prepare_linkage(
    engine: &dyn CalculationEngine,
    data: &mut LinkageData,
    equipment: &LinkageEquipment,
) {
    for attribute in Attribute::ALL {
        let score = data.attributes.get_mut(attribute);
        score.modifier = engine.attribute_modifier(score.value);
    }

    data.level = data.class.total_level();

    let class_bonuses = data.class.bonuses();
    let gear = equipment.weapons + equipment.armor;
    for stat in BattleStat::AGGREGATED {
        let base = engine.base_battle_stat(stat, &data.attributes);
        if let Some(line) = data.battle_stats.line_mut(stat) {
            line.base = base;
            line.class = class_bonuses.get(stat);
            line.total = line
                .base
                .saturating_add(line.class)
                .saturating_add(line.modifier);
            line.added = line.total.saturating_add(gear.get(stat));
        }
    }

    let speed = &mut data.battle_stats.speed;
    speed.value = engine.base_speed(data.attributes.str.modifier);
    speed.full = engine.full_speed(ActorKind::Linkage, speed.value);

    data.hp.max = data.battle_stats.durability.added;
    data.defense.apply(&equipment.armor_defense);
}
