//! Guardian (mech) derivation.

use crate::entities::{ActorKind, GuardianData, Item, ItemData, ItemKind, ModelData};
use crate::game_systems::resolver::PilotSnapshot;
use crate::game_systems::traits::CalculationEngine;
use crate::value_objects::{Attribute, BattleStat, DefenseBonuses, ResourceKind, StatBonuses};

/// A guardian's chassis plus its summed equipped weapons and options.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuardianEquipment<'a> {
    /// First `guardian-model` item; later ones are ignored
    pub model: Option<&'a ModelData>,
    pub weapons: StatBonuses,
    pub options: StatBonuses,
    pub option_defense: DefenseBonuses,
}

impl<'a> GuardianEquipment<'a> {
    pub fn from_items(items: &'a [Item]) -> Self {
        let equipped = |kind: ItemKind| {
            items
                .iter()
                .filter(move |item| item.kind() == kind && item.is_equipped())
        };

        let model = items.iter().find_map(|item| match &item.system {
            ItemData::GuardianModel(model) => Some(model),
            _ => None,
        });

        Self {
            model,
            weapons: equipped(ItemKind::GuardianWeapon).map(Item::battle_stats).sum(),
            options: equipped(ItemKind::GuardianOption).map(Item::battle_stats).sum(),
            option_defense: equipped(ItemKind::GuardianOption).map(Item::defense).sum(),
        }
    }

    fn model_stats(&self) -> StatBonuses {
        self.model.map(|m| m.battle_stats).unwrap_or_default()
    }

    fn model_defense(&self) -> DefenseBonuses {
        self.model.map(|m| m.defense).unwrap_or_default()
    }
}

/// Derive every computed field of a guardian.
///
/// Guardians skip the `base`/`class` layers: each stat is the flat sum of
/// the pilot's total, the model, equipped weapons and options, plus the
/// guardian's own `mod`. The sum is written to both `total` and `added`.
/// Pools are sized from `total`. Without a pilot every pilot term is 0.
pub fn prepare_guardian(
    engine: &dyn CalculationEngine,
    data: &mut GuardianData,
    equipment: &GuardianEquipment<'_>,
    pilot: Option<&PilotSnapshot>,
) {
    let pilot = pilot.copied().unwrap_or_default();

    for attribute in Attribute::ALL {
        data.attributes.get_mut(attribute).modifier = pilot.attribute_mods.get(attribute);
    }

    let model_stats = equipment.model_stats();
    let sources = pilot.totals + model_stats + equipment.weapons + equipment.options;
    for stat in BattleStat::AGGREGATED {
        if let Some(line) = data.battle_stats.line_mut(stat) {
            let sum = sources.get(stat).saturating_add(line.modifier);
            line.total = sum;
            line.added = sum;
        }
    }

    data.defense
        .apply(&(equipment.model_defense() + equipment.option_defense));

    for kind in ResourceKind::ALL {
        let total = data
            .battle_stats
            .line(kind.source_stat())
            .map(|line| line.total)
            .unwrap_or_default();
        let pool = data.pool_mut(kind);
        pool.max = total.saturating_add(pool.modifier);
    }

    data.size = equipment
        .model
        .map(|m| m.size.clone())
        .unwrap_or_default();

    let speed_bonus = (model_stats + equipment.weapons + equipment.options).get(BattleStat::Speed);
    let speed = &mut data.battle_stats.speed;
    speed.value = engine
        .base_speed(data.attributes.str.modifier)
        .saturating_add(speed_bonus)
        .saturating_add(speed.modifier);
    speed.full = engine.full_speed(ActorKind::Guardian, speed.value);
}
