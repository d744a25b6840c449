//! Item entity - equipment, gear, skills and guardian chassis
//!
//! Every item belongs to exactly one actor. Only equipped weapons, armor and
//! options feed stat aggregation; a guardian's model contributes whenever it
//! is present.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::ids::ItemId;
use crate::value_objects::{lenient, DefenseBonuses, StatBonuses};

/// Item variant tag, as used by the host's `itemTypes` grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    HumanWeapon,
    HumanArmor,
    Gear,
    Skill,
    GuardianWeapon,
    GuardianOption,
    GuardianModel,
}

impl ItemKind {
    pub const ALL: [ItemKind; 7] = [
        Self::HumanWeapon,
        Self::HumanArmor,
        Self::Gear,
        Self::Skill,
        Self::GuardianWeapon,
        Self::GuardianOption,
        Self::GuardianModel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HumanWeapon => "human-weapon",
            Self::HumanArmor => "human-armor",
            Self::Gear => "gear",
            Self::Skill => "skill",
            Self::GuardianWeapon => "guardian-weapon",
            Self::GuardianOption => "guardian-option",
            Self::GuardianModel => "guardian-model",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One damage line of a weapon: an elemental type and a flat amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponDamage {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub damage: i32,
}

impl WeaponDamage {
    pub fn new(kind: impl Into<String>, damage: i32) -> Self {
        Self {
            kind: kind.into(),
            damage,
        }
    }
}

/// Weapons: battle-stat bonuses behind an equip flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponData {
    #[serde(rename = "battle-stats", default)]
    pub battle_stats: StatBonuses,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub equipped: bool,
    #[serde(default)]
    pub main: WeaponDamage,
    #[serde(default)]
    pub sub: WeaponDamage,
    #[serde(default)]
    pub description: String,
}

impl WeaponData {
    pub fn new(battle_stats: StatBonuses) -> Self {
        Self {
            battle_stats,
            ..Self::default()
        }
    }

    pub fn equipped(mut self) -> Self {
        self.equipped = true;
        self
    }

    pub fn with_damage(mut self, main: WeaponDamage, sub: WeaponDamage) -> Self {
        self.main = main;
        self.sub = sub;
        self
    }
}

/// Armor and guardian options: battle stats plus resistances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtectionData {
    #[serde(rename = "battle-stats", default)]
    pub battle_stats: StatBonuses,
    #[serde(default)]
    pub defense: DefenseBonuses,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub equipped: bool,
    #[serde(default)]
    pub description: String,
}

impl ProtectionData {
    pub fn new(battle_stats: StatBonuses, defense: DefenseBonuses) -> Self {
        Self {
            battle_stats,
            defense,
            ..Self::default()
        }
    }

    pub fn equipped(mut self) -> Self {
        self.equipped = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GearData {
    #[serde(default, deserialize_with = "lenient::int")]
    pub quantity: i32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillData {
    #[serde(default, deserialize_with = "lenient::int")]
    pub level: i32,
    #[serde(default)]
    pub timing: String,
    #[serde(default)]
    pub description: String,
}

/// Guardian chassis: base stats, resistances and size class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelData {
    #[serde(rename = "battle-stats", default)]
    pub battle_stats: StatBonuses,
    #[serde(default)]
    pub defense: DefenseBonuses,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ItemData {
    HumanWeapon(WeaponData),
    HumanArmor(ProtectionData),
    Gear(GearData),
    Skill(SkillData),
    GuardianWeapon(WeaponData),
    GuardianOption(ProtectionData),
    GuardianModel(ModelData),
}

/// An item owned by an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    pub system: ItemData,
}

impl Item {
    pub fn new(name: impl Into<String>, system: ItemData) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            system,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match &self.system {
            ItemData::HumanWeapon(_) => ItemKind::HumanWeapon,
            ItemData::HumanArmor(_) => ItemKind::HumanArmor,
            ItemData::Gear(_) => ItemKind::Gear,
            ItemData::Skill(_) => ItemKind::Skill,
            ItemData::GuardianWeapon(_) => ItemKind::GuardianWeapon,
            ItemData::GuardianOption(_) => ItemKind::GuardianOption,
            ItemData::GuardianModel(_) => ItemKind::GuardianModel,
        }
    }

    /// Battle-stat contributions (zero for gear and skills).
    pub fn battle_stats(&self) -> StatBonuses {
        match &self.system {
            ItemData::HumanWeapon(w) | ItemData::GuardianWeapon(w) => w.battle_stats,
            ItemData::HumanArmor(p) | ItemData::GuardianOption(p) => p.battle_stats,
            ItemData::GuardianModel(m) => m.battle_stats,
            ItemData::Gear(_) | ItemData::Skill(_) => StatBonuses::zero(),
        }
    }

    /// Resistance contributions (zero for weapons, gear and skills).
    pub fn defense(&self) -> DefenseBonuses {
        match &self.system {
            ItemData::HumanArmor(p) | ItemData::GuardianOption(p) => p.defense,
            ItemData::GuardianModel(m) => m.defense,
            _ => DefenseBonuses::zero(),
        }
    }

    pub fn as_weapon(&self) -> Option<&WeaponData> {
        match &self.system {
            ItemData::HumanWeapon(w) | ItemData::GuardianWeapon(w) => Some(w),
            _ => None,
        }
    }

    /// `true` only for equippable variants whose flag is set.
    pub fn is_equipped(&self) -> bool {
        match &self.system {
            ItemData::HumanWeapon(w) | ItemData::GuardianWeapon(w) => w.equipped,
            ItemData::HumanArmor(p) | ItemData::GuardianOption(p) => p.equipped,
            _ => false,
        }
    }

    pub fn set_equipped(&mut self, equipped: bool) -> Result<(), DomainError> {
        let kind = self.kind();
        match &mut self.system {
            ItemData::HumanWeapon(w) | ItemData::GuardianWeapon(w) => w.equipped = equipped,
            ItemData::HumanArmor(p) | ItemData::GuardianOption(p) => p.equipped = equipped,
            _ => return Err(DomainError::NoEquipSlot(kind.as_str())),
        }
        Ok(())
    }
}
