//! Checks and damage rolls.
//!
//! A check rolls the check dice plus a base value read off the actor plus a
//! situational modifier. Attribute checks read the attribute `mod`; battle
//! stat checks read `total`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::{Actor, WeaponData, WeaponDamage};
use crate::error::DomainError;
use crate::value_objects::{Attribute, BattleStat};

/// What a check is rolled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CheckTarget {
    Attribute(Attribute),
    BattleStat(BattleStat),
}

impl CheckTarget {
    pub fn key(self) -> &'static str {
        match self {
            Self::Attribute(attribute) => attribute.key(),
            Self::BattleStat(stat) => stat.key(),
        }
    }

    /// Chat flavor for a roll against this target.
    pub fn label(self) -> String {
        format!("{} check", self.key())
    }

    /// Base value the dice are added to.
    ///
    /// Only pilots and guardians carry attributes and layered stats. Speed
    /// has no `total` and reads its `value`.
    pub fn base_value(self, actor: &Actor) -> Result<i32, DomainError> {
        let wrong_type = || DomainError::wrong_actor_type("linkage or guardian", actor.kind().as_str());
        match self {
            Self::Attribute(attribute) => actor
                .attributes()
                .map(|attributes| attributes.get(attribute).modifier)
                .ok_or_else(wrong_type),
            Self::BattleStat(stat) => {
                let stats = actor.battle_stats().ok_or_else(wrong_type)?;
                Ok(stats
                    .line(stat)
                    .map(|line| line.total)
                    .unwrap_or(stats.speed.value))
            }
        }
    }
}

impl fmt::Display for CheckTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Accepts attribute keys (`str`, or the sheet's `strRoll` action name) and
/// battle-stat keys.
impl FromStr for CheckTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        let attribute_key = key.strip_suffix("Roll").unwrap_or(key);
        if let Some(attribute) = Attribute::from_key(&attribute_key.to_lowercase()) {
            return Ok(Self::Attribute(attribute));
        }
        BattleStat::from_key(&key.to_lowercase())
            .map(Self::BattleStat)
            .ok_or_else(|| DomainError::parse(format!("Unknown check target: {}", s)))
    }
}

impl TryFrom<String> for CheckTarget {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CheckTarget> for String {
    fn from(target: CheckTarget) -> Self {
        target.key().to_string()
    }
}

/// Which damage line of a weapon to roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageSlot {
    Main,
    Sub,
}

impl DamageSlot {
    pub fn line(self, weapon: &WeaponData) -> &WeaponDamage {
        match self {
            Self::Main => &weapon.main,
            Self::Sub => &weapon.sub,
        }
    }
}

impl fmt::Display for DamageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Sub => write!(f, "sub"),
        }
    }
}

/// Base of a damage roll: the weapon line's damage plus the wielder's
/// `damage.added`.
pub fn damage_base(
    actor: &Actor,
    weapon: &WeaponData,
    slot: DamageSlot,
) -> Result<i32, DomainError> {
    let stats = actor.battle_stats().ok_or_else(|| {
        DomainError::wrong_actor_type("linkage or guardian", actor.kind().as_str())
    })?;
    Ok(slot.line(weapon).damage.saturating_add(stats.damage.added))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{GuardianData, LinkageData, NpcData};
    use crate::value_objects::StatBonuses;

    fn pilot() -> Actor {
        let mut data = LinkageData::default();
        data.attributes.dex.modifier = 3;
        data.battle_stats.accuracy.total = 5;
        data.battle_stats.speed.value = 2;
        data.battle_stats.damage.added = 4;
        Actor::linkage("Rin", data)
    }

    #[test]
    fn parses_sheet_action_names() {
        assert_eq!(
            "strRoll".parse::<CheckTarget>().unwrap(),
            CheckTarget::Attribute(Attribute::Str)
        );
        assert_eq!(
            "dex".parse::<CheckTarget>().unwrap(),
            CheckTarget::Attribute(Attribute::Dex)
        );
        assert_eq!(
            "accuracy".parse::<CheckTarget>().unwrap(),
            CheckTarget::BattleStat(BattleStat::Accuracy)
        );
        assert!("charm".parse::<CheckTarget>().is_err());
    }

    #[test]
    fn serializes_as_key() {
        let target = CheckTarget::BattleStat(BattleStat::Evasion);
        assert_eq!(serde_json::to_value(target).unwrap(), "evasion");
        let back: CheckTarget = serde_json::from_str("\"lukRoll\"").unwrap();
        assert_eq!(back, CheckTarget::Attribute(Attribute::Luk));
    }

    #[test]
    fn base_values_read_mod_and_total() {
        let actor = pilot();
        assert_eq!(
            CheckTarget::Attribute(Attribute::Dex).base_value(&actor).unwrap(),
            3
        );
        assert_eq!(
            CheckTarget::BattleStat(BattleStat::Accuracy)
                .base_value(&actor)
                .unwrap(),
            5
        );
        assert_eq!(
            CheckTarget::BattleStat(BattleStat::Speed)
                .base_value(&actor)
                .unwrap(),
            2
        );
        assert_eq!(CheckTarget::Attribute(Attribute::Str).label(), "str check");
    }

    #[test]
    fn guardians_check_with_copied_mods() {
        let mut data = GuardianData::default();
        data.attributes.per.modifier = 2;
        let mech = Actor::guardian("Unit-01", data);
        assert_eq!(
            CheckTarget::Attribute(Attribute::Per).base_value(&mech).unwrap(),
            2
        );
    }

    #[test]
    fn npcs_have_no_check_base() {
        let npc = Actor::npc("Grunt", NpcData::default());
        let err = CheckTarget::Attribute(Attribute::Str)
            .base_value(&npc)
            .unwrap_err();
        assert!(matches!(err, DomainError::WrongActorType { actual: "npc", .. }));
    }

    #[test]
    fn damage_base_adds_damage_added() {
        let weapon = WeaponData::new(StatBonuses::zero())
            .with_damage(WeaponDamage::new("slash", 6), WeaponDamage::new("fire", 2));
        let actor = pilot();
        assert_eq!(damage_base(&actor, &weapon, DamageSlot::Main).unwrap(), 10);
        assert_eq!(damage_base(&actor, &weapon, DamageSlot::Sub).unwrap(), 6);
    }
}
