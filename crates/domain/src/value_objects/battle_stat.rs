//! Battle stats - the ten combat numbers derived every preparation pass.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::bonus::define_bonus_record;
use super::lenient;
use crate::error::DomainError;

/// One of the ten battle stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleStat {
    Accuracy,
    Evasion,
    Artillery,
    Defense,
    Initiative,
    Field,
    Durability,
    Response,
    Damage,
    Speed,
}

impl BattleStat {
    pub const ALL: [BattleStat; 10] = [
        Self::Accuracy,
        Self::Evasion,
        Self::Artillery,
        Self::Defense,
        Self::Initiative,
        Self::Field,
        Self::Durability,
        Self::Response,
        Self::Damage,
        Self::Speed,
    ];

    /// Stats with the layered base/class/mod/total/added line. Speed uses its
    /// own value/full line.
    pub const AGGREGATED: [BattleStat; 9] = [
        Self::Accuracy,
        Self::Evasion,
        Self::Artillery,
        Self::Defense,
        Self::Initiative,
        Self::Field,
        Self::Durability,
        Self::Response,
        Self::Damage,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Accuracy => "accuracy",
            Self::Evasion => "evasion",
            Self::Artillery => "artillery",
            Self::Defense => "defense",
            Self::Initiative => "initiative",
            Self::Field => "field",
            Self::Durability => "durability",
            Self::Response => "response",
            Self::Damage => "damage",
            Self::Speed => "speed",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl fmt::Display for BattleStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for BattleStat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(&s.trim().to_lowercase())
            .ok_or_else(|| DomainError::parse(format!("Unknown battle stat: {}", s)))
    }
}

define_bonus_record!(
    /// Flat bonus per battle stat, as carried by items and class slots.
    StatBonuses,
    BattleStat,
    10
);

/// Layered value of a single non-speed battle stat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStatLine {
    /// Formula value from attributes (pilots only)
    #[serde(default, deserialize_with = "lenient::int")]
    pub base: i32,
    /// Sum of class-slot bonuses (pilots only)
    #[serde(default, deserialize_with = "lenient::int")]
    pub class: i32,
    /// Standing modifier, persisted
    #[serde(default, rename = "mod", deserialize_with = "lenient::int")]
    pub modifier: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub total: i32,
    /// Display tier including equipment
    #[serde(default, deserialize_with = "lenient::int")]
    pub added: i32,
}

impl BattleStatLine {
    pub fn with_modifier(modifier: i32) -> Self {
        Self {
            modifier,
            ..Self::default()
        }
    }
}

/// Movement line. `full` scaling differs between pilots and guardians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedLine {
    #[serde(default, deserialize_with = "lenient::int")]
    pub value: i32,
    #[serde(default, rename = "mod", deserialize_with = "lenient::int")]
    pub modifier: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub full: i32,
}

/// All ten battle stats of an actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStats {
    #[serde(default)]
    pub accuracy: BattleStatLine,
    #[serde(default)]
    pub evasion: BattleStatLine,
    #[serde(default)]
    pub artillery: BattleStatLine,
    #[serde(default)]
    pub defense: BattleStatLine,
    #[serde(default)]
    pub initiative: BattleStatLine,
    #[serde(default)]
    pub field: BattleStatLine,
    #[serde(default)]
    pub durability: BattleStatLine,
    #[serde(default)]
    pub response: BattleStatLine,
    #[serde(default)]
    pub damage: BattleStatLine,
    #[serde(default)]
    pub speed: SpeedLine,
}

impl BattleStats {
    /// The layered line for a stat; `None` for speed.
    pub fn line(&self, stat: BattleStat) -> Option<&BattleStatLine> {
        match stat {
            BattleStat::Accuracy => Some(&self.accuracy),
            BattleStat::Evasion => Some(&self.evasion),
            BattleStat::Artillery => Some(&self.artillery),
            BattleStat::Defense => Some(&self.defense),
            BattleStat::Initiative => Some(&self.initiative),
            BattleStat::Field => Some(&self.field),
            BattleStat::Durability => Some(&self.durability),
            BattleStat::Response => Some(&self.response),
            BattleStat::Damage => Some(&self.damage),
            BattleStat::Speed => None,
        }
    }

    pub fn line_mut(&mut self, stat: BattleStat) -> Option<&mut BattleStatLine> {
        match stat {
            BattleStat::Accuracy => Some(&mut self.accuracy),
            BattleStat::Evasion => Some(&mut self.evasion),
            BattleStat::Artillery => Some(&mut self.artillery),
            BattleStat::Defense => Some(&mut self.defense),
            BattleStat::Initiative => Some(&mut self.initiative),
            BattleStat::Field => Some(&mut self.field),
            BattleStat::Durability => Some(&mut self.durability),
            BattleStat::Response => Some(&mut self.response),
            BattleStat::Damage => Some(&mut self.damage),
            BattleStat::Speed => None,
        }
    }

    /// `total` per stat; speed reports its `value`.
    pub fn totals(&self) -> StatBonuses {
        let mut totals = StatBonuses::zero();
        for stat in BattleStat::AGGREGATED {
            if let Some(line) = self.line(stat) {
                totals.set(stat, line.total);
            }
        }
        totals.with(BattleStat::Speed, self.speed.value)
    }

    /// `added` per stat; speed reports its `value`.
    pub fn added(&self) -> StatBonuses {
        let mut added = StatBonuses::zero();
        for stat in BattleStat::AGGREGATED {
            if let Some(line) = self.line(stat) {
                added.set(stat, line.added);
            }
        }
        added.with(BattleStat::Speed, self.speed.value)
    }
}
