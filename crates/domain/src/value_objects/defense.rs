//! Defense profile - eight damage-type resistances.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::bonus::define_bonus_record;
use super::lenient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefenseKind {
    Slash,
    Pierce,
    Blunt,
    Fire,
    Ice,
    Electric,
    Light,
    Dark,
}

impl DefenseKind {
    pub const ALL: [DefenseKind; 8] = [
        Self::Slash,
        Self::Pierce,
        Self::Blunt,
        Self::Fire,
        Self::Ice,
        Self::Electric,
        Self::Light,
        Self::Dark,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Slash => "slash",
            Self::Pierce => "pierce",
            Self::Blunt => "blunt",
            Self::Fire => "fire",
            Self::Ice => "ice",
            Self::Electric => "electric",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }
}

impl fmt::Display for DefenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

define_bonus_record!(
    /// Flat resistance per damage type, as carried by armor, options and models.
    DefenseBonuses,
    DefenseKind,
    8
);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseLine {
    #[serde(default, rename = "mod", deserialize_with = "lenient::int")]
    pub modifier: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub total: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseProfile {
    #[serde(default)]
    pub slash: DefenseLine,
    #[serde(default)]
    pub pierce: DefenseLine,
    #[serde(default)]
    pub blunt: DefenseLine,
    #[serde(default)]
    pub fire: DefenseLine,
    #[serde(default)]
    pub ice: DefenseLine,
    #[serde(default)]
    pub electric: DefenseLine,
    #[serde(default)]
    pub light: DefenseLine,
    #[serde(default)]
    pub dark: DefenseLine,
}

impl DefenseProfile {
    pub fn line(&self, kind: DefenseKind) -> &DefenseLine {
        match kind {
            DefenseKind::Slash => &self.slash,
            DefenseKind::Pierce => &self.pierce,
            DefenseKind::Blunt => &self.blunt,
            DefenseKind::Fire => &self.fire,
            DefenseKind::Ice => &self.ice,
            DefenseKind::Electric => &self.electric,
            DefenseKind::Light => &self.light,
            DefenseKind::Dark => &self.dark,
        }
    }

    pub fn line_mut(&mut self, kind: DefenseKind) -> &mut DefenseLine {
        match kind {
            DefenseKind::Slash => &mut self.slash,
            DefenseKind::Pierce => &mut self.pierce,
            DefenseKind::Blunt => &mut self.blunt,
            DefenseKind::Fire => &mut self.fire,
            DefenseKind::Ice => &mut self.ice,
            DefenseKind::Electric => &mut self.electric,
            DefenseKind::Light => &mut self.light,
            DefenseKind::Dark => &mut self.dark,
        }
    }

    /// Recompute every `total` as `contributions + mod`.
    pub fn apply(&mut self, contributions: &DefenseBonuses) {
        for (kind, bonus) in contributions.iter() {
            let line = self.line_mut(kind);
            line.total = bonus.saturating_add(line.modifier);
        }
    }
}
