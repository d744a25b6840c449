//! Attribute scores - the six rolled values a pilot is built from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::lenient;
use crate::error::DomainError;

/// One of the six attribute scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    /// Strength - durability and movement
    Str,
    /// Dexterity - accuracy, evasion, initiative
    Dex,
    /// Perception - accuracy and artillery
    Per,
    /// Intelligence - artillery, defense, initiative
    Int,
    /// Willpower - response
    Wil,
    /// Luck - evasion and defense
    Luk,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Self::Str,
        Self::Dex,
        Self::Per,
        Self::Int,
        Self::Wil,
        Self::Luk,
    ];

    /// Host key (e.g. "str").
    pub fn key(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Dex => "dex",
            Self::Per => "per",
            Self::Int => "int",
            Self::Wil => "wil",
            Self::Luk => "luk",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Str => "Strength",
            Self::Dex => "Dexterity",
            Self::Per => "Perception",
            Self::Int => "Intelligence",
            Self::Wil => "Willpower",
            Self::Luk => "Luck",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Attribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(&s.trim().to_lowercase())
            .ok_or_else(|| DomainError::parse(format!("Unknown attribute: {}", s)))
    }
}

/// Attribute modifier: `floor(value / 3)`, rounding toward negative infinity.
pub fn attribute_modifier(value: i32) -> i32 {
    value.div_euclid(3)
}

/// A single attribute with its derived modifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeScore {
    #[serde(default, deserialize_with = "lenient::int")]
    pub value: i32,
    /// Derived each pass
    #[serde(default, rename = "mod", deserialize_with = "lenient::int")]
    pub modifier: i32,
}

impl AttributeScore {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            modifier: attribute_modifier(value),
        }
    }
}

/// The full attribute block of an actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(default)]
    pub str: AttributeScore,
    #[serde(default)]
    pub dex: AttributeScore,
    #[serde(default)]
    pub per: AttributeScore,
    #[serde(default)]
    pub int: AttributeScore,
    #[serde(default)]
    pub wil: AttributeScore,
    #[serde(default)]
    pub luk: AttributeScore,
}

impl Attributes {
    /// Build from raw values in `Attribute::ALL` order, with modifiers applied.
    pub fn from_values(values: [i32; 6]) -> Self {
        let mut attributes = Self::default();
        for (attribute, value) in Attribute::ALL.into_iter().zip(values) {
            *attributes.get_mut(attribute) = AttributeScore::new(value);
        }
        attributes
    }

    pub fn get(&self, attribute: Attribute) -> &AttributeScore {
        match attribute {
            Attribute::Str => &self.str,
            Attribute::Dex => &self.dex,
            Attribute::Per => &self.per,
            Attribute::Int => &self.int,
            Attribute::Wil => &self.wil,
            Attribute::Luk => &self.luk,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut AttributeScore {
        match attribute {
            Attribute::Str => &mut self.str,
            Attribute::Dex => &mut self.dex,
            Attribute::Per => &mut self.per,
            Attribute::Int => &mut self.int,
            Attribute::Wil => &mut self.wil,
            Attribute::Luk => &mut self.luk,
        }
    }

    /// Snapshot of the current modifiers.
    pub fn mods(&self) -> AttributeMods {
        let mut mods = AttributeMods::default();
        for attribute in Attribute::ALL {
            mods.0[attribute.index()] = self.get(attribute).modifier;
        }
        mods
    }
}

/// Attribute modifiers only, as read off a pilot by a guardian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AttributeMods([i32; 6]);

impl AttributeMods {
    pub fn get(&self, attribute: Attribute) -> i32 {
        self.0[attribute.index()]
    }
}
