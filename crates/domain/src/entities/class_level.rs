//! Class slots of a pilot.

use serde::{Deserialize, Serialize};

use crate::value_objects::{lenient, BattleStat, StatBonuses};

/// One class slot. Stat bonuses sit beside `level` as sparse keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLevel {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub level: i32,
    #[serde(flatten)]
    pub bonuses: StatBonuses,
}

impl ClassLevel {
    pub fn new(name: impl Into<String>, level: i32) -> Self {
        Self {
            name: name.into(),
            level,
            bonuses: StatBonuses::zero(),
        }
    }

    pub fn with_bonus(mut self, stat: BattleStat, value: i32) -> Self {
        self.bonuses.set(stat, value);
        self
    }
}

/// The three class slots (first / second / third).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLevels {
    #[serde(default)]
    pub first: ClassLevel,
    #[serde(default)]
    pub second: ClassLevel,
    #[serde(default)]
    pub third: ClassLevel,
}

impl ClassLevels {
    pub fn slots(&self) -> [&ClassLevel; 3] {
        [&self.first, &self.second, &self.third]
    }

    /// Character level: sum of the three slot levels.
    pub fn total_level(&self) -> i32 {
        self.slots()
            .iter()
            .fold(0, |level, c| level.saturating_add(c.level))
    }

    /// Combined bonus of all slots per stat.
    pub fn bonuses(&self) -> StatBonuses {
        self.slots().iter().map(|c| c.bonuses).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_bonuses_are_read_from_sparse_keys() {
        let raw = r#"{
            "first": {"name": "Ace", "level": 2, "accuracy": 1, "evasion": "2"},
            "second": {"level": "1", "accuracy": 1},
            "third": {}
        }"#;
        let classes: ClassLevels = serde_json::from_str(raw).unwrap();

        assert_eq!(classes.total_level(), 3);
        assert_eq!(classes.bonuses().get(BattleStat::Accuracy), 2);
        assert_eq!(classes.bonuses().get(BattleStat::Evasion), 2);
        assert_eq!(classes.bonuses().get(BattleStat::Damage), 0);
    }

    #[test]
    fn missing_slots_default_to_zero() {
        let classes: ClassLevels = serde_json::from_str("{}").unwrap();
        assert_eq!(classes.total_level(), 0);
        assert!(classes.bonuses().is_zero());
    }
}
