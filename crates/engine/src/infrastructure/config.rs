//! Engine configuration from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `MG_ROSTER_PATH` | none | JSON roster to load |
//! | `MG_INITIATIVE_TIE_BREAK` | `0.1` | Added to pilot and guardian initiative |
//! | `MG_CHECK_DICE` | `2d6` | Dice rolled for checks and damage |
//!
//! Invalid values fall back to their defaults with a warning.

use std::path::PathBuf;

use metallic_guardian_domain::{DiceFormula, InitiativeRules};

pub const ROSTER_PATH_VAR: &str = "MG_ROSTER_PATH";
pub const TIE_BREAK_VAR: &str = "MG_INITIATIVE_TIE_BREAK";
pub const CHECK_DICE_VAR: &str = "MG_CHECK_DICE";

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub roster_path: Option<PathBuf>,
    pub initiative: InitiativeRules,
    pub check_dice: DiceFormula,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            roster_path: None,
            initiative: InitiativeRules::default(),
            check_dice: DiceFormula::CHECK,
        }
    }
}

impl EngineConfig {
    /// Read from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let roster_path = lookup(ROSTER_PATH_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let initiative = match lookup(TIE_BREAK_VAR) {
            None => defaults.initiative,
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => InitiativeRules::with_tie_break(value),
                _ => {
                    tracing::warn!(
                        var = TIE_BREAK_VAR,
                        value = %raw,
                        "Invalid tie-break, using default"
                    );
                    defaults.initiative
                }
            },
        };

        let check_dice = match lookup(CHECK_DICE_VAR) {
            None => defaults.check_dice,
            Some(raw) => DiceFormula::parse(&raw).unwrap_or_else(|e| {
                tracing::warn!(
                    var = CHECK_DICE_VAR,
                    value = %raw,
                    error = %e,
                    "Invalid check dice, using default"
                );
                defaults.check_dice
            }),
        };

        Self {
            roster_path,
            initiative,
            check_dice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]);
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.initiative.tie_break, 0.1);
        assert_eq!(config.check_dice.to_string(), "2d6");
    }

    #[test]
    fn reads_every_variable() {
        let config = config(&[
            (ROSTER_PATH_VAR, "/tmp/roster.json"),
            (TIE_BREAK_VAR, "0.25"),
            (CHECK_DICE_VAR, "3d6"),
        ]);
        assert_eq!(config.roster_path, Some(PathBuf::from("/tmp/roster.json")));
        assert_eq!(config.initiative.tie_break, 0.25);
        assert_eq!(config.check_dice.to_string(), "3d6");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config(&[
            (ROSTER_PATH_VAR, "  "),
            (TIE_BREAK_VAR, "lots"),
            (CHECK_DICE_VAR, "d"),
        ]);
        assert_eq!(config, EngineConfig::default());
    }
}
