//! Dice formulas for checks
//!
//! Supports formulas like "2d6", "2d6+3", "d6-1". Randomness is injected as a
//! closure so rolls stay deterministic under test.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error when parsing a dice formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The formula string is empty
    #[error("Empty dice formula")]
    Empty,
    /// Invalid format - expected XdY or XdY+Z
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// Dice count must be at least 1
    #[error("Dice count must be at least 1")]
    InvalidDiceCount,
    /// Die size must be at least 2
    #[error("Die size must be at least 2")]
    InvalidDieSize,
}

/// A parsed dice formula like "2d6+3"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceFormula {
    /// Number of dice to roll (X in XdY)
    pub dice_count: u8,
    /// Size of each die (Y in XdY)
    pub die_size: u8,
    /// Flat amount added after rolling
    pub modifier: i32,
}

impl DiceFormula {
    /// The check formula: two six-sided dice.
    pub const CHECK: DiceFormula = DiceFormula {
        dice_count: 2,
        die_size: 6,
        modifier: 0,
    };

    pub fn new(dice_count: u8, die_size: u8, modifier: i32) -> Result<Self, DiceParseError> {
        if dice_count == 0 {
            return Err(DiceParseError::InvalidDiceCount);
        }
        if die_size < 2 {
            return Err(DiceParseError::InvalidDieSize);
        }
        Ok(Self {
            dice_count,
            die_size,
            modifier,
        })
    }

    /// Parse a dice formula string like "2d6", "2d6+3", "d6-1"
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let input: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if input.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let d_pos = input.find('d').ok_or_else(|| {
            DiceParseError::InvalidFormat(format!("Missing 'd' separator in '{}'", input))
        })?;

        let count_str = &input[..d_pos];
        let dice_count: u8 = if count_str.is_empty() {
            1
        } else {
            count_str.parse().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid dice count: '{}'", count_str))
            })?
        };

        let after_d = &input[d_pos + 1..];
        let (size_str, modifier) = match after_d.find(['+', '-']) {
            Some(0) => {
                return Err(DiceParseError::InvalidFormat(format!(
                    "Invalid die size: '{}'",
                    after_d
                )))
            }
            Some(pos) => {
                let modifier: i32 = after_d[pos..].parse().map_err(|_| {
                    DiceParseError::InvalidFormat(format!("Invalid modifier: '{}'", &after_d[pos..]))
                })?;
                (&after_d[..pos], modifier)
            }
            None => (after_d, 0),
        };

        let die_size: u8 = size_str.parse().map_err(|_| {
            DiceParseError::InvalidFormat(format!("Invalid die size: '{}'", size_str))
        })?;

        Self::new(dice_count, die_size, modifier)
    }

    /// Copy of this formula with `bonus` folded into the modifier.
    pub fn plus(self, bonus: i32) -> Self {
        Self {
            modifier: self.modifier.saturating_add(bonus),
            ..self
        }
    }

    /// Roll using `roll_die(min, max)` (inclusive) for each die.
    pub fn roll_with(&self, mut roll_die: impl FnMut(i32, i32) -> i32) -> DiceRollResult {
        let individual_rolls: Vec<i32> = (0..self.dice_count)
            .map(|_| roll_die(1, self.die_size as i32))
            .collect();
        let dice_total: i32 = individual_rolls.iter().sum();

        DiceRollResult {
            formula: *self,
            individual_rolls,
            dice_total,
            total: dice_total.saturating_add(self.modifier),
        }
    }

    pub fn min_roll(&self) -> i32 {
        self.dice_count as i32 + self.modifier
    }

    pub fn max_roll(&self) -> i32 {
        (self.dice_count as i32 * self.die_size as i32) + self.modifier
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            0 => write!(f, "{}d{}", self.dice_count, self.die_size),
            m if m > 0 => write!(f, "{}d{}+{}", self.dice_count, self.die_size, m),
            m => write!(f, "{}d{}{}", self.dice_count, self.die_size, m),
        }
    }
}

impl FromStr for DiceFormula {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Result of rolling dice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollResult {
    pub formula: DiceFormula,
    pub individual_rolls: Vec<i32>,
    /// Sum of dice before modifier
    pub dice_total: i32,
    /// dice_total + modifier
    pub total: i32,
}

impl DiceRollResult {
    /// Breakdown string, e.g. "2d6[3, 5] + 4 = 12"
    pub fn breakdown(&self) -> String {
        let rolls: Vec<String> = self.individual_rolls.iter().map(|r| r.to_string()).collect();
        let dice = format!(
            "{}d{}[{}]",
            self.formula.dice_count,
            self.formula.die_size,
            rolls.join(", ")
        );
        match self.formula.modifier {
            0 => format!("{} = {}", dice, self.total),
            m if m > 0 => format!("{} + {} = {}", dice, m, self.total),
            m => format!("{} - {} = {}", dice, -m, self.total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_formula() {
        let formula = DiceFormula::parse("2d6").unwrap();
        assert_eq!(formula, DiceFormula::CHECK);
    }

    #[test]
    fn test_parse_shorthand() {
        let formula = DiceFormula::parse("d6").unwrap();
        assert_eq!(formula.dice_count, 1);
        assert_eq!(formula.die_size, 6);
    }

    #[test]
    fn test_parse_with_modifiers() {
        assert_eq!(DiceFormula::parse("2d6+3").unwrap().modifier, 3);
        assert_eq!(DiceFormula::parse("2d6 - 1").unwrap().modifier, -1);
        assert_eq!(DiceFormula::parse("1D20").unwrap().die_size, 20);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(DiceFormula::parse(""), Err(DiceParseError::Empty));
        assert_eq!(DiceFormula::parse("0d6"), Err(DiceParseError::InvalidDiceCount));
        assert_eq!(DiceFormula::parse("2d1"), Err(DiceParseError::InvalidDieSize));
        assert!(matches!(
            DiceFormula::parse("2x6"),
            Err(DiceParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            DiceFormula::parse("2d-6"),
            Err(DiceParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_roll_with_injected_dice() {
        let mut faces = [3, 5].into_iter();
        let result = DiceFormula::CHECK
            .plus(4)
            .roll_with(|_, _| faces.next().unwrap_or(1));

        assert_eq!(result.individual_rolls, vec![3, 5]);
        assert_eq!(result.dice_total, 8);
        assert_eq!(result.total, 12);
        assert_eq!(result.breakdown(), "2d6[3, 5] + 4 = 12");
    }

    #[test]
    fn test_roll_passes_die_bounds() {
        let mut seen = Vec::new();
        DiceFormula::CHECK.roll_with(|min, max| {
            seen.push((min, max));
            min
        });
        assert_eq!(seen, vec![(1, 6), (1, 6)]);
    }

    #[test]
    fn test_display_and_bounds() {
        let formula = DiceFormula::new(2, 6, -2).unwrap();
        assert_eq!(formula.to_string(), "2d6-2");
        assert_eq!(formula.min_roll(), 0);
        assert_eq!(formula.max_roll(), 10);
    }
}
