//! Value objects - stat records, pools and dice

mod attribute;
mod battle_stat;
mod bonus;
mod defense;
mod dice;
pub mod lenient;
mod resource;

pub use attribute::{attribute_modifier, Attribute, AttributeMods, AttributeScore, Attributes};
pub use battle_stat::{BattleStat, BattleStatLine, BattleStats, SpeedLine, StatBonuses};
pub use defense::{DefenseBonuses, DefenseKind, DefenseLine, DefenseProfile};
pub use dice::{DiceFormula, DiceParseError, DiceRollResult};
pub use resource::{ResourceKind, ResourcePool};
