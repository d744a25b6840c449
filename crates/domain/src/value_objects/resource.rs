//! Resource pools (HP / EN / FP).
//!
//! Only `max` is derived. The current `value` is play state owned by the
//! host and is never touched by a preparation pass.

use serde::{Deserialize, Serialize};

use super::battle_stat::BattleStat;
use super::lenient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Hit points, sized from durability
    #[serde(rename = "HP")]
    Hp,
    /// Energy, sized from response
    #[serde(rename = "EN")]
    En,
    /// Field points, sized from field
    #[serde(rename = "FP")]
    Fp,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [Self::Hp, Self::En, Self::Fp];

    /// The battle stat a pool's maximum is sized from.
    pub fn source_stat(self) -> BattleStat {
        match self {
            Self::Hp => BattleStat::Durability,
            Self::En => BattleStat::Response,
            Self::Fp => BattleStat::Field,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    #[serde(default, deserialize_with = "lenient::int")]
    pub value: i32,
    #[serde(default, deserialize_with = "lenient::int")]
    pub max: i32,
    #[serde(default, rename = "mod", deserialize_with = "lenient::int")]
    pub modifier: i32,
}

impl ResourcePool {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Current value as a fraction of max, clamped to `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.max <= 0 {
            return 0.0;
        }
        (self.value as f64 / self.max as f64).clamp(0.0, 1.0)
    }
}
