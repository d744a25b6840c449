//! Game system traits.
//!
//! These traits separate what a rule system is (identity, stat vocabulary,
//! how it prepares an actor) from the formula primitives it is built on, so
//! that the formulas can be exercised without building whole actors.

use crate::entities::{Actor, ActorKind};
use crate::value_objects::{Attributes, BattleStat};

use super::resolver::ActorResolver;

/// Core trait a rule system implements.
pub trait GameSystem: Send + Sync {
    /// Unique identifier for this game system (e.g., "metallic-guardian").
    fn system_id(&self) -> &str;

    /// Human-readable display name.
    fn display_name(&self) -> &str;

    /// Get the calculation engine for this system.
    fn calculation_engine(&self) -> &dyn CalculationEngine;

    /// Attribute keys used by this system.
    fn attribute_names(&self) -> &[&str];

    /// Battle-stat keys used by this system.
    fn battle_stat_names(&self) -> &[&str];

    /// Recompute every derived field of `actor` from its raw fields.
    ///
    /// Runs to completion synchronously and is idempotent: unchanged inputs
    /// produce identical outputs. Cross-actor reads (a guardian's pilot) go
    /// through `resolver` and must see already-derived data.
    fn prepare_derived_data(&self, actor: &mut Actor, resolver: &dyn ActorResolver);
}

/// Formula primitives that vary per rule system.
pub trait CalculationEngine: Send + Sync {
    /// Modifier of an attribute score.
    fn attribute_modifier(&self, value: i32) -> i32;

    /// Pilot `base` tier of a battle stat, before class and standing bonuses.
    fn base_battle_stat(&self, stat: BattleStat, attributes: &Attributes) -> i32;

    /// Base speed contributed by the strength modifier.
    fn base_speed(&self, str_modifier: i32) -> i32;

    /// Full-move distance from a speed value. Pilots and guardians scale
    /// differently.
    fn full_speed(&self, kind: ActorKind, speed: i32) -> i32;

    /// Experience awarded for defeating an NPC of the given challenge rating.
    fn challenge_xp(&self, cr: f64) -> f64;
}
