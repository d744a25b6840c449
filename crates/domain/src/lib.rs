//! Metallic Guardian domain: actor and item records, stat derivation,
//! initiative and combat rules.
//!
//! Everything here is synchronous and free of I/O. Storage, randomness and
//! configuration are supplied by the caller.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

// Re-export entities (explicit list in entities/mod.rs)
pub use entities::{
    Actor, ActorKind, ActorSystem, ClassLevel, ClassLevels, EnemyData, FlatBattleStats, GearData,
    GuardianData, Item, ItemData, ItemKind, LinkageData, ModelData, NpcData, PilotLink,
    ProtectionData, SkillData, WeaponDamage, WeaponData,
};

pub use aggregates::{Combat, Combatant};
pub use error::DomainError;
pub use events::{CombatEvent, InitiativeRoll};

// Re-export game system traits and types
pub use game_systems::{
    ActorResolver, CalculationEngine, CheckTarget, DamageSlot, GameSystem, InitiativeInput,
    InitiativeRules, MetallicGuardianSystem, NoActors, PilotSnapshot,
};

// Re-export ID types
pub use ids::{ActorId, CombatId, CombatantId, ItemId};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    attribute_modifier, Attribute, AttributeMods, AttributeScore, Attributes, BattleStat,
    BattleStatLine, BattleStats, DefenseBonuses, DefenseKind, DefenseLine, DefenseProfile,
    DiceFormula, DiceParseError, DiceRollResult, ResourceKind, ResourcePool, SpeedLine,
    StatBonuses,
};
