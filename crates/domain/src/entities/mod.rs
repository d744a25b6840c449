//! Domain entities - documents with identity

mod actor;
mod class_level;
mod item;

pub use actor::{
    Actor, ActorKind, ActorSystem, EnemyData, FlatBattleStats, GuardianData, LinkageData,
    NpcData, PilotLink,
};
pub use class_level::{ClassLevel, ClassLevels};
pub use item::{
    GearData, Item, ItemData, ItemKind, ModelData, ProtectionData, SkillData, WeaponDamage,
    WeaponData,
};
