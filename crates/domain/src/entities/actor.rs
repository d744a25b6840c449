//! Actor entity - pilots, guardians, NPCs and enemies
//!
//! An actor is the host's document: persisted raw fields plus the derived
//! fields a preparation pass fills in. Each variant carries only the data its
//! own derivation path reads and writes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::class_level::ClassLevels;
use super::item::{Item, ItemKind};
use crate::ids::{ActorId, ItemId};
use crate::value_objects::{
    lenient, Attribute, Attributes, BattleStats, DefenseProfile, ResourceKind, ResourcePool,
};

/// Actor variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    /// Human pilot
    Linkage,
    /// Mech, optionally piloted by a linkage
    Guardian,
    Npc,
    Enemy,
}

impl ActorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linkage => "linkage",
            Self::Guardian => "guardian",
            Self::Npc => "npc",
            Self::Enemy => "enemy",
        }
    }

    /// Pilots and guardians carry the layered battle-stat block.
    pub fn has_battle_stats(self) -> bool {
        matches!(self, Self::Linkage | Self::Guardian)
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pilot data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkageData {
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub class: ClassLevels,
    /// Derived: sum of class levels
    #[serde(default, deserialize_with = "lenient::int")]
    pub level: i32,
    #[serde(rename = "battle-stats", default)]
    pub battle_stats: BattleStats,
    #[serde(default)]
    pub defense: DefenseProfile,
    #[serde(rename = "HP", default)]
    pub hp: ResourcePool,
    /// Host fields this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// By-id link from a guardian to its pilot. Not ownership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotLink {
    #[serde(default, deserialize_with = "optional_actor_id")]
    pub id: Option<ActorId>,
    #[serde(default)]
    pub name: String,
}

impl PilotLink {
    pub fn to(id: ActorId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
    }
}

/// Mech data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuardianData {
    /// Only the modifiers are meaningful; they mirror the pilot's
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub pilot: PilotLink,
    #[serde(rename = "battle-stats", default)]
    pub battle_stats: BattleStats,
    #[serde(default)]
    pub defense: DefenseProfile,
    #[serde(rename = "HP", default)]
    pub hp: ResourcePool,
    #[serde(rename = "EN", default)]
    pub en: ResourcePool,
    #[serde(rename = "FP", default)]
    pub fp: ResourcePool,
    /// Derived from the model; empty without one
    #[serde(default)]
    pub size: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GuardianData {
    pub fn pool(&self, kind: ResourceKind) -> &ResourcePool {
        match kind {
            ResourceKind::Hp => &self.hp,
            ResourceKind::En => &self.en,
            ResourceKind::Fp => &self.fp,
        }
    }

    pub fn pool_mut(&mut self, kind: ResourceKind) -> &mut ResourcePool {
        match kind {
            ResourceKind::Hp => &mut self.hp,
            ResourceKind::En => &mut self.en,
            ResourceKind::Fp => &mut self.fp,
        }
    }
}

/// Flat battle-stat scalars used by NPC and enemy sheets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatBattleStats {
    #[serde(default, deserialize_with = "lenient::float")]
    pub initiative: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NpcData {
    /// Challenge rating
    #[serde(default, deserialize_with = "lenient::opt_float")]
    pub cr: Option<f64>,
    /// Derived from `cr`; left alone when `cr` is absent
    #[serde(
        default,
        deserialize_with = "lenient::opt_float",
        skip_serializing_if = "Option::is_none"
    )]
    pub xp: Option<f64>,
    #[serde(rename = "battle-stats", default)]
    pub battle_stats: FlatBattleStats,
    #[serde(rename = "HP", default)]
    pub hp: ResourcePool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyData {
    #[serde(rename = "battle-stats", default)]
    pub battle_stats: FlatBattleStats,
    #[serde(rename = "HP", default)]
    pub hp: ResourcePool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActorSystem {
    Linkage(LinkageData),
    Guardian(GuardianData),
    Npc(NpcData),
    Enemy(EnemyData),
}

/// A game entity with persisted stats and owned items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(default)]
    pub id: ActorId,
    #[serde(default)]
    pub name: String,
    pub system: ActorSystem,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Actor {
    pub fn new(name: impl Into<String>, system: ActorSystem) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            system,
            items: Vec::new(),
        }
    }

    pub fn linkage(name: impl Into<String>, data: LinkageData) -> Self {
        Self::new(name, ActorSystem::Linkage(data))
    }

    pub fn guardian(name: impl Into<String>, data: GuardianData) -> Self {
        Self::new(name, ActorSystem::Guardian(data))
    }

    pub fn npc(name: impl Into<String>, data: NpcData) -> Self {
        Self::new(name, ActorSystem::Npc(data))
    }

    pub fn enemy(name: impl Into<String>, data: EnemyData) -> Self {
        Self::new(name, ActorSystem::Enemy(data))
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn kind(&self) -> ActorKind {
        match &self.system {
            ActorSystem::Linkage(_) => ActorKind::Linkage,
            ActorSystem::Guardian(_) => ActorKind::Guardian,
            ActorSystem::Npc(_) => ActorKind::Npc,
            ActorSystem::Enemy(_) => ActorKind::Enemy,
        }
    }

    pub fn as_linkage(&self) -> Option<&LinkageData> {
        match &self.system {
            ActorSystem::Linkage(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_guardian(&self) -> Option<&GuardianData> {
        match &self.system {
            ActorSystem::Guardian(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_npc(&self) -> Option<&NpcData> {
        match &self.system {
            ActorSystem::Npc(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_guardian_mut(&mut self) -> Option<&mut GuardianData> {
        match &mut self.system {
            ActorSystem::Guardian(data) => Some(data),
            _ => None,
        }
    }

    /// Layered battle stats; `None` for NPCs and enemies.
    pub fn battle_stats(&self) -> Option<&BattleStats> {
        match &self.system {
            ActorSystem::Linkage(data) => Some(&data.battle_stats),
            ActorSystem::Guardian(data) => Some(&data.battle_stats),
            ActorSystem::Npc(_) | ActorSystem::Enemy(_) => None,
        }
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        match &self.system {
            ActorSystem::Linkage(data) => Some(&data.attributes),
            ActorSystem::Guardian(data) => Some(&data.attributes),
            ActorSystem::Npc(_) | ActorSystem::Enemy(_) => None,
        }
    }

    /// Items of one variant, in owned order (the host's `itemTypes[kind]`).
    pub fn items_of(&self, kind: ItemKind) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(move |item| item.kind() == kind)
    }

    /// Equipped items of one variant.
    pub fn equipped_of(&self, kind: ItemKind) -> impl Iterator<Item = &Item> + '_ {
        self.items_of(kind).filter(|item| item.is_equipped())
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Remove every item of a variant; returns how many were removed.
    pub fn remove_items_of(&mut self, kind: ItemKind) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.kind() != kind);
        before - self.items.len()
    }

    /// Initiative as read by the turn tracker: derived `initiative.total` for
    /// pilots and guardians, the flat scalar otherwise.
    pub fn initiative_score(&self) -> f64 {
        match &self.system {
            ActorSystem::Linkage(data) => data.battle_stats.initiative.total as f64,
            ActorSystem::Guardian(data) => data.battle_stats.initiative.total as f64,
            ActorSystem::Npc(data) => data.battle_stats.initiative,
            ActorSystem::Enemy(data) => data.battle_stats.initiative,
        }
    }

    /// Read-only snapshot of `system` for dice-expression evaluation.
    ///
    /// Pilots additionally expose each attribute at top level (`str`, `dex`,
    /// ...) and their level as `lvl`.
    pub fn roll_data(&self) -> Map<String, Value> {
        let mut data = match serde_json::to_value(&self.system) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        if let ActorSystem::Linkage(linkage) = &self.system {
            for attribute in Attribute::ALL {
                let score = linkage.attributes.get(attribute);
                if let Ok(value) = serde_json::to_value(score) {
                    data.insert(attribute.key().to_string(), value);
                }
            }
            data.insert("lvl".to_string(), Value::from(linkage.level));
        }

        data
    }
}

/// Host stores an empty string for "no pilot"; unparsable ids read as
/// unlinked and are logged.
fn optional_actor_id<'de, D>(deserializer: D) -> Result<Option<ActorId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => parse_pilot_id(s.trim()),
        _ => None,
    })
}

fn parse_pilot_id(raw: &str) -> Option<ActorId> {
    match raw.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!(
                pilot_id = raw,
                error = %e,
                "Pilot link is not a valid actor id; treating the guardian as unlinked"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::item::{ItemData, ModelData, WeaponData};
    use crate::value_objects::StatBonuses;

    #[test]
    fn actors_deserialize_from_host_shape() {
        let raw = r#"{
            "name": "Rin",
            "system": {
                "type": "linkage",
                "attributes": {"str": {"value": 12}, "dex": {"value": "9"}},
                "battle-stats": {"accuracy": {"mod": 1}},
                "HP": {"value": 7},
                "biography": "Test pilot"
            },
            "items": [
                {"name": "Knife", "system": {"type": "human-weapon", "equipped": true}}
            ]
        }"#;
        let actor: Actor = serde_json::from_str(raw).unwrap();

        assert_eq!(actor.kind(), ActorKind::Linkage);
        let data = actor.as_linkage().unwrap();
        assert_eq!(data.attributes.str.value, 12);
        assert_eq!(data.attributes.dex.value, 9);
        assert_eq!(data.battle_stats.accuracy.modifier, 1);
        assert_eq!(data.hp.value, 7);
        assert_eq!(data.extra["biography"], "Test pilot");
        assert_eq!(actor.equipped_of(ItemKind::HumanWeapon).count(), 1);
    }

    #[test]
    fn empty_pilot_id_reads_as_unlinked() {
        let raw = r#"{"type": "guardian", "pilot": {"id": "", "name": ""}}"#;
        let system: ActorSystem = serde_json::from_str(raw).unwrap();
        match system {
            ActorSystem::Guardian(data) => assert!(data.pilot.is_empty()),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn foreign_pilot_id_reads_as_unlinked_and_keeps_the_name() {
        let raw = r#"{"type": "guardian", "pilot": {"id": "a1B2c3D4e5F6g7H8", "name": "Rin"}}"#;
        let system: ActorSystem = serde_json::from_str(raw).unwrap();
        match system {
            ActorSystem::Guardian(data) => {
                assert!(data.pilot.is_empty());
                assert_eq!(data.pilot.name, "Rin");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
        assert!(parse_pilot_id("a1B2c3D4e5F6g7H8").is_none());

        let id = ActorId::new();
        assert_eq!(parse_pilot_id(&id.to_string()), Some(id));
    }

    #[test]
    fn npc_without_cr_keeps_xp_absent() {
        let raw = r#"{"type": "npc", "battle-stats": {"initiative": "4"}}"#;
        let system: ActorSystem = serde_json::from_str(raw).unwrap();
        let json = serde_json::to_value(&system).unwrap();
        assert!(json.get("xp").is_none());
        match system {
            ActorSystem::Npc(data) => {
                assert_eq!(data.cr, None);
                assert_eq!(data.battle_stats.initiative, 4.0);
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn items_are_grouped_by_kind() {
        let mut actor = Actor::guardian("Unit-01", GuardianData::default())
            .with_item(Item::new("Frame A", ItemData::GuardianModel(ModelData::default())))
            .with_item(Item::new("Frame B", ItemData::GuardianModel(ModelData::default())))
            .with_item(Item::new(
                "Rifle",
                ItemData::GuardianWeapon(WeaponData::new(StatBonuses::zero())),
            ));

        assert_eq!(actor.items_of(ItemKind::GuardianModel).count(), 2);
        assert_eq!(actor.equipped_of(ItemKind::GuardianWeapon).count(), 0);
        assert_eq!(actor.remove_items_of(ItemKind::GuardianModel), 2);
        assert_eq!(actor.items.len(), 1);
    }

    #[test]
    fn roll_data_aliases_pilot_attributes() {
        let mut data = LinkageData {
            attributes: Attributes::from_values([12, 9, 9, 6, 9, 6]),
            ..LinkageData::default()
        };
        data.level = 3;
        let actor = Actor::linkage("Rin", data);

        let roll = actor.roll_data();
        assert_eq!(roll["lvl"], 3);
        assert_eq!(roll["str"]["value"], 12);
        assert_eq!(roll["str"]["mod"], 4);
        assert_eq!(roll["type"], "linkage");
    }

    #[test]
    fn roll_data_has_no_aliases_for_npcs() {
        let actor = Actor::npc("Grunt", NpcData::default());
        let roll = actor.roll_data();
        assert!(roll.get("lvl").is_none());
        assert!(roll.get("str").is_none());
    }
}
