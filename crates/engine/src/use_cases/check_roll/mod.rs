//! Check and damage rolls.

mod error;

pub use error::CheckRollError;

use std::sync::Arc;

use serde::Serialize;

use metallic_guardian_domain::game_systems::metallic_guardian::damage_base;
use metallic_guardian_domain::{
    Actor, ActorId, CheckTarget, DamageSlot, DiceFormula, DiceRollResult, ItemId,
};

use crate::infrastructure::ports::{ActorRepo, RandomPort};

/// A resolved check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRollOutcome {
    pub actor_id: ActorId,
    pub target: CheckTarget,
    /// Attribute `mod` or battle-stat `total`
    pub base: i32,
    pub modifier: i32,
    pub roll: DiceRollResult,
    pub flavor: String,
}

/// A resolved weapon damage roll.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageRollOutcome {
    pub actor_id: ActorId,
    pub item_id: ItemId,
    pub slot: DamageSlot,
    /// Damage type of the rolled line
    pub damage_type: String,
    pub base: i32,
    pub roll: DiceRollResult,
    pub flavor: String,
}

pub struct CheckRolls {
    repo: Arc<dyn ActorRepo>,
    random: Arc<dyn RandomPort>,
    dice: DiceFormula,
}

impl CheckRolls {
    pub fn new(repo: Arc<dyn ActorRepo>, random: Arc<dyn RandomPort>, dice: DiceFormula) -> Self {
        Self { repo, random, dice }
    }

    /// Roll `dice + base + modifier` against an attribute or battle stat.
    pub fn roll_check(
        &self,
        actor_id: ActorId,
        target: CheckTarget,
        modifier: i32,
    ) -> Result<CheckRollOutcome, CheckRollError> {
        let actor = self.load(actor_id)?;
        let base = target.base_value(&actor)?;
        let roll = self.roll(base.saturating_add(modifier));

        tracing::info!(
            actor_id = %actor_id,
            target = %target,
            total = roll.total,
            breakdown = %roll.breakdown(),
            "Check rolled"
        );

        Ok(CheckRollOutcome {
            actor_id,
            target,
            base,
            modifier,
            roll,
            flavor: target.label(),
        })
    }

    /// Roll damage for one line of an owned weapon.
    pub fn roll_damage(
        &self,
        actor_id: ActorId,
        item_id: ItemId,
        slot: DamageSlot,
    ) -> Result<DamageRollOutcome, CheckRollError> {
        let actor = self.load(actor_id)?;
        let item = actor
            .item(item_id)
            .ok_or(CheckRollError::ItemNotFound(item_id))?;
        let weapon = item
            .as_weapon()
            .ok_or(CheckRollError::NotAWeapon(item_id))?;

        let base = damage_base(&actor, weapon, slot)?;
        let roll = self.roll(base);

        tracing::info!(
            actor_id = %actor_id,
            item_id = %item_id,
            slot = %slot,
            total = roll.total,
            "Damage rolled"
        );

        Ok(DamageRollOutcome {
            actor_id,
            item_id,
            slot,
            damage_type: slot.line(weapon).kind.clone(),
            base,
            roll,
            flavor: format!("{} ({} damage)", item.name, slot),
        })
    }

    fn roll(&self, bonus: i32) -> DiceRollResult {
        self.dice
            .plus(bonus)
            .roll_with(|min, max| self.random.gen_range(min, max))
    }

    fn load(&self, id: ActorId) -> Result<Actor, CheckRollError> {
        self.repo.get(id)?.ok_or(CheckRollError::ActorNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockActorRepo, MockRandomPort};
    use crate::infrastructure::random::SequenceRandom;
    use metallic_guardian_domain::{
        Attribute, BattleStat, DomainError, GearData, Item, ItemData, LinkageData, NpcData,
        StatBonuses, WeaponDamage, WeaponData,
    };
    use mockall::predicate::*;

    fn pilot() -> Actor {
        let mut data = LinkageData::default();
        data.attributes.dex.modifier = 3;
        data.battle_stats.evasion.total = 4;
        data.battle_stats.damage.added = 2;
        Actor::linkage("Rin", data)
    }

    fn repo_with(actor: Actor) -> MockActorRepo {
        let id = actor.id;
        let mut repo = MockActorRepo::new();
        repo.expect_get()
            .with(eq(id))
            .returning(move |_| Ok(Some(actor.clone())));
        repo
    }

    fn rolls(repo: MockActorRepo, dice: Vec<i32>) -> CheckRolls {
        CheckRolls::new(
            Arc::new(repo),
            Arc::new(SequenceRandom::new(dice)),
            DiceFormula::CHECK,
        )
    }

    #[test]
    fn attribute_check_adds_mod_and_modifier() {
        let actor = pilot();
        let id = actor.id;
        let outcome = rolls(repo_with(actor), vec![4, 5])
            .roll_check(id, CheckTarget::Attribute(Attribute::Dex), 1)
            .unwrap();

        assert_eq!(outcome.base, 3);
        assert_eq!(outcome.roll.individual_rolls, vec![4, 5]);
        assert_eq!(outcome.roll.total, 4 + 5 + 3 + 1);
        assert_eq!(outcome.flavor, "dex check");
    }

    #[test]
    fn battle_stat_check_reads_total() {
        let actor = pilot();
        let id = actor.id;
        let outcome = rolls(repo_with(actor), vec![1])
            .roll_check(id, CheckTarget::BattleStat(BattleStat::Evasion), 0)
            .unwrap();
        assert_eq!(outcome.roll.total, 1 + 1 + 4);
        assert_eq!(outcome.flavor, "evasion check");
    }

    #[test]
    fn dice_are_drawn_from_the_die_range() {
        let actor = pilot();
        let id = actor.id;
        let mut random = MockRandomPort::new();
        random
            .expect_gen_range()
            .with(eq(1), eq(6))
            .times(2)
            .returning(|_, max| max);

        let rolls = CheckRolls::new(Arc::new(repo_with(actor)), Arc::new(random), DiceFormula::CHECK);
        let outcome = rolls
            .roll_check(id, CheckTarget::Attribute(Attribute::Dex), 0)
            .unwrap();
        assert_eq!(outcome.roll.total, 15);
    }

    #[test]
    fn npcs_cannot_roll_checks() {
        let npc = Actor::npc("Grunt", NpcData::default());
        let id = npc.id;
        let err = rolls(repo_with(npc), vec![3])
            .roll_check(id, CheckTarget::Attribute(Attribute::Str), 0)
            .unwrap_err();
        assert!(matches!(
            err,
            CheckRollError::Domain(DomainError::WrongActorType { .. })
        ));
    }

    #[test]
    fn missing_actor() {
        let mut repo = MockActorRepo::new();
        repo.expect_get().returning(|_| Ok(None));
        let err = rolls(repo, vec![3])
            .roll_check(ActorId::new(), CheckTarget::Attribute(Attribute::Str), 0)
            .unwrap_err();
        assert!(matches!(err, CheckRollError::ActorNotFound(_)));
    }

    #[test]
    fn damage_roll_uses_weapon_line_and_damage_added() {
        let sword = Item::new(
            "Katana",
            ItemData::HumanWeapon(
                WeaponData::new(StatBonuses::zero())
                    .with_damage(WeaponDamage::new("slash", 3), WeaponDamage::new("pierce", 1)),
            ),
        );
        let sword_id = sword.id;
        let actor = pilot().with_item(sword);
        let id = actor.id;

        let outcome = rolls(repo_with(actor), vec![2, 6])
            .roll_damage(id, sword_id, DamageSlot::Main)
            .unwrap();
        assert_eq!(outcome.base, 5);
        assert_eq!(outcome.damage_type, "slash");
        assert_eq!(outcome.roll.total, 2 + 6 + 5);
        assert_eq!(outcome.flavor, "Katana (main damage)");
    }

    #[test]
    fn damage_roll_needs_an_owned_weapon() {
        let kit = Item::new("Medkit", ItemData::Gear(GearData::default()));
        let kit_id = kit.id;
        let actor = pilot().with_item(kit);
        let id = actor.id;
        let rolls = rolls(repo_with(actor), vec![1]);

        assert!(matches!(
            rolls.roll_damage(id, kit_id, DamageSlot::Sub),
            Err(CheckRollError::NotAWeapon(_))
        ));
        assert!(matches!(
            rolls.roll_damage(id, ItemId::new(), DamageSlot::Main),
            Err(CheckRollError::ItemNotFound(_))
        ));
    }
}
