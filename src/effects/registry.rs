//! Registry of card behaviors
//!
//! Every card with a special behavior is described by data: forge rules that
//! shape the prediction, effect descriptors that run at a fixed phase of
//! resolution, and a lifecycle that decides where the card goes afterwards.
//! The forge and the resolver only walk these tables; they never branch on
//! card ids themselves.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::ids::*;
use crate::cards::SlotType;
use crate::core::config::CombatConfig;
use crate::core::types::{CardId, Energy};
use crate::forge::WeaponSlots;
use crate::status::StatusKind;

/// Rules applied while computing the weapon prediction.
///
/// The forge applies them in registration order inside each stage, which is
/// what fixes the order of the additive bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ForgeRule {
    /// Preview uses this multiplier instead of the handle's value; the
    /// resolver rolls the real one
    DisplayMultiplier(f32),
    /// Whole weapon costs nothing
    ZeroCost,
    /// Damage is the player's current block, whatever the parts say
    DamageEqualsPlayerBlock,
    /// Weapon value becomes block instead of damage
    ConvertToBlock,
    HitCount(u32),
    /// +`per_stack` damage for each stack of an enemy status
    BonusPerEnemyStatus { kind: StatusKind, per_stack: u32 },
    /// +floor(player block * factor) damage
    BonusFromPlayerBlock(f32),
    /// +n damage per weapon already used this turn
    BonusPerWeaponUsed(u32),
    DoubleBlock,
    /// Weapon deals no damage at all
    UtilityOnly,
    /// +the combat's growing crystal bonus
    CrystalBonus,
}

/// When a descriptor fires during resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectPhase {
    /// Before anything else: hit and effect multipliers
    Setup,
    /// Damage overrides and flags
    PreDamage,
    /// Self-inflicted damage that later bonuses can read
    SelfDamage,
    /// Bonuses computed from earlier steps
    Bonus,
    /// Final damage multipliers
    Multiplier,
    /// Once per hit that lands on enemy HP
    PerHit,
    /// Once per resolution, after damage and block
    PostDamage,
    /// After every other effect has settled
    Deferred,
}

/// A guard on a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// Weapon's total cost is at most this much
    CostAtMost(Energy),
    /// The weapon's final damage is above zero
    DamageDealt,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectAction {
    /// Multiply both the hit count and scaled effects
    TwinStrike(u32),
    /// Replace the handle multiplier with a roll in `min..=max`
    RerollMultiplier { min: u32, max: u32 },
    /// +n damage per point of energy left after paying
    DamagePerRemainingEnergy(u32),
    IgnoreBlock,
    SelfDamage(u32),
    /// +damage equal to self-damage taken this turn
    BonusFromSelfDamage,
    MultiplyDamage(u32),
    GoldPerHit(u32),
    /// Add enemy status stacks; `scaled` ones are multiplied by the effect multiplier
    ApplyStatus { kind: StatusKind, amount: u32, scaled: bool },
    RestoreEnergy(Energy),
    /// Heal floor(final damage * fraction)
    HealFromDamage(f32),
    /// Remove player block (scaled); the shortfall comes out of HP
    DrainBlock(u32),
    /// Extra cards at the next draw phase
    BankDraw(u32),
    /// Put a zero-cost copy of the weapon on top of the draw pile
    DuplicateWeapon,
    DrawCards(usize),
    Overheat(u32),
    SetDodge,
    /// Push the enemy's intent index one extra step
    SkipIntent,
    /// Raise the growing crystal bonus by `step`, up to `cap`
    GrowCrystal { step: u32, cap: u32 },
    /// Finish the enemy if its HP is at or below this fraction of max
    Execute(f32),
}

/// One registered card behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectDescriptor {
    pub card_id: CardId,
    pub slot: SlotType,
    pub phase: EffectPhase,
    pub condition: Option<Condition>,
    pub action: EffectAction,
}

/// Where a slotted card goes once its weapon resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CardLifecycle {
    #[default]
    Discard,
    /// Removed from the pool for good
    Exhaust,
    /// Back to hand the first time each turn, discarded after that
    ReturnOncePerTurn,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct ForgeRuleEntry {
    card_id: CardId,
    slot: SlotType,
    rule: ForgeRule,
}

/// Ordered tables of card behaviors
#[derive(Debug, Clone, Default)]
pub struct EffectRegistry {
    forge_rules: Vec<ForgeRuleEntry>,
    effects: Vec<EffectDescriptor>,
    lifecycles: AHashMap<CardId, CardLifecycle>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in behaviors with default tuning
    pub fn builtin() -> Self {
        Self::builtin_with(&CombatConfig::default())
    }

    /// Built-in behaviors, tuned by `config`
    pub fn builtin_with(config: &CombatConfig) -> Self {
        use EffectAction::*;
        use EffectPhase::{Bonus, Deferred, Multiplier, PerHit, PostDamage, PreDamage, Setup};
        use SlotType::{Deco, Handle, Head};

        let mut r = Self::new();

        // Forge stages
        r.add_forge_rule(GAMBLERS_HANDLE, Handle, ForgeRule::DisplayMultiplier(config.gambler_display_multiplier));
        r.add_forge_rule(PHILOSOPHERS_STONE, Deco, ForgeRule::ZeroCost);
        r.add_forge_rule(SPIKED_SHIELD, Head, ForgeRule::DamageEqualsPlayerBlock);
        r.add_forge_rule(GUARD_GRIP, Handle, ForgeRule::ConvertToBlock);
        r.add_forge_rule(BUCKLER_PLATE, Head, ForgeRule::ConvertToBlock);
        r.add_forge_rule(TWIN_FANG, Head, ForgeRule::HitCount(2));
        // Additive modifiers, in application order
        r.add_forge_rule(HEMORRHAGE_BLADE, Head, ForgeRule::BonusPerEnemyStatus { kind: StatusKind::Bleed, per_stack: 1 });
        r.add_forge_rule(BULWARK_RUNE, Deco, ForgeRule::BonusFromPlayerBlock(0.5));
        r.add_forge_rule(TOXIC_FANG, Head, ForgeRule::BonusPerEnemyStatus { kind: StatusKind::Poison, per_stack: 1 });
        r.add_forge_rule(MOMENTUM_BLADE, Head, ForgeRule::BonusPerWeaponUsed(2));
        r.add_forge_rule(FORTRESS_RUNE, Deco, ForgeRule::DoubleBlock);
        r.add_forge_rule(TIME_STOPPER, Head, ForgeRule::UtilityOnly);
        r.add_forge_rule(GROWING_CRYSTAL, Deco, ForgeRule::CrystalBonus);

        r.register(TWIN_GRIP, Handle, Setup, None, TwinStrike(config.twin_handle_multiplier));

        r.register(GAMBLERS_HANDLE, Handle, PreDamage, None, RerollMultiplier {
            min: config.gambler_roll_min,
            max: config.gambler_roll_max,
        });
        r.register(OVERCHARGE_CORE, Deco, PreDamage, None, DamagePerRemainingEnergy(config.overcharge_per_energy));
        r.register(PIERCING_GRIP, Handle, PreDamage, None, IgnoreBlock);

        r.register(PAIN_GRIP, Handle, EffectPhase::SelfDamage, None, EffectAction::SelfDamage(config.pain_self_damage));
        r.register(BLOOD_BLADE, Head, EffectPhase::SelfDamage, None, EffectAction::SelfDamage(config.pain_self_damage));

        r.register(MASOCHISTS_CHARM, Deco, Bonus, None, BonusFromSelfDamage);

        r.register(BERSERKER_RUNE, Deco, Multiplier, None, MultiplyDamage(2));

        r.register(GOLDEN_GRIP, Handle, PerHit, None, GoldPerHit(config.gold_per_hit));

        let weak = ApplyStatus { kind: StatusKind::Weak, amount: 1, scaled: false };
        r.register(HEAVY_GRIP, Handle, PostDamage, None, weak);
        r.register(DULLING_HAMMER, Head, PostDamage, None, weak);
        r.register(SMOKE_CHARM, Deco, PostDamage, None, weak);
        r.register(BREAKER_GRIP, Handle, PostDamage, None, ApplyStatus { kind: StatusKind::Vulnerable, amount: 2, scaled: false });
        r.register(SPARK_GEM, Deco, PostDamage, None, RestoreEnergy(1.0));
        r.register(EFFICIENT_EDGE, Head, PostDamage, None, RestoreEnergy(1.0));
        r.register(DEMON_BLADE, Head, PostDamage, None, EffectAction::SelfDamage(config.demon_self_damage));
        r.register(SERRATED_EDGE, Head, PostDamage, None, ApplyStatus { kind: StatusKind::Bleed, amount: 2, scaled: true });
        r.register(RENDING_SAW, Head, PostDamage, None, ApplyStatus { kind: StatusKind::Bleed, amount: 3, scaled: true });
        r.register(FLAME_BLADE, Head, PostDamage, None, ApplyStatus { kind: StatusKind::Burn, amount: 2, scaled: true });
        r.register(EMBER_CHARM, Deco, PostDamage, None, ApplyStatus { kind: StatusKind::Burn, amount: 1, scaled: true });
        r.register(VENOM_VIAL, Deco, PostDamage, None, ApplyStatus { kind: StatusKind::Poison, amount: config.venom_poison, scaled: false });
        r.register(VAMPIRIC_GRIP, Handle, PostDamage, Some(Condition::DamageDealt), HealFromDamage(0.5));
        r.register(RECKLESS_CLEAVER, Head, PostDamage, None, DrainBlock(config.block_drain));
        let stun = ApplyStatus { kind: StatusKind::Stunned, amount: 1, scaled: false };
        r.register(THUNDER_GRIP, Handle, PostDamage, None, stun);
        r.register(CONCUSSION_HAMMER, Head, PostDamage, None, stun);
        r.register(SCHOLARS_RIBBON, Deco, PostDamage, None, BankDraw(1));
        r.register(LUCKY_TASSEL, Deco, PostDamage, None, BankDraw(1));
        r.register(SCHOLARS_EDGE, Head, PostDamage, None, BankDraw(1));
        r.register(ECHO_PRISM, Deco, PostDamage, None, DuplicateWeapon);
        r.register(QUICK_GRIP, Handle, PostDamage, Some(Condition::CostAtMost(1.0)), DrawCards(1));
        r.register(MOLTEN_BLADE, Head, PostDamage, None, Overheat(1));
        r.register(PHANTOM_GRIP, Handle, PostDamage, None, SetDodge);
        r.register(TIME_STOPPER, Head, PostDamage, None, stun);
        r.register(TIME_STOPPER, Head, PostDamage, None, SkipIntent);
        r.register(GROWING_CRYSTAL, Deco, PostDamage, None, GrowCrystal {
            step: config.crystal_step,
            cap: config.crystal_cap,
        });

        r.register(EXECUTIONERS_AXE, Head, Deferred, None, Execute(config.execute_threshold));

        r.set_lifecycle(METEOR_BLADE, CardLifecycle::Exhaust);
        r.set_lifecycle(INFINITE_LOOP_GRIP, CardLifecycle::ReturnOncePerTurn);

        r
    }

    pub fn add_forge_rule(&mut self, card_id: CardId, slot: SlotType, rule: ForgeRule) {
        self.forge_rules.push(ForgeRuleEntry { card_id, slot, rule });
    }

    /// Register a resolution-time behavior for a card
    pub fn register(
        &mut self,
        card_id: CardId,
        slot: SlotType,
        phase: EffectPhase,
        condition: Option<Condition>,
        action: EffectAction,
    ) {
        self.effects.push(EffectDescriptor {
            card_id,
            slot,
            phase,
            condition,
            action,
        });
    }

    pub fn set_lifecycle(&mut self, card_id: CardId, lifecycle: CardLifecycle) {
        self.lifecycles.insert(card_id, lifecycle);
    }

    pub fn lifecycle(&self, card_id: CardId) -> CardLifecycle {
        self.lifecycles.get(&card_id).copied().unwrap_or_default()
    }

    /// Forge rules that apply to the cards currently slotted, in order
    pub fn forge_rules_for<'a>(&'a self, slots: &'a WeaponSlots) -> impl Iterator<Item = ForgeRule> + 'a {
        self.forge_rules
            .iter()
            .filter(move |entry| slots.card_id(entry.slot) == Some(entry.card_id))
            .map(|entry| entry.rule)
    }

    /// Descriptors for the slotted cards that fire during `phase`, in order
    pub fn effects_for<'a>(
        &'a self,
        slots: &'a WeaponSlots,
        phase: EffectPhase,
    ) -> impl Iterator<Item = &'a EffectDescriptor> + 'a {
        self.effects
            .iter()
            .filter(move |d| d.phase == phase && slots.card_id(d.slot) == Some(d.card_id))
    }

    /// Every action the slotted cards will trigger, for display
    pub fn actions_for(&self, slots: &WeaponSlots) -> Vec<EffectAction> {
        self.effects
            .iter()
            .filter(|d| slots.card_id(d.slot) == Some(d.card_id))
            .map(|d| d.action)
            .collect()
    }

    /// Ids of every card that has any registered behavior
    pub fn known_cards(&self) -> Vec<CardId> {
        let mut ids: Vec<CardId> = self
            .forge_rules
            .iter()
            .map(|e| e.card_id)
            .chain(self.effects.iter().map(|d| d.card_id))
            .chain(self.lifecycles.keys().copied())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
