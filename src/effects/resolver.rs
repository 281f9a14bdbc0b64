//! Weapon resolution
//!
//! Applies a forged weapon to the combat. Validation happens up front and
//! touches nothing; once the cost is paid every step runs to the end, even if
//! the enemy dies halfway through.
//!
//! Step order:
//! 1. pay the cost
//! 2. setup and pre-damage overrides (multiplier reroll, energy bonus, pierce)
//! 3. self-damage
//! 4. bonuses that read self-damage
//! 5. final multipliers
//! 6. the hit loop
//! 7. block
//! 8. post-damage effects, then deferred checks
//! 9. card lifecycle; slots are emptied

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, Rarity, SlotType};
use crate::combat::events::CombatEvent;
use crate::combat::player::PlayerStats;
use crate::core::error::{ForgeError, Result};
use crate::core::types::{floor_mul, Energy};
use crate::effects::context::ResolutionContext;
use crate::effects::registry::{CardLifecycle, Condition, EffectAction, EffectPhase};
use crate::enemy::data::EnemyTrait;
use crate::forge::{CraftedWeapon, Forge, WeaponSlots};

/// What happened when a weapon was resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    /// The prediction the player confirmed
    pub predicted: CraftedWeapon,
    /// Damage per hit after every pre-hit modifier
    pub damage: u32,
    pub block: u32,
    /// Hits that reached the damage step
    pub hits: u32,
    pub events: Vec<CombatEvent>,
}

/// Working values for one resolution
#[derive(Debug, Clone)]
struct WeaponRun {
    total_cost: Energy,
    damage: u32,
    block: u32,
    hit_count: u32,
    hit_factor: u32,
    effect_multiplier: u32,
    ignore_block: bool,
    /// HP the enemy lost on the hit currently being processed
    last_hit_hp_lost: u32,
    /// The player as the weapon was forged, before the cost was paid
    forged_against: PlayerStats,
}

/// Check that the weapon in `slots` may be crafted right now.
///
/// Returns the prediction on success. Never mutates anything.
pub fn check_craft(slots: &WeaponSlots, ctx: &ResolutionContext<'_>) -> Result<CraftedWeapon> {
    if slots.handle.is_none() {
        return Err(ForgeError::MissingSlot(SlotType::Handle));
    }
    if slots.head.is_none() {
        return Err(ForgeError::MissingSlot(SlotType::Head));
    }

    let weapon = Forge::new(ctx.registry).forge(slots, ctx.player, ctx.enemy, ctx.bonuses);

    if weapon.total_cost > ctx.player.energy {
        return Err(ForgeError::InsufficientEnergy {
            cost: weapon.total_cost,
            energy: ctx.player.energy,
        });
    }
    if let Some(limit) = ctx.player.cost_limit {
        if weapon.total_cost > limit as Energy {
            return Err(ForgeError::CostLimitExceeded {
                cost: weapon.total_cost,
                limit,
            });
        }
    }

    Ok(weapon)
}

/// Resolve the weapon in `slots` against the enemy.
///
/// On `Err` nothing has changed. On `Ok` the slots are empty and their cards
/// have gone to the discard pile, the hand, or out of the game.
pub fn resolve(slots: &mut WeaponSlots, ctx: &mut ResolutionContext<'_>) -> Result<ResolutionOutcome> {
    let predicted = check_craft(slots, ctx)?;
    let forged_against = ctx.player.clone();

    // 1. Commit
    ctx.player.energy = (ctx.player.energy - predicted.total_cost).max(0.0);
    ctx.player.weapons_used_this_turn += 1;
    let remaining = ctx.player.energy;
    ctx.emit(CombatEvent::EnergySpent {
        amount: predicted.total_cost,
        remaining,
    });

    let mut run = WeaponRun {
        total_cost: predicted.total_cost,
        damage: predicted.damage,
        block: predicted.block,
        hit_count: predicted.hit_count,
        hit_factor: 1,
        effect_multiplier: 1,
        ignore_block: false,
        last_hit_hp_lost: 0,
        forged_against,
    };

    // 2-5
    for phase in [
        EffectPhase::Setup,
        EffectPhase::PreDamage,
        EffectPhase::SelfDamage,
        EffectPhase::Bonus,
        EffectPhase::Multiplier,
    ] {
        run_phase(phase, slots, &mut run, ctx);
    }

    // 6
    let hits = strike(slots, &mut run, ctx);

    // 7
    if run.block > 0 {
        ctx.player.block += run.block;
        let total = ctx.player.block;
        ctx.emit(CombatEvent::BlockGained {
            amount: run.block,
            total,
        });
    }

    // 8
    run_phase(EffectPhase::PostDamage, slots, &mut run, ctx);
    run_phase(EffectPhase::Deferred, slots, &mut run, ctx);

    // 9
    settle_cards(slots, ctx);

    tracing::debug!(
        damage = run.damage,
        block = run.block,
        hits,
        enemy_hp = ctx.enemy.current_hp,
        "Weapon resolved"
    );

    Ok(ResolutionOutcome {
        predicted,
        damage: run.damage,
        block: run.block,
        hits,
        events: ctx.take_events(),
    })
}

fn run_phase(phase: EffectPhase, slots: &WeaponSlots, run: &mut WeaponRun, ctx: &mut ResolutionContext<'_>) {
    let registry = ctx.registry;
    for descriptor in registry.effects_for(slots, phase) {
        if let Some(condition) = descriptor.condition {
            if !condition_holds(condition, run) {
                continue;
            }
        }
        tracing::trace!(card = descriptor.card_id, ?phase, action = ?descriptor.action, "effect");
        apply_action(descriptor.action, slots, run, ctx);
    }
}

fn condition_holds(condition: Condition, run: &WeaponRun) -> bool {
    match condition {
        Condition::CostAtMost(max) => run.total_cost <= max,
        Condition::DamageDealt => run.damage > 0,
    }
}

/// The damage loop. Returns how many hits were processed.
fn strike(slots: &WeaponSlots, run: &mut WeaponRun, ctx: &mut ResolutionContext<'_>) -> u32 {
    if run.damage == 0 {
        return 0;
    }

    let total_hits = run.hit_count * run.hit_factor;
    let enrages = ctx.enemy.has_trait(EnemyTrait::ReactiveToRare) && slots.any_of_rarity(Rarity::Rare);
    let mut processed = 0;

    for hit in 1..=total_hits {
        if ctx.enemy.is_dead() {
            break;
        }

        let mut damage = run.damage;
        if ctx.enemy.statuses.vulnerable > 0 {
            damage = floor_mul(damage, ctx.config.vulnerable_multiplier);
        }
        if ctx.enemy.has_trait(EnemyTrait::DamageCap) {
            damage = damage.min(ctx.config.damage_cap);
        }

        if ctx.enemy.has_trait(EnemyTrait::Thorns) {
            let lost = ctx.player.lose_hp(ctx.config.thorns_damage);
            ctx.emit(CombatEvent::ThornsDamage { amount: lost });
        }

        if enrages {
            let bonus = ctx.config.reactive_rare_bonus;
            ctx.enemy.empower_attacks(bonus);
            ctx.emit(CombatEvent::EnemyEnraged { bonus });
        }

        let (blocked, hp_lost) = ctx.enemy.take_hit(damage, run.ignore_block);
        ctx.emit(CombatEvent::EnemyHit {
            hit,
            damage,
            blocked,
            hp_lost,
        });
        processed += 1;

        run.last_hit_hp_lost = hp_lost;
        run_phase(EffectPhase::PerHit, slots, run, ctx);
    }

    processed
}

fn apply_action(action: EffectAction, slots: &WeaponSlots, run: &mut WeaponRun, ctx: &mut ResolutionContext<'_>) {
    match action {
        EffectAction::TwinStrike(factor) => {
            run.hit_factor = factor;
            run.effect_multiplier = factor;
        }
        EffectAction::RerollMultiplier { min, max } => {
            let roll = ctx.rng.gen_range(min..=max);
            // Pre-commit player: the weapon being resolved does not count as already used
            let rerolled = Forge::new(ctx.registry).forge_with_multiplier(
                slots,
                &run.forged_against,
                ctx.enemy,
                ctx.bonuses,
                Some(roll as f32),
            );
            run.damage = rerolled.damage;
            run.block = rerolled.block;
            ctx.emit(CombatEvent::MultiplierRolled { multiplier: roll });
        }
        EffectAction::DamagePerRemainingEnergy(per_energy) => {
            let energy = ctx.player.energy.max(0.0).floor() as u32;
            run.damage += per_energy * energy;
        }
        EffectAction::IgnoreBlock => run.ignore_block = true,
        EffectAction::SelfDamage(amount) => {
            let lost = ctx.player.take_self_damage(amount);
            ctx.emit(CombatEvent::SelfDamage { amount: lost });
        }
        EffectAction::BonusFromSelfDamage => {
            run.damage += ctx.player.self_damage_this_turn;
        }
        EffectAction::MultiplyDamage(factor) => run.damage *= factor,
        EffectAction::GoldPerHit(gold) => {
            if run.last_hit_hp_lost > 0 {
                ctx.player.gold += gold;
                ctx.emit(CombatEvent::GoldGained { amount: gold });
            }
        }
        EffectAction::ApplyStatus { kind, amount, scaled } => {
            let amount = if scaled { amount * run.effect_multiplier } else { amount };
            ctx.enemy.statuses.add(kind, amount);
            let total = ctx.enemy.statuses.get(kind);
            ctx.emit(CombatEvent::StatusApplied { kind, amount, total });
        }
        EffectAction::RestoreEnergy(amount) => {
            ctx.player.restore_energy(amount);
            ctx.emit(CombatEvent::EnergyRestored { amount });
        }
        EffectAction::HealFromDamage(fraction) => {
            let healed = ctx.player.heal(floor_mul(run.damage, fraction));
            ctx.emit(CombatEvent::Healed { amount: healed });
        }
        EffectAction::DrainBlock(amount) => {
            let drain = amount * run.effect_multiplier;
            let from_block = drain.min(ctx.player.block);
            ctx.player.block -= from_block;
            ctx.emit(CombatEvent::BlockLost { amount: from_block });
            let shortfall = drain - from_block;
            if shortfall > 0 {
                let lost = ctx.player.take_self_damage(shortfall);
                ctx.emit(CombatEvent::SelfDamage { amount: lost });
            }
        }
        EffectAction::BankDraw(amount) => {
            ctx.player.next_turn_draw += amount;
            ctx.emit(CombatEvent::DrawBanked { amount });
        }
        EffectAction::DuplicateWeapon => duplicate_weapon(run.damage, ctx),
        EffectAction::DrawCards(count) => {
            let drawn = ctx.piles.draw(count, &mut *ctx.rng);
            ctx.emit(CombatEvent::CardsDrawn { count: drawn });
        }
        EffectAction::Overheat(stacks) => {
            ctx.player.overheat += stacks;
            let stacks = ctx.player.overheat;
            ctx.emit(CombatEvent::Overheated { stacks });
        }
        EffectAction::SetDodge => {
            ctx.player.dodge_next_attack = true;
            ctx.emit(CombatEvent::DodgeReady);
        }
        EffectAction::SkipIntent => {
            ctx.enemy.advance_intent();
            ctx.emit(CombatEvent::IntentSkipped);
        }
        EffectAction::GrowCrystal { step, cap } => {
            let bonus = (ctx.bonuses.growing_crystal_bonus + step).min(cap);
            ctx.bonuses.growing_crystal_bonus = bonus;
            ctx.emit(CombatEvent::CrystalGrown { bonus });
        }
        EffectAction::Execute(threshold) => {
            let enemy = &mut *ctx.enemy;
            if enemy.current_hp > 0 && enemy.current_hp as f32 <= enemy.max_hp as f32 * threshold {
                enemy.current_hp = 0;
                ctx.emit(CombatEvent::Executed);
            }
        }
    }
}

/// Put a free copy of the weapon's damage on top of the draw pile
fn duplicate_weapon(damage: u32, ctx: &mut ResolutionContext<'_>) {
    let echo_id = ctx.config.echo_card_id;
    let Ok(template) = ctx.catalog.get(echo_id) else {
        tracing::error!(echo_id, "Echo card missing from catalog; duplicate skipped");
        return;
    };
    let mut data = template.clone();
    data.cost = 0.0;
    data.value = damage as f32;
    let card = CardInstance::new(data);
    let instance = card.instance_id;
    ctx.piles.push_top(card);
    ctx.emit(CombatEvent::CardCreated {
        card: echo_id,
        instance,
    });
}

/// Send every slotted card to where its lifecycle says
fn settle_cards(slots: &mut WeaponSlots, ctx: &mut ResolutionContext<'_>) {
    for card in slots.clear() {
        let id = card.id();
        match ctx.registry.lifecycle(id) {
            CardLifecycle::Exhaust => {
                ctx.piles.exhausted.push(card);
                ctx.emit(CombatEvent::CardExhausted { card: id });
            }
            CardLifecycle::ReturnOncePerTurn if !ctx.bonuses.infinite_loop_used => {
                ctx.bonuses.infinite_loop_used = true;
                ctx.piles.hand.push(card);
                ctx.emit(CombatEvent::CardReturned { card: id });
            }
            CardLifecycle::ReturnOncePerTurn | CardLifecycle::Discard => {
                ctx.piles.discard.push(card);
            }
        }
    }
}
