//! Enemy turn resolution
//!
//! One call runs the enemy's whole turn: block reset, debuff decay, stun,
//! damage-over-time, then the current intent. Scripted behaviors get the
//! first look at the intent; whatever they leave is handled generically by
//! intent type.

use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::combat::events::CombatEvent;
use crate::core::types::floor_mul;
use crate::effects::context::ResolutionContext;
use crate::enemy::data::{EnemyTrait, Intent, IntentFlavor, IntentType};
use crate::enemy::scripted::ScriptOutcome;
use crate::status::StatusKind;

/// How the enemy's turn went
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTurnOutcome {
    /// The enemy spent the turn stunned; its intent was not used
    pub stunned: bool,
    /// The intent that was executed, if any
    pub intent: Option<Intent>,
    pub events: Vec<CombatEvent>,
}

/// Run the enemy's turn against the player
pub fn resolve_enemy_turn(ctx: &mut ResolutionContext<'_>) -> EnemyTurnOutcome {
    ctx.enemy.block = 0;
    ctx.enemy.statuses.tick_debuffs();

    if ctx.enemy.statuses.stunned > 0 {
        let remaining = ctx.enemy.statuses.decrement(StatusKind::Stunned);
        ctx.emit(CombatEvent::EnemyStunned { remaining });
        tracing::debug!(enemy = %ctx.enemy.id, remaining, "Enemy stunned, turn skipped");
        return EnemyTurnOutcome {
            stunned: true,
            intent: None,
            events: ctx.take_events(),
        };
    }

    tick_damage_over_time(ctx);
    if ctx.enemy.is_dead() {
        tracing::debug!(enemy = %ctx.enemy.id, "Enemy died to damage over time");
        return EnemyTurnOutcome {
            stunned: false,
            intent: None,
            events: ctx.take_events(),
        };
    }

    let intent = ctx.enemy.current_intent().clone();
    ctx.emit(CombatEvent::EnemyIntent {
        kind: intent.kind,
        value: intent.value,
    });
    tracing::debug!(enemy = %ctx.enemy.id, kind = ?intent.kind, value = intent.value, "Enemy acts");

    execute_intent(&intent, ctx);
    ctx.enemy.advance_intent();

    EnemyTurnOutcome {
        stunned: false,
        intent: Some(intent),
        events: ctx.take_events(),
    }
}

/// Poison hurts and fades by one; burn hurts and stays
fn tick_damage_over_time(ctx: &mut ResolutionContext<'_>) {
    let poison = ctx.enemy.statuses.poison;
    if poison > 0 {
        let damage = ctx.enemy.lose_hp(poison);
        let remaining = ctx.enemy.statuses.decrement(StatusKind::Poison);
        ctx.emit(CombatEvent::StatusTick {
            kind: StatusKind::Poison,
            damage,
            remaining,
        });
    }

    let burn = ctx.enemy.statuses.burn;
    if burn > 0 {
        let damage = ctx.enemy.lose_hp(burn);
        ctx.emit(CombatEvent::StatusTick {
            kind: StatusKind::Burn,
            damage,
            remaining: burn,
        });
    }
}

fn execute_intent(intent: &Intent, ctx: &mut ResolutionContext<'_>) {
    let script = ctx.enemy.behavior.map(|b| b.script());

    if let Some(script) = script {
        match script.on_intent(intent, ctx) {
            ScriptOutcome::Handled => return,
            ScriptOutcome::Attack { damage, hits } => {
                enemy_attack(damage, hits, ctx);
                return;
            }
            ScriptOutcome::Fallthrough => {}
        }
    }

    match intent.kind {
        IntentType::Attack => enemy_attack(intent.value, intent.attack_count(), ctx),
        IntentType::Defend => {
            ctx.enemy.block += intent.value;
            ctx.emit(CombatEvent::EnemyBlock {
                amount: intent.value,
            });
        }
        IntentType::Buff => {
            let scripted = script.and_then(|s| s.strength_gain(intent, &mut *ctx.rng));
            let strength = match scripted {
                Some(amount) => Some(amount),
                None if intent.flavor() == Some(IntentFlavor::Strength) => Some(intent.value),
                None => None,
            };
            match strength {
                Some(amount) => {
                    ctx.enemy.statuses.add(StatusKind::Strength, amount);
                    ctx.emit(CombatEvent::StrengthGained { amount });
                }
                None => {
                    let enemy = &mut *ctx.enemy;
                    let amount = intent.value.min(enemy.max_hp - enemy.current_hp);
                    enemy.current_hp += amount;
                    ctx.emit(CombatEvent::EnemyHealed { amount });
                }
            }
        }
        IntentType::Debuff => inject_junk(intent.value, ctx),
        IntentType::Wait | IntentType::Special => {
            tracing::trace!(kind = ?intent.kind, "Intent has no generic effect");
        }
    }
}

/// The generic attack sequence.
///
/// Strength is spent by the attack and weak shrinks it. Each swing first lets
/// the enemy bleed, then checks the player's dodge, then goes through block.
pub fn enemy_attack(base: u32, hits: u32, ctx: &mut ResolutionContext<'_>) {
    let mut damage = base + ctx.enemy.statuses.strength;
    ctx.enemy.statuses.clear(StatusKind::Strength);
    if ctx.enemy.statuses.weak > 0 {
        damage = floor_mul(damage, ctx.config.weak_multiplier);
    }

    for _ in 0..hits {
        let bleed = ctx.enemy.statuses.bleed;
        if bleed > 0 {
            let lost = ctx.enemy.lose_hp(bleed);
            let remaining = ctx.enemy.statuses.decrement(StatusKind::Bleed);
            ctx.emit(CombatEvent::StatusTick {
                kind: StatusKind::Bleed,
                damage: lost,
                remaining,
            });
            if ctx.enemy.is_dead() {
                break;
            }
        }

        if ctx.player.dodge_next_attack {
            ctx.player.dodge_next_attack = false;
            ctx.emit(CombatEvent::Dodged);
            continue;
        }

        let player = &mut *ctx.player;
        let unblocked = damage.saturating_sub(player.block);
        let blocked = damage - unblocked;
        player.block = player.block.saturating_sub(damage);
        let hp_lost = player.lose_hp(unblocked);
        ctx.emit(CombatEvent::PlayerHit {
            damage,
            blocked,
            hp_lost,
        });

        if unblocked > 0 && ctx.enemy.has_trait(EnemyTrait::Thievery) {
            let amount = ctx.player.gold.min(ctx.config.thievery_amount);
            ctx.player.gold -= amount;
            ctx.emit(CombatEvent::GoldStolen { amount });
        }

        if ctx.player.is_dead() {
            break;
        }
    }
}

/// Shuffle junk straight into the player's discard pile
fn inject_junk(value: u32, ctx: &mut ResolutionContext<'_>) {
    let count = if value == 0 {
        ctx.config.default_junk_count
    } else {
        value
    };
    let junk_id = ctx.config.junk_card_id;
    let junk = match ctx.catalog.get(junk_id) {
        Ok(data) => data.clone(),
        Err(err) => {
            tracing::error!(junk_id, %err, "Junk card missing from catalog; nothing injected");
            return;
        }
    };

    for _ in 0..count {
        ctx.piles.discard.push(CardInstance::new(junk.clone()));
    }
    ctx.emit(CombatEvent::JunkInjected { count });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Catalog, SlotType};
    use crate::combat::player::{PlayerStats, SessionBonuses};
    use crate::core::config::CombatConfig;
    use crate::deck::Piles;
    use crate::effects::registry::EffectRegistry;
    use crate::enemy::data::{EnemyData, EnemyTier};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Arena {
        player: PlayerStats,
        enemy: EnemyData,
        piles: Piles,
        bonuses: SessionBonuses,
        rng: ChaCha8Rng,
        catalog: Catalog,
        registry: EffectRegistry,
        config: CombatConfig,
    }

    impl Arena {
        fn new(enemy: EnemyData) -> Self {
            Self {
                player: PlayerStats::new(50, 3),
                enemy,
                piles: Piles::new(),
                bonuses: SessionBonuses::default(),
                rng: ChaCha8Rng::seed_from_u64(11),
                catalog: Catalog::builtin(),
                registry: EffectRegistry::builtin(),
                config: CombatConfig::default(),
            }
        }

        fn enemy_turn(&mut self) -> EnemyTurnOutcome {
            let mut ctx = ResolutionContext {
                player: &mut self.player,
                enemy: &mut self.enemy,
                piles: &mut self.piles,
                bonuses: &mut self.bonuses,
                rng: &mut self.rng,
                catalog: &self.catalog,
                registry: &self.registry,
                config: &self.config,
                events: Vec::new(),
            };
            resolve_enemy_turn(&mut ctx)
        }
    }

    fn single(intent: Intent) -> EnemyData {
        EnemyData::new("brute", "Brute", EnemyTier::Common, 40, vec![intent, Intent::attack(1)])
    }

    #[test]
    fn test_attack_goes_through_block() {
        let mut arena = Arena::new(single(Intent::attack(10)));
        arena.player.block = 4;
        arena.enemy_turn();
        assert_eq!(arena.player.block, 0);
        assert_eq!(arena.player.hp, 44);
        assert_eq!(arena.enemy.current_intent_index, 1);
    }

    #[test]
    fn test_block_consumed_by_attempted_damage() {
        let mut arena = Arena::new(single(Intent::attack(3)));
        arena.player.block = 10;
        arena.enemy_turn();
        assert_eq!(arena.player.block, 7);
        assert_eq!(arena.player.hp, 50);
    }

    #[test]
    fn test_strength_spent_and_weak_floors() {
        let mut arena = Arena::new(single(Intent::attack(7)));
        arena.enemy.statuses.strength = 3;
        arena.enemy.statuses.weak = 2;
        arena.enemy_turn();
        // floor(10 * 0.75) = 7
        assert_eq!(arena.player.hp, 43);
        assert_eq!(arena.enemy.statuses.strength, 0);
        assert_eq!(arena.enemy.statuses.weak, 1);
    }

    #[test]
    fn test_stun_skips_everything() {
        let mut arena = Arena::new(single(Intent::attack(10)));
        arena.enemy.statuses.stunned = 2;
        arena.enemy.statuses.poison = 3;
        let outcome = arena.enemy_turn();
        assert!(outcome.stunned);
        assert_eq!(arena.enemy.statuses.stunned, 1);
        assert_eq!(arena.enemy.statuses.poison, 3);
        assert_eq!(arena.enemy.current_intent_index, 0);
        assert_eq!(arena.player.hp, 50);
    }

    #[test]
    fn test_poison_decays_burn_stays() {
        let wait = Intent::new(IntentType::Wait, 0, "Watches");
        let mut arena = Arena::new(single(wait));
        arena.enemy.statuses.poison = 3;
        arena.enemy.statuses.burn = 3;
        arena.enemy_turn();
        assert_eq!(arena.enemy.statuses.poison, 2);
        assert_eq!(arena.enemy.statuses.burn, 3);
        assert_eq!(arena.enemy.current_hp, 34);
    }

    #[test]
    fn test_dead_from_dot_does_not_act() {
        let mut arena = Arena::new(single(Intent::attack(10)));
        arena.enemy.current_hp = 2;
        arena.enemy.statuses.poison = 5;
        let outcome = arena.enemy_turn();
        assert!(outcome.intent.is_none());
        assert_eq!(arena.player.hp, 50);
    }

    #[test]
    fn test_multi_hit_bleeds_and_dodges() {
        let flurry = Intent::new(IntentType::Attack, 4, "Flurry x3");
        let mut arena = Arena::new(single(flurry));
        arena.enemy.statuses.bleed = 2;
        arena.player.dodge_next_attack = true;
        arena.enemy_turn();
        // bleed 2 then 1; first swing dodged
        assert_eq!(arena.enemy.current_hp, 37);
        assert_eq!(arena.enemy.statuses.bleed, 0);
        assert_eq!(arena.player.hp, 42);
        assert!(!arena.player.dodge_next_attack);
    }

    #[test]
    fn test_thief_steals_on_damage() {
        let enemy = single(Intent::attack(6)).with_traits(&[EnemyTrait::Thievery]);
        let mut arena = Arena::new(enemy);
        arena.player.gold = 3;
        arena.enemy_turn();
        assert_eq!(arena.player.gold, 0);
    }

    #[test]
    fn test_buff_heals_without_strength_flavor() {
        let mut arena = Arena::new(single(Intent::new(IntentType::Buff, 8, "Mends")));
        arena.enemy.current_hp = 35;
        arena.enemy_turn();
        assert_eq!(arena.enemy.current_hp, 40);
        assert_eq!(arena.enemy.statuses.strength, 0);
    }

    #[test]
    fn test_debuff_injects_junk() {
        let mut arena = Arena::new(single(Intent::new(IntentType::Debuff, 0, "Spits rust")));
        arena.enemy_turn();
        assert_eq!(arena.piles.discard.len(), 1);
        assert_eq!(arena.piles.discard[0].slot(), SlotType::Junk);
        assert!(arena.piles.discard[0].is_unplayable());
    }

    #[test]
    fn test_defend_gains_block() {
        let mut arena = Arena::new(single(Intent::new(IntentType::Defend, 6, "Braces")));
        arena.enemy_turn();
        assert_eq!(arena.enemy.block, 6);
    }
}
