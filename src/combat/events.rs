//! Combat events
//!
//! Every state change made by the resolver or the enemy turn is reported as
//! an event, in the order it happened. Presentation layers replay them for
//! animation; tests use them to observe ordering.

use serde::{Deserialize, Serialize};

use crate::cards::SlotType;
use crate::combat::phase::Phase;
use crate::core::types::{CardId, CardInstanceId, Energy};
use crate::enemy::data::IntentType;
use crate::status::StatusKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    // === PLAYER WEAPON ===
    EnergySpent { amount: Energy, remaining: Energy },
    MultiplierRolled { multiplier: u32 },
    SelfDamage { amount: u32 },
    /// One hit of the weapon's damage loop
    EnemyHit { hit: u32, damage: u32, blocked: u32, hp_lost: u32 },
    ThornsDamage { amount: u32 },
    EnemyEnraged { bonus: u32 },
    BlockGained { amount: u32, total: u32 },
    BlockLost { amount: u32 },
    StatusApplied { kind: StatusKind, amount: u32, total: u32 },
    EnergyRestored { amount: Energy },
    Healed { amount: u32 },
    GoldGained { amount: u32 },
    DrawBanked { amount: u32 },
    CardsDrawn { count: usize },
    CardCreated { card: CardId, instance: CardInstanceId },
    Overheated { stacks: u32 },
    DodgeReady,
    IntentSkipped,
    CrystalGrown { bonus: u32 },
    Executed,
    CardExhausted { card: CardId },
    CardReturned { card: CardId },

    // === ENEMY TURN ===
    StatusTick { kind: StatusKind, damage: u32, remaining: u32 },
    EnemyStunned { remaining: u32 },
    EnemyIntent { kind: IntentType, value: u32 },
    PlayerHit { damage: u32, blocked: u32, hp_lost: u32 },
    Dodged,
    GoldStolen { amount: u32 },
    EnemyBlock { amount: u32 },
    EnemyHealed { amount: u32 },
    StrengthGained { amount: u32 },
    JunkInjected { count: u32 },
    CardCostRaised { card: CardId, new_cost: Energy },
    CostLimited { limit: u32 },
    Disarmed,

    // === FLOW ===
    CardSlotted { card: CardId, slot: SlotType },
    PhaseChanged { from: Phase, to: Phase },
    CombatWon,
    CombatLost,
}
