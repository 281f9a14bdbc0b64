//! Hand-authored enemy behaviors
//!
//! A few enemies replace or tweak the generic intent handling. Each one is a
//! small [`EnemyScript`] implementation; an enemy opts in through its
//! `behavior` field, so the turn resolver never matches on enemy ids.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::cards::SlotType;
use crate::combat::events::CombatEvent;
use crate::effects::context::ResolutionContext;
use crate::enemy::data::{Intent, IntentFlavor, IntentType};

/// Inclusive range of the kobold's strength roll
const KOBOLD_STRENGTH_ROLL: (u32, u32) = (1, 3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyBehavior {
    Hammerhead,
    DeusExMachina,
    CorruptedSmith,
    MimicAnvil,
    KoboldScrapper,
    ShadowAssassin,
}

impl EnemyBehavior {
    /// Behavior hook for a known enemy id. Unknown ids get generic handling.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "hammerhead" => Some(Self::Hammerhead),
            "deus_ex_machina" => Some(Self::DeusExMachina),
            "corrupted_smith" => Some(Self::CorruptedSmith),
            "mimic_anvil" => Some(Self::MimicAnvil),
            "kobold_scrapper" => Some(Self::KoboldScrapper),
            "shadow_assassin" => Some(Self::ShadowAssassin),
            _ => None,
        }
    }

    pub fn script(self) -> &'static dyn EnemyScript {
        match self {
            Self::Hammerhead => &Hammerhead,
            Self::DeusExMachina => &DeusExMachina,
            Self::CorruptedSmith => &CorruptedSmith,
            Self::MimicAnvil => &MimicAnvil,
            Self::KoboldScrapper => &KoboldScrapper,
            Self::ShadowAssassin => &ShadowAssassin,
        }
    }
}

/// What a script did with an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOutcome {
    /// Not handled; run the generic behavior for the intent type
    Fallthrough,
    /// Fully handled
    Handled,
    /// Run the generic attack sequence with this base damage
    Attack { damage: u32, hits: u32 },
}

/// Hooks called by the enemy turn resolver
pub trait EnemyScript: Sync {
    /// Called before the generic handling of the current intent
    fn on_intent(&self, _intent: &Intent, _ctx: &mut ResolutionContext<'_>) -> ScriptOutcome {
        ScriptOutcome::Fallthrough
    }

    /// Strength gained from a BUFF intent, if the script decides it.
    ///
    /// `None` leaves the decision to the generic rule (strength if the intent
    /// is flavored as an attack buff, otherwise a heal).
    fn strength_gain(&self, _intent: &Intent, _rng: &mut ChaCha8Rng) -> Option<u32> {
        None
    }
}

/// DEBUFF: one random handle in the draw or discard pile costs 1 more, for good
struct Hammerhead;

impl EnemyScript for Hammerhead {
    fn on_intent(&self, intent: &Intent, ctx: &mut ResolutionContext<'_>) -> ScriptOutcome {
        if intent.kind != IntentType::Debuff {
            return ScriptOutcome::Fallthrough;
        }

        let mut handles = ctx.piles.deck_and_discard_of_type(SlotType::Handle);
        if handles.is_empty() {
            tracing::debug!("Hammerhead found no handle to weigh down");
            return ScriptOutcome::Handled;
        }
        let pick = ctx.rng.gen_range(0..handles.len());
        let card = &mut handles[pick];
        card.data.cost += 1.0;
        let (card, new_cost) = (card.id(), card.cost());

        ctx.emit(CombatEvent::CardCostRaised { card, new_cost });
        ScriptOutcome::Handled
    }
}

/// Cost-limit DEBUFF caps next turn's weapon cost
struct DeusExMachina;

impl EnemyScript for DeusExMachina {
    fn on_intent(&self, intent: &Intent, ctx: &mut ResolutionContext<'_>) -> ScriptOutcome {
        if intent.kind != IntentType::Debuff || intent.flavor() != Some(IntentFlavor::CostLimit) {
            return ScriptOutcome::Fallthrough;
        }
        let limit = ctx.config.deus_cost_limit;
        ctx.player.cost_limit = Some(limit);
        ctx.emit(CombatEvent::CostLimited { limit });
        ScriptOutcome::Handled
    }
}

/// SPECIAL locks the head slot
struct CorruptedSmith;

impl EnemyScript for CorruptedSmith {
    fn on_intent(&self, intent: &Intent, ctx: &mut ResolutionContext<'_>) -> ScriptOutcome {
        if intent.kind != IntentType::Special {
            return ScriptOutcome::Fallthrough;
        }
        ctx.player.disarmed = true;
        ctx.emit(CombatEvent::Disarmed);
        ScriptOutcome::Handled
    }
}

/// Reflect intents hit back with whatever it took this turn
struct MimicAnvil;

impl EnemyScript for MimicAnvil {
    fn on_intent(&self, intent: &Intent, ctx: &mut ResolutionContext<'_>) -> ScriptOutcome {
        if intent.flavor() != Some(IntentFlavor::Reflect) {
            return ScriptOutcome::Fallthrough;
        }
        ScriptOutcome::Attack {
            damage: ctx.enemy.damage_taken_this_turn,
            hits: intent.attack_count(),
        }
    }
}

/// Strength buffs roll their amount
struct KoboldScrapper;

impl EnemyScript for KoboldScrapper {
    fn strength_gain(&self, intent: &Intent, rng: &mut ChaCha8Rng) -> Option<u32> {
        if intent.flavor() != Some(IntentFlavor::Strength) {
            return None;
        }
        let (min, max) = KOBOLD_STRENGTH_ROLL;
        Some(rng.gen_range(min..=max))
    }
}

/// Every buff becomes strength
struct ShadowAssassin;

impl EnemyScript for ShadowAssassin {
    fn strength_gain(&self, intent: &Intent, _rng: &mut ChaCha8Rng) -> Option<u32> {
        Some(intent.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_known_ids_map_to_behaviors() {
        assert_eq!(EnemyBehavior::from_id("hammerhead"), Some(EnemyBehavior::Hammerhead));
        assert_eq!(EnemyBehavior::from_id("mimic_anvil"), Some(EnemyBehavior::MimicAnvil));
        assert_eq!(EnemyBehavior::from_id("slime"), None);
    }

    #[test]
    fn test_kobold_roll_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let intent = Intent::new(IntentType::Buff, 2, "Sharpens its scrap").with_flavor(IntentFlavor::Strength);
        for _ in 0..50 {
            let gain = EnemyBehavior::KoboldScrapper.script().strength_gain(&intent, &mut rng);
            assert!(matches!(gain, Some(1..=3)));
        }
    }

    #[test]
    fn test_kobold_heal_buff_is_not_rolled() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let intent = Intent::new(IntentType::Buff, 6, "Patches itself up");
        let gain = EnemyBehavior::KoboldScrapper.script().strength_gain(&intent, &mut rng);
        assert_eq!(gain, None);
    }

    #[test]
    fn test_shadow_assassin_uses_value() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let intent = Intent::new(IntentType::Buff, 4, "Fades into shadow");
        let gain = EnemyBehavior::ShadowAssassin.script().strength_gain(&intent, &mut rng);
        assert_eq!(gain, Some(4));
    }

    #[test]
    fn test_behavior_deserializes_snake_case() {
        let behavior: EnemyBehavior = serde_json::from_str("\"deus_ex_machina\"").unwrap();
        assert_eq!(behavior, EnemyBehavior::DeusExMachina);
    }
}
