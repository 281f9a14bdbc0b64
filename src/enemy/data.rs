//! Enemy definitions, intents and traits

use serde::{Deserialize, Serialize};

use crate::enemy::scripted::EnemyBehavior;
use crate::status::EnemyStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyTier {
    Common,
    Elite,
    Boss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IntentType {
    Attack,
    Defend,
    Buff,
    Debuff,
    Wait,
    Special,
}

/// What an intent is flavored as, beyond its type.
///
/// Hand-authored content sets this directly. Generated content often only
/// has a description, so it is inferred from that when missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentFlavor {
    /// BUFF that raises attack power
    Strength,
    /// DEBUFF that caps the player's weapon cost
    CostLimit,
    /// Damage equal to what the enemy took this turn
    Reflect,
    /// Locks the head slot
    Disarm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(rename = "type")]
    pub kind: IntentType,
    #[serde(default)]
    pub value: u32,
    #[serde(default)]
    pub description: String,
    /// Number of swings for ATTACK intents
    #[serde(default)]
    pub hits: Option<u32>,
    #[serde(default)]
    pub flavor: Option<IntentFlavor>,
}

impl Intent {
    pub fn new(kind: IntentType, value: u32, description: &str) -> Self {
        Self {
            kind,
            value,
            description: description.to_string(),
            hits: None,
            flavor: None,
        }
    }

    pub fn attack(value: u32) -> Self {
        Self::new(IntentType::Attack, value, &format!("Attack for {}", value))
    }

    pub fn with_hits(mut self, hits: u32) -> Self {
        self.hits = Some(hits);
        self
    }

    pub fn with_flavor(mut self, flavor: IntentFlavor) -> Self {
        self.flavor = Some(flavor);
        self
    }

    /// How many times an attack swings.
    ///
    /// An explicit `hits` wins; otherwise a "x3" / "×3" marker in the
    /// description flags a multi-hit attack.
    pub fn attack_count(&self) -> u32 {
        if let Some(hits) = self.hits {
            return hits.max(1);
        }
        parse_hit_marker(&self.description).unwrap_or(1)
    }

    /// Explicit flavor, or one inferred from the description
    pub fn flavor(&self) -> Option<IntentFlavor> {
        if self.flavor.is_some() {
            return self.flavor;
        }
        let text = self.description.to_lowercase();
        match self.kind {
            IntentType::Buff if text.contains("strength") || text.contains("attack") || text.contains("power") => {
                Some(IntentFlavor::Strength)
            }
            IntentType::Debuff if text.contains("cost") || text.contains("limit") => {
                Some(IntentFlavor::CostLimit)
            }
            _ if text.contains("reflect") => Some(IntentFlavor::Reflect),
            _ if text.contains("disarm") => Some(IntentFlavor::Disarm),
            _ => None,
        }
    }
}

/// Parse "x3" or "×3" out of a description
fn parse_hit_marker(text: &str) -> Option<u32> {
    let lower = text.to_lowercase();
    for marker in ['x', '×'] {
        for (idx, _) in lower.match_indices(marker) {
            let digits: String = lower[idx + marker.len_utf8()..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            if let Ok(n) = digits.parse::<u32>() {
                if n > 1 {
                    return Some(n);
                }
            }
        }
    }
    None
}

/// Passive enemy modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyTrait {
    /// Incoming hits are clamped to the configured cap
    DamageCap,
    /// Hitting the enemy hurts the attacker
    Thorns,
    /// Rare cards enrage it: ATTACK intents grow
    ReactiveToRare,
    /// Steals gold on damaging attacks
    Thievery,
}

/// An enemy in combat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyData {
    pub id: String,
    pub name: String,
    pub tier: EnemyTier,
    pub max_hp: u32,
    #[serde(default)]
    pub current_hp: u32,
    #[serde(default)]
    pub block: u32,
    pub intents: Vec<Intent>,
    #[serde(default)]
    pub current_intent_index: usize,
    #[serde(default)]
    pub traits: Vec<EnemyTrait>,
    #[serde(default)]
    pub statuses: EnemyStatus,
    #[serde(default)]
    pub damage_taken_this_turn: u32,
    /// Scripted behavior hook; derived from the id when absent
    #[serde(default)]
    pub behavior: Option<EnemyBehavior>,
}

impl EnemyData {
    pub fn new(id: &str, name: &str, tier: EnemyTier, max_hp: u32, intents: Vec<Intent>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            tier,
            max_hp,
            current_hp: max_hp,
            block: 0,
            intents,
            current_intent_index: 0,
            traits: Vec::new(),
            statuses: EnemyStatus::default(),
            damage_taken_this_turn: 0,
            behavior: EnemyBehavior::from_id(id),
        }
    }

    pub fn with_traits(mut self, traits: &[EnemyTrait]) -> Self {
        self.traits = traits.to_vec();
        self
    }

    /// Check the data-model invariants
    pub fn validate(&self) -> Result<(), String> {
        if self.intents.is_empty() {
            return Err(format!("enemy {} has no intents", self.id));
        }
        if self.max_hp == 0 {
            return Err(format!("enemy {} has zero max HP", self.id));
        }
        Ok(())
    }

    /// Fresh copy for a new combat: full HP, no block, no statuses
    pub fn prepare_for_combat(&mut self) {
        self.current_hp = self.max_hp;
        self.block = 0;
        self.current_intent_index = 0;
        self.statuses = EnemyStatus::default();
        self.damage_taken_this_turn = 0;
        if self.behavior.is_none() {
            self.behavior = EnemyBehavior::from_id(&self.id);
        }
    }

    pub fn has_trait(&self, t: EnemyTrait) -> bool {
        self.traits.contains(&t)
    }

    pub fn is_dead(&self) -> bool {
        self.current_hp == 0
    }

    pub fn current_intent(&self) -> &Intent {
        &self.intents[self.current_intent_index % self.intents.len()]
    }

    /// Step the intent cycle forward by one
    pub fn advance_intent(&mut self) {
        self.current_intent_index = (self.current_intent_index + 1) % self.intents.len();
    }

    /// Lose HP directly (status damage). Returns HP actually lost.
    pub fn lose_hp(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    /// Apply one hit, routed through block unless `ignore_block`.
    ///
    /// Returns `(absorbed_by_block, hp_lost)`.
    pub fn take_hit(&mut self, damage: u32, ignore_block: bool) -> (u32, u32) {
        let absorbed = if ignore_block { 0 } else { damage.min(self.block) };
        self.block -= absorbed;
        let hp_lost = self.lose_hp(damage - absorbed);
        self.damage_taken_this_turn += hp_lost;
        (absorbed, hp_lost)
    }

    /// Permanently raise every ATTACK intent
    pub fn empower_attacks(&mut self, amount: u32) {
        for intent in self.intents.iter_mut().filter(|i| i.kind == IntentType::Attack) {
            intent.value += amount;
        }
    }
}
