//! The card catalog: every card template the engine can instantiate
//!
//! The built-in table is static. Externally generated cards are merged in
//! from TOML and must satisfy the same invariants as built-in ones.

use ahash::AHashMap;
use serde::Deserialize;
use std::path::Path;

use crate::cards::definition::{CardData, Rarity, SlotType};
use crate::cards::ids::*;
use crate::cards::instance::CardInstance;
use crate::core::error::{ForgeError, Result};
use crate::core::types::CardId;

/// Lookup table of card definitions keyed by id
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: AHashMap<CardId, CardData>,
}

/// `[[cards]]` file shape for generated content
#[derive(Debug, Deserialize)]
struct CardFile {
    #[serde(default)]
    cards: Vec<CardData>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in card table
    pub fn builtin() -> Self {
        use Rarity::*;
        use SlotType::*;

        let table = [
            // Starter
            CardData::new(WOODEN_HANDLE, "Wooden Handle", Handle, 1.0, 1.0, Starter, "A plain grip. x1."),
            CardData::new(GUARD_GRIP, "Guard Grip", Handle, 1.0, 1.0, Starter, "Turns the weapon into block."),
            CardData::new(IRON_BLADE, "Iron Blade", Head, 1.0, 6.0, Starter, "Deals 6."),
            CardData::new(BUCKLER_PLATE, "Buckler Plate", Head, 1.0, 5.0, Starter, "Grants 5 block."),
            CardData::new(WHETSTONE, "Whetstone", Deco, 0.0, 2.0, Starter, "+2."),
            CardData::new(LUCKY_TASSEL, "Lucky Tassel", Deco, 0.0, 0.0, Starter, "Draw 1 more card next turn."),
            // Common
            CardData::new(HEAVY_GRIP, "Heavy Grip", Handle, 1.0, 1.0, Common, "Apply 1 Weak."),
            CardData::new(SERRATED_EDGE, "Serrated Edge", Head, 1.0, 4.0, Common, "Apply 2 Bleed."),
            CardData::new(SCHOLARS_RIBBON, "Scholar's Ribbon", Deco, 0.0, 1.0, Common, "+1. Draw 1 more card next turn."),
            CardData::new(VENOM_VIAL, "Venom Vial", Deco, 1.0, 0.0, Common, "Apply 4 Poison."),
            CardData::new(BREAKER_GRIP, "Breaker Grip", Handle, 1.0, 1.0, Common, "Apply 2 Vulnerable."),
            CardData::new(SPIKED_SHIELD, "Spiked Shield", Head, 1.0, 0.0, Common, "Deals damage equal to your block."),
            CardData::new(SPARK_GEM, "Spark Gem", Deco, 1.0, 2.0, Common, "+2. Restore 1 energy."),
            CardData::new(HEMORRHAGE_BLADE, "Hemorrhage Blade", Head, 1.0, 4.0, Common, "+1 damage per enemy Bleed."),
            CardData::new(BULWARK_RUNE, "Bulwark Rune", Deco, 1.0, 0.0, Common, "+half your block as damage."),
            CardData::new(OVERCHARGE_CORE, "Overcharge Core", Deco, 1.0, 0.0, Common, "+4 damage per energy left."),
            CardData::new(QUICK_GRIP, "Quick Grip", Handle, 0.0, 1.0, Common, "If the weapon costs 1 or less, draw 1."),
            CardData::new(TOXIC_FANG, "Toxic Fang", Head, 1.0, 3.0, Common, "+1 damage per enemy Poison."),
            CardData::new(DULLING_HAMMER, "Dulling Hammer", Head, 1.0, 5.0, Common, "Apply 1 Weak."),
            CardData::new(SCHOLARS_EDGE, "Scholar's Edge", Head, 1.0, 4.0, Common, "Draw 1 more card next turn."),
            CardData::new(FEATHER_GRIP, "Feather Grip", Handle, 0.5, 1.0, Common, "Costs half an energy."),
            CardData::new(SMOKE_CHARM, "Smoke Charm", Deco, 0.0, 1.0, Common, "+1. Apply 1 Weak."),
            // Rare
            CardData::new(TWIN_GRIP, "Twin Grip", Handle, 2.0, 1.0, Rare, "Strike twice as often. Effects doubled."),
            CardData::new(VAMPIRIC_GRIP, "Vampiric Grip", Handle, 1.0, 1.0, Rare, "Heal half the damage dealt."),
            CardData::new(FLAME_BLADE, "Flame Blade", Head, 1.0, 5.0, Rare, "Apply 2 Burn."),
            CardData::new(RECKLESS_CLEAVER, "Reckless Cleaver", Head, 1.0, 12.0, Rare, "Lose 5 block; the rest comes from HP."),
            CardData::new(ECHO_PRISM, "Echo Prism", Deco, 1.0, 0.0, Rare, "Put a free copy of this weapon on top of your deck."),
            CardData::new(TWIN_FANG, "Twin Fang", Head, 2.0, 4.0, Rare, "Hits 2 times."),
            CardData::new(GOLDEN_GRIP, "Golden Grip", Handle, 1.0, 1.0, Rare, "Gain 5 gold per damaging hit."),
            CardData::new(MOLTEN_BLADE, "Molten Blade", Head, 0.0, 8.0, Rare, "Overheat: 1 less energy next turn."),
            CardData::new(GAMBLERS_HANDLE, "Gambler's Handle", Handle, 1.0, 2.0, Rare, "Multiplier is x1, x2 or x3."),
            CardData::new(MOMENTUM_BLADE, "Momentum Blade", Head, 1.0, 3.0, Rare, "+2 per weapon already used this turn."),
            CardData::new(FORTRESS_RUNE, "Fortress Rune", Deco, 1.0, 0.0, Rare, "Double the weapon's block."),
            CardData::new(RENDING_SAW, "Rending Saw", Head, 1.0, 4.0, Rare, "Apply 3 Bleed."),
            CardData::new(EFFICIENT_EDGE, "Efficient Edge", Head, 1.0, 5.0, Rare, "Restore 1 energy."),
            CardData::new(BLOOD_BLADE, "Blood Blade", Head, 1.0, 9.0, Rare, "Take 4 damage before striking."),
            CardData::new(PIERCING_GRIP, "Piercing Grip", Handle, 1.0, 1.0, Rare, "Ignores enemy block."),
            CardData::new(PAIN_GRIP, "Pain Grip", Handle, 0.0, 1.5, Rare, "x1.5. Take 4 damage before striking."),
            CardData::new(EMBER_CHARM, "Ember Charm", Deco, 0.0, 1.0, Rare, "+1. Apply 1 Burn."),
            CardData::new(MASOCHISTS_CHARM, "Masochist's Charm", Deco, 0.0, 0.0, Rare, "+damage equal to HP you lost to yourself this turn."),
            // Legend
            CardData::new(THUNDER_GRIP, "Thunder Grip", Handle, 2.0, 1.0, Legend, "Stun the enemy."),
            CardData::new(METEOR_BLADE, "Meteor Blade", Head, 2.0, 20.0, Legend, "Exhaust."),
            CardData::new(PHILOSOPHERS_STONE, "Philosopher's Stone", Deco, 0.0, 0.0, Legend, "The weapon costs 0."),
            CardData::new(DEMON_BLADE, "Demon Blade", Head, 1.0, 18.0, Legend, "Take 6 damage."),
            CardData::new(INFINITE_LOOP_GRIP, "Infinite Loop Grip", Handle, 1.0, 1.0, Legend, "Returns to hand once per turn."),
            CardData::new(TIME_STOPPER, "Time Stopper", Head, 2.0, 0.0, Legend, "No damage. Stun and skip the enemy's next intent."),
            CardData::new(GROWING_CRYSTAL, "Growing Crystal", Deco, 1.0, 0.0, Legend, "+2 damage each time it is forged (max 16)."),
            CardData::new(CONCUSSION_HAMMER, "Concussion Hammer", Head, 2.0, 8.0, Legend, "Stun the enemy."),
            CardData::new(EXECUTIONERS_AXE, "Executioner's Axe", Head, 2.0, 8.0, Legend, "Execute an enemy at 20% HP or less."),
            CardData::new(PHANTOM_GRIP, "Phantom Grip", Handle, 1.0, 1.0, Legend, "Dodge the next attack."),
            CardData::new(BERSERKER_RUNE, "Berserker Rune", Deco, 2.0, 0.0, Legend, "Double the weapon's damage."),
            // Generated
            CardData::new(WEAPON_ECHO, "Weapon Echo", Head, 0.0, 0.0, Special, "A copy of a forged weapon."),
            CardData::new(RUSTED_SCRAP, "Rusted Scrap", SlotType::Junk, 0.0, 0.0, Rarity::Junk, "Unplayable."),
        ];

        let mut catalog = Self::new();
        for card in table {
            catalog.cards.insert(card.id, card);
        }
        catalog
    }

    /// Look up a card definition
    pub fn get(&self, id: CardId) -> Result<&CardData> {
        self.cards.get(&id).ok_or(ForgeError::CardNotFound(id))
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All ids in ascending order
    pub fn ids(&self) -> Vec<CardId> {
        let mut ids: Vec<CardId> = self.cards.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Create a fresh instance of a catalog card with a new instance id
    pub fn instantiate(&self, id: CardId) -> Result<CardInstance> {
        Ok(CardInstance::new(self.get(id)?.clone()))
    }

    /// Add one validated card. Ids must be unique.
    pub fn insert(&mut self, card: CardData) -> Result<()> {
        card.validate().map_err(ForgeError::InvalidContent)?;
        if self.cards.contains_key(&card.id) {
            return Err(ForgeError::InvalidContent(format!(
                "duplicate card id {}",
                card.id
            )));
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Merge `[[cards]]` records from a TOML document.
    ///
    /// Either every record is accepted or none is.
    pub fn extend_from_toml(&mut self, content: &str) -> Result<usize> {
        let file: CardFile = toml::from_str(content)?;
        let mut staged = self.clone();
        for card in file.cards.iter().cloned() {
            staged.insert(card)?;
        }
        *self = staged;
        tracing::info!("Loaded {} generated cards", file.cards.len());
        Ok(file.cards.len())
    }

    /// Merge generated cards from a TOML file on disk
    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)?;
        self.extend_from_toml(&content)
    }

    /// The deck every run starts with
    pub fn starter_deck(&self) -> Result<Vec<CardInstance>> {
        let recipe = [
            (WOODEN_HANDLE, 2),
            (GUARD_GRIP, 1),
            (IRON_BLADE, 3),
            (BUCKLER_PLATE, 2),
            (WHETSTONE, 1),
            (LUCKY_TASSEL, 1),
        ];

        let mut deck = Vec::new();
        for (id, count) in recipe {
            for _ in 0..count {
                deck.push(self.instantiate(id)?);
            }
        }
        Ok(deck)
    }
}
