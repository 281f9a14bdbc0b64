//! Immutable card templates

use serde::{Deserialize, Serialize};

use crate::core::types::{CardId, Energy};

/// Which weapon slot a card fits into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotType {
    Handle,
    Head,
    Deco,
    /// Enemy-injected clutter; never fits a slot
    Junk,
}

impl SlotType {
    /// The three real weapon slots, in forge order
    pub const WEAPON_SLOTS: [SlotType; 3] = [SlotType::Handle, SlotType::Head, SlotType::Deco];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Starter,
    Common,
    Rare,
    Legend,
    Junk,
    Special,
}

/// A card definition as stored in the catalog.
///
/// `value` means different things per slot: base damage for a head, a
/// multiplier for a handle, an additive bonus for a deco.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardData {
    pub id: CardId,
    pub name: String,
    pub slot: SlotType,
    pub cost: Energy,
    pub value: f32,
    pub rarity: Rarity,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unplayable: bool,
}

impl CardData {
    pub fn new(
        id: CardId,
        name: &str,
        slot: SlotType,
        cost: Energy,
        value: f32,
        rarity: Rarity,
        description: &str,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            slot,
            cost,
            value,
            rarity,
            description: description.to_string(),
            unplayable: slot == SlotType::Junk,
        }
    }

    /// Check the data-model invariants every card must satisfy, whatever
    /// produced it.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.cost.is_finite() && self.cost >= 0.0) {
            return Err(format!("card {} has invalid cost {}", self.id, self.cost));
        }
        if !(self.value.is_finite() && self.value >= 0.0) {
            return Err(format!("card {} has invalid value {}", self.id, self.value));
        }
        if self.name.trim().is_empty() {
            return Err(format!("card {} has no name", self.id));
        }
        if self.slot == SlotType::Junk && !self.unplayable {
            return Err(format!("junk card {} must be unplayable", self.id));
        }
        Ok(())
    }

    /// Can this card be placed into `slot`?
    pub fn fits(&self, slot: SlotType) -> bool {
        !self.unplayable && self.slot == slot && slot != SlotType::Junk
    }
}
