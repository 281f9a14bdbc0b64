//! The three weapon slots

use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, Rarity, SlotType};
use crate::core::types::{CardId, CardInstanceId};

/// Handle, head and deco slots, each holding at most one card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponSlots {
    pub handle: Option<CardInstance>,
    pub head: Option<CardInstance>,
    pub deco: Option<CardInstance>,
}

impl WeaponSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: SlotType) -> Option<&CardInstance> {
        match slot {
            SlotType::Handle => self.handle.as_ref(),
            SlotType::Head => self.head.as_ref(),
            SlotType::Deco => self.deco.as_ref(),
            SlotType::Junk => None,
        }
    }

    fn slot_mut(&mut self, slot: SlotType) -> Option<&mut Option<CardInstance>> {
        match slot {
            SlotType::Handle => Some(&mut self.handle),
            SlotType::Head => Some(&mut self.head),
            SlotType::Deco => Some(&mut self.deco),
            SlotType::Junk => None,
        }
    }

    /// Catalog id of the card in `slot`
    pub fn card_id(&self, slot: SlotType) -> Option<CardId> {
        self.get(slot).map(|c| c.id())
    }

    /// Put a card into its own slot type. Returns the evicted occupant.
    ///
    /// Callers are expected to have checked that the card fits.
    pub fn place(&mut self, card: CardInstance) -> Option<CardInstance> {
        let slot = card.slot();
        debug_assert!(slot != SlotType::Junk, "junk cannot be slotted");
        self.slot_mut(slot).and_then(|s| s.replace(card))
    }

    pub fn take(&mut self, slot: SlotType) -> Option<CardInstance> {
        self.slot_mut(slot).and_then(|s| s.take())
    }

    /// Empty every slot, handle first
    pub fn clear(&mut self) -> Vec<CardInstance> {
        SlotType::WEAPON_SLOTS
            .iter()
            .filter_map(|slot| self.take(*slot))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.handle.iter().chain(self.head.iter()).chain(self.deco.iter())
    }

    pub fn contains(&self, id: CardInstanceId) -> bool {
        self.iter().any(|c| c.instance_id == id)
    }

    pub fn any_of_rarity(&self, rarity: Rarity) -> bool {
        self.iter().any(|c| c.rarity() == rarity)
    }

    /// Both mandatory parts are present
    pub fn is_complete(&self) -> bool {
        self.handle.is_some() && self.head.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
