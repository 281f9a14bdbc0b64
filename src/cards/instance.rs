//! Runtime card instances

use serde::{Deserialize, Serialize};

use crate::cards::definition::{CardData, Rarity, SlotType};
use crate::core::types::{CardId, CardInstanceId, Energy};

/// A card in the player's pool.
///
/// Carries its own copy of the definition: some effects permanently change a
/// single instance (enemy cost hikes, duplicated weapon damage) without
/// touching the catalog template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardInstance {
    pub instance_id: CardInstanceId,
    pub data: CardData,
}

impl CardInstance {
    pub fn new(data: CardData) -> Self {
        Self {
            instance_id: CardInstanceId::new(),
            data,
        }
    }

    pub fn id(&self) -> CardId {
        self.data.id
    }

    pub fn slot(&self) -> SlotType {
        self.data.slot
    }

    pub fn cost(&self) -> Energy {
        self.data.cost
    }

    pub fn value(&self) -> f32 {
        self.data.value
    }

    pub fn rarity(&self) -> Rarity {
        self.data.rarity
    }

    pub fn is_unplayable(&self) -> bool {
        self.data.unplayable
    }
}
