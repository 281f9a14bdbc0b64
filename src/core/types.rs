//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog key of a card definition
pub type CardId = u32;

/// Energy and card costs. Costs are allowed to be fractional (half-cost
/// handles exist), so energy is tracked in the same unit.
pub type Energy = f32;

/// Unique identifier for a single card instance in the player's pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstanceId(pub Uuid);

impl CardInstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CardInstanceId {
    fn default() -> Self {
        Self::new()
    }
}

/// Integer floor of `value * factor`, never negative.
///
/// All damage, heal and bonus math in the engine goes through this so that
/// rounding is always a floor.
pub fn floor_mul(value: u32, factor: f32) -> u32 {
    let product = value as f32 * factor;
    if product <= 0.0 {
        0
    } else {
        product.floor() as u32
    }
}
