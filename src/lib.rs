//! Forgebound - turn-based card-crafting combat engine
//!
//! Cards are slotted into a handle, a head and an optional decoration to
//! forge a weapon; the weapon is resolved against a single enemy, which then
//! takes its scripted turn.

pub mod cards;
pub mod combat;
pub mod core;
pub mod deck;
pub mod effects;
pub mod enemy;
pub mod forge;
pub mod status;

pub use crate::cards::{Catalog, CardData, CardInstance, Rarity, SlotType};
pub use crate::combat::{CombatEvent, CombatOutcome, CombatSession, Phase, PlayerStats};
pub use crate::core::{CombatConfig, ForgeError, Result};
pub use crate::effects::{EffectRegistry, ResolutionOutcome};
pub use crate::enemy::EnemyData;
pub use crate::forge::{CraftedWeapon, WeaponSlots};
