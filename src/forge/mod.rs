//! Weapon slots and the forge that turns them into a weapon prediction

pub mod slots;
pub mod weapon;

pub use slots::WeaponSlots;
pub use weapon::{CraftedWeapon, Forge};
