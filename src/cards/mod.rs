//! Card definitions, runtime instances and the catalog

pub mod catalog;
pub mod definition;
pub mod ids;
pub mod instance;

pub use catalog::Catalog;
pub use definition::{CardData, Rarity, SlotType};
pub use instance::CardInstance;
