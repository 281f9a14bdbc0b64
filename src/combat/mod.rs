//! Combat flow: the session, its phases, the player and the event log

pub mod events;
pub mod phase;
pub mod player;
pub mod session;

pub use events::CombatEvent;
pub use phase::{CombatState, Phase};
pub use player::{PlayerStats, SessionBonuses};
pub use session::{smelt, CombatOutcome, CombatSession};
