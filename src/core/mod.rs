pub mod config;
pub mod error;
pub mod types;

pub use config::CombatConfig;
pub use error::{ForgeError, Result};
pub use types::{CardId, CardInstanceId, Energy};
