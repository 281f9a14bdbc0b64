use thiserror::Error;

use crate::cards::SlotType;
use crate::core::types::{CardId, CardInstanceId, Energy};

/// Everything the engine can refuse to do.
///
/// The first group are rejected player actions: they are raised before any
/// state is touched, so the caller may simply retry with different input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForgeError {
    #[error("Not enough energy: weapon costs {cost}, {energy} available")]
    InsufficientEnergy { cost: Energy, energy: Energy },

    #[error("Cost limit exceeded: weapon costs {cost}, limit is {limit}")]
    CostLimitExceeded { cost: Energy, limit: u32 },

    #[error("Weapon needs a {0:?} card")]
    MissingSlot(SlotType),

    #[error("Card {card} cannot go in the {slot:?} slot")]
    WrongSlot { card: CardId, slot: SlotType },

    #[error("Card {0} is unplayable")]
    Unplayable(CardId),

    #[error("Disarmed: the head slot is locked this turn")]
    Disarmed,

    #[error("Card not found in catalog: {0}")]
    CardNotFound(CardId),

    #[error("Card instance not found: {0:?}")]
    InstanceNotFound(CardInstanceId),

    #[error("Invalid phase: expected {expected}, currently {actual}")]
    InvalidPhase { expected: String, actual: String },

    #[error("Combat is already over")]
    CombatOver,

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML error: {0}")]
    Toml(String),

    #[error("Serialization error: {0}")]
    Json(String),
}

impl ForgeError {
    /// Rejections are non-fatal, user-facing refusals of a single action.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            ForgeError::InvalidContent(_)
                | ForgeError::Io(_)
                | ForgeError::Toml(_)
                | ForgeError::Json(_)
        )
    }
}

impl From<std::io::Error> for ForgeError {
    fn from(e: std::io::Error) -> Self {
        ForgeError::Io(e.to_string())
    }
}

impl From<toml::de::Error> for ForgeError {
    fn from(e: toml::de::Error) -> Self {
        ForgeError::Toml(e.to_string())
    }
}

impl From<serde_json::Error> for ForgeError {
    fn from(e: serde_json::Error) -> Self {
        ForgeError::Json(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_are_recoverable() {
        assert!(ForgeError::Disarmed.is_rejection());
        assert!(ForgeError::InsufficientEnergy { cost: 3.0, energy: 2.0 }.is_rejection());
        assert!(!ForgeError::InvalidContent("dup".into()).is_rejection());
    }

    #[test]
    fn test_toml_error_converts() {
        let parsed: std::result::Result<toml::Value, _> = "not = [valid".parse::<toml::Value>();
        let err: ForgeError = parsed.unwrap_err().into();
        assert!(matches!(err, ForgeError::Toml(_)));
    }
}
