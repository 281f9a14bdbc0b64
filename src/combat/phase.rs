//! Turn phases

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    PlayerDraw,
    PlayerAction,
    PlayerDiscard,
    EnemyTurn,
    Won,
    Lost,
}

impl Phase {
    /// The phase that normally follows this one
    pub fn next(self) -> Phase {
        match self {
            Phase::PlayerDraw => Phase::PlayerAction,
            Phase::PlayerAction => Phase::PlayerDiscard,
            Phase::PlayerDiscard => Phase::EnemyTurn,
            Phase::EnemyTurn => Phase::PlayerDraw,
            Phase::Won => Phase::Won,
            Phase::Lost => Phase::Lost,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::PlayerDraw => "PLAYER_DRAW",
            Phase::PlayerAction => "PLAYER_ACTION",
            Phase::PlayerDiscard => "PLAYER_DISCARD",
            Phase::EnemyTurn => "ENEMY_TURN",
            Phase::Won => "WON",
            Phase::Lost => "LOST",
        };
        write!(f, "{}", name)
    }
}

/// Turn counter and current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    pub turn: u32,
    pub phase: Phase,
}

impl Default for CombatState {
    fn default() -> Self {
        Self {
            turn: 1,
            phase: Phase::PlayerDraw,
        }
    }
}
