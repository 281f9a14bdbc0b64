//! Enemies: data, built-in roster, scripted behaviors and the enemy turn

pub mod bestiary;
pub mod data;
pub mod scripted;
pub mod turn;

pub use data::{EnemyData, EnemyTier, EnemyTrait, Intent, IntentFlavor, IntentType};
pub use scripted::{EnemyBehavior, EnemyScript, ScriptOutcome};
pub use turn::{resolve_enemy_turn, EnemyTurnOutcome};
