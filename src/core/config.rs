//! Combat configuration with documented constants
//!
//! Every tunable number used by the forge, the resolver and the enemy turn
//! lives here. Values can be overridden from TOML; missing keys keep their
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{ForgeError, Result};
use crate::core::types::CardId;

/// Configuration for a combat session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // === TURN STRUCTURE ===
    /// Cards drawn at the start of every player turn (before banked draws)
    pub hand_size: usize,

    // === STATUS MATH ===
    /// Damage multiplier while the enemy is vulnerable (floored after)
    pub vulnerable_multiplier: f32,

    /// Enemy attack multiplier while the enemy is weak (floored after)
    pub weak_multiplier: f32,

    // === ENEMY TRAITS ===
    /// Per-hit damage ceiling for enemies with the damage-cap trait
    pub damage_cap: u32,

    /// Flat damage dealt back to the player per hit on a thorned enemy.
    /// Ignores player block.
    pub thorns_damage: u32,

    /// Permanent bonus to ATTACK intents when a rare card hits a reactive enemy
    pub reactive_rare_bonus: u32,

    /// Gold stolen by a thieving enemy per damaging attack
    pub thievery_amount: u32,

    // === CARD CONSTANTS ===
    /// Hit count and effect multiplier applied by the twin handle
    pub twin_handle_multiplier: u32,

    /// Gold earned per damaging hit with the golden handle
    pub gold_per_hit: u32,

    /// Multiplier shown in the forge preview for the gambler's handle.
    ///
    /// Resolution rolls `gambler_roll_min..=gambler_roll_max` instead, so the
    /// preview is an approximation of the expected value.
    pub gambler_display_multiplier: f32,
    pub gambler_roll_min: u32,
    pub gambler_roll_max: u32,

    /// Self-damage from the pain handle and the blood blade
    pub pain_self_damage: u32,

    /// Self-damage from the demon blade
    pub demon_self_damage: u32,

    /// Block drained by the reckless cleaver (scaled by the effect multiplier)
    pub block_drain: u32,

    /// Poison applied by the venom vial (no cap)
    pub venom_poison: u32,

    /// Bonus damage per point of remaining energy for the overcharge core
    pub overcharge_per_energy: u32,

    /// Growing crystal bonus step and ceiling
    pub crystal_step: u32,
    pub crystal_cap: u32,

    /// Enemy HP fraction at or under which the executioner finishes it off
    pub execute_threshold: f32,

    // === ENEMY SCRIPTS ===
    /// Cost limit imposed by the deus ex machina
    pub deus_cost_limit: u32,

    /// Junk cards injected by a generic DEBUFF with no value
    pub default_junk_count: u32,

    // === GENERATED CARDS ===
    /// Catalog id used for junk injected by enemies
    pub junk_card_id: CardId,

    /// Catalog id used for weapon duplicates
    pub echo_card_id: CardId,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            hand_size: 5,

            vulnerable_multiplier: 1.5,
            weak_multiplier: 0.75,

            damage_cap: 15,
            thorns_damage: 5,
            reactive_rare_bonus: 2,
            thievery_amount: 5,

            twin_handle_multiplier: 2,
            gold_per_hit: 5,
            gambler_display_multiplier: 2.0,
            gambler_roll_min: 1,
            gambler_roll_max: 3,
            pain_self_damage: 4,
            demon_self_damage: 6,
            block_drain: 5,
            venom_poison: 4,
            overcharge_per_energy: 4,
            crystal_step: 2,
            crystal_cap: 16,
            execute_threshold: 0.2,

            deus_cost_limit: 2,
            default_junk_count: 1,

            junk_card_id: 901,
            echo_card_id: 801,
        }
    }
}

impl CombatConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; unspecified keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CombatConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.hand_size == 0 {
            return Err(ForgeError::InvalidContent("hand_size must be positive".into()));
        }

        if self.gambler_roll_min == 0 || self.gambler_roll_min > self.gambler_roll_max {
            return Err(ForgeError::InvalidContent(format!(
                "gambler roll range {}..={} is empty or starts at zero",
                self.gambler_roll_min, self.gambler_roll_max
            )));
        }

        if !(0.0..=1.0).contains(&self.execute_threshold) {
            return Err(ForgeError::InvalidContent(format!(
                "execute_threshold ({}) must be within 0..=1",
                self.execute_threshold
            )));
        }

        if self.crystal_step > self.crystal_cap {
            return Err(ForgeError::InvalidContent(format!(
                "crystal_step ({}) exceeds crystal_cap ({})",
                self.crystal_step, self.crystal_cap
            )));
        }

        if self.vulnerable_multiplier < 1.0 || self.weak_multiplier > 1.0 {
            return Err(ForgeError::InvalidContent(
                "vulnerable must amplify and weak must reduce damage".into(),
            ));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<CombatConfig> = OnceLock::new();

/// Get the global combat config (initializes with defaults if not set)
pub fn config() -> &'static CombatConfig {
    CONFIG.get_or_init(CombatConfig::default)
}

/// Set the global combat config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: CombatConfig) -> std::result::Result<(), CombatConfig> {
    CONFIG.set(config)
}
