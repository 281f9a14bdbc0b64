//! Player stats and per-combat session bonuses

use serde::{Deserialize, Serialize};

use crate::core::types::Energy;

/// Player stats carried through a combat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub hp: u32,
    pub max_hp: u32,
    pub energy: Energy,
    pub max_energy: u32,
    /// Reset to 0 at the player's draw phase
    pub block: u32,
    pub gold: u32,
    /// Caps the cost of any weapon crafted this turn
    pub cost_limit: Option<u32>,
    /// Head slot is locked
    pub disarmed: bool,
    /// Extra cards banked for the next draw phase
    pub next_turn_draw: u32,
    /// Stacks that reduce next draw-phase energy
    pub overheat: u32,
    pub weapons_used_this_turn: u32,
    /// Consumed by the next incoming enemy hit
    pub dodge_next_attack: bool,
    pub self_damage_this_turn: u32,
}

impl PlayerStats {
    pub fn new(max_hp: u32, max_energy: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            energy: max_energy as Energy,
            max_energy,
            block: 0,
            gold: 0,
            cost_limit: None,
            disarmed: false,
            next_turn_draw: 0,
            overheat: 0,
            weapons_used_this_turn: 0,
            dodge_next_attack: false,
            self_damage_this_turn: 0,
        }
    }

    /// Clear every transient flag at combat start
    pub fn reset_for_combat(&mut self) {
        self.energy = self.max_energy as Energy;
        self.block = 0;
        self.cost_limit = None;
        self.disarmed = false;
        self.next_turn_draw = 0;
        self.overheat = 0;
        self.weapons_used_this_turn = 0;
        self.dodge_next_attack = false;
        self.self_damage_this_turn = 0;
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// Lose HP directly, ignoring block. Returns HP actually lost.
    pub fn lose_hp(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Damage the player inflicts on themself; feeds self-damage bonuses
    pub fn take_self_damage(&mut self, amount: u32) -> u32 {
        let lost = self.lose_hp(amount);
        self.self_damage_this_turn += lost;
        lost
    }

    /// Heal up to max HP. Returns HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp - self.hp);
        self.hp += healed;
        healed
    }

    /// Restore energy, capped at max energy
    pub fn restore_energy(&mut self, amount: Energy) {
        self.energy = (self.energy + amount).min(self.max_energy as Energy);
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new(50, 3)
    }
}

/// State that lives for one combat and survives between forges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBonuses {
    pub growing_crystal_bonus: u32,
    /// The once-per-turn returning handle already came back this turn
    pub infinite_loop_used: bool,
}
