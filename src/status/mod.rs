//! Status effects carried by the enemy
//!
//! Stacks are plain counters. Poison, bleed, vulnerable, weak and stun lose
//! one stack each time they trigger or tick; burn never decays and strength
//! is spent by the next attack.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Poison,
    Bleed,
    Stunned,
    Strength,
    Vulnerable,
    Weak,
    Burn,
}

impl StatusKind {
    pub const ALL: [StatusKind; 7] = [
        StatusKind::Poison,
        StatusKind::Bleed,
        StatusKind::Stunned,
        StatusKind::Strength,
        StatusKind::Vulnerable,
        StatusKind::Weak,
        StatusKind::Burn,
    ];

    /// Does this status lose a stack on its own as turns pass?
    pub fn decays(self) -> bool {
        !matches!(self, StatusKind::Burn | StatusKind::Strength)
    }
}

/// Stack counts for every enemy status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyStatus {
    pub poison: u32,
    pub bleed: u32,
    pub stunned: u32,
    pub strength: u32,
    pub vulnerable: u32,
    pub weak: u32,
    pub burn: u32,
}

impl EnemyStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: StatusKind) -> u32 {
        match kind {
            StatusKind::Poison => self.poison,
            StatusKind::Bleed => self.bleed,
            StatusKind::Stunned => self.stunned,
            StatusKind::Strength => self.strength,
            StatusKind::Vulnerable => self.vulnerable,
            StatusKind::Weak => self.weak,
            StatusKind::Burn => self.burn,
        }
    }

    fn slot_mut(&mut self, kind: StatusKind) -> &mut u32 {
        match kind {
            StatusKind::Poison => &mut self.poison,
            StatusKind::Bleed => &mut self.bleed,
            StatusKind::Stunned => &mut self.stunned,
            StatusKind::Strength => &mut self.strength,
            StatusKind::Vulnerable => &mut self.vulnerable,
            StatusKind::Weak => &mut self.weak,
            StatusKind::Burn => &mut self.burn,
        }
    }

    /// Add stacks (uncapped)
    pub fn add(&mut self, kind: StatusKind, amount: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    /// Remove one stack, floored at zero. Returns the new count.
    pub fn decrement(&mut self, kind: StatusKind) -> u32 {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_sub(1);
        *slot
    }

    pub fn clear(&mut self, kind: StatusKind) {
        *self.slot_mut(kind) = 0;
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.get(kind) > 0
    }

    /// Once-per-enemy-turn decay of vulnerable and weak
    pub fn tick_debuffs(&mut self) {
        self.decrement(StatusKind::Vulnerable);
        self.decrement(StatusKind::Weak);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let status = EnemyStatus::new();
        for kind in StatusKind::ALL {
            assert_eq!(status.get(kind), 0);
        }
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let mut status = EnemyStatus::new();
        assert_eq!(status.decrement(StatusKind::Poison), 0);
        status.add(StatusKind::Poison, 2);
        assert_eq!(status.decrement(StatusKind::Poison), 1);
        assert_eq!(status.decrement(StatusKind::Poison), 0);
        assert_eq!(status.decrement(StatusKind::Poison), 0);
    }

    #[test]
    fn test_tick_debuffs_leaves_other_stacks() {
        let mut status = EnemyStatus {
            vulnerable: 2,
            weak: 1,
            burn: 3,
            poison: 3,
            ..Default::default()
        };
        status.tick_debuffs();
        assert_eq!(status.vulnerable, 1);
        assert_eq!(status.weak, 0);
        assert_eq!(status.burn, 3);
        assert_eq!(status.poison, 3);
    }

    #[test]
    fn test_decay_classification() {
        assert!(!StatusKind::Burn.decays());
        assert!(!StatusKind::Strength.decays());
        assert!(StatusKind::Poison.decays());
        assert!(StatusKind::Stunned.decays());
    }
}
