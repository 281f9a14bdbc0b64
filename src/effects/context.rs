//! The mutable context threaded through resolution
//!
//! Both the weapon resolver and the enemy turn mutate combat state only
//! through this value, which borrows everything the session owns for the
//! duration of one resolution.

use rand_chacha::ChaCha8Rng;

use crate::cards::Catalog;
use crate::combat::events::CombatEvent;
use crate::combat::player::{PlayerStats, SessionBonuses};
use crate::core::config::CombatConfig;
use crate::deck::Piles;
use crate::effects::registry::EffectRegistry;
use crate::enemy::data::EnemyData;

pub struct ResolutionContext<'a> {
    pub player: &'a mut PlayerStats,
    pub enemy: &'a mut EnemyData,
    pub piles: &'a mut Piles,
    pub bonuses: &'a mut SessionBonuses,
    pub rng: &'a mut ChaCha8Rng,
    pub catalog: &'a Catalog,
    pub registry: &'a EffectRegistry,
    pub config: &'a CombatConfig,
    pub events: Vec<CombatEvent>,
}

impl<'a> ResolutionContext<'a> {
    pub fn emit(&mut self, event: CombatEvent) {
        tracing::trace!(?event, "combat event");
        self.events.push(event);
    }

    /// Hand the collected events to the caller, leaving the list empty
    pub fn take_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }
}
