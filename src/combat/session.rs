//! The combat session
//!
//! Owns every piece of mutable combat state and drives the turn cycle:
//!
//! ```text
//! PLAYER_DRAW -> PLAYER_ACTION -> PLAYER_DISCARD -> ENEMY_TURN -> PLAYER_DRAW
//! ```
//!
//! Every mutating method takes `&mut self`, so at most one resolution or
//! phase transition is ever in flight. Win and loss are checked after each
//! of them; a dead player always loses, even if the enemy died too.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{Catalog, CardInstance, SlotType};
use crate::combat::events::CombatEvent;
use crate::combat::phase::{CombatState, Phase};
use crate::combat::player::{PlayerStats, SessionBonuses};
use crate::core::config::{config, CombatConfig};
use crate::core::error::{ForgeError, Result};
use crate::core::types::{CardInstanceId, Energy};
use crate::deck::Piles;
use crate::effects::context::ResolutionContext;
use crate::effects::registry::EffectRegistry;
use crate::effects::resolver::{self, ResolutionOutcome};
use crate::enemy::data::EnemyData;
use crate::enemy::turn::{resolve_enemy_turn, EnemyTurnOutcome};
use crate::forge::{CraftedWeapon, Forge, WeaponSlots};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    Ongoing,
    Won,
    Lost,
}

/// One combat between the player and a single enemy
#[derive(Debug, Clone)]
pub struct CombatSession {
    player: PlayerStats,
    enemy: EnemyData,
    piles: Piles,
    slots: WeaponSlots,
    bonuses: SessionBonuses,
    state: CombatState,
    rng: ChaCha8Rng,
    catalog: Catalog,
    registry: EffectRegistry,
    config: CombatConfig,
    history: Vec<CombatEvent>,
}

impl CombatSession {
    /// Start a combat.
    ///
    /// Resets the player's transient flags, shuffles `cards` into the draw
    /// pile, seeds the enemy at full HP and runs the first draw phase.
    /// Fails if the configuration or the enemy is invalid, or if the catalog
    /// lacks the cards the engine generates during combat.
    pub fn start(
        mut player: PlayerStats,
        cards: Vec<CardInstance>,
        mut enemy: EnemyData,
        catalog: Catalog,
        registry: EffectRegistry,
        config: CombatConfig,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        enemy.validate().map_err(ForgeError::InvalidContent)?;
        catalog.get(config.junk_card_id)?;
        catalog.get(config.echo_card_id)?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        player.reset_for_combat();
        enemy.prepare_for_combat();
        let piles = Piles::from_cards(cards, &mut rng);

        tracing::info!(
            enemy = %enemy.id,
            enemy_hp = enemy.max_hp,
            deck = piles.draw.len(),
            seed,
            "Combat started"
        );

        let mut session = Self {
            player,
            enemy,
            piles,
            slots: WeaponSlots::new(),
            bonuses: SessionBonuses::default(),
            state: CombatState::default(),
            rng,
            catalog,
            registry,
            config,
            history: Vec::new(),
        };
        session.draw_phase();
        Ok(session)
    }

    /// Start a combat with the built-in content, the global config, a fresh
    /// player and the starter deck
    pub fn start_combat(enemy: EnemyData) -> Result<Self> {
        let config = config().clone();
        let catalog = Catalog::builtin();
        let deck = catalog.starter_deck()?;
        let registry = EffectRegistry::builtin_with(&config);
        let seed = rand::thread_rng().gen();
        Self::start(PlayerStats::default(), deck, enemy, catalog, registry, config, seed)
    }

    // === QUERIES ===

    pub fn player(&self) -> &PlayerStats {
        &self.player
    }

    pub fn enemy(&self) -> &EnemyData {
        &self.enemy
    }

    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    pub fn hand(&self) -> &[CardInstance] {
        &self.piles.hand
    }

    pub fn slots(&self) -> &WeaponSlots {
        &self.slots
    }

    pub fn bonuses(&self) -> &SessionBonuses {
        &self.bonuses
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Every event since the combat started
    pub fn history(&self) -> &[CombatEvent] {
        &self.history
    }

    /// Win/loss predicate over current HP. Player death wins ties.
    pub fn outcome(&self) -> CombatOutcome {
        if self.player.is_dead() {
            CombatOutcome::Lost
        } else if self.enemy.is_dead() {
            CombatOutcome::Won
        } else {
            CombatOutcome::Ongoing
        }
    }

    /// Live prediction for the weapon currently in the slots
    pub fn preview(&self) -> CraftedWeapon {
        Forge::new(&self.registry).forge(&self.slots, &self.player, &self.enemy, &self.bonuses)
    }

    // === PLAYER ACTIONS ===

    /// Move a card from the hand into a weapon slot.
    ///
    /// Any card already in that slot goes back to the hand.
    pub fn move_card_to_slot(&mut self, id: CardInstanceId, slot: SlotType) -> Result<()> {
        self.expect_phase(Phase::PlayerAction)?;

        let card = self
            .piles
            .hand
            .iter()
            .find(|c| c.instance_id == id)
            .ok_or(ForgeError::InstanceNotFound(id))?;
        if card.is_unplayable() {
            return Err(ForgeError::Unplayable(card.id()));
        }
        if !card.data.fits(slot) {
            return Err(ForgeError::WrongSlot {
                card: card.id(),
                slot,
            });
        }
        if slot == SlotType::Head && self.player.disarmed {
            return Err(ForgeError::Disarmed);
        }

        let card = self
            .piles
            .take_from_hand(id)
            .ok_or(ForgeError::InstanceNotFound(id))?;
        let card_id = card.id();
        if let Some(evicted) = self.slots.place(card) {
            self.piles.hand.push(evicted);
        }
        self.record(CombatEvent::CardSlotted { card: card_id, slot });
        Ok(())
    }

    /// Take the card in `slot` back into the hand
    pub fn return_to_hand(&mut self, slot: SlotType) -> Result<()> {
        self.expect_phase(Phase::PlayerAction)?;
        let card = self.slots.take(slot).ok_or(ForgeError::MissingSlot(slot))?;
        self.piles.hand.push(card);
        Ok(())
    }

    /// Craft the slotted weapon and resolve it.
    ///
    /// Rejections leave every piece of state as it was.
    pub fn craft_and_resolve(&mut self) -> Result<ResolutionOutcome> {
        self.expect_phase(Phase::PlayerAction)?;

        let Self {
            player,
            enemy,
            piles,
            slots,
            bonuses,
            rng,
            catalog,
            registry,
            config,
            ..
        } = self;
        let mut ctx = ResolutionContext {
            player,
            enemy,
            piles,
            bonuses,
            rng,
            catalog,
            registry,
            config,
            events: Vec::new(),
        };
        let mut outcome = resolver::resolve(slots, &mut ctx).map_err(|err| {
            tracing::warn!(%err, "Craft rejected");
            err
        })?;

        self.history.extend(outcome.events.iter().cloned());
        if let Some(event) = self.check_end() {
            outcome.events.push(event);
        }
        Ok(outcome)
    }

    /// End the player's turn: discard, let the enemy act, then draw.
    pub fn end_turn(&mut self) -> Result<EnemyTurnOutcome> {
        self.expect_phase(Phase::PlayerAction)?;

        self.transition(Phase::PlayerDiscard);
        self.discard_phase();
        self.transition(Phase::EnemyTurn);

        let Self {
            player,
            enemy,
            piles,
            bonuses,
            rng,
            catalog,
            registry,
            config,
            ..
        } = self;
        let mut ctx = ResolutionContext {
            player,
            enemy,
            piles,
            bonuses,
            rng,
            catalog,
            registry,
            config,
            events: Vec::new(),
        };
        let mut outcome = resolve_enemy_turn(&mut ctx);
        self.history.extend(outcome.events.iter().cloned());

        if let Some(event) = self.check_end() {
            outcome.events.push(event);
            return Ok(outcome);
        }

        self.state.turn += 1;
        self.transition(Phase::PlayerDraw);
        self.draw_phase();
        Ok(outcome)
    }

    /// Close the combat and hand back the player and their cards.
    ///
    /// Exhausted cards come back; weapon echoes made during the fight do not.
    pub fn finish(mut self) -> (PlayerStats, Vec<CardInstance>) {
        let echo = self.config.echo_card_id;
        let mut cards = self.piles.drain_all();
        cards.extend(self.slots.clear());
        cards.retain(|c| c.id() != echo);
        tracing::info!(outcome = ?self.outcome(), cards = cards.len(), "Combat finished");
        self.player.reset_for_combat();
        (self.player, cards)
    }

    // === PHASES ===

    fn draw_phase(&mut self) {
        let player = &mut self.player;
        player.block = 0;
        player.energy = player.max_energy.saturating_sub(player.overheat) as Energy;
        player.overheat = 0;
        let count = self.config.hand_size + player.next_turn_draw as usize;
        player.next_turn_draw = 0;
        player.weapons_used_this_turn = 0;
        player.self_damage_this_turn = 0;
        self.enemy.damage_taken_this_turn = 0;
        self.bonuses.infinite_loop_used = false;

        let drawn = self.piles.draw(count, &mut self.rng);
        if drawn < count {
            tracing::debug!(wanted = count, drawn, "Draw stopped short");
        }
        self.record(CombatEvent::CardsDrawn { count: drawn });
        self.transition(Phase::PlayerAction);
    }

    fn discard_phase(&mut self) {
        self.player.cost_limit = None;
        self.player.disarmed = false;
        let slotted = self.slots.clear();
        self.piles.discard.extend(slotted);
        self.piles.discard_hand();
    }

    fn transition(&mut self, to: Phase) {
        let from = self.state.phase;
        self.state.phase = to;
        tracing::debug!(turn = self.state.turn, %from, %to, "Phase change");
        self.record(CombatEvent::PhaseChanged { from, to });
    }

    /// Move to a terminal phase if the fight is decided
    fn check_end(&mut self) -> Option<CombatEvent> {
        let (phase, event) = match self.outcome() {
            CombatOutcome::Ongoing => return None,
            CombatOutcome::Won => (Phase::Won, CombatEvent::CombatWon),
            CombatOutcome::Lost => (Phase::Lost, CombatEvent::CombatLost),
        };
        tracing::info!(turn = self.state.turn, ?event, "Combat decided");
        self.transition(phase);
        self.record(event.clone());
        Some(event)
    }

    fn expect_phase(&self, expected: Phase) -> Result<()> {
        let actual = self.state.phase;
        if actual.is_terminal() {
            return Err(ForgeError::CombatOver);
        }
        if actual != expected {
            return Err(ForgeError::InvalidPhase {
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }

    fn record(&mut self, event: CombatEvent) {
        self.history.push(event);
    }
}

/// Remove a card from the run's card pool for good
pub fn smelt(pool: &mut Vec<CardInstance>, id: CardInstanceId) -> Result<CardInstance> {
    let index = pool
        .iter()
        .position(|c| c.instance_id == id)
        .ok_or(ForgeError::InstanceNotFound(id))?;
    let card = pool.remove(index);
    tracing::info!(card = card.id(), "Card smelted");
    Ok(card)
}
