//! Draw pile, hand and discard pile
//!
//! The three piles are disjoint; together with the weapon slots they hold the
//! player's whole card pool for the combat.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, SlotType};
use crate::core::types::CardInstanceId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Piles {
    /// Draw pile; the last element is the top card
    pub draw: Vec<CardInstance>,
    pub hand: Vec<CardInstance>,
    pub discard: Vec<CardInstance>,
    /// Out of play until the combat ends
    #[serde(default)]
    pub exhausted: Vec<CardInstance>,
}

impl Piles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start of combat: everything goes into the draw pile, shuffled
    pub fn from_cards<R: Rng>(cards: Vec<CardInstance>, rng: &mut R) -> Self {
        let mut piles = Self {
            draw: cards,
            ..Default::default()
        };
        piles.draw.shuffle(rng);
        piles
    }

    /// Move the discard pile into the draw pile and shuffle it
    pub fn reshuffle_discard<R: Rng>(&mut self, rng: &mut R) {
        self.draw.append(&mut self.discard);
        self.draw.shuffle(rng);
        tracing::trace!("Reshuffled discard; draw pile now {}", self.draw.len());
    }

    /// Draw up to `count` cards into the hand.
    ///
    /// Reshuffles the discard pile when the draw pile runs out. If both are
    /// empty the draw stops short. Returns how many cards were drawn.
    pub fn draw<R: Rng>(&mut self, count: usize, rng: &mut R) -> usize {
        let mut drawn = 0;
        while drawn < count {
            if self.draw.is_empty() {
                if self.discard.is_empty() {
                    break;
                }
                self.reshuffle_discard(rng);
            }
            match self.draw.pop() {
                Some(card) => {
                    self.hand.push(card);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Put a card on top of the draw pile
    pub fn push_top(&mut self, card: CardInstance) {
        self.draw.push(card);
    }

    /// Take a card out of the hand
    pub fn take_from_hand(&mut self, id: CardInstanceId) -> Option<CardInstance> {
        let index = self.hand.iter().position(|c| c.instance_id == id)?;
        Some(self.hand.remove(index))
    }

    /// Move the whole hand onto the discard pile
    pub fn discard_hand(&mut self) {
        self.discard.append(&mut self.hand);
    }

    pub fn total(&self) -> usize {
        self.draw.len() + self.hand.len() + self.discard.len()
    }

    /// Mutable handles to every card of `slot` type in the draw and discard piles
    pub fn deck_and_discard_of_type(&mut self, slot: SlotType) -> Vec<&mut CardInstance> {
        self.draw
            .iter_mut()
            .chain(self.discard.iter_mut())
            .filter(|c| c.slot() == slot)
            .collect()
    }

    /// Drain all piles, returning every card
    pub fn drain_all(&mut self) -> Vec<CardInstance> {
        let mut all = Vec::with_capacity(self.total());
        all.append(&mut self.draw);
        all.append(&mut self.hand);
        all.append(&mut self.discard);
        all.append(&mut self.exhausted);
        all
    }
}
