//! Multi-deck card shoe with a reshuffle cut-point.

use super::GameRng;
use parlor_types::{
    casino::{Card, GameError, Rank, Suit, CARDS_PER_DECK, CUT_POINT_PERCENT, DECK_COUNT_OPTIONS},
    ShoeView,
};
use tracing::debug;

/// Ordered pool of cards drawn from the tail.
///
/// Once the remaining count falls to the cut-point, the next draw rebuilds
/// every deck and reshuffles before handing out a card.
#[derive(Clone, Debug)]
pub struct Shoe {
    cards: Vec<Card>,
    deck_count: u8,
    cut_point: usize,
    capacity: usize,
    rng: GameRng,
}

impl Shoe {
    /// Build and shuffle a shoe of `deck_count` decks.
    pub fn new(deck_count: u8, rng: GameRng) -> Result<Self, GameError> {
        validate_deck_count(deck_count)?;
        let mut shoe = Self {
            cards: Vec::new(),
            deck_count,
            cut_point: 0,
            capacity: 0,
            rng,
        };
        shoe.rebuild();
        Ok(shoe)
    }

    /// Unshuffled cards of `deck_count` full decks.
    pub fn build(deck_count: u8) -> Vec<Card> {
        let mut cards = Vec::with_capacity(deck_count as usize * CARDS_PER_DECK);
        for _ in 0..deck_count {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        cards
    }

    pub fn shuffle(&mut self) {
        self.rng.shuffle(&mut self.cards);
    }

    /// Regenerate every deck, reshuffle and recompute the cut-point.
    fn rebuild(&mut self) {
        self.cards = Self::build(self.deck_count);
        self.shuffle();
        self.capacity = self.cards.len();
        self.cut_point = self.capacity * CUT_POINT_PERCENT / 100;
        debug!(
            decks = self.deck_count,
            cards = self.capacity,
            cut_point = self.cut_point,
            "shoe rebuilt"
        );
    }

    /// Draw the next card, face down if `hidden`.
    pub fn draw(&mut self, hidden: bool) -> Card {
        loop {
            if self.cards.len() > self.cut_point {
                if let Some(mut card) = self.cards.pop() {
                    card.hidden = hidden;
                    return card;
                }
            }
            self.rebuild();
        }
    }

    /// Change the number of decks. Always rebuilds and reshuffles the shoe.
    pub fn set_deck_count(&mut self, deck_count: u8) -> Result<(), GameError> {
        validate_deck_count(deck_count)?;
        self.deck_count = deck_count;
        self.rebuild();
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cut_point(&self) -> usize {
        self.cut_point
    }

    pub fn deck_count(&self) -> u8 {
        self.deck_count
    }

    /// Cards in the shoe when it was last built.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn view(&self) -> ShoeView {
        ShoeView {
            deck_count: self.deck_count,
            remaining: self.remaining(),
            cut_point: self.cut_point,
            capacity: self.capacity,
        }
    }

    /// Place `cards` on top of the shoe; the last one is drawn first.
    #[cfg(any(test, feature = "mocks"))]
    pub fn push_top(&mut self, cards: &[Card]) {
        self.cards.extend_from_slice(cards);
    }

    /// Drop cards from the top without dealing them.
    #[cfg(any(test, feature = "mocks"))]
    pub fn burn(&mut self, count: usize) {
        let keep = self.cards.len().saturating_sub(count);
        self.cards.truncate(keep);
    }
}

fn validate_deck_count(deck_count: u8) -> Result<(), GameError> {
    if DECK_COUNT_OPTIONS.contains(&deck_count) {
        Ok(())
    } else {
        Err(GameError::InvalidDeckCount(deck_count))
    }
}
