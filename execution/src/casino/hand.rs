//! Blackjack hand evaluation.

use parlor_types::{
    casino::{Card, CardView, BLACKJACK_VALUE},
    HandView,
};

/// Calculate the value of a blackjack hand.
///
/// Returns the best total and whether an Ace is still counted as 11.
/// Hidden cards count like any other card.
pub fn hand_value(cards: &[Card]) -> (u8, bool) {
    let mut value: u16 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        value += card.points() as u16;
    }

    while value > BLACKJACK_VALUE as u16 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && value <= BLACKJACK_VALUE as u16;
    (value.min(255) as u8, is_soft)
}

/// Check if hand is a natural (21 with 2 cards).
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards).0 == BLACKJACK_VALUE
}

/// Ordered cards held by the player or the dealer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u8 {
        hand_value(&self.cards).0
    }

    pub fn is_soft(&self) -> bool {
        hand_value(&self.cards).1
    }

    pub fn is_natural(&self) -> bool {
        is_natural(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK_VALUE
    }

    /// Turn every card face up.
    pub fn reveal(&mut self) {
        for card in &mut self.cards {
            card.hidden = false;
        }
    }

    /// Total of the face-up cards only.
    pub fn visible_value(&self) -> (u8, bool) {
        let visible: Vec<Card> = self.cards.iter().filter(|c| !c.hidden).copied().collect();
        hand_value(&visible)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Observer view with face-down cards masked.
    pub fn view(&self) -> HandView {
        let (value, soft) = self.visible_value();
        HandView {
            cards: self.cards.iter().map(CardView::from).collect(),
            value,
            soft,
        }
    }
}
