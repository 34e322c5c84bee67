//! One player's table session: a bankroll shared by blackjack and roulette.

use crate::{
    casino::{
        blackjack::BlackjackRound, roulette::RouletteTable, shoe::Shoe, GameRng, SHOE_STREAM,
        WHEEL_STREAM,
    },
    Bankroll,
};
use parlor_types::{
    casino::{BetKind, GameError, Winner, DEFAULT_DECK_COUNT, STARTING_CHIPS},
    BlackjackView, ChipStack, RouletteView, SessionView, SpinReport,
};
use tracing::debug;

/// Settings used to open a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub starting_chips: u64,
    pub deck_count: u8,
    /// Fixed seed for reproducible games; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_chips: STARTING_CHIPS,
            deck_count: DEFAULT_DECK_COUNT,
            seed: None,
        }
    }
}

#[derive(Debug)]
pub struct Session {
    bankroll: Bankroll,
    starting_chips: u64,
    shoe: Shoe,
    blackjack: BlackjackRound,
    roulette: RouletteTable,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, GameError> {
        let (shoe_rng, wheel_rng) = match config.seed {
            Some(seed) => (
                GameRng::new(seed, SHOE_STREAM),
                GameRng::new(seed, WHEEL_STREAM),
            ),
            None => (
                GameRng::from_entropy(SHOE_STREAM),
                GameRng::from_entropy(WHEEL_STREAM),
            ),
        };

        let mut roulette = RouletteTable::new(wheel_rng);
        roulette.start_round();

        Ok(Self {
            bankroll: Bankroll::new(config.starting_chips),
            starting_chips: config.starting_chips,
            shoe: Shoe::new(config.deck_count, shoe_rng)?,
            blackjack: BlackjackRound::new(),
            roulette,
        })
    }

    // Blackjack commands

    /// Change the shoe size; refused while a blackjack bet is pending.
    pub fn configure_shoe(&mut self, deck_count: u8) -> Result<(), GameError> {
        if self.blackjack.has_pending_bet() {
            return Err(GameError::InvalidAction);
        }
        self.shoe.set_deck_count(deck_count)
    }

    pub fn place_blackjack_bet(&mut self, amount: u64) -> Result<(), GameError> {
        self.blackjack.place_bet(&mut self.bankroll, amount)
    }

    pub fn deal_blackjack(&mut self) -> Result<(), GameError> {
        self.blackjack.deal(&mut self.shoe)
    }

    /// Returns `true` while the player may keep acting.
    pub fn hit(&mut self) -> Result<bool, GameError> {
        self.blackjack.hit(&mut self.shoe, &mut self.bankroll)
    }

    pub fn double(&mut self) -> Result<u64, GameError> {
        self.blackjack.double(&mut self.shoe, &mut self.bankroll)
    }

    pub fn stand_and_resolve_dealer(&mut self) -> Result<u64, GameError> {
        self.blackjack.stand(&mut self.shoe, &mut self.bankroll)
    }

    pub fn new_blackjack_round(&mut self) -> Result<(), GameError> {
        self.blackjack.reset(&mut self.bankroll)
    }

    // Roulette commands

    pub fn start_roulette_round(&mut self) {
        self.roulette.start_round();
    }

    /// Refund pending roulette bets and open a fresh round.
    pub fn new_roulette_round(&mut self) -> u64 {
        self.roulette.new_round(&mut self.bankroll)
    }

    pub fn place_roulette_bet(&mut self, kind: BetKind, stake: u64) -> Result<(), GameError> {
        self.roulette.place_bet(&mut self.bankroll, kind, stake)
    }

    pub fn clear_roulette_bets(&mut self) -> u64 {
        self.roulette.clear_pending_bets(&mut self.bankroll)
    }

    pub fn repeat_roulette_bets(&mut self) -> Result<u64, GameError> {
        self.roulette.repeat_previous_bets(&mut self.bankroll)
    }

    pub fn spin_wheel(&mut self) -> Result<SpinReport, GameError> {
        self.roulette.spin_wheel(&mut self.bankroll)
    }

    /// Restore the starting balance once no stake is on either table.
    pub fn reset_bankroll(&mut self) -> Result<(), GameError> {
        if self.blackjack.has_pending_bet() || self.roulette.has_pending_bets() {
            return Err(GameError::InvalidAction);
        }
        self.bankroll.reset(self.starting_chips);
        debug!(balance = self.starting_chips, "bankroll reset");
        Ok(())
    }

    // Queries

    pub fn balance(&self) -> u64 {
        self.bankroll.balance()
    }

    /// Affordable count of every chip denomination.
    pub fn chips(&self) -> Vec<ChipStack> {
        self.bankroll.chips()
    }

    pub fn blackjack(&self) -> &BlackjackRound {
        &self.blackjack
    }

    pub fn roulette(&self) -> &RouletteTable {
        &self.roulette
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Winner of the last settled blackjack round.
    pub fn winner(&self) -> Option<Winner> {
        self.blackjack.outcome().map(|outcome| outcome.winner)
    }

    pub fn blackjack_view(&self) -> BlackjackView {
        self.blackjack.view(&self.shoe)
    }

    pub fn roulette_view(&self) -> RouletteView {
        self.roulette.view()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            balance: self.balance(),
            chips: self.chips(),
            blackjack: self.blackjack_view(),
            roulette: self.roulette_view(),
        }
    }

    #[cfg(any(test, feature = "mocks"))]
    pub fn shoe_mut(&mut self) -> &mut Shoe {
        &mut self.shoe
    }
}
