//! Blackjack round state machine.
//!
//! A round moves through `AwaitingBet -> InPlay -> DealerTurn -> Settled`:
//! - the stake is debited from the bankroll when the bet is placed
//! - the deal is player, dealer (face down), player, dealer
//! - the player may hit or stand, or double on the first two cards
//! - the dealer reveals the hole card and draws to 17 (stands on soft 17)
//!
//! A player bust settles immediately and the dealer draws nothing.

use super::{hand::Hand, shoe::Shoe};
use crate::Bankroll;
use parlor_types::{
    casino::{GameError, RoundOutcome, Stage, Winner, BLACKJACK_VALUE, DEALER_STAND_VALUE},
    BlackjackView,
};
use tracing::debug;

/// Total returned for a settled hand (stake included).
///
/// `player_len`/`dealer_len` are the card counts used to detect naturals.
pub fn payout(
    bet: u64,
    player_value: u8,
    player_len: usize,
    dealer_value: u8,
    dealer_len: usize,
) -> u64 {
    let player_natural = player_value == BLACKJACK_VALUE && player_len == 2;
    let dealer_natural = dealer_value == BLACKJACK_VALUE && dealer_len == 2;

    if player_value > BLACKJACK_VALUE {
        0
    } else if player_natural {
        if dealer_natural {
            // Push
            bet
        } else {
            // 3:2, rounded down
            bet.saturating_mul(2).saturating_add(bet / 2)
        }
    } else if dealer_value > BLACKJACK_VALUE || player_value > dealer_value {
        bet.saturating_mul(2)
    } else if player_value == dealer_value {
        bet
    } else {
        0
    }
}

/// Classify the result of a settled hand by totals alone.
pub fn winner(player_value: u8, dealer_value: u8) -> Winner {
    if player_value <= BLACKJACK_VALUE
        && (dealer_value > BLACKJACK_VALUE || player_value > dealer_value)
    {
        Winner::Player
    } else if player_value > BLACKJACK_VALUE
        || (dealer_value <= BLACKJACK_VALUE && dealer_value > player_value)
    {
        Winner::Dealer
    } else {
        Winner::Tie
    }
}

/// One blackjack round against a shared shoe and bankroll.
#[derive(Clone, Debug)]
pub struct BlackjackRound {
    player: Hand,
    dealer: Hand,
    bet: u64,
    bet_placed: bool,
    doubled: bool,
    finished: bool,
    stage: Stage,
    outcome: Option<RoundOutcome>,
}

impl Default for BlackjackRound {
    fn default() -> Self {
        Self::new()
    }
}

impl BlackjackRound {
    pub fn new() -> Self {
        Self {
            player: Hand::new(),
            dealer: Hand::new(),
            bet: 0,
            bet_placed: false,
            doubled: false,
            finished: false,
            stage: Stage::AwaitingBet,
            outcome: None,
        }
    }

    pub fn place_bet(&mut self, bankroll: &mut Bankroll, amount: u64) -> Result<(), GameError> {
        if self.stage != Stage::AwaitingBet || self.bet_placed {
            return Err(GameError::InvalidAction);
        }
        bankroll.debit(amount)?;
        self.bet = amount;
        self.bet_placed = true;
        debug!(amount, balance = bankroll.balance(), "blackjack bet placed");
        Ok(())
    }

    /// Deal two cards each; the dealer's first card is face down.
    pub fn deal(&mut self, shoe: &mut Shoe) -> Result<(), GameError> {
        if self.stage != Stage::AwaitingBet
            || !self.bet_placed
            || !self.player.is_empty()
            || !self.dealer.is_empty()
        {
            return Err(GameError::InvalidAction);
        }

        self.player.push(shoe.draw(false));
        self.dealer.push(shoe.draw(true));
        self.player.push(shoe.draw(false));
        self.dealer.push(shoe.draw(false));
        self.stage = Stage::InPlay;

        debug!(
            player = self.player.value(),
            remaining = shoe.remaining(),
            "blackjack dealt"
        );
        Ok(())
    }

    /// Draw one card for the player.
    ///
    /// Returns `true` while the player may keep acting. A bust settles the
    /// round at once; reaching 21 hands play to the dealer.
    pub fn hit(&mut self, shoe: &mut Shoe, bankroll: &mut Bankroll) -> Result<bool, GameError> {
        if self.stage != Stage::InPlay {
            return Err(GameError::InvalidAction);
        }

        self.player.push(shoe.draw(false));
        let value = self.player.value();
        if value > BLACKJACK_VALUE {
            self.dealer.reveal();
            self.finished = true;
            self.settle(bankroll);
            return Ok(false);
        }
        if value == BLACKJACK_VALUE {
            self.dealer_play(shoe, bankroll);
            return Ok(false);
        }
        Ok(true)
    }

    /// Double the stake, take exactly one card and let the dealer play.
    ///
    /// Returns the payout.
    pub fn double(&mut self, shoe: &mut Shoe, bankroll: &mut Bankroll) -> Result<u64, GameError> {
        if self.stage != Stage::InPlay || self.player.len() != 2 || self.doubled {
            return Err(GameError::InvalidAction);
        }
        if bankroll.balance() < self.bet {
            return Err(GameError::InvalidStake);
        }
        bankroll.debit(self.bet)?;
        self.bet = self.bet.saturating_mul(2);
        self.doubled = true;

        self.player.push(shoe.draw(false));
        Ok(self.dealer_play(shoe, bankroll))
    }

    /// End the player's turn and resolve the dealer. Returns the payout.
    pub fn stand(&mut self, shoe: &mut Shoe, bankroll: &mut Bankroll) -> Result<u64, GameError> {
        if self.stage != Stage::InPlay {
            return Err(GameError::InvalidAction);
        }
        Ok(self.dealer_play(shoe, bankroll))
    }

    fn dealer_play(&mut self, shoe: &mut Shoe, bankroll: &mut Bankroll) -> u64 {
        self.stage = Stage::DealerTurn;
        self.dealer.reveal();
        while self.dealer.value() < DEALER_STAND_VALUE {
            self.dealer.push(shoe.draw(false));
        }
        self.finished = true;
        self.settle(bankroll)
    }

    /// Credit the bankroll with the payout of the current hands.
    ///
    /// No-op returning zero when no bet is pending.
    pub fn settle(&mut self, bankroll: &mut Bankroll) -> u64 {
        if !self.bet_placed {
            return 0;
        }

        let player_value = self.player.value();
        let dealer_value = self.dealer.value();
        let payout = payout(
            self.bet,
            player_value,
            self.player.len(),
            dealer_value,
            self.dealer.len(),
        );
        bankroll.credit(payout);

        let outcome = RoundOutcome {
            winner: winner(player_value, dealer_value),
            wager: self.bet,
            payout,
            player_value,
            dealer_value,
            natural: self.player.is_natural(),
        };
        debug!(
            winner = ?outcome.winner,
            wager = self.bet,
            payout,
            balance = bankroll.balance(),
            "blackjack settled"
        );

        self.outcome = Some(outcome);
        self.bet = 0;
        self.bet_placed = false;
        self.stage = Stage::Settled;
        payout
    }

    /// Start a new round on the same shoe.
    ///
    /// A bet that was placed but never dealt goes back to the bankroll.
    pub fn reset(&mut self, bankroll: &mut Bankroll) -> Result<(), GameError> {
        match self.stage {
            Stage::AwaitingBet => {
                if self.bet_placed {
                    bankroll.credit(self.bet);
                    debug!(refund = self.bet, "blackjack bet refunded");
                }
            }
            Stage::Settled => {}
            Stage::InPlay | Stage::DealerTurn => return Err(GameError::InvalidAction),
        }
        *self = Self::new();
        Ok(())
    }

    pub fn has_pending_bet(&self) -> bool {
        self.bet_placed
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn is_doubled(&self) -> bool {
        self.doubled
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Result of the last settlement of this round.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    pub fn view(&self, shoe: &Shoe) -> BlackjackView {
        BlackjackView {
            stage: self.stage,
            player: self.player.view(),
            dealer: self.dealer.view(),
            bet: self.bet,
            bet_placed: self.bet_placed,
            doubled: self.doubled,
            finished: self.finished,
            outcome: self.outcome,
            shoe: shoe.view(),
        }
    }
}
