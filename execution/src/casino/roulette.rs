//! Roulette bet ledger and wheel resolution.
//!
//! Stakes are debited from the bankroll as bets are placed; a spin credits
//! each winning bet with `stake * multiplier` (stake included) and rolls the
//! pending bets into the previous-round history used by repeat.
//!
//! Multipliers (total return):
//! - Straight: 36
//! - Red, Black, Even, Odd, Low, High: 2
//! - Dozen, Column: 3

use super::GameRng;
use crate::Bankroll;
use parlor_types::{
    casino::{
        pocket_index, Bet, BetGroup, BetKind, BetResolution, Color, Column, Dozen, GameError,
        HISTORY_LIMIT, MAX_WHEEL_NUMBER,
    },
    RouletteView, SpinReport,
};
use std::collections::VecDeque;
use tracing::debug;

/// Check if a bet wins for a given wheel number.
pub fn is_winning(kind: BetKind, number: u8) -> bool {
    // Zero loses all except straight bet on 0
    if number == 0 {
        return kind == BetKind::Straight(0);
    }

    match kind {
        BetKind::Straight(target) => target == number,
        BetKind::Red => Color::of(number) == Color::Red,
        BetKind::Black => Color::of(number) == Color::Black,
        BetKind::Even => number % 2 == 0,
        BetKind::Odd => number % 2 == 1,
        BetKind::Low => (1..=18).contains(&number),
        BetKind::High => (19..=36).contains(&number),
        BetKind::Dozen(Dozen::First) => (1..=12).contains(&number),
        BetKind::Dozen(Dozen::Second) => (13..=24).contains(&number),
        BetKind::Dozen(Dozen::Third) => (25..=36).contains(&number),
        BetKind::Column(Column::First) => number % 3 == 1,
        BetKind::Column(Column::Second) => number % 3 == 2,
        BetKind::Column(Column::Third) => number % 3 == 0,
    }
}

/// Get the payout multiplier for a bet kind (stake included).
pub fn multiplier(kind: BetKind) -> u64 {
    match kind {
        BetKind::Straight(_) => 36,
        BetKind::Red
        | BetKind::Black
        | BetKind::Even
        | BetKind::Odd
        | BetKind::Low
        | BetKind::High => 2,
        BetKind::Dozen(_) | BetKind::Column(_) => 3,
    }
}

fn resolve(bet: &Bet, number: u8) -> BetResolution {
    let won = is_winning(bet.kind, number);
    let payout = if won {
        bet.stake.saturating_mul(multiplier(bet.kind))
    } else {
        0
    };
    BetResolution {
        bet: *bet,
        won,
        payout,
    }
}

/// Credit every winning bet and return the total paid with a per-bet breakdown.
pub fn settle(bankroll: &mut Bankroll, bets: &[Bet], number: u8) -> (u64, Vec<BetResolution>) {
    let resolutions: Vec<BetResolution> = bets.iter().map(|bet| resolve(bet, number)).collect();
    let total = resolutions
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.payout));
    bankroll.credit(total);
    (total, resolutions)
}

/// Aggregate bets for display, in order of first appearance.
///
/// With an outcome, each group also reports what it won.
pub fn group_bets(bets: &[Bet], outcome: Option<u8>) -> Vec<BetGroup> {
    let mut groups: Vec<BetGroup> = Vec::new();

    for bet in bets {
        let key = match bet.kind {
            BetKind::Straight(_) => None,
            kind => Some(kind),
        };
        let index = match groups.iter().position(|g| g.kind == key) {
            Some(index) => index,
            None => {
                groups.push(BetGroup {
                    label: key.map_or_else(|| "numbers".to_string(), |kind| kind.label()),
                    kind: key,
                    numbers: Vec::new(),
                    bets: 0,
                    stake: 0,
                    winning_stake: 0,
                    payout: 0,
                });
                groups.len() - 1
            }
        };

        let group = &mut groups[index];
        if let BetKind::Straight(number) = bet.kind {
            if !group.numbers.contains(&number) {
                group.numbers.push(number);
            }
        }
        group.bets += 1;
        group.stake = group.stake.saturating_add(bet.stake);
        if let Some(number) = outcome {
            let resolution = resolve(bet, number);
            if resolution.won {
                group.winning_stake = group.winning_stake.saturating_add(bet.stake);
                group.payout = group.payout.saturating_add(resolution.payout);
            }
        }
    }

    groups
}

fn total_stake(bets: &[Bet]) -> u64 {
    bets.iter().fold(0u64, |acc, b| acc.saturating_add(b.stake))
}

/// Bets of the open round, the previous round and the wheel.
#[derive(Clone, Debug)]
pub struct RouletteTable {
    pending: Vec<Bet>,
    previous: Vec<Bet>,
    active: bool,
    last_outcome: Option<u8>,
    /// Most recent outcome at the back.
    history: VecDeque<u8>,
    rng: GameRng,
}

impl RouletteTable {
    /// Create a table with no open round.
    pub fn new(rng: GameRng) -> Self {
        Self {
            pending: Vec::new(),
            previous: Vec::new(),
            active: false,
            last_outcome: None,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
            rng,
        }
    }

    pub fn place_bet(
        &mut self,
        bankroll: &mut Bankroll,
        kind: BetKind,
        stake: u64,
    ) -> Result<(), GameError> {
        if !self.active {
            return Err(GameError::NoActiveRound);
        }
        if !bankroll.can_cover(stake) {
            return Err(GameError::InvalidStake);
        }
        if let BetKind::Straight(number) = kind {
            if number > MAX_WHEEL_NUMBER {
                return Err(GameError::InvalidBet(number));
            }
        }
        bankroll.debit(stake)?;
        self.pending.push(Bet::new(kind, stake));
        Ok(())
    }

    /// Place the previous round's bets again, all or nothing.
    ///
    /// Returns the total staked.
    pub fn repeat_previous_bets(&mut self, bankroll: &mut Bankroll) -> Result<u64, GameError> {
        if self.previous.is_empty() || !self.pending.is_empty() {
            return Err(GameError::InvalidAction);
        }
        if !self.active {
            return Err(GameError::NoActiveRound);
        }
        let total = total_stake(&self.previous);
        if total > bankroll.balance() {
            return Err(GameError::InsufficientFundsForRepeat);
        }

        let previous = self.previous.clone();
        for bet in &previous {
            if let Err(err) = self.place_bet(bankroll, bet.kind, bet.stake) {
                let refunded = self.refund_pending(bankroll);
                debug!(?err, refunded, "repeat rolled back");
                return Err(err);
            }
        }
        debug!(bets = previous.len(), total, "previous bets repeated");
        Ok(total)
    }

    /// Refund and drop every pending bet. Returns the amount refunded.
    pub fn clear_pending_bets(&mut self, bankroll: &mut Bankroll) -> u64 {
        self.refund_pending(bankroll)
    }

    fn refund_pending(&mut self, bankroll: &mut Bankroll) -> u64 {
        let refund = total_stake(&self.pending);
        bankroll.credit(refund);
        self.pending.clear();
        refund
    }

    pub fn start_round(&mut self) {
        self.active = true;
    }

    /// Close the round, keeping its bets as the previous round.
    ///
    /// Stakes are neither settled nor refunded, so this only follows a spin.
    pub(crate) fn end_round(&mut self) {
        self.active = false;
        self.previous = std::mem::take(&mut self.pending);
    }

    /// Refund anything pending and open a fresh round.
    pub fn new_round(&mut self, bankroll: &mut Bankroll) -> u64 {
        let refunded = self.refund_pending(bankroll);
        self.start_round();
        refunded
    }

    /// Spin the wheel and record the outcome.
    pub fn spin(&mut self) -> u8 {
        let number = self.rng.spin_roulette();
        self.last_outcome = Some(number);
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(number);
        number
    }

    /// Spin, settle every pending bet and open the next round.
    pub fn spin_wheel(&mut self, bankroll: &mut Bankroll) -> Result<SpinReport, GameError> {
        if !self.active {
            return Err(GameError::NoActiveRound);
        }
        if self.pending.is_empty() {
            return Err(GameError::InvalidAction);
        }

        let outcome = self.spin();
        let total_stake = total_stake(&self.pending);
        let (total_payout, resolutions) = settle(bankroll, &self.pending, outcome);
        let groups = group_bets(&self.pending, Some(outcome));
        debug!(
            outcome,
            total_stake,
            total_payout,
            balance = bankroll.balance(),
            "wheel settled"
        );

        self.end_round();
        self.start_round();

        Ok(SpinReport {
            outcome,
            color: Color::of(outcome),
            pocket: pocket_index(outcome).unwrap_or_default(),
            total_stake,
            total_payout,
            resolutions,
            groups,
            balance: bankroll.balance(),
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pending(&self) -> &[Bet] {
        &self.pending
    }

    pub fn previous(&self) -> &[Bet] {
        &self.previous
    }

    pub fn has_pending_bets(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_stake(&self) -> u64 {
        total_stake(&self.pending)
    }

    pub fn last_outcome(&self) -> Option<u8> {
        self.last_outcome
    }

    pub fn history(&self) -> impl Iterator<Item = u8> + '_ {
        self.history.iter().copied()
    }

    pub fn view(&self) -> RouletteView {
        RouletteView {
            active: self.active,
            pending: self.pending.clone(),
            pending_stake: self.pending_stake(),
            pending_groups: group_bets(&self.pending, None),
            previous: self.previous.clone(),
            last_outcome: self.last_outcome,
            last_color: self.last_outcome.map(Color::of),
            history: self.history().collect(),
        }
    }
}
