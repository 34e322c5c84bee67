//! Read-only snapshots handed to presentation layers.
//!
//! Nothing in here is engine state: every view is rebuilt from the engine on
//! request and can be serialized as-is.

use crate::casino::{
    Bet, BetGroup, BetResolution, CardView, Color, RoundOutcome, Stage,
};
use serde::{Deserialize, Serialize};

/// A hand as an observer sees it.
///
/// When a card is face down, `value` only counts the face-up cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandView {
    pub cards: Vec<CardView>,
    pub value: u8,
    pub soft: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoeView {
    pub deck_count: u8,
    pub remaining: usize,
    pub cut_point: usize,
    pub capacity: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackjackView {
    pub stage: Stage,
    pub player: HandView,
    pub dealer: HandView,
    pub bet: u64,
    pub bet_placed: bool,
    pub doubled: bool,
    pub finished: bool,
    pub outcome: Option<RoundOutcome>,
    pub shoe: ShoeView,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouletteView {
    pub active: bool,
    pub pending: Vec<Bet>,
    pub pending_stake: u64,
    pub pending_groups: Vec<BetGroup>,
    pub previous: Vec<Bet>,
    pub last_outcome: Option<u8>,
    pub last_color: Option<Color>,
    /// Most recent outcome last.
    pub history: Vec<u8>,
}

/// Result of one spin of the wheel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinReport {
    pub outcome: u8,
    pub color: Color,
    /// Index into the wheel's pocket order, for replaying the spin.
    pub pocket: usize,
    pub total_stake: u64,
    pub total_payout: u64,
    pub resolutions: Vec<BetResolution>,
    pub groups: Vec<BetGroup>,
    pub balance: u64,
}

/// How many chips of one denomination the bankroll covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipStack {
    pub value: u64,
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub balance: u64,
    pub chips: Vec<ChipStack>,
    pub blackjack: BlackjackView,
    pub roulette: RouletteView,
}
