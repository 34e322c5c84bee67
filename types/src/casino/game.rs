use serde::{Deserialize, Serialize};

/// Blackjack round stages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    AwaitingBet,
    InPlay,
    DealerTurn,
    Settled,
}

/// Winner of a settled blackjack round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Player,
    Dealer,
    Tie,
}

/// Summary of a settled blackjack round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub winner: Winner,
    /// Stake at settlement time (doubled stakes included).
    pub wager: u64,
    /// Total returned to the bankroll.
    pub payout: u64,
    pub player_value: u8,
    pub dealer_value: u8,
    pub natural: bool,
}
