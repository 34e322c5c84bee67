use serde::{Deserialize, Serialize};

/// One of the three contiguous twelve-number ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dozen {
    First,  // 1-12
    Second, // 13-24
    Third,  // 25-36
}

/// One of the three table columns, identified by `number % 3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    First,  // 1, 4, 7, ... (residue 1)
    Second, // 2, 5, 8, ... (residue 2)
    Third,  // 3, 6, 9, ... (residue 0)
}

/// Roulette bet kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "target", rename_all = "snake_case")]
pub enum BetKind {
    Straight(u8),   // Single number (pays 36x)
    Red,            // pays 2x
    Black,          // pays 2x
    Even,           // pays 2x
    Odd,            // pays 2x
    Low,            // 1-18, pays 2x
    High,           // 19-36, pays 2x
    Dozen(Dozen),   // pays 3x
    Column(Column), // pays 3x
}

impl BetKind {
    /// Human readable name used in bet summaries.
    pub fn label(&self) -> String {
        match self {
            BetKind::Straight(number) => format!("number {number}"),
            BetKind::Red => "red".to_string(),
            BetKind::Black => "black".to_string(),
            BetKind::Even => "even".to_string(),
            BetKind::Odd => "odd".to_string(),
            BetKind::Low => "1-18".to_string(),
            BetKind::High => "19-36".to_string(),
            BetKind::Dozen(Dozen::First) => "1-12".to_string(),
            BetKind::Dozen(Dozen::Second) => "13-24".to_string(),
            BetKind::Dozen(Dozen::Third) => "25-36".to_string(),
            BetKind::Column(Column::First) => "column 1".to_string(),
            BetKind::Column(Column::Second) => "column 2".to_string(),
            BetKind::Column(Column::Third) => "column 3".to_string(),
        }
    }
}

/// Individual bet in roulette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub kind: BetKind,
    pub stake: u64,
}

impl Bet {
    pub fn new(kind: BetKind, stake: u64) -> Self {
        Self { kind, stake }
    }
}

/// Outcome of one bet against a wheel number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetResolution {
    pub bet: Bet,
    pub won: bool,
    /// Total returned to the bankroll (stake included), zero on a loss.
    pub payout: u64,
}

/// Bets aggregated for display.
///
/// All straight bets share one group that lists every number covered;
/// every other kind gets a group of its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetGroup {
    pub label: String,
    /// `None` for the straight-number group.
    pub kind: Option<BetKind>,
    pub numbers: Vec<u8>,
    pub bets: usize,
    pub stake: u64,
    /// Part of `stake` that sat on winning bets; zero before a spin.
    pub winning_stake: u64,
    pub payout: u64,
}
