use thiserror::Error;

/// Error during game execution.
///
/// Every variant is recoverable: the operation that returned it left the
/// bankroll, the shoe and all bet lists exactly as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// Stake is zero or larger than the bankroll.
    #[error("stake must be positive and covered by the bankroll")]
    InvalidStake,
    /// Command is not legal in the current state.
    #[error("action not allowed in the current state")]
    InvalidAction,
    /// Roulette bets are only accepted while a round is open.
    #[error("no roulette round is active")]
    NoActiveRound,
    /// Bankroll cannot cover the summed stake of the previous round.
    #[error("bankroll cannot cover the previous bets")]
    InsufficientFundsForRepeat,
    #[error("unsupported deck count: {0}")]
    InvalidDeckCount(u8),
    #[error("straight bet target out of range: {0}")]
    InvalidBet(u8),
}
