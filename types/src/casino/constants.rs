/// Starting chips for a new bankroll (and the value a reset restores)
pub const STARTING_CHIPS: u64 = 1_000;

/// Deck counts a shoe may be configured with
pub const DECK_COUNT_OPTIONS: [u8; 5] = [1, 2, 4, 6, 8];

/// Deck count used when none is configured
pub const DEFAULT_DECK_COUNT: u8 = 6;

/// Total cards in a standard deck.
pub const CARDS_PER_DECK: usize = 52;

/// Share of a freshly built shoe (in percent) at which it is rebuilt
pub const CUT_POINT_PERCENT: usize = 10;

/// Best possible blackjack total
pub const BLACKJACK_VALUE: u8 = 21;

/// The dealer stands on every total at or above this value, soft totals included
pub const DEALER_STAND_VALUE: u8 = 17;

/// Number of pockets on a single-zero wheel (0-36)
pub const WHEEL_POCKETS: u8 = 37;

/// Highest number a straight bet may target
pub const MAX_WHEEL_NUMBER: u8 = 36;

/// Number of recent wheel outcomes kept for display
pub const HISTORY_LIMIT: usize = 20;

/// Chip denominations offered to the player
pub const CHIP_DENOMINATIONS: [u64; 6] = [5, 10, 25, 50, 100, 500];
