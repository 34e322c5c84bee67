use crate::{
    casino::{shoe::Shoe, GameRng, SHOE_STREAM},
    Session, SessionConfig,
};
use parlor_types::casino::{Card, Rank, Suit};

/// Seed used by stacked shoes (the stacked cards come first either way)
const TEST_SHOE_SEED: u64 = 0;

/// Creates a face-up card of the given rank
pub fn card(rank: Rank) -> Card {
    Card::new(rank, Suit::Spades)
}

/// Creates a single-deck shoe that deals `ranks` in order before anything else
pub fn stacked_shoe(ranks: &[Rank]) -> Shoe {
    let mut shoe = Shoe::new(1, GameRng::new(TEST_SHOE_SEED, SHOE_STREAM))
        .expect("single deck shoe is always valid");
    stack(&mut shoe, ranks);
    shoe
}

/// Places `ranks` on top of `shoe` so they are drawn in order
pub fn stack(shoe: &mut Shoe, ranks: &[Rank]) {
    let cards: Vec<Card> = ranks.iter().rev().map(|&rank| card(rank)).collect();
    shoe.push_top(&cards);
}

/// Creates a session with a fixed seed and default table settings
pub fn seeded_session(seed: u64) -> Session {
    Session::new(SessionConfig {
        seed: Some(seed),
        ..SessionConfig::default()
    })
    .expect("default session config is valid")
}

/// Creates a seeded session whose next blackjack cards are `ranks`
pub fn stacked_session(seed: u64, ranks: &[Rank]) -> Session {
    let mut session = seeded_session(seed);
    stack(session.shoe_mut(), ranks);
    session
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stacked_shoe_deals_in_order() {
        let mut shoe = stacked_shoe(&[Rank::Two, Rank::Ace, Rank::King]);
        assert_eq!(shoe.draw(false).rank, Rank::Two);
        assert_eq!(shoe.draw(true).rank, Rank::Ace);
        assert_eq!(shoe.draw(false).rank, Rank::King);
    }

    #[test]
    fn test_seeded_sessions_match() {
        let a = seeded_session(9);
        let b = seeded_session(9);
        assert_eq!(a.view(), b.view());
    }
}
