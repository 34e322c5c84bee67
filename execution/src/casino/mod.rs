//! Casino game execution module.
//!
//! This module contains the rules engines of both table games:
//! - Blackjack (shoe, hand evaluation, round state machine)
//! - Roulette (bet ledger, wheel resolution)

pub mod blackjack;
pub mod hand;
pub mod roulette;
pub mod shoe;

use parlor_types::casino::WHEEL_POCKETS;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::fmt;

/// Stream reserved for the blackjack shoe.
pub const SHOE_STREAM: u64 = 0;
/// Stream reserved for the roulette wheel.
pub const WHEEL_STREAM: u64 = 1;

/// Seedable random number generator used by every game.
///
/// Each consumer gets its own ChaCha stream, so the cards dealt never depend
/// on how often the wheel was spun (and vice versa) under a fixed seed.
#[derive(Clone)]
pub struct GameRng {
    inner: ChaCha20Rng,
}

impl GameRng {
    /// Create a new RNG from a seed and a stream number.
    pub fn new(seed: u64, stream: u64) -> Self {
        let mut inner = ChaCha20Rng::seed_from_u64(seed);
        inner.set_stream(stream);
        Self { inner }
    }

    /// Create an RNG seeded from the thread-local entropy source.
    pub fn from_entropy(stream: u64) -> Self {
        Self::new(rand::random(), stream)
    }

    /// Get a random value in range [0, max).
    pub fn next_bounded(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        self.inner.gen_range(0..max)
    }

    /// Shuffle a slice in place using Fisher-Yates.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_bounded(i + 1);
            slice.swap(i, j);
        }
    }

    /// Spin roulette wheel (0-36).
    pub fn spin_roulette(&mut self) -> u8 {
        self.next_bounded(WHEEL_POCKETS as usize) as u8
    }
}

impl fmt::Debug for GameRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameRng").finish_non_exhaustive()
    }
}
