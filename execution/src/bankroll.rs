use parlor_types::{
    casino::{GameError, CHIP_DENOMINATIONS},
    ChipStack,
};

/// Chip balance shared by every game of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bankroll {
    balance: u64,
}

impl Bankroll {
    pub fn new(balance: u64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Whether a positive stake of `amount` can be placed.
    pub fn can_cover(&self, amount: u64) -> bool {
        amount > 0 && amount <= self.balance
    }

    /// Take a stake. Rejected stakes leave the balance untouched.
    pub fn debit(&mut self, amount: u64) -> Result<(), GameError> {
        if !self.can_cover(amount) {
            return Err(GameError::InvalidStake);
        }
        self.balance -= amount;
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    pub fn reset(&mut self, balance: u64) {
        self.balance = balance;
    }

    /// Largest number of each chip denomination the balance covers.
    pub fn chips(&self) -> Vec<ChipStack> {
        CHIP_DENOMINATIONS
            .iter()
            .map(|&value| ChipStack {
                value,
                count: self.balance / value,
            })
            .collect()
    }
}
