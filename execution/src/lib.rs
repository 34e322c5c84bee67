pub mod bankroll;
pub mod casino;
pub mod session;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use bankroll::Bankroll;
pub use session::{Session, SessionConfig};
