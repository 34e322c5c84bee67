mod bet;
mod card;
mod constants;
mod error;
mod game;
mod wheel;

pub use bet::*;
pub use card::*;
pub use constants::*;
pub use error::*;
pub use game::*;
pub use wheel::*;
