use super::WHEEL_POCKETS;
use serde::{Deserialize, Serialize};

/// Red numbers on a roulette wheel.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Black numbers on a roulette wheel.
pub const BLACK_NUMBERS: [u8; 18] = [
    2, 4, 6, 8, 10, 11, 13, 15, 17, 20, 22, 24, 26, 28, 29, 31, 33, 35,
];

/// Pocket order of a single-zero wheel, clockwise from zero.
pub const WHEEL_ORDER: [u8; WHEEL_POCKETS as usize] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Green,
    Red,
    Black,
}

impl Color {
    pub fn of(number: u8) -> Self {
        if RED_NUMBERS.contains(&number) {
            Color::Red
        } else if BLACK_NUMBERS.contains(&number) {
            Color::Black
        } else {
            Color::Green
        }
    }
}

/// Position of `number` in [WHEEL_ORDER], if it is a pocket at all.
pub fn pocket_index(number: u8) -> Option<usize> {
    WHEEL_ORDER.iter().position(|&pocket| pocket == number)
}
