use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// The two sides of the game. White checkers are stored as positive counts
/// and move toward higher point indices; Black checkers are stored negative
/// and move toward lower indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn opposite(&self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Sign of this player's checker counts on the board.
    pub fn sign(&self) -> i8 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    /// Step applied to a point index per pip moved. Coincides with the sign
    /// convention.
    pub fn direction(&self) -> i8 {
        self.sign()
    }

    /// Index of this player's own bar slot.
    pub fn bar_index(&self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 25,
        }
    }

    /// The index just past this player's last home point, where an exact
    /// bear-off lands.
    pub fn bear_off_index(&self) -> usize {
        match self {
            Player::White => 25,
            Player::Black => 0,
        }
    }

    /// The six points of this player's home board.
    pub fn home_range(&self) -> RangeInclusive<usize> {
        match self {
            Player::White => 19..=24,
            Player::Black => 1..=6,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_conventions_mirror() {
        for player in Player::iter() {
            assert_eq!(player.opposite().opposite(), player);
            assert_eq!(player.sign(), -player.opposite().sign());
            assert_eq!(player.bar_index(), player.opposite().bear_off_index());
            assert!(!player.home_range().contains(&player.bar_index()));
        }
    }
}
