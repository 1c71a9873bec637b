use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::outcome::GameOutcome;
use crate::player::Player;

/// A backgammon board as 26 signed checker counts.
///
/// Indices 1-24 are the points. Positive counts belong to [`Player::White`],
/// negative counts to [`Player::Black`], zero is empty. Index 0 is White's
/// bar (always >= 0) and index 25 is Black's bar (always <= 0). White bears
/// off past index 24, Black past index 0.
///
/// Boards are plain `Copy` values and every move produces a new one, so a
/// turn-start snapshot for undo is just a retained earlier value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub(crate) points: [i8; 26],
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Self {
        Board {
            points: [
                0, 2, 0, 0, 0, 0, -5, 0, -3, 0, 0, 0, 5, -5, 0, 0, 0, 3, 0, 5, 0, 0, 0, 0, -2, 0,
            ],
        }
    }

    /// A board with no checkers on it.
    pub fn empty() -> Self {
        Board { points: [0; 26] }
    }

    /// Validated construction from raw counts. Refuses bars holding the
    /// wrong side and sides with more than 15 checkers in play.
    pub fn from_points(points: [i8; 26]) -> Result<Self, BoardError> {
        if points[Player::White.bar_index()] < 0 {
            return Err(BoardError::BarSign { index: Player::White.bar_index() });
        }
        if points[Player::Black.bar_index()] > 0 {
            return Err(BoardError::BarSign { index: Player::Black.bar_index() });
        }
        let board = Board { points };
        for player in [Player::White, Player::Black] {
            let count = board.checkers_in_play(player);
            if count > 15 {
                return Err(BoardError::TooManyCheckers { player, count });
            }
        }
        Ok(board)
    }

    /// Signed checker count at `index` (0-25).
    pub fn checkers_on(&self, index: usize) -> i8 {
        self.points[index]
    }

    /// Checkers the given player has waiting on its own bar.
    pub fn bar(&self, player: Player) -> u8 {
        (self.points[player.bar_index()] * player.sign()) as u8
    }

    /// Checkers the player still has in play, bar included. Starts at 15
    /// and only bear-offs lower it.
    pub fn checkers_in_play(&self, player: Player) -> i32 {
        self.points
            .iter()
            .filter(|&&count| count.signum() == player.sign())
            .map(|&count| count.unsigned_abs() as i32)
            .sum()
    }

    /// True when every checker the player still has in play sits inside its
    /// home board. Checkers on the bar count as outside.
    pub fn all_in_home(&self, player: Player) -> bool {
        match player {
            Player::White => !self.points[..19].iter().any(|&count| count > 0),
            Player::Black => !self.points[7..].iter().any(|&count| count < 0),
        }
    }

    /// White wins once no positive entry remains, Black once no negative
    /// entry remains. The all-zero board falls to White by that rule.
    pub fn winner(&self) -> Option<Player> {
        if self.points.iter().all(|&count| count <= 0) {
            Some(Player::White)
        } else if self.points.iter().all(|&count| count >= 0) {
            Some(Player::Black)
        } else {
            None
        }
    }

    pub fn outcome(&self) -> GameOutcome {
        let Some(winner) = self.winner() else {
            return GameOutcome::Ongoing;
        };
        let loser = winner.opposite();
        if self.checkers_in_play(loser) < 15 {
            return GameOutcome::Win(winner);
        }
        let trapped = self.bar(loser) > 0
            || winner
                .home_range()
                .any(|index| self.points[index].signum() == loser.sign());
        if trapped {
            GameOutcome::Backgammon(winner)
        } else {
            GameOutcome::Gammon(winner)
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl TryFrom<&[i8]> for Board {
    type Error = BoardError;

    fn try_from(slice: &[i8]) -> Result<Self, Self::Error> {
        let points: [i8; 26] = slice
            .try_into()
            .map_err(|_| BoardError::InvalidLength { len: slice.len() })?;
        Board::from_points(points)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.points;
        write!(
            f,
            "12  11  10   9   8   7  | W |   6   5   4   3   2   1
{:2}  {:2}  {:2}  {:2}  {:2}  {:2}  | {:1} |  {:2}  {:2}  {:2}  {:2}  {:2}  {:2}
=========================================================
{:2}  {:2}  {:2}  {:2}  {:2}  {:2}  | {:1} |   {:2}  {:2}  {:2}  {:2}  {:2}  {:2}
13  14  15  16  17  18  | B |   19  20  21  22  23  24",
            p[12], p[11], p[10], p[9], p[8], p[7],
            p[0],
            p[6], p[5], p[4], p[3], p[2], p[1],
            p[13], p[14], p[15], p[16], p[17], p[18],
            -p[25],
            p[19], p[20], p[21], p[22], p[23], p[24]
        )
    }
}
