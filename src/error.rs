use thiserror::Error;

use crate::player::Player;

/// Structural board violations, raised only from validated construction.
/// Rule-level rejections (illegal moves, premature turn ends) are not
/// errors; they come back as `false` with the game untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("a board takes 26 counts, got {len}")]
    InvalidLength { len: usize },

    #[error("{player} has {count} checkers on the board, the limit is 15")]
    TooManyCheckers { player: Player, count: i32 },

    #[error("bar slot {index} holds checkers of the wrong side")]
    BarSign { index: usize },
}
