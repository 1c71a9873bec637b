use serde::{Deserialize, Serialize};

use crate::player::Player;

/// Result classification of a board position.
///
/// A gammon is a win while the loser has borne off nothing; a backgammon
/// additionally requires a losing checker on the bar or in the winner's
/// home board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Ongoing,
    Win(Player),
    Gammon(Player),
    Backgammon(Player),
}
