use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::Player;

/// One checker move: the point it leaves and the die distance it travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckerMove {
    pub point: usize,
    pub distance: u8,
}

impl CheckerMove {
    pub fn new(point: usize, distance: u8) -> Self {
        CheckerMove { point, distance }
    }
}

impl fmt::Display for CheckerMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.point, self.distance)
    }
}

/// One completed turn in the game history: who moved and the full play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub player: Player,
    pub moves: Vec<CheckerMove>,
}
