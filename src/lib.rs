//! Backgammon rules engine: board state, move and play legality under a
//! dice roll, and the roll -> move -> end-turn state machine with
//! replay-based undo. Rendering, input handling, and AI are left to the
//! embedding application.

mod board;
pub use board::Board;

mod player;
pub use player::Player;

mod outcome;
pub use outcome::GameOutcome;

mod dice;
pub use dice::Dice;

mod moves;
pub use moves::CheckerMove;
pub use moves::TurnRecord;

mod rules;

mod game;
pub use game::Game;

mod error;
pub use error::BoardError;
