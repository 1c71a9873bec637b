use hashbrown::HashSet;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::board::Board;
use crate::dice::Dice;
use crate::moves::{CheckerMove, TurnRecord};
use crate::outcome::GameOutcome;
use crate::player::Player;

/// The turn state machine: roll, zero or more moves, undo, end turn.
///
/// Holds the live board, the board snapshot from the start of the turn, the
/// pool of distances still usable from the roll, the play accumulated this
/// turn, and the history of completed turns. Commands that break a rule are
/// refused with `false` and leave the game untouched; the only hard errors
/// are structural caller bugs such as out-of-range indices.
///
/// Undo restores the snapshot and replays the shortened play. Captures fold
/// two checkers into one slot, so the live board alone cannot be stepped
/// backwards.
pub struct Game {
    board: Board,
    turn_start: Board,
    active: Player,
    dice: Option<Dice>,
    remaining: Vec<u8>,
    play: Vec<CheckerMove>,
    history: Vec<TurnRecord>,
    rng: StdRng,
}

impl Game {
    /// A fresh game with an OS-seeded RNG. White is to move and no dice
    /// have been rolled yet.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// A reproducible game: the same seed replays the same dice sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let board = Board::new();
        Game {
            board,
            turn_start: board,
            active: Player::White,
            dice: None,
            remaining: Vec::new(),
            play: Vec::new(),
            history: Vec::new(),
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_player(&self) -> Player {
        self.active
    }

    /// The roll this turn is playing, `None` before the first roll.
    pub fn dice(&self) -> Option<Dice> {
        self.dice
    }

    /// Multiset of distances still usable this turn.
    pub fn remaining_moves(&self) -> &[u8] {
        &self.remaining
    }

    pub fn current_play(&self) -> &[CheckerMove] {
        &self.play
    }

    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }

    pub fn outcome(&self) -> GameOutcome {
        self.board.outcome()
    }

    /// Rolls both dice and refills the pool of usable distances: four
    /// copies of a double, otherwise the two values.
    pub fn roll_dice(&mut self) {
        let dice = Dice::roll(&mut self.rng);
        debug!(player = %self.active, dice = %dice, "Dice rolled");
        self.remaining = dice.distances();
        self.dice = Some(dice);
    }

    /// Attempts one checker move on the live board. Refused unless
    /// `distance` is still in the pool and the move is legal; on success
    /// the distance is consumed and the move appended to the current play.
    pub fn move_checker(&mut self, point: usize, distance: u8) -> bool {
        let Some(slot) = self.remaining.iter().position(|&d| d == distance) else {
            trace!(point, distance, "Move refused, distance not in pool");
            return false;
        };
        if !self.board.is_legal_move(self.active, point, distance) {
            trace!(point, distance, "Move refused, illegal");
            return false;
        }
        self.remaining.swap_remove(slot);
        self.board = self.board.apply_move(self.active, point, distance);
        self.play.push(CheckerMove::new(point, distance));
        debug!(player = %self.active, point, distance, "Move played");
        true
    }

    /// Moves from `point` by the largest remaining distance, falling back
    /// to smaller ones when it is illegal there.
    pub fn max_move(&mut self, point: usize) -> bool {
        for distance in self.pool_values(true) {
            if self.move_checker(point, distance) {
                return true;
            }
        }
        false
    }

    /// Moves from `point` by the smallest remaining distance, falling back
    /// to larger ones when it is illegal there.
    pub fn min_move(&mut self, point: usize) -> bool {
        for distance in self.pool_values(false) {
            if self.move_checker(point, distance) {
                return true;
            }
        }
        false
    }

    fn pool_values(&self, descending: bool) -> Vec<u8> {
        let mut values = self.remaining.clone();
        values.sort_unstable();
        values.dedup();
        if descending {
            values.reverse();
        }
        values
    }

    /// Whether the accumulated play uses enough of the roll for the turn
    /// to end.
    pub fn can_end_turn(&self) -> bool {
        match self.dice {
            Some(dice) => self.turn_start.is_legal_play(self.active, dice, &self.play),
            None => false,
        }
    }

    /// Ends the turn when the play satisfies the roll: records the play,
    /// flips the active player, snapshots the live board as the new turn
    /// start, and rolls fresh dice.
    pub fn end_turn(&mut self) -> bool {
        if !self.can_end_turn() {
            trace!(player = %self.active, "End turn refused");
            return false;
        }
        self.history.push(TurnRecord {
            player: self.active,
            moves: std::mem::take(&mut self.play),
        });
        debug!(player = %self.active, "Turn ended");
        self.active = self.active.opposite();
        self.turn_start = self.board;
        self.roll_dice();
        true
    }

    /// Takes back the last move of the current play, returning its distance
    /// to the pool. The live board is rebuilt from the turn-start snapshot.
    pub fn undo(&mut self) -> bool {
        let Some(last) = self.play.pop() else {
            trace!("Undo refused, nothing played this turn");
            return false;
        };
        self.remaining.push(last.distance);
        self.board = self.turn_start;
        for mv in &self.play {
            self.board = self.board.apply_move(self.active, mv.point, mv.distance);
        }
        debug!(player = %self.active, point = last.point, distance = last.distance, "Move undone");
        true
    }

    /// Destination points reachable from `point` with the distances still
    /// in the pool. Bear-off destinations are clamped to the mover's edge
    /// index (25 for White, 0 for Black).
    pub fn legal_targets(&self, point: usize) -> HashSet<usize> {
        let mut targets = HashSet::new();
        for &distance in &self.remaining {
            if self.board.is_legal_move(self.active, point, distance) {
                let end = point as i32 + distance as i32 * self.active.direction() as i32;
                targets.insert(end.clamp(0, 25) as usize);
            }
        }
        targets
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A game with a fixed roll instead of a random one.
    fn game_with_roll(die1: u8, die2: u8) -> Game {
        let mut game = Game::from_seed(0);
        let dice = Dice::new(die1, die2);
        game.dice = Some(dice);
        game.remaining = dice.distances();
        game
    }

    #[test]
    fn test_same_seed_same_dice() {
        let mut a = Game::from_seed(1337);
        let mut b = Game::from_seed(1337);
        for _ in 0..20 {
            a.roll_dice();
            b.roll_dice();
            assert_eq!(a.dice(), b.dice());
        }
    }

    #[test]
    fn test_roll_fills_pool() {
        let mut game = Game::from_seed(3);
        assert_eq!(game.dice(), None);
        assert!(game.remaining_moves().is_empty());
        game.roll_dice();
        let dice = game.dice().unwrap();
        assert_eq!(game.remaining_moves(), dice.distances());
    }

    #[test]
    fn test_move_consumes_distance() {
        let mut game = game_with_roll(2, 5);
        assert!(game.move_checker(1, 2));
        assert_eq!(game.remaining_moves(), [5]);
        assert_eq!(game.current_play(), [CheckerMove::new(1, 2)]);
        assert_eq!(game.board().checkers_on(3), 1);
    }

    #[test]
    fn test_illegal_move_refused_silently() {
        let mut game = game_with_roll(2, 5);
        let before = *game.board();
        // 1/5 runs into the made point on 6; 3 is not in the pool.
        assert!(!game.move_checker(1, 5));
        assert!(!game.move_checker(1, 3));
        assert_eq!(*game.board(), before);
        assert_eq!(game.remaining_moves(), [2, 5]);
        assert!(game.current_play().is_empty());
    }

    #[test]
    fn test_max_move_prefers_larger_die() {
        let mut game = game_with_roll(2, 5);
        assert!(game.max_move(12));
        assert_eq!(game.current_play(), [CheckerMove::new(12, 5)]);
    }

    #[test]
    fn test_max_move_falls_back() {
        let mut game = game_with_roll(2, 5);
        // From point 1 the 5 is blocked, so the 2 plays instead.
        assert!(game.max_move(1));
        assert_eq!(game.current_play(), [CheckerMove::new(1, 2)]);
    }

    #[test]
    fn test_min_move_prefers_smaller_die() {
        let mut game = game_with_roll(2, 5);
        assert!(game.min_move(12));
        assert_eq!(game.current_play(), [CheckerMove::new(12, 2)]);
    }

    #[test]
    fn test_moves_refused_on_empty_pool() {
        let mut game = Game::from_seed(4);
        assert!(!game.max_move(1));
        assert!(!game.min_move(1));
        assert!(!game.move_checker(1, 2));
    }

    #[test]
    fn test_undo_rebuilds_from_snapshot() {
        let mut game = game_with_roll(2, 5);
        let start = *game.board();
        assert!(game.move_checker(1, 2));
        assert!(game.move_checker(12, 5));
        assert!(game.undo());
        assert_eq!(game.current_play(), [CheckerMove::new(1, 2)]);
        assert_eq!(*game.board(), start.apply_move(Player::White, 1, 2));
        assert_eq!(game.remaining_moves(), [5]);
        assert!(game.undo());
        assert_eq!(*game.board(), start);
        assert!(!game.undo());
    }

    #[test]
    fn test_undo_after_capture() {
        let mut game = game_with_roll(4, 2);
        // Put a black blot on point 5 and capture it.
        game.board.points[5] = -1;
        game.board.points[13] = -4;
        game.turn_start = game.board;
        let start = *game.board();
        assert!(game.move_checker(1, 4));
        assert_eq!(game.board().checkers_on(5), 1);
        assert_eq!(game.board().bar(Player::Black), 1);
        assert!(game.undo());
        assert_eq!(*game.board(), start);
        assert_eq!(game.board().bar(Player::Black), 0);
    }

    #[test]
    fn test_end_turn_requires_full_play() {
        let mut game = game_with_roll(1, 3);
        assert!(!game.end_turn());
        assert!(game.move_checker(17, 3));
        assert!(!game.can_end_turn());
        assert!(game.move_checker(19, 1));
        assert!(game.can_end_turn());
        assert!(game.end_turn());
    }

    #[test]
    fn test_end_turn_flips_and_rerolls() {
        let mut game = game_with_roll(1, 3);
        assert!(game.move_checker(17, 3));
        assert!(game.move_checker(19, 1));
        let live = *game.board();
        assert!(game.end_turn());
        assert_eq!(game.active_player(), Player::Black);
        assert_eq!(*game.board(), live);
        assert_eq!(game.turn_start, live);
        assert!(game.current_play().is_empty());
        assert!(!game.remaining_moves().is_empty());
        assert_eq!(game.history().len(), 1);
        let record = &game.history()[0];
        assert_eq!(record.player, Player::White);
        assert_eq!(record.moves, [CheckerMove::new(17, 3), CheckerMove::new(19, 1)]);
    }

    #[test]
    fn test_end_turn_refused_before_first_roll() {
        let mut game = Game::from_seed(9);
        assert!(!game.can_end_turn());
        assert!(!game.end_turn());
    }

    #[test]
    fn test_legal_targets() {
        let game = game_with_roll(2, 5);
        assert_eq!(game.legal_targets(1), HashSet::from_iter([3]));
        assert_eq!(game.legal_targets(12), HashSet::from_iter([14, 17]));
        assert!(game.legal_targets(2).is_empty());
        assert!(game.legal_targets(6).is_empty());
    }

    #[test]
    fn test_legal_targets_clamps_bear_off() {
        let mut game = game_with_roll(6, 6);
        let mut points = [0i8; 26];
        points[23] = 15;
        points[1] = -15;
        game.board = Board::from_points(points).unwrap();
        game.turn_start = game.board;
        assert_eq!(game.legal_targets(23), HashSet::from_iter([25]));
    }

    #[test]
    fn test_winner_query() {
        let mut game = game_with_roll(1, 2);
        assert_eq!(game.winner(), None);
        let mut points = [0i8; 26];
        points[3] = -7;
        game.board = Board::from_points(points).unwrap();
        assert_eq!(game.winner(), Some(Player::White));
        assert_eq!(game.outcome(), GameOutcome::Win(Player::White));
    }
}
