//! Move legality, turn potential, play legality, and move application.
//!
//! Everything here is a pure function over [`Board`] values; the turn state
//! machine in [`crate::game`] is the only caller that mutates anything.

use crate::board::Board;
use crate::dice::Dice;
use crate::moves::CheckerMove;
use crate::player::Player;

impl Board {
    /// Whether one isolated checker move is legal, independent of the dice.
    ///
    /// `point` is the origin slot (0-25, bars included), `distance` the die
    /// value to move by. Checks, in order: the origin holds a mover checker,
    /// forced bar re-entry, bear-off gating on overshoot, and made points
    /// blocking the destination.
    pub fn is_legal_move(&self, player: Player, point: usize, distance: u8) -> bool {
        if !(1..=6).contains(&distance) || point > 25 {
            return false;
        }
        let sign = player.sign();
        if self.points[point].signum() != sign {
            return false;
        }
        // Checkers waiting on the bar re-enter before anything else moves.
        if self.bar(player) > 0 && point != player.bar_index() {
            return false;
        }
        let end = point as i32 + distance as i32 * player.direction() as i32;
        if !(1..=24).contains(&end) {
            // Running past the edge is a bear-off attempt.
            if !self.all_in_home(player) {
                return false;
            }
            if end == player.bear_off_index() as i32 {
                return true;
            }
            // Overshooting is only allowed from the rearmost occupied point.
            return !self.behind_in_home(player, point);
        }
        // A made point blocks entry.
        self.points[end as usize] * sign >= -1
    }

    /// True when the player still has a checker between its home edge and
    /// `point`, i.e. one that a larger exact distance could move instead.
    fn behind_in_home(&self, player: Player, point: usize) -> bool {
        match player {
            Player::White => self.points[19..point].iter().any(|&count| count > 0),
            Player::Black => self.points[point + 1..7].iter().any(|&count| count < 0),
        }
    }

    /// First origin from which `distance` can legally move, scanning slots
    /// 0-25 ascending.
    fn first_legal_origin(&self, player: Player, distance: u8) -> Option<usize> {
        (0..26).find(|&point| self.is_legal_move(player, point, distance))
    }

    /// Maximum number of checker moves the roll permits on this board (0-4).
    ///
    /// Greedy: distances are taken in roll order and each is played from the
    /// first legal origin on the board as it evolves. Orderings of a
    /// non-double roll are not explored, so a roll where only the reversed
    /// order plays both dice is undercounted.
    pub fn num_possible_moves(&self, player: Player, dice: Dice) -> u8 {
        let mut board = *self;
        let mut count = 0;
        for distance in dice.distances() {
            if let Some(point) = board.first_legal_origin(player, distance) {
                board = board.apply_move(player, point, distance);
                count += 1;
            }
        }
        count
    }

    /// Applies one checker move and returns the resulting board.
    ///
    /// The caller is expected to have checked [`Board::is_legal_move`]; no
    /// validation happens here beyond capture bookkeeping. Landing on a lone
    /// opposing checker sends it to its owner's bar; an end slot past the
    /// board edge bears the checker off.
    pub fn apply_move(&self, player: Player, point: usize, distance: u8) -> Board {
        let mut board = *self;
        let sign = player.sign();
        board.points[point] -= sign;
        let end = point as i32 + distance as i32 * player.direction() as i32;
        if (1..=24).contains(&end) {
            let end = end as usize;
            if board.points[end] == -sign {
                board.points[end] = sign;
                let opponent = player.opposite();
                board.points[opponent.bar_index()] += opponent.sign();
            } else {
                board.points[end] += sign;
            }
        }
        board
    }

    /// Whether the accumulated play may legally end the turn.
    ///
    /// `self` is the board as it stood when the turn started. The play must
    /// be at least as long as the turn potential of the roll, and every move
    /// must replay legally in order from the start board.
    pub fn is_legal_play(&self, player: Player, dice: Dice, play: &[CheckerMove]) -> bool {
        if play.len() < self.num_possible_moves(player, dice) as usize {
            return false;
        }
        let mut board = *self;
        for mv in play {
            if !board.is_legal_move(player, mv.point, mv.distance) {
                return false;
            }
            board = board.apply_move(player, mv.point, mv.distance);
        }
        true
    }
}
