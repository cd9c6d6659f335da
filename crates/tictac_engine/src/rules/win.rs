//! Win detection logic for tic-tac-toe.
//!
//! A player wins by owning every square of a winning pattern: one of the
//! eight lines, or all four corners.

use crate::{Board, Player, Position, Square};
use tracing::instrument;

/// The 8 winning lines, in the order they are checked.
pub static LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// The four corners. Holding all of them wins; three do not.
pub static CORNERS: [Position; 4] = [
    Position::TopLeft,
    Position::TopRight,
    Position::BottomLeft,
    Position::BottomRight,
];

/// Every winning pattern: the lines in [`LINES`] order, then [`CORNERS`].
pub fn patterns() -> impl Iterator<Item = &'static [Position]> {
    LINES.iter().map(|line| line.as_slice()).chain(std::iter::once(CORNERS.as_slice()))
}

/// The player owning every square of `pattern`, if one does.
pub fn owner(board: &Board, pattern: &[Position]) -> Option<Player> {
    let (first, rest) = pattern.split_first()?;
    match board.get(*first) {
        Square::Occupied(player) if rest.iter().all(|pos| board.get(*pos) == Square::Occupied(player)) => {
            Some(player)
        }
        _ => None,
    }
}

/// Checks if there is a winner on the board.
///
/// Returns the owner of the first complete pattern in [`patterns`] order,
/// `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    patterns().find_map(|pattern| owner(board, pattern))
}
