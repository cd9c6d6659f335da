//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! state storage so contracts and invariants can reuse them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{CORNERS, LINES, check_winner, owner, patterns};

use crate::{Board, Outcome};

/// How the rules score `board`: a winner, a draw, or `None` while play goes on.
///
/// A completed pattern takes priority, so a move that fills the last cell
/// and completes a line is a win.
pub fn outcome(board: &Board) -> Option<Outcome> {
    check_winner(board)
        .map(Outcome::Winner)
        .or_else(|| is_draw(board).then_some(Outcome::Draw))
}
