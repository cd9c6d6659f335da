//! First-class action types for tic-tac-toe.
//!
//! A move is a player's intent: which marker goes where. It can be
//! checked against a state before anything is applied.

use crate::position::Position;
use crate::types::{Outcome, Player};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Why a move was rejected.
///
/// There are exactly two kinds: the index did not address a cell at all,
/// or it did but the rules forbid the move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The index is outside `0..=8`.
    #[display("Index must be in range 0-8, got {_0}")]
    OutOfRange(#[error(not(source))] i64),

    /// The index is valid but the move breaks a rule.
    #[display("{_0}")]
    Illegal(#[error(not(source))] IllegalMove),
}

impl MoveError {
    /// True for an addressing error.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, MoveError::OutOfRange(_))
    }

    /// True for a rule violation.
    pub fn is_illegal(&self) -> bool {
        matches!(self, MoveError::Illegal(_))
    }
}

impl From<IllegalMove> for MoveError {
    fn from(reason: IllegalMove) -> Self {
        MoveError::Illegal(reason)
    }
}

/// Rule violations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum IllegalMove {
    /// The target cell already holds a marker.
    #[display("Cell already occupied at index {}", _0.index())]
    CellOccupied(#[error(not(source))] Position),

    /// The game has a winner or is drawn.
    #[display("Game is already over ({_0})")]
    GameOver(#[error(not(source))] Outcome),

    /// The marker is neither `X` nor `O`.
    #[display("Invalid player {_0:?}: expected X or O")]
    InvalidMarker(#[error(not(source))] String),
}
