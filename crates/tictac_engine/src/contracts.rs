//! Contract-based validation for tic-tac-toe.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P(state, move)} make_move {Q(before, after)}`.

use crate::action::{IllegalMove, Move, MoveError};
use crate::invariants::{InvariantSet, InvariantViolation, TicTacToeInvariants};
use crate::{GameState, Position, Square};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, action: &A, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the raw index addresses a cell.
pub struct InBounds;

impl InBounds {
    /// Resolves the index, failing with an out-of-range error.
    #[instrument]
    pub fn check(index: i64) -> Result<Position, MoveError> {
        Position::try_from(index).inspect_err(|_| warn!(index, "Index out of range"))
    }
}

/// Precondition: the game has not finished.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with [`IllegalMove::GameOver`] on a terminal state.
    #[instrument(skip(state))]
    pub fn check(state: &GameState) -> Result<(), MoveError> {
        match state.outcome() {
            Some(outcome) => {
                warn!(%outcome, "Move attempted on finished game");
                Err(IllegalMove::GameOver(outcome).into())
            }
            None => Ok(()),
        }
    }
}

/// Precondition: the square at the move's position must be empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails with [`IllegalMove::CellOccupied`] if the target is taken.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if state.board().is_empty(mov.position) {
            Ok(())
        } else {
            warn!(position = %mov.position, "Cell already occupied");
            Err(IllegalMove::CellOccupied(mov.position).into())
        }
    }
}

/// Composite precondition: the game is live and the target cell is free.
///
/// Deliberately says nothing about whose turn it is.
pub struct LegalMove;

impl LegalMove {
    /// Validates all rule preconditions for a move.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        GameNotOver::check(state)?;
        CellIsEmpty::check(mov, state)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Postconditions
// ─────────────────────────────────────────────────────────────

/// Postcondition: only the target cell changed, and it went from empty to
/// the mover's marker.
pub struct MonotonicBoard;

impl MonotonicBoard {
    /// Compares the boards before and after a move.
    pub fn holds(before: &GameState, mov: &Move, after: &GameState) -> bool {
        Position::ALL.into_iter().all(|pos| {
            let (old, new) = (before.board().get(pos), after.board().get(pos));
            if pos == mov.position {
                old == Square::Empty && new == Square::Occupied(mov.player)
            } else {
                old == new
            }
        })
    }

    /// Human-readable description of the postcondition.
    pub fn description() -> &'static str {
        "Board squares are monotonic (only the target square changed)"
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions: game not over, target cell empty.
/// Postconditions: board monotonic, state invariants hold.
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(state: &GameState, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, state)
    }

    fn post(before: &GameState, action: &Move, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match TicTacToeInvariants::check_all(after) {
            Ok(()) => Vec::new(),
            Err(violations) => violations,
        };
        if !MonotonicBoard::holds(before, action, after) {
            violations.push(InvariantViolation::new(MonotonicBoard::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
