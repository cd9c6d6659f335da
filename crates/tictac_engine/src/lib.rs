//! Pure tic-tac-toe rules.
//!
//! The engine owns one value type, [`GameState`], and the functions that
//! move it forward. Nothing here does I/O or holds locks; callers keep the
//! latest state and replace it with whatever [`GameState::make_move`]
//! returns.
//!
//! # Example
//!
//! ```
//! use tictac_engine::{GameState, Player};
//!
//! let state = GameState::new();
//! let state = state.make_move(4, Player::X)?;
//! assert_eq!(state.available_moves().len(), 8);
//! assert_eq!(state.status().to_string(), "waiting for move");
//! # Ok::<(), tictac_engine::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod game;
mod invariants;
mod position;
pub mod rules;
mod types;

pub use action::{IllegalMove, Move, MoveError};
pub use contracts::{CellIsEmpty, Contract, GameNotOver, InBounds, LegalMove, MonotonicBoard, MoveContract};
pub use game::GameState;
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, OutcomeConsistentInvariant, SingleWinnerInvariant,
    TicTacToeInvariants,
};
pub use position::Position;
pub use types::{Board, GameStatus, Outcome, Player, Square};
