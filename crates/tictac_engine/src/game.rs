//! The game state value and the moves that advance it.

use crate::action::Move;
use crate::contracts::{Contract, InBounds, MoveContract};
use crate::rules;
use crate::types::{Board, GameStatus, Outcome, Player, Square};
use crate::MoveError;
use tracing::{debug, info, instrument};

/// Complete game state.
///
/// States are values: [`make_move`](GameState::make_move) returns a new
/// state and leaves the receiver untouched, so older snapshots stay valid.
/// `Clone` produces a fully independent copy.
///
/// Winner and draw share one `Option<Outcome>`, so a state can never be
/// both won and drawn.
///
/// The only way to reach a non-empty state is through moves. There is no
/// deserializer that could rebuild a won board still marked in progress:
///
/// ```compile_fail
/// fn rebuildable<T: serde::de::DeserializeOwned>() {}
/// rebuildable::<tictac_engine::GameState>();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    outcome: Option<Outcome>,
}

impl GameState {
    /// Creates a new game: empty board, no winner, not a draw.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns how the game ended, if it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.outcome.and_then(|o| o.winner())
    }

    /// True iff the board is full with no winner.
    pub fn is_draw(&self) -> bool {
        self.outcome.is_some_and(|o| o.is_draw())
    }

    /// True once the game has a winner or is drawn.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Returns the game status; its `Display` is the status text.
    pub fn status(&self) -> GameStatus {
        GameStatus::from(self.outcome)
    }

    /// Indices of all empty cells, ascending.
    ///
    /// Works on finished games too; check [`is_terminal`](Self::is_terminal)
    /// before offering these as moves.
    pub fn available_moves(&self) -> Vec<usize> {
        self.board.empty_positions().map(|pos| pos.index()).collect()
    }

    /// Places `player`'s marker at `index` and returns the resulting state.
    ///
    /// Turn order is not enforced: either marker may move at any point.
    /// Alternating turns is the caller's business.
    ///
    /// # Errors
    ///
    /// - [`MoveError::OutOfRange`] if `index` is not in `0..=8`.
    /// - [`MoveError::Illegal`] if the game is over or the cell is taken.
    #[instrument(skip(self), fields(status = %self.status()))]
    pub fn make_move(&self, index: i64, player: Player) -> Result<GameState, MoveError> {
        let position = InBounds::check(index)?;
        let action = Move::new(player, position);

        MoveContract::pre(self, &action)?;

        let mut next = self.clone();
        next.board.set(position, Square::Occupied(player));
        next.outcome = rules::outcome(&next.board);

        debug_assert_eq!(MoveContract::post(self, &action, &next), Ok(()));

        match next.outcome {
            Some(outcome) => info!(%action, %outcome, "Move ended the game"),
            None => debug!(%action, "Move accepted"),
        }

        Ok(next)
    }

    /// Like [`make_move`](Self::make_move), taking the marker as text.
    ///
    /// # Errors
    ///
    /// Anything other than `"X"` or `"O"` is an illegal move; otherwise the
    /// same errors as `make_move`.
    #[instrument(skip(self))]
    pub fn make_move_str(&self, index: i64, marker: &str) -> Result<GameState, MoveError> {
        let player = marker.parse::<Player>()?;
        self.make_move(index, player)
    }

    #[cfg(test)]
    pub(crate) fn from_parts(board: Board, outcome: Option<Outcome>) -> Self {
        Self { board, outcome }
    }
}
