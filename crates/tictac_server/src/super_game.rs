//! Super tic-tac-toe: nine sub-games arranged on a main board.
//!
//! Every sub-game is an ordinary game held by the server. Winning a sub-game
//! claims that square of the main board, and the main board is won on any of
//! the 8 lines. The cell a player marks names the sub-game the opponent must
//! play next; once that sub-game is decided, any open sub-game is allowed.
//!
//! This module only tracks the main board. [`SuperSession`](crate::SuperSession)
//! drives the sub-games over HTTP.

use tictac_engine::rules::LINES;
use tictac_engine::{GameStatus, Outcome, Player, Position};
use tracing::{debug, info, instrument};

/// Number of sub-games on the main board.
pub const BOARD_COUNT: usize = 9;

/// Reasons a super-game move is refused before it reaches a sub-game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SuperMoveError {
    /// Sub-game index outside `0..=8`.
    #[display("Board must be in range 0-8, got {_0}")]
    BoardOutOfRange(#[error(not(source))] usize),

    /// The routing rule sends this turn elsewhere.
    #[display("Board {board} is not playable now; legal boards: {legal:?}")]
    BoardNotPlayable {
        /// Requested sub-game.
        board: usize,
        /// Sub-games open to this turn.
        legal: Vec<usize>,
    },

    /// The main board is already decided.
    #[display("Super game is already over ({_0})")]
    GameOver(#[error(not(source))] Outcome),
}

/// State of the main board.
///
/// A value type like [`GameState`](tictac_engine::GameState):
/// [`record`](SuperGame::record) returns the next state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperGame {
    main_board: [Option<Outcome>; BOARD_COUNT],
    legal_boards: Vec<usize>,
    current_player: Player,
}

impl Default for SuperGame {
    fn default() -> Self {
        Self {
            main_board: [None; BOARD_COUNT],
            legal_boards: (0..BOARD_COUNT).collect(),
            current_player: Player::X,
        }
    }
}

impl SuperGame {
    /// X to move, every sub-game open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Result of each sub-game; `None` while it is still being played.
    pub fn main_board(&self) -> &[Option<Outcome>; BOARD_COUNT] {
        &self.main_board
    }

    /// Sub-games the current player may move in, ascending.
    pub fn legal_boards(&self) -> &[usize] {
        &self.legal_boards
    }

    /// Marker for the next move. Unlike single games, turns alternate here.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Main-board result, if decided.
    pub fn outcome(&self) -> Option<Outcome> {
        main_outcome(&self.main_board)
    }

    /// True once the main board is won or drawn.
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Main-board status, worded like a single game's status.
    pub fn status(&self) -> GameStatus {
        GameStatus::from(self.outcome())
    }

    /// Checks that the current player may move in `board`.
    ///
    /// # Errors
    ///
    /// Range first, then a decided main board, then the routing rule.
    pub fn check_board(&self, board: usize) -> Result<(), SuperMoveError> {
        if board >= BOARD_COUNT {
            return Err(SuperMoveError::BoardOutOfRange(board));
        }
        if let Some(outcome) = self.outcome() {
            return Err(SuperMoveError::GameOver(outcome));
        }
        if !self.legal_boards.contains(&board) {
            return Err(SuperMoveError::BoardNotPlayable {
                board,
                legal: self.legal_boards.clone(),
            });
        }
        Ok(())
    }

    /// Records a move the server accepted in sub-game `board` at `cell`.
    ///
    /// `sub_outcome` is that sub-game's result after the move. The turn
    /// passes to the opponent and the next legal boards follow from `cell`.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn record(
        &self,
        board: usize,
        cell: Position,
        sub_outcome: Option<Outcome>,
    ) -> Result<SuperGame, SuperMoveError> {
        self.check_board(board)?;

        let mut next = self.clone();
        if let Some(result) = sub_outcome {
            info!(board, %result, "Sub-game decided");
            next.main_board[board] = Some(result);
        }
        next.current_player = self.current_player.opponent();
        next.legal_boards = match next.outcome() {
            Some(outcome) => {
                info!(%outcome, "Super game over");
                Vec::new()
            }
            None => next_legal_boards(&next.main_board, cell.index()),
        };

        debug!(legal = ?next.legal_boards, next = %next.current_player, "Turn passed");
        Ok(next)
    }
}

/// Sub-games open after a move on `cell`: just sub-game `cell` while it is
/// undecided, otherwise every undecided sub-game.
pub fn next_legal_boards(main_board: &[Option<Outcome>; BOARD_COUNT], cell: usize) -> Vec<usize> {
    match main_board.get(cell) {
        Some(None) => vec![cell],
        _ => (0..BOARD_COUNT).filter(|b| main_board[*b].is_none()).collect(),
    }
}

/// Scores the main board over the 8 lines.
///
/// Drawn sub-games belong to nobody, so a line of draws wins nothing. The
/// main board is drawn once every sub-game is decided without a winning line.
pub fn main_outcome(main_board: &[Option<Outcome>; BOARD_COUNT]) -> Option<Outcome> {
    let claimed = |pos: Position| main_board[pos.index()].and_then(|o| o.winner());

    let winner = LINES.iter().find_map(|line| {
        let first = claimed(line[0])?;
        line.iter().all(|pos| claimed(*pos) == Some(first)).then_some(first)
    });

    match winner {
        Some(player) => Some(Outcome::Winner(player)),
        None if main_board.iter().all(Option::is_some) => Some(Outcome::Draw),
        None => None,
    }
}
