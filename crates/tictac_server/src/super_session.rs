//! Plays a super game against a running server.

use crate::client::RestGameClient;
use crate::dto::GameStateDto;
use crate::super_game::{BOARD_COUNT, SuperGame};
use anyhow::{Context, Result, anyhow};
use std::fmt;
use tictac_engine::{Outcome, Position};
use tracing::{info, instrument, warn};

/// A super game whose nine sub-games live on the server.
///
/// The session keeps the last state the server returned for each sub-game
/// and the main-board [`SuperGame`]. Moves are checked against the routing
/// rule locally; the server still validates the cell itself.
#[derive(Debug)]
pub struct SuperSession {
    client: RestGameClient,
    games: [GameStateDto; BOARD_COUNT],
    state: SuperGame,
}

impl SuperSession {
    /// Creates nine fresh sub-games on the server.
    #[instrument(skip(client))]
    pub async fn start(client: RestGameClient) -> Result<Self> {
        let mut games = Vec::with_capacity(BOARD_COUNT);
        for board in 0..BOARD_COUNT {
            let game = client
                .create_game()
                .await
                .with_context(|| format!("Failed to create sub-game {}", board))?;
            games.push(game);
        }
        let games: [GameStateDto; BOARD_COUNT] = games
            .try_into()
            .map_err(|_| anyhow!("Expected {} sub-games", BOARD_COUNT))?;

        info!("Super game started");
        Ok(Self {
            client,
            games,
            state: SuperGame::new(),
        })
    }

    /// Main-board state.
    pub fn state(&self) -> &SuperGame {
        &self.state
    }

    /// Latest server state of every sub-game.
    pub fn games(&self) -> &[GameStateDto; BOARD_COUNT] {
        &self.games
    }

    /// Plays the current player's marker at `cell` of sub-game `board`.
    ///
    /// Nothing changes if the routing rule or the server refuses the move.
    #[instrument(skip(self), fields(player = %self.state.current_player()))]
    pub async fn play(&mut self, board: usize, cell: i64) -> Result<&GameStateDto> {
        self.state.check_board(board)?;

        let player = self.state.current_player();
        let game = self
            .client
            .make_move(&self.games[board].id.to_string(), cell, &player.to_string())
            .await?;

        let position = Position::try_from(cell)?;
        let sub_outcome = match (game.winner, game.is_draw) {
            (Some(winner), _) => Some(Outcome::Winner(winner)),
            (None, true) => Some(Outcome::Draw),
            (None, false) => None,
        };
        self.state = self.state.record(board, position, sub_outcome)?;
        self.games[board] = game;

        Ok(&self.games[board])
    }

    /// Deletes the sub-games from the server.
    #[instrument(skip(self))]
    pub async fn finish(self) -> Result<()> {
        for game in &self.games {
            let id = game.id.to_string();
            if !self.client.delete_game(&id).await? {
                warn!(game_id = %id, "Sub-game already gone");
            }
        }
        info!("Super game cleaned up");
        Ok(())
    }
}

impl fmt::Display for SuperSession {
    /// The 9x9 grid, the main board and whose turn it is.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for main_row in 0..3 {
            if main_row > 0 {
                writeln!(f, "------+-------+------")?;
            }
            for inner_row in 0..3 {
                let row: Vec<String> = (0..3)
                    .map(|main_col| {
                        let cells = &self.games[main_row * 3 + main_col].board;
                        (0..3)
                            .map(|inner_col| cells[inner_row * 3 + inner_col].map_or(".".to_string(), |p| p.to_string()))
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect();
                writeln!(f, "{}", row.join(" | "))?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Main board:")?;
        for main_row in 0..3 {
            let row: Vec<String> = (0..3)
                .map(|main_col| {
                    let board = main_row * 3 + main_col;
                    match self.state.main_board()[board] {
                        Some(Outcome::Winner(player)) => player.to_string(),
                        Some(Outcome::Draw) => "=".to_string(),
                        None => board.to_string(),
                    }
                })
                .collect();
            writeln!(f, "{}", row.join("|"))?;
        }

        writeln!(f)?;
        match self.state.outcome() {
            Some(_) => write!(f, "Super game: {}", self.state.status()),
            None => write!(
                f,
                "{} to play on board(s) {:?}",
                self.state.current_player(),
                self.state.legal_boards()
            ),
        }
    }
}
