//! Command-line interface for the `tictac` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictac_engine::Position;

/// Tic-tac-toe game service and client
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Tic-tac-toe over a REST API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Game server URL used by the client commands
    #[arg(long, global = true, default_value = "http://127.0.0.1:8000")]
    pub server_url: String,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides config and TICTAC_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config and TICTAC_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Start a new game on the server
    New,

    /// Show a game's board and status
    Show {
        /// Game id
        game_id: String,
    },

    /// Place a marker
    #[command(allow_negative_numbers = true)]
    Move {
        /// Game id
        game_id: String,

        /// Cell index 0-8, or a label such as "center" or "top-left"
        #[arg(value_parser = parse_cell)]
        cell: i64,

        /// Marker to place (X or O)
        player: String,
    },

    /// Delete a game
    Delete {
        /// Game id
        game_id: String,
    },

    /// Play super tic-tac-toe interactively: nine games on a main board
    Super,
}

/// Accepts any integer (the server range-checks it) or a position label.
fn parse_cell(s: &str) -> Result<i64, String> {
    if let Ok(index) = s.trim().parse::<i64>() {
        return Ok(index);
    }
    Position::from_label_or_number(s)
        .map(|pos| pos.index() as i64)
        .ok_or_else(|| format!("not a cell index or label: {s:?}"))
}

const SUPER_USAGE: &str = "expected <board> <cell>, e.g. \"4 center\"";

/// One line of input during a super game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuperInput {
    /// Play `cell` on sub-game `board`.
    Move {
        /// Sub-game, 0-8.
        board: usize,
        /// Cell inside the sub-game; range-checked by the server.
        cell: i64,
    },
    /// Leave the game.
    Quit,
}

/// Parses `"<board> <cell>"` (either part may be a label) or `quit`.
pub fn parse_super_input(line: &str) -> Result<SuperInput, String> {
    let mut parts = line.split_whitespace();
    let (Some(board), cell, None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(SUPER_USAGE.to_string());
    };
    if matches!(board.to_lowercase().as_str(), "q" | "quit" | "exit") && cell.is_none() {
        return Ok(SuperInput::Quit);
    }
    let Some(cell) = cell else {
        return Err(SUPER_USAGE.to_string());
    };

    let board = match board.parse::<usize>() {
        Ok(board) => board,
        Err(_) => Position::from_label_or_number(board)
            .map(Position::index)
            .ok_or_else(|| format!("not a board index or label: {board:?}"))?,
    };
    Ok(SuperInput::Move {
        board,
        cell: parse_cell(cell)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_numbers_pass_through() {
        assert_eq!(parse_cell("4"), Ok(4));
        assert_eq!(parse_cell("-1"), Ok(-1));
        assert_eq!(parse_cell("100"), Ok(100));
    }

    #[test]
    fn test_parse_cell_labels() {
        assert_eq!(parse_cell("center"), Ok(4));
        assert_eq!(parse_cell("Bottom-right"), Ok(8));
        assert!(parse_cell("somewhere").is_err());
    }

    #[test]
    fn test_move_command_parses() {
        let cli = Cli::try_parse_from(["tictac", "move", "abc", "top-left", "X"]).unwrap();
        match cli.command {
            Command::Move { game_id, cell, player } => {
                assert_eq!(game_id, "abc");
                assert_eq!(cell, 0);
                assert_eq!(player, "X");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_negative_cell_is_not_a_flag() {
        let cli = Cli::try_parse_from(["tictac", "move", "abc", "-1", "O"]).unwrap();
        assert!(matches!(cli.command, Command::Move { cell: -1, .. }));
    }

    #[test]
    fn test_super_command_parses() {
        let cli = Cli::try_parse_from(["tictac", "--server-url", "http://localhost:9000", "super"]).unwrap();
        assert!(matches!(cli.command, Command::Super));
        assert_eq!(cli.server_url, "http://localhost:9000");
    }

    #[test]
    fn test_super_input() {
        assert_eq!(parse_super_input("4 0"), Ok(SuperInput::Move { board: 4, cell: 0 }));
        assert_eq!(
            parse_super_input("  top-right   center "),
            Ok(SuperInput::Move { board: 2, cell: 4 })
        );
        assert_eq!(parse_super_input("0 -1"), Ok(SuperInput::Move { board: 0, cell: -1 }));
        assert_eq!(parse_super_input("quit"), Ok(SuperInput::Quit));
        assert_eq!(parse_super_input("Q"), Ok(SuperInput::Quit));
        assert!(parse_super_input("").is_err());
        assert!(parse_super_input("4").is_err());
        assert!(parse_super_input("4 5 6").is_err());
        assert!(parse_super_input("nowhere 5").is_err());
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from(["tictac", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Command::Serve { config, host, port } => {
                assert_eq!(config, None);
                assert_eq!(host, None);
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.server_url, "http://127.0.0.1:8000");
    }
}
