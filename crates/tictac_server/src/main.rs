//! `tictac` - tic-tac-toe game server and command-line client.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, SuperInput, parse_super_input};
use std::path::PathBuf;
use tictac_engine::Board;
use tictac_server::{GameStateDto, RestGameClient, ServerConfig, SuperSession};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = RestGameClient::new(cli.server_url.as_str());

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
        Command::New => {
            initialize_client_tracing();
            print_game(&client.create_game().await?);
            Ok(())
        }
        Command::Show { game_id } => {
            initialize_client_tracing();
            print_game(&client.get_game(&game_id).await?);
            Ok(())
        }
        Command::Move { game_id, cell, player } => {
            initialize_client_tracing();
            print_game(&client.make_move(&game_id, cell, &player).await?);
            Ok(())
        }
        Command::Super => {
            initialize_client_tracing();
            play_super(client).await
        }
        Command::Delete { game_id } => {
            initialize_client_tracing();
            if client.delete_game(&game_id).await? {
                println!("Deleted {}", game_id);
            } else {
                println!("No game {}", game_id);
            }
            Ok(())
        }
    }
}

/// Run the HTTP game server
async fn run_server(config_path: Option<PathBuf>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = ServerConfig::load(config_path.as_deref())?;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())))
        .init();

    info!(host = %config.host(), port = *config.port(), "Starting tic-tac-toe server");
    tictac_server::run(&config).await
}

/// Client commands log to stderr so stdout stays clean.
fn initialize_client_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn print_game(game: &GameStateDto) {
    println!("Game {}", game.id);
    println!("{}", Board::from(game.board));
    println!("Status: {}", game.status);
}

/// Interactive super game: reads `<board> <cell>` lines from stdin.
async fn play_super(client: RestGameClient) -> Result<()> {
    let mut session = SuperSession::start(client).await?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", session);
    while !session.state().is_terminal() {
        println!("Move as <board> <cell>, or quit:");
        let Some(line) = lines.next_line().await.context("Failed to read from stdin")? else {
            break;
        };
        let (board, cell) = match parse_super_input(&line) {
            Ok(SuperInput::Move { board, cell }) => (board, cell),
            Ok(SuperInput::Quit) => break,
            Err(e) => {
                println!("Error: {}", e);
                continue;
            }
        };

        if let Err(e) = session.play(board, cell).await {
            warn!(board, cell, error = %e, "Super move refused");
            println!("Error: {}", e);
            continue;
        }
        println!("{}", session);
    }

    session.finish().await
}
