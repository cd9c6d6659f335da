//! Tic-tac-toe game service.
//!
//! Wraps [`tictac_engine`] in an in-memory [`GameStore`] and exposes it over
//! a small REST API (see [`router`]). [`RestGameClient`] talks to a running
//! server, and [`SuperSession`] plays super tic-tac-toe through it: nine
//! ordinary games on a main board.
//!
//! # Example
//!
//! ```no_run
//! use tictac_server::{ServerConfig, run};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::load(None)?;
//! run(&config).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod config;
mod dto;
mod error;
mod routes;
mod server;
mod store;
mod super_game;
mod super_session;

pub use client::{ApiFailure, RestGameClient};
pub use config::{ConfigError, HOST_VAR, LOG_VAR, PORT_VAR, ServerConfig};
pub use dto::{DeleteResponse, ErrorBody, GameStateDto, HealthResponse, MoveRequest};
pub use error::ApiError;
pub use routes::router;
pub use server::{run, serve};
pub use store::{GameId, GameStore, StoreError};
pub use super_game::{BOARD_COUNT, SuperGame, SuperMoveError, main_outcome, next_legal_boards};
pub use super_session::SuperSession;
