//! HTTP client for a running game service.

use crate::dto::{DeleteResponse, ErrorBody, GameStateDto, MoveRequest};
use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// A non-success response from the service.
///
/// Returned inside `anyhow::Error`; downcast to inspect the status.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{status}: {detail}")]
pub struct ApiFailure {
    /// HTTP status code.
    pub status: StatusCode,
    /// The server's `detail` text, or the raw body if it had none.
    pub detail: String,
}

/// Typed client for the `/tictactoe` endpoints.
#[derive(Debug, Clone)]
pub struct RestGameClient {
    base_url: String,
    client: reqwest::Client,
}

impl RestGameClient {
    /// Creates a client for the service at `base_url`, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Starts a new game.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn create_game(&self) -> Result<GameStateDto> {
        let response = self
            .client
            .post(format!("{}/tictactoe/new", self.base_url))
            .send()
            .await
            .context("Failed to reach game server")?;
        Self::decode(response).await
    }

    /// Fetches a game's current state.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn get_game(&self, game_id: &str) -> Result<GameStateDto> {
        let response = self
            .client
            .get(format!("{}/tictactoe/{}", self.base_url, game_id))
            .send()
            .await
            .context("Failed to reach game server")?;
        Self::decode(response).await
    }

    /// Submits a move.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn make_move(&self, game_id: &str, index: i64, player: &str) -> Result<GameStateDto> {
        let body = MoveRequest {
            index,
            player: player.to_string(),
        };
        let response = self
            .client
            .post(format!("{}/tictactoe/{}/move", self.base_url, game_id))
            .json(&body)
            .send()
            .await
            .context("Failed to reach game server")?;
        Self::decode(response).await
    }

    /// Deletes a game. Returns whether the server had it.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn delete_game(&self, game_id: &str) -> Result<bool> {
        let response = self
            .client
            .delete(format!("{}/tictactoe/{}", self.base_url, game_id))
            .send()
            .await
            .context("Failed to reach game server")?;
        let body: DeleteResponse = Self::decode(response).await?;
        Ok(body.ok)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        debug!(%status, "Response received");

        if status.is_success() {
            return response.json::<T>().await.context("Malformed response body");
        }

        let text = response.text().await.context("Failed to read error body")?;
        let detail = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.detail)
            .unwrap_or(text);
        Err(ApiFailure { status, detail }.into())
    }
}
