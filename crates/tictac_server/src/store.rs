//! In-memory game store.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tictac_engine::{GameState, MoveError};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Opaque identifier for a stored game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Store failures.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum StoreError {
    /// No game with this id.
    #[display("Game not found: {_0}")]
    #[from(ignore)]
    NotFound(#[error(not(source))] GameId),

    /// The engine rejected the move.
    #[display("{_0}")]
    Move(MoveError),
}

type Slot = Arc<Mutex<GameState>>;

/// Maps game ids to their current state.
///
/// Cheap to clone; clones share the same games. Each game sits behind its
/// own lock, so moves on one id are applied one at a time while other games
/// proceed independently.
#[derive(Debug, Clone, Default)]
pub struct GameStore {
    games: Arc<RwLock<HashMap<GameId, Slot>>>,
}

impl GameStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game store");
        Self::default()
    }

    /// Starts a new game under a fresh id.
    #[instrument(skip(self))]
    pub async fn create(&self) -> (GameId, GameState) {
        let id = GameId::new();
        let state = GameState::new();
        self.games
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(state.clone())));
        info!(game_id = %id, "Created new game");
        (id, state)
    }

    /// Returns a snapshot of the game's current state.
    #[instrument(skip(self))]
    pub async fn get(&self, id: GameId) -> Option<GameState> {
        let Some(slot) = self.slot(id).await else {
            debug!(game_id = %id, "Game not found");
            return None;
        };
        let state = slot.lock().await.clone();
        Some(state)
    }

    /// Applies one move to the stored game and stores the result.
    ///
    /// The read-apply-write cycle runs under the game's lock, so concurrent
    /// moves on one id are serialized.
    #[instrument(skip(self))]
    pub async fn apply_move(&self, id: GameId, index: i64, marker: &str) -> Result<GameState, StoreError> {
        let slot = self.slot(id).await.ok_or_else(|| {
            warn!(game_id = %id, "Move for unknown game");
            StoreError::NotFound(id)
        })?;

        let mut current = slot.lock().await;
        let next = current.make_move_str(index, marker).inspect_err(|e| {
            warn!(game_id = %id, index, marker, error = %e, "Move rejected");
        })?;
        *current = next.clone();

        info!(game_id = %id, index, marker, status = %next.status(), "Move applied");
        Ok(next)
    }

    /// Removes a game. Returns whether anything was removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: GameId) -> bool {
        let removed = self.games.write().await.remove(&id).is_some();
        if removed {
            info!(game_id = %id, "Deleted game");
        } else {
            debug!(game_id = %id, "Delete for unknown game");
        }
        removed
    }

    /// Number of stored games.
    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    /// True if no games are stored.
    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }

    /// Looks up a game's slot without holding the map lock afterwards.
    async fn slot(&self, id: GameId) -> Option<Slot> {
        self.games.read().await.get(&id).cloned()
    }
}
