//! HTTP routes for the game service.

use crate::dto::{DeleteResponse, GameStateDto, HealthResponse, MoveRequest};
use crate::error::ApiError;
use crate::store::{GameId, GameStore};
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::Request;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Builds the application router over `store`.
///
/// | method | path                   |
/// |--------|------------------------|
/// | GET    | `/health`              |
/// | POST   | `/tictactoe/new`       |
/// | GET    | `/tictactoe/{id}`      |
/// | DELETE | `/tictactoe/{id}`      |
/// | POST   | `/tictactoe/{id}/move` |
pub fn router(store: GameStore) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tictactoe/new", post(create_game))
        .route("/tictactoe/{game_id}", get(get_game).delete(delete_game))
        .route("/tictactoe/{game_id}/move", post(make_move))
        .layer(
            ServiceBuilder::new()
                .map_request(log_request)
                .map_response(log_response),
        )
        .with_state(store)
}

fn log_request(req: Request<Body>) -> Request<Body> {
    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

fn log_response(res: Response) -> Response {
    let status = res.status();
    if status.is_server_error() {
        warn!(%status, "Response sent");
    } else {
        debug!(%status, "Response sent");
    }
    res
}

/// Ids that do not parse are treated like ids that are not stored.
fn parse_id(raw: &str) -> Result<GameId, ApiError> {
    raw.parse().map_err(|_| {
        debug!(game_id = raw, "Malformed game id");
        ApiError::NotFound
    })
}

#[instrument(skip(store))]
async fn health(State(store): State<GameStore>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        games: store.len().await,
    })
}

#[instrument(skip(store))]
async fn create_game(State(store): State<GameStore>) -> Json<GameStateDto> {
    let (id, state) = store.create().await;
    Json(GameStateDto::new(id, &state))
}

#[instrument(skip(store))]
async fn get_game(
    State(store): State<GameStore>,
    Path(game_id): Path<String>,
) -> Result<Json<GameStateDto>, ApiError> {
    let id = parse_id(&game_id)?;
    let state = store.get(id).await.ok_or(ApiError::NotFound)?;
    Ok(Json(GameStateDto::new(id, &state)))
}

#[instrument(skip(store, req), fields(index = req.index, player = %req.player))]
async fn make_move(
    State(store): State<GameStore>,
    Path(game_id): Path<String>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<GameStateDto>, ApiError> {
    let id = parse_id(&game_id)?;
    let state = store.apply_move(id, req.index, &req.player).await?;
    Ok(Json(GameStateDto::new(id, &state)))
}

#[instrument(skip(store))]
async fn delete_game(State(store): State<GameStore>, Path(game_id): Path<String>) -> Json<DeleteResponse> {
    let removed = match game_id.parse() {
        Ok(id) => store.delete(id).await,
        Err(_) => false,
    };
    Json(if removed {
        DeleteResponse::deleted()
    } else {
        DeleteResponse::not_found()
    })
}
