//! Wire types for the REST API.

use crate::store::GameId;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use tictac_engine::{GameState, Player};

/// Serialized game state returned by every game endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateDto {
    /// Game id.
    pub id: GameId,
    /// Cells in row-major order; `null` for empty.
    pub board: [Option<Player>; 9],
    /// Winning marker, if any.
    pub winner: Option<Player>,
    /// True iff the board is full with no winner.
    pub is_draw: bool,
    /// Status text: `"X wins"`, `"O wins"`, `"draw"` or `"waiting for move"`.
    pub status: String,
}

impl GameStateDto {
    /// Projects a state for the wire.
    pub fn new(id: GameId, state: &GameState) -> Self {
        Self {
            id,
            board: state.board().cells(),
            winner: state.winner(),
            is_draw: state.is_draw(),
            status: state.status().to_string(),
        }
    }
}

/// Body of `POST /tictactoe/{id}/move`.
///
/// `player` stays a string so a bad marker reaches the engine and comes
/// back as an illegal move instead of a deserialization failure. For the
/// same reason `index` accepts any JSON integer: values beyond `i64` are
/// clamped and then rejected by the engine as out of range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Cell index, 0-8.
    #[serde(deserialize_with = "saturating_index")]
    pub index: i64,
    /// Marker, `"X"` or `"O"`.
    pub player: String,
}

/// Reads any integral JSON number, clamping it to the `i64` range.
///
/// Integers too large for `u64` arrive as floats; those are accepted as long
/// as they have no fractional part.
fn saturating_index<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(index) = number.as_i64() {
        return Ok(index);
    }
    if number.as_u64().is_some() {
        return Ok(i64::MAX);
    }
    match number.as_f64() {
        // `as` saturates at the i64 bounds.
        Some(value) if value.fract() == 0.0 => Ok(value as i64),
        _ => Err(de::Error::custom(format!("index must be an integer, got {number}"))),
    }
}

/// Body of `DELETE /tictactoe/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Whether a game was removed.
    pub ok: bool,
    /// Why nothing was removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl DeleteResponse {
    /// Response for a delete that removed a game.
    pub fn deleted() -> Self {
        Self { ok: true, reason: None }
    }

    /// Response for a delete of an unknown id.
    pub fn not_found() -> Self {
        Self {
            ok: false,
            reason: Some("not found".to_string()),
        }
    }
}

/// Error body for 4xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub detail: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Number of games in the store.
    pub games: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_dto_shape() {
        let id = GameId::new();
        let state = GameState::new().make_move(4, Player::X).unwrap();
        let value = serde_json::to_value(GameStateDto::new(id, &state)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": id.to_string(),
                "board": [null, null, null, null, "X", null, null, null, null],
                "winner": null,
                "is_draw": false,
                "status": "waiting for move",
            })
        );
    }

    #[test]
    fn test_move_request_clamps_huge_indices() {
        let parse = |body: &str| serde_json::from_str::<MoveRequest>(body).map(|req| req.index);
        assert_eq!(parse(r#"{"index": 4, "player": "X"}"#).unwrap(), 4);
        assert_eq!(parse(r#"{"index": -1, "player": "X"}"#).unwrap(), -1);
        assert_eq!(parse(r#"{"index": 18446744073709551615, "player": "X"}"#).unwrap(), i64::MAX);
        assert_eq!(parse(r#"{"index": 99999999999999999999, "player": "X"}"#).unwrap(), i64::MAX);
        assert_eq!(parse(r#"{"index": -99999999999999999999, "player": "X"}"#).unwrap(), i64::MIN);
        assert!(parse(r#"{"index": 1.5, "player": "X"}"#).is_err());
        assert!(parse(r#"{"index": "4", "player": "X"}"#).is_err());
    }

    #[test]
    fn test_delete_response_shape() {
        assert_eq!(serde_json::to_value(DeleteResponse::deleted()).unwrap(), json!({"ok": true}));
        assert_eq!(
            serde_json::to_value(DeleteResponse::not_found()).unwrap(),
            json!({"ok": false, "reason": "not found"})
        );
    }
}
