//! Mapping from service failures to HTTP responses.

use crate::dto::ErrorBody;
use crate::store::StoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tictac_engine::MoveError;

/// Errors returned by API handlers.
///
/// Both kinds of move rejection are client errors; the body's `detail`
/// text says which one it was.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ApiError {
    /// Unknown or malformed game id.
    #[display("Game not found.")]
    NotFound,

    /// The engine rejected the move.
    #[display("{_0}")]
    InvalidMove(MoveError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidMove(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            StoreError::Move(e) => ApiError::InvalidMove(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GameId;
    use tictac_engine::{IllegalMove, Position};

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::InvalidMove(MoveError::OutOfRange(9)).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidMove(IllegalMove::CellOccupied(Position::Center).into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_from_store_error() {
        assert_eq!(ApiError::from(StoreError::NotFound(GameId::new())), ApiError::NotFound);
        assert_eq!(
            ApiError::from(StoreError::Move(MoveError::OutOfRange(-1))),
            ApiError::InvalidMove(MoveError::OutOfRange(-1))
        );
    }
}
