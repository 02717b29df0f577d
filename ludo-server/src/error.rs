//! Mapping engine rejections onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ludo_core::GameError;
use serde_json::json;

/// A rejected request
#[derive(Debug)]
pub enum ApiError {
    Game(GameError),
    RoomNotFound(String),
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        ApiError::Game(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RoomNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Game(err) => match err {
                GameError::NotYourTurn | GameError::UnknownPlayer(_) => StatusCode::FORBIDDEN,
                GameError::IllegalMove(_)
                | GameError::UnknownColour(_)
                | GameError::InvalidConfig(_) => StatusCode::BAD_REQUEST,
                GameError::AlreadyRolled(_)
                | GameError::NoRollYet
                | GameError::GameFull
                | GameError::ColourTaken(_)
                | GameError::AlreadyJoined(_)
                | GameError::NoPlayers
                | GameError::MovesAvailable => StatusCode::CONFLICT,
                GameError::Board(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::RoomNotFound(_) => "room_not_found",
            ApiError::Game(err) => err.kind(),
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::RoomNotFound(name) => format!("room not found: {}", name),
            ApiError::Game(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", message);
        } else {
            tracing::warn!("Request rejected: {}", message);
        }

        let body = Json(json!({
            "error": self.kind(),
            "message": message,
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludo_core::IllegalMoveReason;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(GameError::NotYourTurn).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(GameError::IllegalMove(IllegalMoveReason::Overshoot)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(GameError::GameFull).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::RoomNotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
    }
}
