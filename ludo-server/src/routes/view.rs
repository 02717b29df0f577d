//! Read-only room views and long-polling

use axum::{
    extract::{Path, Query, State},
    Json,
};
use ludo_core::GameSnapshot;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::error::ApiError;
use crate::state::{lock_room, Room, ServerState};

/// Poll attempts before reporting "no change"
const POLL_ATTEMPTS: u32 = 50;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Snapshot tagged with the room version it was taken at
#[derive(Serialize)]
pub struct RoomView {
    pub version: u64,
    #[serde(flatten)]
    pub snapshot: GameSnapshot,
}

pub fn room_view(room: &Room) -> RoomView {
    RoomView {
        version: room.version,
        snapshot: room.game.snapshot(),
    }
}

/// Poll query params
#[derive(Deserialize)]
pub struct PollParams {
    pub version: Option<u64>,
}

#[derive(Serialize)]
pub struct PollResponse {
    pub reload: bool,
    pub version: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<RoomView>,
}

/// Get current room state
pub async fn get_room(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
) -> Result<Json<RoomView>, ApiError> {
    let room = state
        .room(&name)
        .ok_or_else(|| ApiError::RoomNotFound(name.clone()))?;
    let room = lock_room(&room);
    Ok(Json(room_view(&room)))
}

/// Long-poll for a version newer than the client's
pub async fn poll_room(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
    Query(params): Query<PollParams>,
) -> Result<Json<PollResponse>, ApiError> {
    let room = state
        .room(&name)
        .ok_or_else(|| ApiError::RoomNotFound(name.clone()))?;
    let client_version = params.version.unwrap_or(0);

    for _ in 0..POLL_ATTEMPTS {
        {
            let room = lock_room(&room);
            if room.version != client_version {
                return Ok(Json(PollResponse {
                    reload: true,
                    version: room.version,
                    state: Some(room_view(&room)),
                }));
            }
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    let room = lock_room(&room);
    Ok(Json(PollResponse {
        reload: false,
        version: room.version,
        state: None,
    }))
}
