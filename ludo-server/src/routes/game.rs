//! Game action endpoints
//!
//! Each handler maps one player action onto one engine call, under the
//! room's lock.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use ludo_core::{Colour, GameConfig, GameError, MoveOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::routes::view::{room_view, RoomView};
use crate::state::{lock_room, ServerState, SharedRoom};

/// Join request
#[derive(Deserialize)]
pub struct JoinRequest {
    pub colour: Colour,
    pub user_id: String,
}

/// Request carrying only the caller's identity
#[derive(Deserialize)]
pub struct UserRequest {
    pub user_id: String,
}

/// Move request
#[derive(Deserialize)]
pub struct MoveRequest {
    pub user_id: String,
    pub origin: usize,
    pub colour: Colour,
}

#[derive(Serialize)]
pub struct RollResponse {
    pub value: u8,
    pub moves_available: bool,
    pub version: u64,
}

#[derive(Serialize)]
pub struct MoveResponse {
    #[serde(flatten)]
    pub outcome: MoveOutcome,
    pub version: u64,
}

fn existing_room(state: &ServerState, name: &str) -> Result<SharedRoom, ApiError> {
    state
        .room(name)
        .ok_or_else(|| ApiError::RoomNotFound(name.to_string()))
}

/// Config carried by a `/new` body; an empty body means the server default
fn parse_config(body: &[u8], default: &GameConfig) -> Result<GameConfig, GameError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(default.clone());
    }
    serde_json::from_slice(body).map_err(|e| GameError::InvalidConfig(e.to_string()))
}

/// Create or replace a room's game; body may carry a config
pub async fn new_game(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<RoomView>, ApiError> {
    let config = parse_config(&body, state.default_config())?;
    config.validate()?;

    let room = state.room_or_create(&name)?;
    let mut room = lock_room(&room);
    room.reset(config)?;

    tracing::info!(
        "Room {}: new game for {} players x {} counters",
        name,
        room.game.config().number_of_players,
        room.game.config().counters_per_player
    );
    Ok(Json(room_view(&room)))
}

/// Discard the room's game, keeping its config
pub async fn reset_game(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
) -> Result<Json<RoomView>, ApiError> {
    let room = state.room_or_create(&name)?;
    let mut room = lock_room(&room);
    let config = room.game.config().clone();
    room.reset(config)?;

    tracing::info!("Room {}: game reset", name);
    Ok(Json(room_view(&room)))
}

/// Seat a player
pub async fn join(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
    Json(req): Json<JoinRequest>,
) -> Result<Json<RoomView>, ApiError> {
    let room = state.room_or_create(&name)?;
    let mut room = lock_room(&room);
    room.game.add_player(req.colour.clone(), req.user_id.clone())?;
    room.touch();

    tracing::info!("Room {}: {} joined as {}", name, req.user_id, req.colour);
    Ok(Json(room_view(&room)))
}

/// Roll the die for the current player
pub async fn roll(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
    Json(req): Json<UserRequest>,
) -> Result<Json<RollResponse>, ApiError> {
    let room = existing_room(&state, &name)?;
    let mut room = lock_room(&room);

    let roll = room.game.roll(&req.user_id)?;
    if !roll.fresh {
        return Err(GameError::AlreadyRolled(roll.value).into());
    }
    room.touch();

    let moves_available = room.game.check_if_moves_exist(&req.user_id)?;
    Ok(Json(RollResponse {
        value: roll.value,
        moves_available,
        version: room.version,
    }))
}

/// Move a counter by the pending die value
pub async fn make_move(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let room = existing_room(&state, &name)?;
    let mut room = lock_room(&room);

    let outcome = room.game.move_counter(&req.user_id, req.origin, &req.colour)?;
    room.touch();

    if outcome.won {
        tracing::info!("Room {}: {} wins", name, outcome.colour);
    }
    Ok(Json(MoveResponse {
        outcome,
        version: room.version,
    }))
}

/// Give up the turn when no legal move exists
pub async fn pass_turn(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
    Json(req): Json<UserRequest>,
) -> Result<Json<RoomView>, ApiError> {
    let room = existing_room(&state, &name)?;
    let mut room = lock_room(&room);
    room.game.pass_turn_if_stuck(&req.user_id)?;
    room.touch();
    Ok(Json(room_view(&room)))
}

/// Leave the game
pub async fn quit(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
    Json(req): Json<UserRequest>,
) -> Result<Json<RoomView>, ApiError> {
    let room = existing_room(&state, &name)?;
    let mut room = lock_room(&room);
    let player = room.game.remove_player(&req.user_id)?;
    room.touch();

    tracing::info!("Room {}: {} ({}) quit", name, player.user_id, player.colour);
    Ok(Json(room_view(&room)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_empty_body_uses_default() {
        let default = GameConfig::new(3, 2);
        assert_eq!(parse_config(b"", &default).unwrap(), default);
        assert_eq!(parse_config(b" \n", &default).unwrap(), default);
    }

    #[test]
    fn test_parse_config_rejects_mistyped_field() {
        let default = GameConfig::default();
        let err = parse_config(br#"{"number_of_players":"two"}"#, &default).unwrap_err();
        assert_eq!(err.kind(), "invalid_config");
    }

    #[test]
    fn test_parse_config_reads_body() {
        let config = parse_config(
            br#"{"number_of_players":2,"counters_per_player":1}"#,
            &GameConfig::default(),
        )
        .unwrap();
        assert_eq!(config.number_of_players, 2);
        assert_eq!(config.counters_per_player, 1);
    }
}
