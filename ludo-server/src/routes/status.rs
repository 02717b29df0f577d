//! Status endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::state::ServerState;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub rooms: Vec<String>,
}

pub async fn status_handler(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        rooms: state.room_names(),
    })
}
