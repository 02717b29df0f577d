//! Track geometry endpoint

use axum::Json;
use ludo_core::{board::is_safe_zone, DIE_FACES, FINISH, HOME_ZONE, ZONE_COUNT};
use serde::Serialize;

#[derive(Serialize)]
pub struct BoardInfo {
    pub zones: usize,
    pub home: usize,
    pub finish: usize,
    pub safe_zones: Vec<usize>,
    pub die_faces: u8,
}

/// Get track geometry
pub async fn get_board() -> Json<BoardInfo> {
    Json(BoardInfo {
        zones: ZONE_COUNT,
        home: HOME_ZONE,
        finish: FINISH,
        safe_zones: (1..ZONE_COUNT).filter(|&i| is_safe_zone(i)).collect(),
        die_faces: DIE_FACES,
    })
}
