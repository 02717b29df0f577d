//! LUDO Server - HTTP API around the game engine
//!
//! This crate provides the web backend:
//! - Per-room game instances with explicit ownership
//! - One request maps to one engine call
//! - Long-poll view updates for clients
//! - Static file serving for the board UI

mod error;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use ludo_core::GameConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;

pub use error::ApiError;
pub use state::{Room, ServerState};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    /// Config for rooms created implicitly by a join
    pub game: GameConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            static_dir: "ludo/static".to_string(),
            game: GameConfig::default(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Track geometry
        .route("/api/board", get(routes::board::get_board))
        // Room views
        .route("/api/rooms/:room", get(routes::view::get_room))
        .route("/api/rooms/:room/poll", get(routes::view::poll_room))
        // Game lifecycle
        .route("/api/rooms/:room/new", post(routes::game::new_game))
        .route("/api/rooms/:room/reset", post(routes::game::reset_game))
        .route("/api/rooms/:room/join", post(routes::game::join))
        .route("/api/rooms/:room/quit", post(routes::game::quit))
        // Turn actions
        .route("/api/rooms/:room/roll", post(routes::game::roll))
        .route("/api/rooms/:room/move", post(routes::game::make_move))
        .route("/api/rooms/:room/pass", post(routes::game::pass_turn))
        // Shared state
        .with_state(state)
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    config.game.validate()?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new(config.game.clone()));
    let router = create_router(&config, state);

    tracing::info!("LUDO Server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);
    tracing::info!(
        "Default game: {} players x {} counters",
        config.game.number_of_players,
        config.game.counters_per_player
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
