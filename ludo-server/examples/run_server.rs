//! Example to run the LUDO server standalone
//!
//! Run with: cargo run -p ludo-server --example run_server

use ludo_core::GameConfig;
use ludo_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig {
        port: 5000,
        static_dir: "ludo/static".to_string(),
        game: GameConfig::new(2, 4),
    };

    println!("Starting LUDO server on port {}", config.port);
    println!("Static files from: {}", config.static_dir);
    println!("Open http://localhost:{}/api/status", config.port);

    run_server(config).await
}
