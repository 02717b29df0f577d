//! `ludo serve` - host game rooms over HTTP

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use ludo_server::{run_server, ServerConfig};

use crate::GameArgs;

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "5000")]
    pub port: u16,

    /// Directory holding the board UI assets
    #[arg(long, default_value = "ludo/static")]
    pub static_dir: PathBuf,

    /// Game shape used when a room is created without a config
    #[command(flatten)]
    pub game: GameArgs,
}

pub fn run(args: ServerArgs, seed: Option<u64>) -> Result<()> {
    let config = server_config(&args, seed)?;
    tracing::info!(
        "Serving rooms on port {} (default game: {} players x {} counters)",
        config.port,
        config.game.number_of_players,
        config.game.counters_per_player
    );

    tokio::runtime::Runtime::new()?.block_on(run_server(config))
}

fn server_config(args: &ServerArgs, seed: Option<u64>) -> Result<ServerConfig> {
    check_static_dir(&args.static_dir)?;
    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().into_owned(),
        game: args.game.to_config(seed)?,
    })
}

/// A missing asset directory only disables the UI; a file in its place is an error
fn check_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!("No UI assets at {}; only the API will be served", path.display());
    } else if !path.is_dir() {
        anyhow::bail!("{} is not a directory", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(players: usize) -> ServerArgs {
        ServerArgs {
            port: 5000,
            static_dir: PathBuf::from("test_static"),
            game: GameArgs {
                players,
                counters: 4,
                config: None,
            },
        }
    }

    #[test]
    fn test_server_config_defaults() {
        let config = server_config(&args(2), None).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.static_dir, "test_static");
        assert_eq!(config.game.number_of_players, 2);
        assert_eq!(config.game.seed, None);
    }

    #[test]
    fn test_server_config_carries_seed() {
        let config = server_config(&args(3), Some(4)).unwrap();
        assert_eq!(config.game.seed, Some(4));
    }

    #[test]
    fn test_server_config_invalid_game() {
        assert!(server_config(&args(1), None).is_err());
    }

    #[test]
    fn test_missing_static_dir_is_allowed() {
        assert!(check_static_dir(Path::new("/nonexistent/path")).is_ok());
    }

    #[test]
    fn test_static_path_must_be_a_directory() {
        let file = std::env::temp_dir().join(format!("ludo-static-{}", std::process::id()));
        std::fs::write(&file, "not a dir").unwrap();
        let result = check_static_dir(&file);
        std::fs::remove_file(&file).unwrap();
        assert!(result.is_err());
    }
}
