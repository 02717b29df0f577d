//! LUDO Core - Game-state engine
//!
//! This crate provides the core game logic for LUDO:
//! - Track geometry (28 zones, safe zones, finish sink)
//! - Counter occupancy and atomic relocation
//! - Turn queue and per-player pending die
//! - Move legality, capture resolution and win detection
//! - Read-only snapshots for presentation layers

pub mod board;
pub mod config;
pub mod dice;
pub mod error;
pub mod game;
pub mod player;
pub mod snapshot;

// Re-exports for convenient access
pub use board::{Board, Colour, Zone, FINISH, HOME_ZONE, SAFE_INTERVAL, ZONE_COUNT};
pub use config::GameConfig;
pub use dice::{DieSource, RandomDie, ScriptedDie, DIE_FACES};
pub use error::{GameError, IllegalMoveReason};
pub use game::{Capture, DieRoll, Game, MoveOutcome};
pub use player::{Player, TurnQueue};
pub use snapshot::{GameSnapshot, PlayerView, ZoneView};
