//! Game configuration
//!
//! Supplied once when a game instance is created; immutable afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::GameError;

/// Fewest players a game can be configured for
pub const MIN_PLAYERS: usize = 2;
/// Most players a game can be configured for
pub const MAX_PLAYERS: usize = 4;
/// Most counters each player may own
pub const MAX_COUNTERS: usize = 16;

/// Per-game configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seats available in the turn queue
    pub number_of_players: usize,
    /// Counters each player brings to zone 0 on joining
    pub counters_per_player: usize,
    /// Die seed for reproducible games (None = entropy)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            number_of_players: 4,
            counters_per_player: 4,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(number_of_players: usize, counters_per_player: usize) -> Self {
        Self {
            number_of_players,
            counters_per_player,
            seed: None,
        }
    }

    /// Set die seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Total counters in a full game
    pub fn total_counters(&self) -> usize {
        self.number_of_players * self.counters_per_player
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.number_of_players) {
            return Err(GameError::InvalidConfig(format!(
                "number_of_players must be between {} and {}, got {}",
                MIN_PLAYERS, MAX_PLAYERS, self.number_of_players
            )));
        }
        if !(1..=MAX_COUNTERS).contains(&self.counters_per_player) {
            return Err(GameError::InvalidConfig(format!(
                "counters_per_player must be between 1 and {}, got {}",
                MAX_COUNTERS, self.counters_per_player
            )));
        }
        Ok(())
    }

    /// Load from JSON file and validate
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_counters(), 16);
    }

    #[test]
    fn test_player_bounds() {
        assert!(GameConfig::new(1, 4).validate().is_err());
        assert!(GameConfig::new(2, 4).validate().is_ok());
        assert!(GameConfig::new(4, 4).validate().is_ok());
        assert!(GameConfig::new(5, 4).validate().is_err());
    }

    #[test]
    fn test_counter_bounds() {
        assert!(GameConfig::new(2, 0).validate().is_err());
        assert!(GameConfig::new(2, 1).validate().is_ok());
        assert!(GameConfig::new(2, MAX_COUNTERS + 1).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"counters_per_player": 2}"#).unwrap();
        assert_eq!(config.number_of_players, 4);
        assert_eq!(config.counters_per_player, 2);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_load_rejects_invalid() {
        let path = std::env::temp_dir().join("ludo_config_invalid_test.json");
        std::fs::write(&path, r#"{"number_of_players": 9}"#).unwrap();
        assert!(GameConfig::load(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
