//! Server state management
//!
//! One `Room` per game; each room owns its `Game` outright and is guarded by
//! its own mutex, held for exactly one engine operation.

use ludo_core::{Game, GameConfig, GameError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// A game room
#[derive(Debug)]
pub struct Room {
    pub game: Game,
    /// Bumped on every state change; pollers compare against it
    pub version: u64,
}

impl Room {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Ok(Self {
            game: Game::new(config)?,
            version: 0,
        })
    }

    /// Record a state change
    pub fn touch(&mut self) {
        self.version += 1;
    }

    /// Discard the game and start a fresh, playerless one
    pub fn reset(&mut self, config: GameConfig) -> Result<(), GameError> {
        self.game = Game::new(config)?;
        self.touch();
        Ok(())
    }
}

pub type SharedRoom = Arc<Mutex<Room>>;

/// Lock a room; engine operations never leave a half-applied state behind
pub fn lock_room(room: &SharedRoom) -> MutexGuard<'_, Room> {
    room.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Server-wide shared state
pub struct ServerState {
    rooms: RwLock<HashMap<String, SharedRoom>>,
    default_config: GameConfig,
}

impl ServerState {
    pub fn new(default_config: GameConfig) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            default_config,
        }
    }

    pub fn default_config(&self) -> &GameConfig {
        &self.default_config
    }

    /// Look up an existing room
    pub fn room(&self, name: &str) -> Option<SharedRoom> {
        let rooms = self.rooms.read().unwrap_or_else(PoisonError::into_inner);
        rooms.get(name).cloned()
    }

    /// Look up a room, creating it with the default config if missing
    pub fn room_or_create(&self, name: &str) -> Result<SharedRoom, GameError> {
        if let Some(room) = self.room(name) {
            return Ok(room);
        }

        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(room) = rooms.get(name) {
            return Ok(room.clone());
        }
        let room = Arc::new(Mutex::new(Room::new(self.default_config.clone())?));
        rooms.insert(name.to_string(), room.clone());
        tracing::info!("Created room {}", name);
        Ok(room)
    }

    /// Names of all rooms
    pub fn room_names(&self) -> Vec<String> {
        let rooms = self.rooms.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = rooms.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
