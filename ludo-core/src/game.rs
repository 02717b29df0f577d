//! Game state, move legality and move resolution

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::board::{is_safe_zone, Board, Colour, FINISH, HOME_ZONE, ZONE_COUNT};
use crate::config::GameConfig;
use crate::dice::{DieSource, RandomDie};
use crate::error::{GameError, IllegalMoveReason};
use crate::player::{Player, TurnQueue};
use crate::snapshot::GameSnapshot;

// ============================================================================
// OUTCOME TYPES
// ============================================================================

/// Result of a roll request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DieRoll {
    pub value: u8,
    /// False when an unconsumed value was returned unchanged
    pub fresh: bool,
}

/// One counter sent home by a move
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Capture {
    pub owner: Colour,
    pub zone: usize,
}

/// Result of a successful move
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub colour: Colour,
    pub origin: usize,
    pub target: usize,
    /// Counter left the track
    pub finished: bool,
    pub captures: Vec<Capture>,
    /// Mover now has every counter finished
    pub won: bool,
    /// Colour whose turn it is now
    pub next: Option<Colour>,
}

// ============================================================================
// GAME STATE
// ============================================================================

/// One game instance: board, turn queue and finished tally
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    board: Board,
    turns: TurnQueue,
    finished: FxHashMap<Colour, usize>,
    die: Box<dyn DieSource>,
    /// Completed turns (moves and passes)
    turns_taken: u64,
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create an empty game with a random die seeded from the config
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let die = Box::new(RandomDie::new(config.seed));
        Self::with_die(config, die)
    }

    /// Create an empty game with a custom die source
    pub fn with_die(config: GameConfig, die: Box<dyn DieSource>) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            board: Board::new(),
            turns: TurnQueue::new(),
            finished: FxHashMap::default(),
            die,
            turns_taken: 0,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Players in turn order, current first
    pub fn players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.turns.iter()
    }

    pub fn player_count(&self) -> usize {
        self.turns.len()
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.turns.current()
    }

    /// Counters of `colour` that have left the track
    pub fn finished_count(&self, colour: &Colour) -> usize {
        self.finished.get(colour).copied().unwrap_or(0)
    }

    pub fn turns_taken(&self) -> u64 {
        self.turns_taken
    }

    /// Read-only copy for presentation
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_game(self)
    }

    // ========================================================================
    // SEATING
    // ========================================================================

    /// Seat a player and put their counters in the home zone
    pub fn add_player(
        &mut self,
        colour: impl Into<Colour>,
        user_id: impl Into<String>,
    ) -> Result<(), GameError> {
        let player = Player::new(colour, user_id);

        if self.turns.find_by_user(&player.user_id).is_some() {
            return Err(GameError::AlreadyJoined(player.user_id));
        }
        if self.turns.find_by_colour(&player.colour).is_some() {
            return Err(GameError::ColourTaken(player.colour));
        }
        if self.turns.len() >= self.config.number_of_players {
            return Err(GameError::GameFull);
        }

        for _ in 0..self.config.counters_per_player {
            self.board.place(&player.colour, HOME_ZONE)?;
        }

        tracing::debug!("{} joined as {}", player.user_id, player.colour);
        self.turns.push(player);
        Ok(())
    }

    /// Remove a player and every trace of their counters
    pub fn remove_player(&mut self, user_id: &str) -> Result<Player, GameError> {
        let player = self
            .turns
            .remove(user_id)
            .ok_or_else(|| GameError::UnknownPlayer(user_id.to_string()))?;

        let removed = self.board.remove_all(&player.colour);
        self.finished.remove(&player.colour);

        tracing::debug!(
            "{} ({}) left; {} counters removed from the board",
            player.user_id,
            player.colour,
            removed
        );
        Ok(player)
    }

    // ========================================================================
    // TURN ACTIONS
    // ========================================================================

    /// Roll for the current player; idempotent while a value is pending
    pub fn roll(&mut self, user_id: &str) -> Result<DieRoll, GameError> {
        self.ensure_current(user_id)?;

        let pending = self.pending_die();
        if pending != 0 {
            return Ok(DieRoll {
                value: pending,
                fresh: false,
            });
        }

        let value = self.die.next_face();
        let player = self.turns.current_mut().ok_or(GameError::NoPlayers)?;
        player.die = value;
        tracing::debug!("{} rolled {}", player.colour, value);

        Ok(DieRoll { value, fresh: true })
    }

    /// Move one `colour` counter from `origin` by the pending die value
    pub fn move_counter(
        &mut self,
        user_id: &str,
        origin: usize,
        colour: &Colour,
    ) -> Result<MoveOutcome, GameError> {
        self.ensure_current(user_id)?;
        let target = self.validate_move(origin, colour)?;

        let captures = self.collect_captures(colour, origin, target);

        // Work on a copy so a failure part-way leaves the game untouched
        let mut board = self.board.clone();
        board.remove(colour, origin)?;
        for capture in &captures {
            board.remove(&capture.owner, capture.zone)?;
            board.place(&capture.owner, HOME_ZONE)?;
        }
        let finished = target == FINISH;
        if !finished {
            board.place(colour, target)?;
        }
        self.board = board;

        if finished {
            *self.finished.entry(colour.clone()).or_insert(0) += 1;
        }
        for capture in &captures {
            tracing::debug!(
                "{} captured {} at zone {}",
                colour,
                capture.owner,
                capture.zone
            );
        }
        tracing::debug!("{} moved {} -> {}", colour, origin, target);

        let won = self.check_win(colour);
        if won {
            tracing::info!("{} has finished every counter", colour);
        }

        self.end_turn();

        Ok(MoveOutcome {
            colour: colour.clone(),
            origin,
            target,
            finished,
            captures,
            won,
            next: self.current_player().map(|p| p.colour.clone()),
        })
    }

    /// Hand the turn on when the current player has rolled but cannot move
    pub fn pass_turn_if_stuck(&mut self, user_id: &str) -> Result<(), GameError> {
        self.ensure_current(user_id)?;
        if self.pending_die() == 0 {
            return Err(GameError::NoRollYet);
        }
        if !self.legal_moves().is_empty() {
            return Err(GameError::MovesAvailable);
        }

        if let Some(player) = self.current_player() {
            tracing::debug!("{} has no legal move with {}; passing", player.colour, player.die);
        }
        self.end_turn();
        Ok(())
    }

    // ========================================================================
    // LEGALITY
    // ========================================================================

    /// Check a move for the current player; returns the target on success
    ///
    /// Pure: never mutates, safe to call repeatedly.
    pub fn validate_move(&self, origin: usize, colour: &Colour) -> Result<usize, GameError> {
        let current = self.turns.current().ok_or(GameError::NoPlayers)?;

        if &current.colour != colour {
            return match self.turns.find_by_colour(colour) {
                Some(_) => Err(GameError::NotYourTurn),
                None => Err(GameError::UnknownColour(colour.clone())),
            };
        }
        if current.die == 0 {
            return Err(GameError::NoRollYet);
        }

        let has_counter = self
            .board
            .zone(origin)
            .map_or(false, |zone| zone.count(colour) > 0);
        if !has_counter {
            return Err(GameError::IllegalMove(IllegalMoveReason::NoCounter));
        }

        let target = origin + current.die as usize;
        if target > FINISH {
            return Err(GameError::IllegalMove(IllegalMoveReason::Overshoot));
        }
        if let Some(zone) = self.board.first_block(colour, origin, target) {
            return Err(GameError::IllegalMove(IllegalMoveReason::Blocked { zone }));
        }

        Ok(target)
    }

    pub fn is_legal_move(&self, origin: usize, colour: &Colour) -> bool {
        self.validate_move(origin, colour).is_ok()
    }

    /// Origins from which the current player can legally move
    pub fn legal_moves(&self) -> Vec<usize> {
        let Some(current) = self.turns.current() else {
            return Vec::new();
        };
        self.board
            .positions_of(&current.colour)
            .filter(|&origin| self.is_legal_move(origin, &current.colour))
            .collect()
    }

    /// Whether `user_id` has any legal move right now
    ///
    /// Only the current player with a pending roll can ever have one.
    pub fn check_if_moves_exist(&self, user_id: &str) -> Result<bool, GameError> {
        let player = self
            .turns
            .find_by_user(user_id)
            .ok_or_else(|| GameError::UnknownPlayer(user_id.to_string()))?;
        let is_current = self.turns.current().map(|p| p.user_id.as_str()) == Some(user_id);
        Ok(is_current && player.has_rolled() && !self.legal_moves().is_empty())
    }

    // ========================================================================
    // WIN DETECTION
    // ========================================================================

    /// True once every counter of `colour` has finished
    pub fn check_win(&self, colour: &Colour) -> bool {
        self.finished_count(colour) == self.config.counters_per_player
    }

    /// Seated colours that have won, in turn order
    pub fn winners(&self) -> Vec<Colour> {
        self.turns
            .iter()
            .filter(|p| self.check_win(&p.colour))
            .map(|p| p.colour.clone())
            .collect()
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn pending_die(&self) -> u8 {
        self.turns.current().map_or(0, |p| p.die)
    }

    fn ensure_current(&self, user_id: &str) -> Result<(), GameError> {
        let current = self.turns.current().ok_or(GameError::NoPlayers)?;
        if current.user_id == user_id {
            return Ok(());
        }
        match self.turns.find_by_user(user_id) {
            Some(_) => Err(GameError::NotYourTurn),
            None => Err(GameError::UnknownPlayer(user_id.to_string())),
        }
    }

    /// Opposing counters on non-safe zones strictly between origin and target
    fn collect_captures(&self, mover: &Colour, origin: usize, target: usize) -> Vec<Capture> {
        let mut captures = Vec::new();
        for index in origin + 1..target.min(ZONE_COUNT) {
            if is_safe_zone(index) {
                continue;
            }
            let Some(zone) = self.board.zone(index) else {
                continue;
            };
            for (owner, n) in zone.owners() {
                if owner != mover {
                    let capture = Capture {
                        owner: owner.clone(),
                        zone: index,
                    };
                    captures.extend(std::iter::repeat(capture).take(n));
                }
            }
        }
        captures
    }

    fn end_turn(&mut self) {
        if let Some(player) = self.turns.current_mut() {
            player.reset_die();
        }
        self.turns.advance();
        self.turns_taken += 1;
    }
}

// ============================================================================
// TESTS
// ============================================================================
