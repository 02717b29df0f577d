//! Engine error types
//!
//! Every error means "request rejected, state unchanged".

use crate::board::Colour;

/// Why a move was judged illegal
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMoveReason {
    /// Target would be past the finish
    #[error("move would overshoot the finish")]
    Overshoot,
    /// A zone on the path holds two or more counters not all the mover's
    #[error("path is blocked at zone {zone}")]
    Blocked { zone: usize },
    /// Origin zone holds no counter of the moving colour
    #[error("no counter of that colour at origin")]
    NoCounter,
}

/// Board-level logic errors; unreachable through validated engine calls
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("zone {0} is not on the track")]
    ZoneOutOfRange(usize),

    #[error("no {owner} counter in zone {zone}")]
    NoSuchCounter { owner: Colour, zone: usize },
}

/// Errors returned by engine operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("it is not your turn")]
    NotYourTurn,

    #[error("die already rolled: {0}")]
    AlreadyRolled(u8),

    #[error("roll the die before moving")]
    NoRollYet,

    #[error("illegal move: {0}")]
    IllegalMove(IllegalMoveReason),

    #[error("unknown colour: {0}")]
    UnknownColour(Colour),

    #[error("game is full")]
    GameFull,

    #[error("colour already taken: {0}")]
    ColourTaken(Colour),

    #[error("user already joined: {0}")]
    AlreadyJoined(String),

    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    #[error("no players in the game")]
    NoPlayers,

    #[error("a legal move exists; the turn cannot be passed")]
    MovesAvailable,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("board error: {0}")]
    Board(#[from] BoardError),
}

impl GameError {
    /// Stable machine-readable name
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::NotYourTurn => "not_your_turn",
            GameError::AlreadyRolled(_) => "already_rolled",
            GameError::NoRollYet => "no_roll_yet",
            GameError::IllegalMove(_) => "illegal_move",
            GameError::UnknownColour(_) => "unknown_colour",
            GameError::GameFull => "game_full",
            GameError::ColourTaken(_) => "colour_taken",
            GameError::AlreadyJoined(_) => "already_joined",
            GameError::UnknownPlayer(_) => "unknown_player",
            GameError::NoPlayers => "no_players",
            GameError::MovesAvailable => "moves_available",
            GameError::InvalidConfig(_) => "invalid_config",
            GameError::Board(_) => "board",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_display() {
        let err = GameError::IllegalMove(IllegalMoveReason::Blocked { zone: 9 });
        assert_eq!(err.to_string(), "illegal move: path is blocked at zone 9");
    }

    #[test]
    fn test_illegal_move_reasons_display() {
        assert_eq!(
            IllegalMoveReason::Overshoot.to_string(),
            "move would overshoot the finish"
        );
        assert_eq!(
            IllegalMoveReason::NoCounter.to_string(),
            "no counter of that colour at origin"
        );
    }

    #[test]
    fn test_colour_taken_display() {
        let err = GameError::ColourTaken(Colour::from("red"));
        assert_eq!(err.to_string(), "colour already taken: red");
        assert_eq!(err.kind(), "colour_taken");
    }

    #[test]
    fn test_board_error_converts() {
        let err: GameError = BoardError::ZoneOutOfRange(30).into();
        assert_eq!(err.to_string(), "board error: zone 30 is not on the track");
    }
}
