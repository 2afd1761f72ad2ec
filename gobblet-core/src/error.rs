use std::path::PathBuf;

use crate::{Origin, Player, Pos, Size};

/// Why a move was refused by [`crate::GameState::try_apply_move`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell ({x},{y}) is off the board")]
    OutOfBounds { x: u8, y: u8 },

    #[error("no piece to pick up at ({x},{y})")]
    EmptySource { x: u8, y: u8 },

    #[error("{player:?} has no {size:?} pieces left")]
    ReserveExhausted { player: Player, size: Size },

    #[error("cannot move {origin} onto {to}")]
    Illegal { origin: Origin, to: Pos },
}

/// Errors that can occur when loading a starting setup.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("failed to read setup file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("placement ({x},{y}) is off the board")]
    OutOfBounds { x: u8, y: u8 },

    #[error("cell ({x},{y}) is listed more than once")]
    DuplicateCell { x: u8, y: u8 },
}

/// Errors from parsing move notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("empty move")]
    Empty,

    #[error("unknown player '{0}' (expected R or G)")]
    InvalidPlayer(char),

    #[error("unknown size '{0}' (expected S, M or L)")]
    InvalidSize(char),

    #[error("bad coordinates '{0}' (expected (x,y) with x and y in 0..3)")]
    InvalidCoords(String),

    #[error("unrecognized move '{0}'")]
    Unrecognized(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::ReserveExhausted {
            player: Player::Red,
            size: Size::Large,
        };
        assert_eq!(err.to_string(), "Red has no Large pieces left");

        let err = MoveError::Illegal {
            origin: Origin::FromBoard { x: 0, y: 0 },
            to: Pos::at(1, 0),
        };
        assert_eq!(err.to_string(), "cannot move (0,0) onto (1,0)");
    }

    #[test]
    fn test_setup_error_display() {
        let err = SetupError::DuplicateCell { x: 1, y: 2 };
        assert_eq!(err.to_string(), "cell (1,2) is listed more than once");
    }

    #[test]
    fn test_notation_error_display() {
        assert_eq!(
            NotationError::InvalidSize('X').to_string(),
            "unknown size 'X' (expected S, M or L)"
        );
    }
}
