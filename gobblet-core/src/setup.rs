//! Starting position configuration.
//!
//! A setup is the reserve size per piece size plus a list of pre-placed
//! pieces. Reserves are not reduced by pre-placed pieces.
//!
//! ```toml
//! start_count = 2
//!
//! [[pieces]]
//! x = 0
//! y = 0
//! player = "red"
//! size = "M"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Player, Size, SetupError};

/// One pre-placed piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Placement {
    pub x: u8,
    pub y: u8,
    pub player: Player,
    pub size: Size,
}

impl Placement {
    pub const fn new(x: u8, y: u8, player: Player, size: Size) -> Placement {
        Placement { x, y, player, size }
    }
}

/// The opening used by [`crate::GameState::new`].
pub(crate) const STANDARD_LAYOUT: [Placement; 4] = [
    Placement::new(0, 0, Player::Red, Size::Medium),
    Placement::new(1, 0, Player::Green, Size::Large),
    Placement::new(1, 1, Player::Green, Size::Small),
    Placement::new(2, 0, Player::Red, Size::Small),
];

/// Starting board and reserves, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Setup {
    /// Pieces of each size in each player's reserve.
    pub start_count: u8,
    pub pieces: Vec<Placement>,
}

impl Default for Setup {
    fn default() -> Self {
        Setup::standard()
    }
}

impl Setup {
    /// Reserve size per piece size in the standard game.
    pub const START_COUNT: u8 = 2;

    /// The standard opening.
    pub fn standard() -> Setup {
        Setup {
            start_count: Self::START_COUNT,
            pieces: STANDARD_LAYOUT.to_vec(),
        }
    }

    /// An empty board with full reserves.
    pub fn empty() -> Setup {
        Setup {
            start_count: Self::START_COUNT,
            pieces: Vec::new(),
        }
    }

    /// Parse and validate a setup from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SetupError> {
        let setup: Setup = toml::from_str(content)?;
        setup.validate()?;
        Ok(setup)
    }

    /// Load a setup from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SetupError> {
        let content = std::fs::read_to_string(path).map_err(|e| SetupError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Every placement must be on the board and no cell may be listed twice.
    pub fn validate(&self) -> Result<(), SetupError> {
        let mut seen = [false; 9];
        for placement in &self.pieces {
            let (x, y) = (placement.x, placement.y);
            if x >= 3 || y >= 3 {
                return Err(SetupError::OutOfBounds { x, y });
            }
            let idx = (x * 3 + y) as usize;
            if seen[idx] {
                return Err(SetupError::DuplicateCell { x, y });
            }
            seen[idx] = true;
        }
        Ok(())
    }
}
