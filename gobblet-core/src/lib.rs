//! Gobblet rules engine: board, reserves and move legality.
//!
//! # Board Layout
//!
//! ```text
//! Cells are addressed by (x, y), x and y in 0..3.
//! x selects the row, y the column. Stored index = x * 3 + y:
//!
//!   (0,0)=0  (0,1)=1  (0,2)=2
//!   (1,0)=3  (1,1)=4  (1,2)=5
//!   (2,0)=6  (2,1)=7  (2,2)=8
//! ```
//!
//! Each cell holds at most one piece. Covering a cell replaces its occupant;
//! the covered piece is not kept underneath.
//!
//! # Legality
//!
//! ```text
//! FromStack  -> always accepted by `can_place`
//! FromBoard  -> source must be occupied, then:
//!                 empty destination       -> legal
//!                 own piece at destination -> illegal
//!                 opposing piece           -> legal iff strictly larger
//! ```
//!
//! There is no turn order and no win detection: either player may move at
//! any time and the board simply evolves move by move.

mod error;
pub mod notation;
pub mod setup;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{MoveError, NotationError, SetupError};
pub use notation::parse_moves;
pub use setup::{Placement, Setup};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    Green,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Green,
            Player::Green => Player::Red,
        }
    }

    /// Both players, Red first.
    pub fn all() -> impl Iterator<Item = Player> {
        [Player::Red, Player::Green].into_iter()
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Green => 1,
        }
    }

    /// Single-letter label used by the notation and the text board.
    pub fn letter(self) -> char {
        match self {
            Player::Red => 'R',
            Player::Green => 'G',
        }
    }

    /// Parse a player letter (case-insensitive).
    pub fn from_letter(c: char) -> Option<Player> {
        match c.to_ascii_uppercase() {
            'R' => Some(Player::Red),
            'G' => Some(Player::Green),
            _ => None,
        }
    }
}

/// Piece size.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Size {
    #[serde(rename = "S", alias = "small")]
    Small = 0,
    #[serde(rename = "M", alias = "medium")]
    Medium = 1,
    #[serde(rename = "L", alias = "large")]
    Large = 2,
}

impl Size {
    /// Check if this size can cover another size. Equal sizes never cover.
    #[inline]
    pub fn can_cover(self, other: Size) -> bool {
        self > other
    }

    /// Get all sizes as an iterator, smallest first.
    pub fn all() -> impl Iterator<Item = Size> {
        [Size::Small, Size::Medium, Size::Large].into_iter()
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Size::Small => 'S',
            Size::Medium => 'M',
            Size::Large => 'L',
        }
    }

    /// Parse a size letter (case-insensitive).
    pub fn from_letter(c: char) -> Option<Size> {
        match c.to_ascii_uppercase() {
            'S' => Some(Size::Small),
            'M' => Some(Size::Medium),
            'L' => Some(Size::Large),
            _ => None,
        }
    }
}

/// A piece on the board: who owns it and how big it is.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Player,
    pub size: Size,
}

impl Piece {
    #[inline]
    pub fn new(owner: Player, size: Size) -> Piece {
        Piece { owner, size }
    }
}

/// Position on the 3x3 board (0-8), see the module docs for the layout.
///
/// Always on the board: deserializing an index above 8 fails.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Pos(u8);

impl TryFrom<u8> for Pos {
    type Error = String;

    fn try_from(idx: u8) -> Result<Pos, String> {
        if idx < 9 {
            Ok(Pos(idx))
        } else {
            Err(format!("position {} is off the board", idx))
        }
    }
}

impl Pos {
    /// Create a position from known-good coordinates (0-2 each).
    #[inline]
    pub fn at(x: u8, y: u8) -> Pos {
        debug_assert!(x < 3 && y < 3);
        Pos(x * 3 + y)
    }

    /// Create a position from untrusted coordinates.
    /// Returns None when either coordinate is off the board.
    #[inline]
    pub fn from_xy(x: u8, y: u8) -> Option<Pos> {
        if x < 3 && y < 3 {
            Some(Pos(x * 3 + y))
        } else {
            None
        }
    }

    /// Check if this is a valid position (0-8).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 < 9
    }

    #[inline]
    pub fn x(self) -> u8 {
        self.0 / 3
    }

    #[inline]
    pub fn y(self) -> u8 {
        self.0 % 3
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all 9 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..9).map(Pos)
    }
}

/// Where a moving piece comes from.
///
/// Serialized as a tagged object:
/// `{"from":"stack","player":"red","size":"L"}` or `{"from":"board","x":0,"y":1}`.
/// `x` is the row and `y` the column, as everywhere in this crate.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(tag = "from")]
pub enum Origin {
    /// A piece about to leave `player`'s reserve.
    #[serde(rename = "stack")]
    FromStack { player: Player, size: Size },
    /// The piece currently occupying board cell (x, y).
    #[serde(rename = "board")]
    FromBoard { x: u8, y: u8 },
}

/// A complete move: an origin and a destination cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Move {
    pub origin: Origin,
    pub to: Pos,
}

impl Move {
    pub fn new(origin: Origin, to: Pos) -> Move {
        Move { origin, to }
    }
}

/// Authoritative board and reserve state for one game session.
///
/// Queries fail closed: off-board coordinates, empty source cells and
/// exhausted reserves all answer `false`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameState {
    board: [Option<Piece>; 9],
    /// Indexed by player, then size.
    inventory: [[u8; 3]; 2],
}

impl GameState {
    /// Create the standard opening: four pieces on the board and two of
    /// every size in each reserve.
    pub fn new() -> GameState {
        let mut state = GameState::empty(Setup::START_COUNT);
        for placement in setup::STANDARD_LAYOUT {
            state.board[Pos::at(placement.x, placement.y).index()] =
                Some(Piece::new(placement.player, placement.size));
        }
        state
    }

    /// Create an empty board with `start_count` pieces of every size in each reserve.
    pub fn empty(start_count: u8) -> GameState {
        GameState {
            board: [None; 9],
            inventory: [[start_count; 3]; 2],
        }
    }

    /// Create a state from a validated setup.
    pub fn from_setup(setup: &Setup) -> Result<GameState, SetupError> {
        setup.validate()?;
        let mut state = GameState::empty(setup.start_count);
        for placement in &setup.pieces {
            state.board[Pos::at(placement.x, placement.y).index()] =
                Some(Piece::new(placement.player, placement.size));
        }
        Ok(state)
    }

    // ========== Render Queries ==========

    /// Current occupant of (x, y). None for empty or off-board cells.
    #[inline]
    pub fn occupant(&self, x: u8, y: u8) -> Option<Piece> {
        Pos::from_xy(x, y).and_then(|pos| self.piece_at(pos))
    }

    #[inline]
    pub fn piece_at(&self, pos: Pos) -> Option<Piece> {
        self.board.get(pos.index()).copied().flatten()
    }

    /// Iterate over every cell with its occupant.
    pub fn cells(&self) -> impl Iterator<Item = (Pos, Option<Piece>)> + '_ {
        Pos::all().map(move |pos| (pos, self.piece_at(pos)))
    }

    /// Remaining unplaced pieces of `size` in `player`'s reserve.
    #[inline]
    pub fn inventory(&self, player: Player, size: Size) -> u8 {
        self.inventory[player.index()][size.index()]
    }

    /// Reserve counts for a player as [small, medium, large].
    #[inline]
    pub fn reserves(&self, player: Player) -> [u8; 3] {
        self.inventory[player.index()]
    }

    /// Count pieces of each size on the board for a player.
    /// Returns [small_count, medium_count, large_count].
    pub fn pieces_on_board(&self, player: Player) -> [u8; 3] {
        let mut counts = [0u8; 3];
        for piece in self.board.iter().flatten() {
            if piece.owner == player {
                counts[piece.size.index()] += 1;
            }
        }
        counts
    }

    /// Number of occupied cells.
    pub fn board_piece_count(&self) -> usize {
        self.board.iter().flatten().count()
    }

    // ========== Drag / Drop Queries ==========

    /// The piece an origin would move, if any.
    pub fn moving_piece(&self, origin: Origin) -> Option<Piece> {
        match origin {
            Origin::FromStack { player, size } => Some(Piece::new(player, size)),
            Origin::FromBoard { x, y } => self.occupant(x, y),
        }
    }

    /// Can the piece described by `origin` legally occupy (to_x, to_y)?
    pub fn can_place(&self, origin: Origin, to_x: u8, to_y: u8) -> bool {
        match Pos::from_xy(to_x, to_y) {
            Some(to) => self.can_place_at(origin, to),
            None => false,
        }
    }

    /// [`GameState::can_place`] for an already validated destination.
    pub fn can_place_at(&self, origin: Origin, to: Pos) -> bool {
        if !to.is_valid() {
            return false;
        }
        let mover = match origin {
            // Reserve drops skip the size check against the occupant.
            Origin::FromStack { .. } => return true,
            Origin::FromBoard { x, y } => match self.occupant(x, y) {
                Some(piece) => piece,
                None => return false,
            },
        };

        match self.piece_at(to) {
            None => true,
            Some(target) if target.owner == mover.owner => false,
            Some(target) => mover.size.can_cover(target.size),
        }
    }

    /// Any occupied cell may be picked up, whichever player owns it.
    #[inline]
    pub fn can_drag_from_board(&self, x: u8, y: u8) -> bool {
        self.occupant(x, y).is_some()
    }

    #[inline]
    pub fn can_drag_from_stack(&self, player: Player, size: Size) -> bool {
        self.inventory(player, size) > 0
    }

    /// Drag query for either kind of origin.
    pub fn can_drag(&self, origin: Origin) -> bool {
        match origin {
            Origin::FromStack { player, size } => self.can_drag_from_stack(player, size),
            Origin::FromBoard { x, y } => self.can_drag_from_board(x, y),
        }
    }

    // ========== Move Enumeration ==========

    /// Every destination `origin` may drop onto. Empty when the origin
    /// cannot be dragged in the first place.
    pub fn legal_targets(&self, origin: Origin) -> Vec<Pos> {
        if !self.can_drag(origin) {
            return Vec::new();
        }
        Pos::all().filter(|&to| self.can_place_at(origin, to)).collect()
    }

    /// Every draggable origin: reserve pieces first (Red, then Green,
    /// smallest first), then occupied cells in index order.
    pub fn origins(&self) -> Vec<Origin> {
        let mut origins = Vec::with_capacity(6 + 9);
        for player in Player::all() {
            for size in Size::all() {
                if self.can_drag_from_stack(player, size) {
                    origins.push(Origin::FromStack { player, size });
                }
            }
        }
        for (pos, piece) in self.cells() {
            if piece.is_some() {
                origins.push(Origin::FromBoard { x: pos.x(), y: pos.y() });
            }
        }
        origins
    }

    /// Every (origin, destination) pair the engine would accept, for both
    /// players.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.origins()
            .into_iter()
            .flat_map(|origin| {
                self.legal_targets(origin)
                    .into_iter()
                    .map(move |to| Move::new(origin, to))
            })
            .collect()
    }

    // ========== Mutation ==========

    /// Validate and commit a move. On error the state is unchanged.
    pub fn try_apply_move(&mut self, origin: Origin, to_x: u8, to_y: u8) -> Result<(), MoveError> {
        let to = Pos::from_xy(to_x, to_y).ok_or(MoveError::OutOfBounds { x: to_x, y: to_y })?;

        match origin {
            Origin::FromBoard { x, y } => {
                let from = Pos::from_xy(x, y).ok_or(MoveError::OutOfBounds { x, y })?;
                let piece = self.piece_at(from).ok_or(MoveError::EmptySource { x, y })?;
                if !self.can_place_at(origin, to) {
                    return Err(MoveError::Illegal { origin, to });
                }
                self.board[to.index()] = Some(piece);
                self.board[from.index()] = None;
            }
            Origin::FromStack { player, size } => {
                if !self.can_drag_from_stack(player, size) {
                    return Err(MoveError::ReserveExhausted { player, size });
                }
                self.board[to.index()] = Some(Piece::new(player, size));
                self.inventory[player.index()][size.index()] -= 1;
            }
        }
        Ok(())
    }

    /// Commit a move the caller already gated on [`GameState::can_place`].
    ///
    /// # Panics
    ///
    /// Panics if the move is one [`GameState::try_apply_move`] rejects
    /// (off-board cell, empty source, exhausted reserve, illegal cover).
    /// The state is left untouched before panicking.
    pub fn apply_move(&mut self, origin: Origin, to_x: u8, to_y: u8) {
        if let Err(err) = self.try_apply_move(origin, to_x, to_y) {
            panic!("apply_move called with an unvalidated move: {err}");
        }
    }

    /// Apply a parsed [`Move`].
    pub fn try_apply(&mut self, mov: Move) -> Result<(), MoveError> {
        self.try_apply_move(mov.origin, mov.to.x(), mov.to.y())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    /// Text board with rows by x, columns by y, then one reserve line per player.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    0  1  2")?;
        for x in 0..3u8 {
            write!(f, "{} ", x)?;
            for y in 0..3u8 {
                match self.occupant(x, y) {
                    Some(piece) => write!(f, " {}{}", piece.owner.letter(), piece.size.letter())?,
                    None => write!(f, "  .")?,
                }
            }
            writeln!(f)?;
        }
        for player in Player::all() {
            let [s, m, l] = self.reserves(player);
            writeln!(f, "{:<6} S:{} M:{} L:{}", format!("{:?}", player), s, m, l)?;
        }
        Ok(())
    }
}
