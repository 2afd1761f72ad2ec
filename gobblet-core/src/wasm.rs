//! WASM bindings for gobblet-core
//!
//! Exposes one game session to the drag-and-drop frontend. Origins cross the
//! boundary as tagged objects:
//! `{ from: "stack", player: "red", size: "L" }` or `{ from: "board", x, y }`.
//!
//! Coordinates: `x` is the ROW and `y` the COLUMN, and `board()[x][y]` is the
//! cell at (x, y). A frontend that indexes `board[y][x]` with `x` as the
//! column must swap its coordinates before calling in.
//!
//! Names are case-sensitive everywhere: players are "red" / "green", sizes
//! are "S" / "M" / "L" (or "small" / "medium" / "large").

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{GameState, Origin, Piece, Player, Setup, Size};

/// WASM-friendly wrapper around GameState
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameState,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game in the standard opening
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { inner: GameState::new() }
    }

    /// Create a game from a TOML setup
    #[wasm_bindgen(js_name = fromSetup)]
    pub fn from_setup(toml: &str) -> Result<WasmGame, JsError> {
        let setup = Setup::from_toml(toml)?;
        Ok(WasmGame { inner: GameState::from_setup(&setup)? })
    }

    /// Can the dragged item land on (toX, toY)? Malformed items answer false.
    #[wasm_bindgen(js_name = canPlace)]
    pub fn can_place(&self, origin: JsValue, to_x: u8, to_y: u8) -> bool {
        match parse_origin(origin) {
            Some(origin) => self.inner.can_place(origin, to_x, to_y),
            None => false,
        }
    }

    #[wasm_bindgen(js_name = canDragFromBoard)]
    pub fn can_drag_from_board(&self, x: u8, y: u8) -> bool {
        self.inner.can_drag_from_board(x, y)
    }

    /// Player is "red" or "green", size is "S", "M" or "L"
    #[wasm_bindgen(js_name = canDragFromStack)]
    pub fn can_drag_from_stack(&self, player: &str, size: &str) -> bool {
        match (parse_player(player), parse_size(size)) {
            (Some(player), Some(size)) => self.inner.can_drag_from_stack(player, size),
            _ => false,
        }
    }

    /// Commit a drop. Returns false (and leaves the game untouched) if the
    /// move would be refused.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, origin: JsValue, to_x: u8, to_y: u8) -> bool {
        match parse_origin(origin) {
            Some(origin) => self.inner.try_apply_move(origin, to_x, to_y).is_ok(),
            None => false,
        }
    }

    /// Cells the item may drop onto, as [x, y, x, y, ...]
    #[wasm_bindgen(js_name = legalTargets)]
    pub fn legal_targets(&self, origin: JsValue) -> Vec<u8> {
        let Some(origin) = parse_origin(origin) else {
            return vec![];
        };
        self.inner
            .legal_targets(origin)
            .into_iter()
            .flat_map(|pos| [pos.x(), pos.y()])
            .collect()
    }

    /// Board snapshot: board[x][y] (row x, column y) is null or { owner, size }
    pub fn board(&self) -> Result<JsValue, JsError> {
        let mut rows: Vec<Vec<Option<Piece>>> = vec![Vec::with_capacity(3); 3];
        for (pos, piece) in self.inner.cells() {
            rows[pos.x() as usize].push(piece);
        }
        Ok(serde_wasm_bindgen::to_value(&rows)?)
    }

    /// Reserve counts for a player as { S, M, L }
    pub fn reserves(&self, player: &str) -> Result<JsValue, JsError> {
        let player = parse_player(player).ok_or_else(|| JsError::new("unknown player"))?;
        let [small, medium, large] = self.inner.reserves(player);
        let counts = ReserveCounts { small, medium, large };
        Ok(serde_wasm_bindgen::to_value(&counts)?)
    }

    /// Text rendering of the board, for debugging
    #[wasm_bindgen(js_name = toString)]
    pub fn to_string_js(&self) -> String {
        self.inner.to_string()
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ReserveCounts {
    #[serde(rename = "S")]
    small: u8,
    #[serde(rename = "M")]
    medium: u8,
    #[serde(rename = "L")]
    large: u8,
}

fn parse_origin(value: JsValue) -> Option<Origin> {
    serde_wasm_bindgen::from_value(value).ok()
}

fn parse_player(s: &str) -> Option<Player> {
    match s {
        "red" => Some(Player::Red),
        "green" => Some(Player::Green),
        _ => None,
    }
}

/// Same spelling `Origin` deserialization accepts for a size.
fn parse_size(s: &str) -> Option<Size> {
    match s {
        "S" | "small" => Some(Size::Small),
        "M" | "medium" => Some(Size::Medium),
        "L" | "large" => Some(Size::Large),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player() {
        assert_eq!(parse_player("red"), Some(Player::Red));
        assert_eq!(parse_player("green"), Some(Player::Green));
        assert_eq!(parse_player("Red"), None);
        assert_eq!(parse_player(""), None);
    }

    #[test]
    fn test_parse_size_matches_origin_serde() {
        for (text, expected) in [("S", Some(Size::Small)), ("M", Some(Size::Medium)), ("L", Some(Size::Large))] {
            assert_eq!(parse_size(text), expected);
        }
        for text in ["S", "M", "L", "small", "large", "l", "m", "X", "LL", ""] {
            let json = format!(r#"{{"from":"stack","player":"red","size":"{}"}}"#, text);
            let via_serde = serde_json::from_str::<Origin>(&json).ok().map(|origin| match origin {
                Origin::FromStack { size, .. } => size,
                Origin::FromBoard { .. } => unreachable!(),
            });
            assert_eq!(parse_size(text), via_serde, "size {:?}", text);
        }
    }

    #[test]
    fn test_reserve_counts_shape() {
        let counts = ReserveCounts { small: 2, medium: 1, large: 0 };
        assert_eq!(serde_json::to_string(&counts).unwrap(), r#"{"S":2,"M":1,"L":0}"#);
    }
}
