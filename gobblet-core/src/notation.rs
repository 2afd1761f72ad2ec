//! Compact text notation for moves.
//!
//! ```text
//! RL(2,2)        Red places a Large from reserve onto (2,2)
//! GS(0,1)        Green places a Small from reserve onto (0,1)
//! (1,0)->(0,0)   the piece at (1,0) moves to (0,0)
//! ```
//!
//! Letters are case-insensitive; whitespace inside a move is not allowed,
//! whitespace between moves separates them.

use std::fmt;
use std::str::FromStr;

use crate::{Move, NotationError, Origin, Player, Pos, Size};

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x(), self.y())
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::FromStack { player, size } => write!(f, "{}{}", player.letter(), size.letter()),
            Origin::FromBoard { x, y } => write!(f, "({},{})", x, y),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.origin {
            Origin::FromStack { .. } => write!(f, "{}{}", self.origin, self.to),
            Origin::FromBoard { .. } => write!(f, "{}->{}", self.origin, self.to),
        }
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Move, NotationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NotationError::Empty);
        }

        // Board move: (x,y)->(x,y)
        if s.starts_with('(') {
            let (from, to) = s
                .split_once("->")
                .ok_or_else(|| NotationError::Unrecognized(s.to_string()))?;
            let (x, y) = parse_coords(from)?;
            let to = parse_pos(to)?;
            return Ok(Move::new(Origin::FromBoard { x, y }, to));
        }

        // Reserve move: <player><size>(x,y)
        let mut chars = s.chars();
        let (Some(p), Some(z)) = (chars.next(), chars.next()) else {
            return Err(NotationError::Unrecognized(s.to_string()));
        };
        let player = Player::from_letter(p).ok_or(NotationError::InvalidPlayer(p))?;
        let size = Size::from_letter(z).ok_or(NotationError::InvalidSize(z))?;
        let to = parse_pos(chars.as_str())?;
        Ok(Move::new(Origin::FromStack { player, size }, to))
    }
}

/// Parse "(x,y)" into on-board coordinates.
fn parse_coords(s: &str) -> Result<(u8, u8), NotationError> {
    let bad = || NotationError::InvalidCoords(s.to_string());
    let inner = s
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(bad)?;
    let (x, y) = inner.split_once(',').ok_or_else(bad)?;
    let x: u8 = x.trim().parse().map_err(|_| bad())?;
    let y: u8 = y.trim().parse().map_err(|_| bad())?;
    if x < 3 && y < 3 {
        Ok((x, y))
    } else {
        Err(bad())
    }
}

fn parse_pos(s: &str) -> Result<Pos, NotationError> {
    let (x, y) = parse_coords(s)?;
    Ok(Pos::at(x, y))
}

/// Parse a sequence of moves separated by whitespace.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, NotationError> {
    s.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stack_move() {
        let mov: Move = "RL(2,2)".parse().unwrap();
        assert_eq!(
            mov,
            Move::new(Origin::FromStack { player: Player::Red, size: Size::Large }, Pos::at(2, 2))
        );

        let mov: Move = "gs(0,1)".parse().unwrap();
        assert_eq!(
            mov.origin,
            Origin::FromStack { player: Player::Green, size: Size::Small }
        );
        assert_eq!(mov.to, Pos::at(0, 1));
    }

    #[test]
    fn test_parse_board_move() {
        let mov: Move = "(1,0)->(0,0)".parse().unwrap();
        assert_eq!(mov, Move::new(Origin::FromBoard { x: 1, y: 0 }, Pos::at(0, 0)));

        let mov: Move = " ( 2 , 1 )->( 0 , 2 ) ".parse().unwrap();
        assert_eq!(mov, Move::new(Origin::FromBoard { x: 2, y: 1 }, Pos::at(0, 2)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Move>(), Err(NotationError::Empty));
        assert_eq!("XL(0,0)".parse::<Move>(), Err(NotationError::InvalidPlayer('X')));
        assert_eq!("RX(0,0)".parse::<Move>(), Err(NotationError::InvalidSize('X')));
        assert_eq!(
            "RL(3,0)".parse::<Move>(),
            Err(NotationError::InvalidCoords("(3,0)".to_string()))
        );
        assert_eq!(
            "RL0,0".parse::<Move>(),
            Err(NotationError::InvalidCoords("0,0".to_string()))
        );
        assert_eq!(
            "(0,0)(1,1)".parse::<Move>(),
            Err(NotationError::Unrecognized("(0,0)(1,1)".to_string()))
        );
        assert_eq!("R".parse::<Move>(), Err(NotationError::Unrecognized("R".to_string())));
    }

    #[test]
    fn test_display_matches_notation() {
        let place = Move::new(Origin::FromStack { player: Player::Green, size: Size::Medium }, Pos::at(1, 2));
        let slide = Move::new(Origin::FromBoard { x: 2, y: 0 }, Pos::at(0, 1));
        assert_eq!(place.to_string(), "GM(1,2)");
        assert_eq!(slide.to_string(), "(2,0)->(0,1)");
    }

    #[test]
    fn test_parse_moves_sequence() {
        let moves = parse_moves("RL(2,2)  (1,0)->(0,0)\nGS(0,2)").unwrap();
        assert_eq!(moves.len(), 3);
        assert_eq!(moves[1].origin, Origin::FromBoard { x: 1, y: 0 });

        assert!(parse_moves("RL(2,2) bogus").is_err());
        assert!(parse_moves("").unwrap().is_empty());
    }
}
