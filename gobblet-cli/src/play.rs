//! Interactive play loop.
//!
//! Reads one command per line. A move in notation is gated on the same drag
//! and drop queries a graphical front end would use, then committed.

use std::io::{self, BufRead, Write};

use gobblet_core::{GameState, Move};

const HELP: &str = "\
Commands:
  RL(2,2)        place a piece from a reserve (player R/G, size S/M/L)
  (1,0)->(0,0)   move a piece already on the board
  moves          list every legal move
  board          show the board
  help           show this text
  quit           leave";

/// Run the loop until `quit` or end of input. Returns the number of moves
/// committed.
pub fn run<R: BufRead, W: Write>(state: &mut GameState, input: R, out: &mut W) -> io::Result<usize> {
    let mut applied = 0;
    writeln!(out, "{}", state)?;
    writeln!(out, "Type 'help' for commands.")?;

    for line in input.lines() {
        let line = line?;
        let command = line.trim();
        match command {
            "" => continue,
            "quit" | "q" => break,
            "help" => writeln!(out, "{}", HELP)?,
            "board" => writeln!(out, "{}", state)?,
            "moves" => {
                for mov in state.legal_moves() {
                    writeln!(out, "{}", mov)?;
                }
            }
            _ => match command.parse::<Move>() {
                Ok(mov) => {
                    if commit(state, mov, out)? {
                        applied += 1;
                    }
                }
                Err(e) => writeln!(out, "error: {}", e)?,
            },
        }
    }

    Ok(applied)
}

/// Gate a move on the drag and drop queries, then apply it.
fn commit<W: Write>(state: &mut GameState, mov: Move, out: &mut W) -> io::Result<bool> {
    if !state.can_drag(mov.origin) {
        writeln!(out, "cannot pick up {}", mov.origin)?;
        return Ok(false);
    }
    if !state.can_place_at(mov.origin, mov.to) {
        writeln!(out, "{} cannot land on {}", mov.origin, mov.to)?;
        return Ok(false);
    }

    state.apply_move(mov.origin, mov.to.x(), mov.to.y());
    writeln!(out, "{}", state)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gobblet_core::{Piece, Player, Size};
    use std::io::Cursor;

    fn play(commands: &str) -> (GameState, usize, String) {
        let mut state = GameState::new();
        let mut out = Vec::new();
        let applied = run(&mut state, Cursor::new(commands), &mut out).unwrap();
        (state, applied, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_commits_legal_moves() {
        let (state, applied, _) = play("(1,0)->(0,0)\nRL(1,0)\n");
        assert_eq!(applied, 2);
        assert_eq!(state.occupant(0, 0), Some(Piece::new(Player::Green, Size::Large)));
        assert_eq!(state.occupant(1, 0), Some(Piece::new(Player::Red, Size::Large)));
        assert_eq!(state.inventory(Player::Red, Size::Large), 1);
    }

    #[test]
    fn test_refuses_illegal_cover() {
        let (state, applied, out) = play("(0,0)->(1,0)\n");
        assert_eq!(applied, 0);
        assert_eq!(state, GameState::new());
        assert!(out.contains("(0,0) cannot land on (1,0)"));
    }

    #[test]
    fn test_refuses_empty_source_and_exhausted_reserve() {
        let (_, applied, out) = play("(2,2)->(0,1)\nGL(0,1)\nGL(0,2)\nGL(2,2)\n");
        assert_eq!(applied, 2);
        assert!(out.contains("cannot pick up (2,2)"));
        assert!(out.contains("cannot pick up GL"));
    }

    #[test]
    fn test_reports_bad_notation() {
        let (_, applied, out) = play("XL(0,0)\n");
        assert_eq!(applied, 0);
        assert!(out.contains("error: unknown player 'X'"));
    }

    #[test]
    fn test_quit_stops_reading() {
        let (_, applied, _) = play("RS(2,2)\nquit\nGS(2,1)\n");
        assert_eq!(applied, 1);
    }

    #[test]
    fn test_moves_lists_legal_moves() {
        let (_, _, out) = play("moves\n");
        assert!(out.contains("RL(2,2)"));
        assert!(out.contains("(1,0)->(0,0)"));
        assert!(!out.contains("(0,0)->(1,0)"));
    }
}
