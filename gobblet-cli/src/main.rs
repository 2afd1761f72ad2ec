//! Gobblet terminal front end
//!
//! Usage:
//!   gobblet play [--setup opening.toml]
//!   gobblet render --moves "RL(2,2) (1,0)->(0,0)"
//!   gobblet moves [--setup opening.toml]

mod play;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gobblet_core::{parse_moves, GameState, Setup};

/// Play and inspect Gobblet positions.
#[derive(Parser)]
#[command(name = "gobblet", about = "Play and inspect Gobblet positions")]
struct Cli {
    /// TOML file describing the starting position (standard opening if omitted)
    #[arg(long, global = true)]
    setup: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Enter moves interactively (default)
    Play,
    /// Apply a move list and print the resulting board
    Render {
        /// Whitespace separated moves, e.g. "RL(2,2) (1,0)->(0,0)"
        #[arg(long)]
        moves: String,
    },
    /// List every legal move from the starting position
    Moves,
}

fn load_state(setup: Option<&Path>) -> Result<GameState> {
    let Some(path) = setup else {
        return Ok(GameState::new());
    };
    let setup = Setup::load(path)
        .with_context(|| format!("loading setup {}", path.display()))?;
    Ok(GameState::from_setup(&setup)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut state = load_state(cli.setup.as_deref())?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            let applied = play::run(&mut state, stdin.lock(), &mut stdout)?;
            println!("{} move(s) played.", applied);
        }
        Command::Render { moves } => {
            let moves = parse_moves(&moves).context("parsing --moves")?;
            for mov in moves {
                state
                    .try_apply(mov)
                    .with_context(|| format!("applying {}", mov))?;
            }
            print!("{}", state);
        }
        Command::Moves => {
            let moves = state.legal_moves();
            for mov in &moves {
                println!("{}", mov);
            }
            eprintln!("{} legal move(s)", moves.len());
        }
    }

    Ok(())
}
