//! The engine connects the chess primitives to a line-oriented text interface:
//! it keeps the current [`Position`], reads commands from the input stream and
//! writes responses to the output stream.
//!
//! [`Engine::command_loop`] is the "main loop" of the binary. Supported
//! commands:
//!
//! - `position startpos [moves <move1> ...]`
//! - `position fen <placement> [<other FEN fields>] [moves <move1> ...]`
//! - `move <from><to>`, e.g. `move e2e4`
//! - `moves <w|b>`: pseudo-legal pawn moves of given color
//! - `perft <w|b> <depth>`: number of leaf nodes in the pawn move tree
//! - `d`: board dump
//! - `fen`: piece placement of the current position
//! - `quit`

use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use itertools::Itertools;

use crate::chess::core::{Color, Move};
use crate::chess::movegen::{generate_pawn_moves, pawn_perft};
use crate::chess::position::Position;
use crate::chess::render::render_with_coordinates;
use crate::engine::command::Command;

mod command;

/// Deepest `perft` the command loop accepts.
const MAX_PERFT_DEPTH: u8 = 7;

/// Executes commands read from `input` against the current position and writes
/// the responses to `output`.
pub struct Engine<'a, R: BufRead, W: Write> {
    position: Position,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Engine<'a, R, W> {
    /// Creates a new instance of the engine with starting position and provided
    /// I/O.
    #[must_use]
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            position: Position::starting(),
            input,
            output,
        }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Continuously reads the input stream and executes the commands until
    /// `quit` is sent or the input is exhausted.
    ///
    /// Malformed commands and arguments do not stop the loop: the problem is
    /// reported to the output and the command is skipped. Only I/O errors are
    /// returned.
    pub fn command_loop(&mut self) -> anyhow::Result<()> {
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            match Command::parse(&line) {
                Command::Quit => break,
                Command::Empty => {},
                Command::Unknown(command) => {
                    writeln!(self.output, "Unknown command: {command}")?;
                },
                command => {
                    if let Err(e) = self.execute(command) {
                        writeln!(self.output, "Error: {e:#}")?;
                    }
                },
            }
            self.output.flush()?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::SetPosition { fen, moves } => self.handle_position(fen, &moves),
            Command::MakeMove(next_move) => {
                self.position = self.position.apply(Move::from_uci(&next_move)?);
                Ok(())
            },
            Command::GenerateMoves { color } => self.handle_moves(&color),
            Command::Perft { color, depth } => self.handle_perft(&color, &depth),
            Command::Display => {
                write!(self.output, "{}", render_with_coordinates(&self.position))?;
                writeln!(self.output, "FEN: {}", self.position)?;
                Ok(())
            },
            Command::Fen => {
                writeln!(self.output, "{}", self.position)?;
                Ok(())
            },
            Command::Quit | Command::Empty | Command::Unknown(_) => Ok(()),
        }
    }

    /// Changes the position to the one specified in the command. The current
    /// position is kept if either the placement or any of the moves are
    /// malformed.
    fn handle_position(&mut self, fen: Option<String>, moves: &[String]) -> anyhow::Result<()> {
        let start = match fen {
            None => Position::starting(),
            Some(fen) => Position::from_fen(&fen)?,
        };
        self.position = moves.iter().try_fold(start, |position, next_move| {
            Ok::<_, anyhow::Error>(position.apply(Move::from_uci(next_move)?))
        })?;
        Ok(())
    }

    fn handle_moves(&mut self, color: &str) -> anyhow::Result<()> {
        let color = Color::try_from(color)?;
        let moves = generate_pawn_moves(&self.position, color);
        writeln!(self.output, "{}", moves.iter().join(" "))?;
        Ok(())
    }

    fn handle_perft(&mut self, color: &str, depth: &str) -> anyhow::Result<()> {
        let color = Color::try_from(color)?;
        let depth: u8 = depth
            .parse()
            .with_context(|| format!("invalid perft depth: {depth:?}"))?;
        if depth > MAX_PERFT_DEPTH {
            bail!("perft depth {depth} exceeds the maximum of {MAX_PERFT_DEPTH}");
        }
        writeln!(self.output, "{}", pawn_perft(&self.position, color, depth))?;
        Ok(())
    }
}
