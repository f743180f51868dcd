//! Human-readable board dump with Unicode chess glyphs.
//!
//! The output is meant for diagnostics (e.g. the `d` command of the command
//! loop) and its exact format is not guaranteed to be stable.

use std::fmt::Write;

use strum::IntoEnumIterator;

use crate::chess::core::{Color, File, Piece, PieceKind, Rank, Square};
use crate::chess::position::Position;

const LIGHT_SQUARE: char = '▫';
const DARK_SQUARE: char = '▪';

/// Unicode glyph of the piece: outlined for White, filled for Black.
#[must_use]
pub const fn glyph(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

/// Renders the board as 8 lines of 8 glyphs, the eighth rank first. Empty
/// squares alternate between light and dark glyphs.
///
/// ```
/// use pawnstorm::chess::position::Position;
/// use pawnstorm::chess::render::render;
///
/// let board = render(&Position::starting());
/// assert_eq!(board.lines().count(), 8);
/// assert_eq!(board.lines().next(), Some("♜♞♝♛♚♝♞♜"));
/// ```
#[must_use]
pub fn render(position: &Position) -> String {
    let mut result = String::new();
    for rank in Rank::iter().rev() {
        for file in File::iter() {
            let square = Square::new(file, rank);
            result.push(match position.at(square) {
                Some(piece) => glyph(piece),
                None if (square.row() + square.col()) % 2 == 0 => LIGHT_SQUARE,
                None => DARK_SQUARE,
            });
        }
        result.push('\n');
    }
    result
}

/// Renders the board with rank numbers on the left and file letters below.
#[must_use]
pub fn render_with_coordinates(position: &Position) -> String {
    let mut result = String::new();
    for (line, rank) in render(position).lines().zip(Rank::iter().rev()) {
        // Writing into a String never fails.
        let _ = writeln!(result, "{rank} {line}");
    }
    result.push_str("  ");
    for file in File::iter() {
        let _ = write!(result, "{file}");
    }
    result.push('\n');
    result
}
