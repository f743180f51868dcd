//! Provides [Chess Position] implementation: an immutable snapshot of the
//! pieces on the board.
//!
//! [`Position`] is a value type: placing, clearing and moving pieces produce a
//! new [`Position`] and never alter the original. This makes it trivial to
//! share positions between threads and to enumerate successors of a position
//! without making and unmaking moves.
//!
//! [Chess Position]: https://www.chessprogramming.org/Chess_Position

use std::fmt;

use anyhow::{bail, Context};
use arrayvec::ArrayVec;

use crate::chess::bitboard::Board;
use crate::chess::core::{Color, Move, Piece, PieceKind, Rank, Square, BOARD_SIZE, BOARD_WIDTH};

/// Squares produced by [`Position::find_all`], at most one per square of the
/// board.
pub type SquareList = ArrayVec<Square, { BOARD_SIZE as usize }>;

/// Piece placement on the board, backed by twelve bitboards.
///
/// Invariant: each square is occupied by at most one piece. [`Position::clear`]
/// and [`Position::make_move`] maintain it regardless of the prior state,
/// [`Position::place`] relies on the caller clearing the square first.
///
/// [`Position::try_from()`] provides a convenient interface for creating a
/// [`Position`] from the piece placement part of [Forsyth-Edwards Notation]
/// (FEN).
///
/// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
}

impl Position {
    /// Creates the starting position of the standard chess variant.
    ///
    /// ```
    /// use pawnstorm::chess::position::Position;
    ///
    /// let starting_position = Position::starting();
    /// assert_eq!(
    ///     &starting_position.to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        Self {
            board: Board::starting(),
        }
    }

    /// Creates a position without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            board: Board::empty(),
        }
    }

    /// Underlying bitboards.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the piece occupying the square, if any.
    #[must_use]
    pub fn at(&self, square: Square) -> Option<Piece> {
        self.board.at(square)
    }

    /// Returns true if no piece occupies the square.
    #[must_use]
    pub fn is_vacant(&self, square: Square) -> bool {
        self.at(square).is_none()
    }

    /// Returns true if the square is occupied by a piece of given color,
    /// regardless of its kind.
    #[must_use]
    pub fn has_color_at(&self, square: Square, color: Color) -> bool {
        self.at(square).is_some_and(|piece| piece.color == color)
    }

    /// Puts the piece on the square.
    ///
    /// Only the piece's own bitboard is updated: if the square may already be
    /// occupied, [`Position::clear`] it first.
    #[must_use]
    pub fn place(mut self, piece: Piece, square: Square) -> Self {
        let bitboard = self.board.bitboard_for_mut(piece);
        *bitboard = bitboard.with(square);
        self
    }

    /// Removes whatever piece occupies the square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        for bitboard in self.board.bitboards_mut() {
            *bitboard = bitboard.without(square);
        }
        self
    }

    /// Moves the piece from one square to another, capturing whatever stands
    /// on the destination square.
    ///
    /// The move is not validated. If `from` is empty, the result is `to`
    /// cleared: moving "nothing" still captures the destination. Moving a
    /// piece onto its own square removes it, since `from` is cleared last.
    ///
    /// ```
    /// use pawnstorm::chess::core::{Color, Piece, PieceKind, Square};
    /// use pawnstorm::chess::position::Position;
    ///
    /// let position = Position::starting().make_move(Square::E2, Square::E4);
    /// assert_eq!(
    ///     position.at(Square::E4),
    ///     Some(Piece::new(Color::White, PieceKind::Pawn))
    /// );
    /// assert_eq!(position.at(Square::E2), None);
    /// ```
    #[must_use]
    pub fn make_move(self, from: Square, to: Square) -> Self {
        let destination_cleared = self.clear(to);
        let moved = match self.at(from) {
            Some(piece) => destination_cleared.place(piece, to),
            None => destination_cleared,
        };
        moved.clear(from)
    }

    /// Applies the move.
    #[must_use]
    pub fn apply(self, next_move: Move) -> Self {
        self.make_move(next_move.from(), next_move.to())
    }

    /// Returns all squares occupied by the piece, in ascending
    /// [`Square::index`] order.
    ///
    /// ```
    /// use pawnstorm::chess::core::{Color, PieceKind, Square};
    /// use pawnstorm::chess::position::Position;
    ///
    /// let knights = Position::starting().find_all(PieceKind::Knight, Color::Black);
    /// assert_eq!(knights.as_slice(), &[Square::B8, Square::G8]);
    /// ```
    #[must_use]
    pub fn find_all(&self, kind: PieceKind, color: Color) -> SquareList {
        self.board
            .bitboard_for(Piece::new(color, kind))
            .iter()
            .collect()
    }

    /// Returns true if no square is occupied by more than one piece.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.board.is_consistent()
    }

    /// Parses the piece placement part of Forsyth-Edwards Notation.
    ///
    /// Placement ::= Rank ('/' Rank){7}
    ///
    /// Ranks go from the eighth to the first, each rank lists files from A to
    /// H: piece symbols (`KQRBNP` for White, `kqrbnp` for Black) and digits
    /// for runs of empty squares.
    ///
    /// Other FEN fields (side to move, castling, etc) may follow the
    /// placement separated by a space: they are accepted and ignored.
    ///
    /// NOTE: This expects properly-formatted inputs: no extra symbols or
    /// additional whitespace. Use [`Position::try_from`] for cleaning up the
    /// input.
    ///
    /// # Errors
    ///
    /// If the placement does not have exactly 8 ranks of 8 squares or contains
    /// unknown symbols.
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        let placement = match input.split(' ').next() {
            Some(placement) if !placement.is_empty() => placement,
            _ => bail!("incorrect FEN: missing pieces placement"),
        };
        let mut result = Self::empty();
        let mut rank_id = BOARD_WIDTH;
        for rank_fen in placement.split('/') {
            if rank_id == 0 {
                bail!("incorrect FEN: expected 8 ranks, got {placement}");
            }
            rank_id -= 1;
            let rank = Rank::try_from(rank_id)?;
            let mut file: u8 = 0;
            for symbol in rank_fen.chars() {
                if file >= BOARD_WIDTH {
                    bail!("incorrect FEN: rank {rank_fen} exceeds {BOARD_WIDTH} files");
                }
                match symbol {
                    '0' => bail!("incorrect FEN: increment can not be 0"),
                    '1'..='8' => {
                        file += symbol as u8 - b'0';
                        continue;
                    },
                    _ => (),
                }
                let piece = Piece::try_from(symbol)
                    .with_context(|| format!("incorrect FEN: rank {rank_fen}"))?;
                let square = Square::new(file.try_into()?, rank);
                result = result.place(piece, square);
                file += 1;
            }
            if file != BOARD_WIDTH {
                bail!(
                    "incorrect FEN: rank size should be exactly {BOARD_WIDTH}, got {rank_fen} of \
                     length {file}"
                );
            }
        }
        if rank_id != 0 {
            bail!("incorrect FEN: there should be 8 ranks, got {placement}");
        }
        Ok(result)
    }
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    /// Trims the input, strips an optional "fen " prefix and parses the rest
    /// with [`Position::from_fen`].
    fn try_from(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        match input.strip_prefix("fen ") {
            Some(stripped) => Self::from_fen(stripped),
            None => Self::from_fen(input),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Position {
    /// Prints piece placement in Forsyth-Edwards Notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.board)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", &self.board)?;
        writeln!(f, "FEN: {self}")?;
        Ok(())
    }
}
