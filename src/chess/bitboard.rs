//! [`Bitboard`]-based representation for [`crate::chess::position::Position`].
//! Bitboard utilizes the fact that modern processors operate on 64 bit
//! integers, and the bit operations can be performed simultaneously. The
//! disadvantage is inefficiency of some operations like "get piece on given
//! square" (efficiently handled by Square-centric board implementations).
//!
//! [Bitboard]: https://www.chessprogramming.org/Bitboards

use std::fmt::{self, Write};
use std::mem;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::chess::core::{Color, File, Piece, PieceKind, Rank, Square, BOARD_SIZE, BOARD_WIDTH};

/// Represents a set of squares and provides common operations (AND, OR) over
/// these sets. Each bit corresponds to one of 64 squares of the chess
/// board.
///
/// Mirroring [`Square`] semantics, the least significant bit corresponds to A1,
/// and the most significant bit - to H8.
///
/// Bitboard is a thin wrapper around [u64]. All operations are pure: they
/// return a new bitboard and leave the original intact.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// Constructs Bitboard from pre-calculated bits.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Constructs a bitboard representing empty set of squares.
    #[must_use]
    pub const fn empty() -> Self {
        Self::from_bits(0)
    }

    /// Returns raw bits.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.bits
    }

    /// Returns a copy of this bitboard with the bit for `square` set.
    #[must_use]
    pub const fn with(self, square: Square) -> Self {
        Self::from_bits(self.bits | (1u64 << square as u8))
    }

    /// Returns a copy of this bitboard with the bit for `square` cleared.
    #[must_use]
    pub const fn without(self, square: Square) -> Self {
        Self::from_bits(self.bits & !(1u64 << square as u8))
    }

    /// Returns true if this bitboard contains given square.
    #[must_use]
    pub const fn contains(self, square: Square) -> bool {
        (self.bits & (1u64 << square as u8)) != 0
    }

    /// Number of squares in the set.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    /// Returns true if no square is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// An efficient way to iterate over the set squares.
    #[must_use]
    pub const fn iter(self) -> BitboardIterator {
        BitboardIterator { bits: self.bits }
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reverse the binary representation to start with A1, split it into
        // ranks and print them top to bottom.
        write!(
            f,
            "{}",
            format!("{:#066b}", self.bits)
                .chars()
                .rev()
                .take(BOARD_SIZE as usize)
                .chunks(BOARD_WIDTH as usize)
                .into_iter()
                .map(|chunk| chunk
                    .map(|ch| match ch {
                        '1' => '1',
                        '0' => '.',
                        _ => unreachable!(),
                    })
                    .join(SQUARE_SEPARATOR))
                .collect::<Vec<String>>()
                .iter()
                .rev()
                .join(LINE_SEPARATOR)
        )
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits.bitor(rhs.bits))
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits.bitor_assign(rhs.bits);
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits.bitand(rhs.bits))
    }
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        Self::empty().with(square)
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterates over set squares in a given [Bitboard] from least significant 1
/// bits (LS1B) to most significant 1 bits (MS1B) through implementing
/// [`BitScan`] forward operation. The squares are produced in ascending
/// [`Square::index`] order.
///
/// [BitScan]: https://www.chessprogramming.org/BitScan
#[derive(Clone, Debug)]
pub struct BitboardIterator {
    bits: u64,
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        // Get the LS1B and consume it from the iterator.
        let next_index = self.bits.trailing_zeros();
        self.bits ^= 1 << next_index;
        // For performance reasons, it's better to convert directly: the
        // conversion is safe because trailing_zeros() will return a number in
        // 0..64 range.
        Some(unsafe { mem::transmute(next_index as u8) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitboardIterator {}

/// Number of distinct [`PieceKind`]s each side has.
pub const PIECE_KINDS: usize = 6;
/// Number of bitboards in [`Board`]: one per (color, piece kind) pair.
pub const PIECE_SLOTS: usize = 2 * PIECE_KINDS;

/// Piece-centric implementation of the chess board: twelve [Bitboard]s, one
/// per [`Piece`]. White pieces occupy slots `0..6` and Black pieces occupy
/// slots `6..12`, both in [`PieceKind`] order.
///
/// The board itself does not enforce that a square is occupied by at most one
/// piece: [`crate::chess::position::Position`] is responsible for keeping
/// that invariant.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    bitboards: [Bitboard; PIECE_SLOTS],
}

impl Board {
    /// Constructs an empty Board to be filled by the position builder.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            bitboards: [Bitboard::empty(); PIECE_SLOTS],
        }
    }

    /// Standard chess starting layout.
    #[must_use]
    pub fn starting() -> Self {
        const BACKRANK: [PieceKind; BOARD_WIDTH as usize] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Self::empty();
        for color in Color::iter() {
            for (file, kind) in File::iter().zip(BACKRANK) {
                *board.bitboard_for_mut(Piece::new(color, kind)) |=
                    Square::new(file, Rank::backrank(color)).into();
            }
            *board.bitboard_for_mut(Piece::new(color, PieceKind::Pawn)) =
                Rank::pawns_starting(color).mask();
        }
        board
    }

    /// Stable index of the piece's bitboard.
    #[must_use]
    pub const fn slot(piece: Piece) -> usize {
        piece.color as usize * PIECE_KINDS + piece.kind as usize
    }

    /// Returns all pieces in slot order.
    pub fn pieces() -> impl Iterator<Item = Piece> {
        Color::iter()
            .cartesian_product(PieceKind::iter())
            .map(|(color, kind)| Piece::new(color, kind))
    }

    /// Squares occupied by given piece.
    #[must_use]
    pub const fn bitboard_for(&self, piece: Piece) -> Bitboard {
        self.bitboards[Self::slot(piece)]
    }

    pub(super) fn bitboard_for_mut(&mut self, piece: Piece) -> &mut Bitboard {
        &mut self.bitboards[Self::slot(piece)]
    }

    pub(super) fn bitboards_mut(&mut self) -> impl Iterator<Item = &mut Bitboard> {
        self.bitboards.iter_mut()
    }

    /// Iterates over (piece, squares occupied by it) pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Bitboard)> + '_ {
        Self::pieces().zip(self.bitboards.iter().copied())
    }

    /// Squares occupied by all pieces of given color.
    #[must_use]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.iter()
            .filter(|(piece, _)| piece.color == color)
            .fold(Bitboard::empty(), |result, (_, bitboard)| result | bitboard)
    }

    /// Squares occupied by any piece.
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.bitboards
            .iter()
            .fold(Bitboard::empty(), |result, bitboard| result | *bitboard)
    }

    /// Returns the first piece (in slot order) whose bitboard contains the
    /// square.
    // WARNING: This is slow and inefficient for Bitboard-based piece-centric
    // representation. Use with caution.
    #[must_use]
    pub fn at(&self, square: Square) -> Option<Piece> {
        self.iter()
            .find(|(_, bitboard)| bitboard.contains(square))
            .map(|(piece, _)| piece)
    }

    /// Returns true if no square is set in more than one bitboard.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.bitboards
            .iter()
            .try_fold(Bitboard::empty(), |seen, bitboard| {
                (seen & *bitboard).is_empty().then(|| seen | *bitboard)
            })
            .is_some()
    }
}

impl fmt::Display for Board {
    /// Prints board representation in FEN format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut empty_squares = 0i32;
            for file in File::iter() {
                let square = Square::new(file, rank);
                if let Some(piece) = self.at(square) {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != Rank::One {
                const RANK_SEPARATOR: char = '/';
                f.write_char(RANK_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece) a-la Stockfish "debug" command in UCI mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if file != File::H {
                    write!(f, "{SQUARE_SEPARATOR}")?;
                }
            }
            if rank != Rank::One {
                write!(f, "{LINE_SEPARATOR}")?;
            }
        }
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";
