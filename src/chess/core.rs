//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};
use std::mem;
use std::ops::Not;

use anyhow::bail;
use itertools::Itertools;

use crate::chess::bitboard::Bitboard;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Returns true if both the row and the column are within `0..BOARD_WIDTH`.
///
/// The lower bound is inclusive: the first rank and the A file are on the
/// board.
///
/// ```
/// use pawnstorm::chess::core::inside_board;
///
/// assert!(inside_board(0, 0));
/// assert!(inside_board(7, 7));
/// assert!(!inside_board(-1, 3));
/// assert!(!inside_board(3, 8));
/// ```
#[must_use]
pub const fn inside_board(row: i8, col: i8) -> bool {
    const WIDTH: i8 = BOARD_WIDTH as i8;
    row >= 0 && row < WIDTH && col >= 0 && col < WIDTH
}

bitflags::bitflags! {
    /// Additional information about a generated [`Move`].
    ///
    /// The values follow a common [Move Encoding] technique, only the subset
    /// the pawn move generator produces is present:
    ///
    /// | Index | Capture | MSB Special | LSB Special | Move Kind |
    /// | ----- | ------- | ----------- | ----------- | --------- |
    /// | 0 | 0 | 0 | 0 | Quiet move |
    /// | 1 | 0 | 0 | 1 | Double pawn push |
    /// | 4 | 1 | 0 | 0 | Capture |
    ///
    /// [Move Encoding]: https://www.chessprogramming.org/Encoding_Moves
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MoveAttributes: u8 {
        /// Moves that do not change the material balance.
        const QUIET = 0;
        /// Pawn advancement by 2 squares from its home rank (second for white
        /// and seventh for black).
        const DOUBLE_PAWN_PUSH = 0b0001;
        /// Moves that change the material balance.
        const CAPTURE = 0b0100;
    }
}

/// A pseudo-legal move: the piece on `from` is moved to `to`, whatever stood
/// on `to` is removed from the board.
///
/// The move does not know anything about the piece that is moving: it is
/// resolved when the move is applied to a
/// [`crate::chess::position::Position`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    attributes: MoveAttributes,
}

impl Move {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(from: Square, to: Square, attributes: MoveAttributes) -> Self {
        Self {
            from,
            to,
            attributes,
        }
    }

    /// Parses a move in UCI coordinate notation (e.g. "e2e4").
    ///
    /// UCI notation does not carry capture or double push information, the
    /// result is always [`MoveAttributes::QUIET`].
    ///
    /// # Errors
    ///
    /// If the input is not two concatenated squares.
    pub fn from_uci(input: &str) -> anyhow::Result<Self> {
        if input.len() != 4 || !input.is_ascii() {
            bail!("move should be 4 ASCII chars (e.g. e2e4), got '{input}'");
        }
        let (from, to) = input.split_at(2);
        Ok(Self::new(
            from.try_into()?,
            to.try_into()?,
            MoveAttributes::QUIET,
        ))
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn to(&self) -> Square {
        self.to
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn attributes(&self) -> MoveAttributes {
        self.attributes
    }

    /// Returns true if the move removes a piece of the opposing side.
    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.attributes.contains(MoveAttributes::CAPTURE)
    }
}

impl fmt::Display for Move {
    /// Serializes a move in [UCI format].
    ///
    /// [UCI format]: http://wbec-ridderkerk.nl/html/UCIProtocol.html
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Board squares: from left to right, from bottom to the top:
///
/// ```
/// use pawnstorm::chess::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::E1 as u8, 4);
/// assert_eq!(Square::H1 as u8, 7);
/// assert_eq!(Square::A4 as u8, 8 * 3);
/// assert_eq!(Square::H8 as u8, 63);
/// ```
///
/// Square is a compact representation using only one byte.
///
/// ```
/// use pawnstorm::chess::core::Square;
/// use std::mem;
///
/// assert_eq!(std::mem::size_of::<Square>(), 1);
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        unsafe { mem::transmute(file as u8 + (rank as u8) * BOARD_WIDTH) }
    }

    /// Converts signed (row, column) coordinates to a square if they are
    /// [`inside_board`].
    #[must_use]
    pub const fn from_coordinates(row: i8, col: i8) -> Option<Self> {
        if !inside_board(row, col) {
            return None;
        }
        Some(unsafe { mem::transmute(row as u8 * BOARD_WIDTH + col as u8) })
    }

    /// Linear index of the square, `row * 8 + col`.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Zero-based row of the square, same as its [`Rank`].
    #[must_use]
    pub const fn row(self) -> u8 {
        self as u8 / BOARD_WIDTH
    }

    /// Zero-based column of the square, same as its [`File`].
    #[must_use]
    pub const fn col(self) -> u8 {
        self as u8 % BOARD_WIDTH
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub const fn file(self) -> File {
        unsafe { mem::transmute(self.col()) }
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub const fn rank(self) -> Rank {
        unsafe { mem::transmute(self.row()) }
    }

    /// Returns the square `rows` ranks up and `cols` files to the right (or
    /// down and to the left for negative values). Returns [`None`] instead of
    /// wrapping around the board edges.
    ///
    /// ```
    /// use pawnstorm::chess::core::Square;
    ///
    /// assert_eq!(Square::E2.offset(2, 0), Some(Square::E4));
    /// assert_eq!(Square::A4.offset(1, -1), None);
    /// assert_eq!(Square::H7.offset(-1, -1), Some(Square::G6));
    /// ```
    #[must_use]
    pub const fn offset(self, rows: i8, cols: i8) -> Option<Self> {
        Self::from_coordinates(
            (self.row() as i8).saturating_add(rows),
            (self.col() as i8).saturating_add(cols),
        )
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;

    /// Creates a square given its position on the board.
    ///
    /// # Errors
    ///
    /// If given square index is outside 0..[`BOARD_SIZE`] range.
    fn try_from(square_index: u8) -> anyhow::Result<Self> {
        // Exclusive range patterns are not allowed:
        // https://github.com/rust-lang/rust/issues/37854
        const MAX_INDEX: u8 = BOARD_SIZE - 1;
        match square_index {
            0..=MAX_INDEX => Ok(unsafe { mem::transmute(square_index) }),
            _ => bail!("square index should be in 0..BOARD_SIZE, got {square_index}"),
        }
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            ),
        };
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Ok(unsafe { mem::transmute(file as u8 - b'a') }),
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match column {
            0..=7 => Ok(unsafe { mem::transmute(column) }),
            _ => bail!("file should be within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl Rank {
    /// Returns a pre-calculated bitboard mask with 1s set for squares of the
    /// given rank.
    #[must_use]
    pub const fn mask(self) -> Bitboard {
        Bitboard::from_bits(0xFF << (self as u8 * BOARD_WIDTH))
    }

    /// The rank where pieces other than pawns start the game.
    #[must_use]
    pub const fn backrank(color: Color) -> Self {
        match color {
            Color::White => Self::One,
            Color::Black => Self::Eight,
        }
    }

    /// Home rank of the pawns: the only rank double pushes are made from.
    #[must_use]
    pub const fn pawns_starting(color: Color) -> Self {
        match color {
            Color::White => Self::Two,
            Color::Black => Self::Seven,
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Ok(unsafe { mem::transmute(rank as u8 - b'1') }),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match row {
            0..=7 => Ok(unsafe { mem::transmute(row) }),
            _ => bail!("rank should be within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// A standard game of chess is played between two sides: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row delta of a pawn advancing one rank.
    #[must_use]
    pub const fn push_direction(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl TryFrom<&str> for Color {
    type Error = anyhow::Error;

    fn try_from(color: &str) -> anyhow::Result<Self> {
        match color {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("color should be 'w' or 'b', got '{color}'"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
pub enum PieceKind {
    Pawn = 0,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Lowercase algebraic symbol of the piece.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol())
    }
}

/// Represents a specific piece owned by one of the sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub color: Color,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    /// Parses FEN symbol of the piece: uppercase for White, lowercase for
    /// Black.
    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let kind = match symbol.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        };
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Self::new(color, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match self.color {
            // White: uppercase symbols.
            Color::White => self.kind.symbol().to_ascii_uppercase(),
            // Black: lowercase symbols.
            Color::Black => self.kind.symbol(),
        })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn square_index_round_trip() {
        for index in 0..BOARD_SIZE {
            let square = Square::try_from(index).unwrap();
            assert_eq!(square.index(), index);
            assert_eq!(square.row() * BOARD_WIDTH + square.col(), index);
        }
        for square in Square::iter() {
            assert_eq!(Square::try_from(square.index()).unwrap(), square);
            assert_eq!(Square::new(square.file(), square.rank()), square);
        }
        assert!(Square::try_from(BOARD_SIZE).is_err());
        assert!(Square::try_from(u8::MAX).is_err());
    }

    #[test]
    fn square_coordinates() {
        assert_eq!(Square::from_coordinates(0, 0), Some(Square::A1));
        assert_eq!(Square::from_coordinates(1, 4), Some(Square::E2));
        assert_eq!(Square::from_coordinates(7, 7), Some(Square::H8));
        assert_eq!(Square::from_coordinates(0, 8), None);
        assert_eq!(Square::from_coordinates(-1, 0), None);
        assert_eq!(Square::from_coordinates(8, -1), None);

        assert_eq!(Square::E2.row(), 1);
        assert_eq!(Square::E2.col(), 4);
        assert_eq!(Square::E2.file(), File::E);
        assert_eq!(Square::E2.rank(), Rank::Two);
    }

    #[test]
    fn board_bounds() {
        for row in 0..8 {
            for col in 0..8 {
                assert!(inside_board(row, col), "({row}, {col})");
            }
        }
        // Rank 1 and the A file are still on the board.
        assert!(inside_board(0, 5));
        assert!(inside_board(5, 0));
        for (row, col) in [(-1, 0), (0, -1), (8, 0), (0, 8), (-1, -1), (8, 8), (i8::MIN, 3)] {
            assert!(!inside_board(row, col), "({row}, {col})");
        }
    }

    #[test]
    fn offsets() {
        assert_eq!(Square::A2.offset(1, 0), Some(Square::A3));
        assert_eq!(Square::A2.offset(1, -1), None);
        assert_eq!(Square::A2.offset(1, 1), Some(Square::B3));
        assert_eq!(Square::H2.offset(1, 1), None);
        assert_eq!(Square::D8.offset(1, 0), None);
        assert_eq!(Square::D1.offset(-1, 0), None);
        assert_eq!(Square::D7.offset(-2, 0), Some(Square::D5));
    }

    #[test]
    fn parse_squares() {
        assert_eq!(Square::try_from("a1").unwrap(), Square::A1);
        assert_eq!(Square::try_from("e4").unwrap(), Square::E4);
        assert_eq!(Square::try_from("h8").unwrap(), Square::H8);
        assert!(Square::try_from("i1").is_err());
        assert!(Square::try_from("a9").is_err());
        assert!(Square::try_from("a").is_err());
        assert!(Square::try_from("a11").is_err());
        assert!(Square::try_from("").is_err());

        assert_eq!(Square::G5.to_string(), "g5");
        assert_eq!(
            Square::iter().map(|square| square.to_string()).take(3).collect::<Vec<_>>(),
            vec!["a1", "b1", "c1"]
        );
    }

    #[test]
    fn ranks_and_files() {
        assert_eq!(Rank::try_from('1').unwrap(), Rank::One);
        assert_eq!(Rank::try_from(7).unwrap(), Rank::Eight);
        assert!(Rank::try_from('0').is_err());
        assert!(Rank::try_from(8).is_err());
        assert_eq!(File::try_from('c').unwrap(), File::C);
        assert_eq!(File::try_from(7).unwrap(), File::H);
        assert!(File::try_from('C').is_err());
        assert!(File::try_from(8).is_err());

        assert_eq!(Rank::One.mask().bits(), 0xFF);
        assert_eq!(Rank::Eight.mask().bits(), 0xFF00_0000_0000_0000);
        assert_eq!(Rank::pawns_starting(Color::White), Rank::Two);
        assert_eq!(Rank::pawns_starting(Color::Black), Rank::Seven);
    }

    #[test]
    fn colors() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::try_from("w").unwrap(), Color::White);
        assert_eq!(Color::try_from("b").unwrap(), Color::Black);
        assert!(Color::try_from("white").is_err());
        assert_eq!(Color::Black.to_string(), "b");
    }

    #[test]
    fn pieces() {
        let symbols = "PNBRQKpnbrqk";
        let parsed = symbols
            .chars()
            .map(|symbol| Piece::try_from(symbol).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(
            parsed,
            Color::iter()
                .cartesian_product(PieceKind::iter())
                .map(|(color, kind)| Piece::new(color, kind))
                .collect::<Vec<_>>()
        );
        assert_eq!(parsed.iter().join(""), symbols);
        assert!(Piece::try_from('x').is_err());
        assert!(Piece::try_from('1').is_err());
    }

    #[test]
    fn moves() {
        let pawn_push = Move::from_uci("e2e4").unwrap();
        assert_eq!(pawn_push.from(), Square::E2);
        assert_eq!(pawn_push.to(), Square::E4);
        assert_eq!(pawn_push.attributes(), MoveAttributes::QUIET);
        assert!(!pawn_push.is_capture());
        assert_eq!(pawn_push.to_string(), "e2e4");

        assert!(Move::new(Square::A4, Square::B5, MoveAttributes::CAPTURE).is_capture());

        assert!(Move::from_uci("e2e").is_err());
        assert!(Move::from_uci("e2e4q").is_err());
        assert!(Move::from_uci("e2j4").is_err());
        assert!(Move::from_uci("é2e4").is_err());
    }
}
