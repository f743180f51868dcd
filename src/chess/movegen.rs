//! Pseudo-legal [move generation]: enumerates the moves that satisfy the
//! movement and occupancy rules without checking whether the king is left in
//! check.
//!
//! Pawns are the only piece kind implemented so far. The generator is a pure
//! function of ([`Position`], [`Color`]) and can be called from multiple threads
//! at once; [`par_generate_pawn_moves`] and [`batch_pawn_successors`] do
//! exactly that with [rayon].
//!
//! Not implemented yet: en passant, promotion and check-safety filtering.
//!
//! [move generation]: https://www.chessprogramming.org/Move_Generation
//! [rayon]: https://docs.rs/rayon

use arrayvec::ArrayVec;
use rayon::prelude::*;

use crate::chess::core::{Color, Move, MoveAttributes, PieceKind, Rank, Square, BOARD_SIZE};
use crate::chess::position::Position;

/// Upper bound on the number of moves of a single pawn: single push, double
/// push and two captures.
const MAX_MOVES_PER_PAWN: usize = 4;

/// Moves produced by the generator. The capacity covers a pawn on every square
/// of the board.
pub type MoveList = ArrayVec<Move, { BOARD_SIZE as usize * MAX_MOVES_PER_PAWN }>;

/// Column deltas of pawn captures: towards the A file first, then towards the
/// H file.
const CAPTURE_DIRECTIONS: [i8; 2] = [-1, 1];

/// Position of the move in the generation order among the moves of a single
/// pawn: single push, double push, capture to the left, capture to the right.
fn kind_order(pawn_move: &Move) -> u8 {
    let attributes = pawn_move.attributes();
    if attributes.contains(MoveAttributes::CAPTURE) {
        if pawn_move.to().col() < pawn_move.from().col() {
            2
        } else {
            3
        }
    } else if attributes.contains(MoveAttributes::DOUBLE_PAWN_PUSH) {
        1
    } else {
        0
    }
}

/// Moves of the pawn standing on `from`, in generation order.
fn pawn_moves_from(
    position: &Position,
    color: Color,
    from: Square,
) -> ArrayVec<Move, MAX_MOVES_PER_PAWN> {
    let mut moves = ArrayVec::new();
    let direction = color.push_direction();
    if let Some(single_push) = from.offset(direction, 0) {
        if position.is_vacant(single_push) {
            moves.push(Move::new(from, single_push, MoveAttributes::QUIET));
            // Double push is only possible when the square it walks through is
            // vacant, i.e. when the single push is.
            if from.rank() == Rank::pawns_starting(color) {
                if let Some(double_push) = single_push.offset(direction, 0) {
                    if position.is_vacant(double_push) {
                        moves.push(Move::new(
                            from,
                            double_push,
                            MoveAttributes::DOUBLE_PAWN_PUSH,
                        ));
                    }
                }
            }
        }
    }
    for cols in CAPTURE_DIRECTIONS {
        if let Some(target) = from.offset(direction, cols) {
            if position.has_color_at(target, color.opponent()) {
                moves.push(Move::new(from, target, MoveAttributes::CAPTURE));
            }
        }
    }
    moves
}

/// Generates all pseudo-legal pawn moves of given color.
///
/// Pawns are visited in ascending [`Square::index`] order, and the moves of
/// each pawn are ordered as: single push, double push, capture towards the A
/// file, capture towards the H file.
///
/// ```
/// use pawnstorm::chess::core::Color;
/// use pawnstorm::chess::movegen::generate_pawn_moves;
/// use pawnstorm::chess::position::Position;
///
/// let moves = generate_pawn_moves(&Position::starting(), Color::White);
/// assert_eq!(moves.len(), 16);
/// assert_eq!(moves[0].to_string(), "a2a3");
/// assert_eq!(moves[1].to_string(), "a2a4");
/// ```
#[must_use]
pub fn generate_pawn_moves(position: &Position, color: Color) -> MoveList {
    position
        .find_all(PieceKind::Pawn, color)
        .into_iter()
        .flat_map(|from| pawn_moves_from(position, color, from))
        .collect()
}

/// Same as [`generate_pawn_moves`] but the pawns are distributed across
/// [rayon] workers. The result is sorted back into the generation order, so it
/// is identical to the sequential one.
///
/// [rayon]: https://docs.rs/rayon
#[must_use]
pub fn par_generate_pawn_moves(position: &Position, color: Color) -> MoveList {
    let mut moves = position
        .find_all(PieceKind::Pawn, color)
        .as_slice()
        .par_iter()
        .flat_map_iter(|&from| pawn_moves_from(position, color, from))
        .collect::<Vec<_>>();
    moves.sort_unstable_by_key(|pawn_move| (pawn_move.from(), kind_order(pawn_move)));
    moves.into_iter().collect()
}

/// Positions reachable by a single pseudo-legal pawn move, in the order of
/// [`generate_pawn_moves`].
#[must_use]
pub fn pawn_successors(position: &Position, color: Color) -> Vec<Position> {
    generate_pawn_moves(position, color)
        .iter()
        .map(|pawn_move| position.apply(*pawn_move))
        .collect()
}

/// Runs [`pawn_successors`] for independent (position, color) pairs in
/// parallel. The successors of `inputs[i]` are stored in `result[i]`.
#[must_use]
pub fn batch_pawn_successors(inputs: &[(Position, Color)]) -> Vec<Vec<Position>> {
    inputs
        .par_iter()
        .map(|(position, color)| pawn_successors(position, *color))
        .collect()
}

/// Counts the leaf nodes of the pawn move tree: each ply generates
/// [pseudo-legal](generate_pawn_moves) pawn moves of the side to move, then
/// the other side moves.
///
/// This is [Perft] restricted to pawns, it checks move generation and
/// application together.
///
/// [Perft]: https://www.chessprogramming.org/Perft
#[must_use]
pub fn pawn_perft(position: &Position, color: Color, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_pawn_moves(position, color);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|pawn_move| pawn_perft(&position.apply(*pawn_move), !color, depth - 1))
        .sum()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::core::Piece;

    fn setup(fen: &str) -> Position {
        Position::try_from(fen).unwrap_or_else(|e| panic!("parsing valid position {fen}: {e}"))
    }

    fn get_moves(position: &Position, color: Color) -> Vec<String> {
        generate_pawn_moves(position, color)
            .iter()
            .map(Move::to_string)
            .collect()
    }

    #[test]
    fn starting_moves() {
        assert_eq!(
            get_moves(&Position::starting(), Color::White),
            vec![
                "a2a3", "a2a4", "b2b3", "b2b4", "c2c3", "c2c4", "d2d3", "d2d4", "e2e3", "e2e4",
                "f2f3", "f2f4", "g2g3", "g2g4", "h2h3", "h2h4"
            ]
        );
        assert_eq!(
            get_moves(&Position::starting(), Color::Black),
            vec![
                "a7a6", "a7a5", "b7b6", "b7b5", "c7c6", "c7c5", "d7d6", "d7d5", "e7e6", "e7e5",
                "f7f6", "f7f5", "g7g6", "g7g5", "h7h6", "h7h5"
            ]
        );
        assert!(generate_pawn_moves(&Position::starting(), Color::White)
            .iter()
            .all(|pawn_move| !pawn_move.is_capture()));
    }

    #[test]
    fn attributes() {
        let moves = generate_pawn_moves(&setup("8/8/8/1p6/P7/8/4P3/8"), Color::White);
        assert_eq!(
            moves.as_slice(),
            &[
                Move::new(Square::E2, Square::E3, MoveAttributes::QUIET),
                Move::new(Square::E2, Square::E4, MoveAttributes::DOUBLE_PAWN_PUSH),
                Move::new(Square::A4, Square::A5, MoveAttributes::QUIET),
                Move::new(Square::A4, Square::B5, MoveAttributes::CAPTURE),
            ]
        );
    }

    #[test]
    fn blocked_pushes() {
        // Blocked right in front: neither push is possible.
        assert_eq!(get_moves(&setup("8/8/8/8/8/4n3/4P3/8"), Color::White), Vec::<String>::new());
        // The destination of the double push is occupied.
        assert_eq!(get_moves(&setup("8/8/8/8/4N3/8/4P3/8"), Color::White), vec!["e2e3"]);
        // Own pieces block as well and can not be captured.
        assert_eq!(
            get_moves(&setup("8/3p4/2bbb3/8/8/8/8/8"), Color::Black),
            Vec::<String>::new()
        );
        // Double push only from the home rank.
        assert_eq!(get_moves(&setup("8/8/8/8/8/4P3/8/8"), Color::White), vec!["e3e4"]);
        assert_eq!(get_moves(&setup("8/8/3p4/8/8/8/8/8"), Color::Black), vec!["d6d5"]);
    }

    #[test]
    fn captures() {
        assert_eq!(
            get_moves(&setup("8/8/8/2r1q3/3P4/8/8/8"), Color::White),
            vec!["d4d5", "d4c5", "d4e5"]
        );
        // The piece in front is not capturable.
        assert_eq!(
            get_moves(&setup("8/8/8/3r4/3P4/8/8/8"), Color::White),
            Vec::<String>::new()
        );
        // Black captures downwards.
        assert_eq!(
            get_moves(&setup("8/8/8/8/3p4/2N1B3/8/8"), Color::Black),
            vec!["d4d3", "d4c3", "d4e3"]
        );
        // Own pieces are not captured.
        assert_eq!(
            get_moves(&setup("8/8/8/2R1Q3/3P4/8/8/8"), Color::White),
            vec!["d4d5"]
        );
    }

    #[test]
    fn captures_do_not_wrap_around_the_board() {
        // Black pieces on the H file next rank up are not diagonal to A4.
        assert_eq!(get_moves(&setup("8/8/7p/7p/P7/8/8/8"), Color::White), vec!["a4a5"]);
        assert_eq!(get_moves(&setup("8/8/8/p7/7P/8/8/8"), Color::White), vec!["h4h5"]);
        assert_eq!(get_moves(&setup("8/8/8/7p/P7/8/8/8"), Color::Black), vec!["h5h4"]);
    }

    #[test]
    fn last_rank_pawns_have_no_moves() {
        // Promotion is not implemented: these pawns are stuck.
        assert!(generate_pawn_moves(&setup("P7/8/8/8/8/8/8/8"), Color::White).is_empty());
        assert!(generate_pawn_moves(&setup("8/8/8/8/8/8/8/7p"), Color::Black).is_empty());
        // Pawns on the seventh rank may still capture onto the eighth.
        assert_eq!(
            get_moves(&setup("1n6/P7/8/8/8/8/8/8"), Color::White),
            vec!["a7a8", "a7b8"]
        );
    }

    #[test]
    fn only_requested_color() {
        let position = setup("8/8/8/3p4/3P4/8/8/8");
        assert!(generate_pawn_moves(&position, Color::White).is_empty());
        assert!(generate_pawn_moves(&position, Color::Black).is_empty());
        assert!(generate_pawn_moves(&Position::empty(), Color::White).is_empty());
    }

    #[test]
    fn successors() {
        let position = setup("8/8/8/1p6/P7/8/8/8");
        let successors = pawn_successors(&position, Color::White);
        assert_eq!(
            successors.iter().map(Position::to_string).collect::<Vec<_>>(),
            vec!["8/8/8/Pp6/8/8/8/8", "8/8/8/1P6/8/8/8/8"]
        );
        // The original position is intact.
        assert_eq!(position.to_string(), "8/8/8/1p6/P7/8/8/8");
        for successor in &successors {
            assert!(successor.is_consistent());
        }
        assert_eq!(
            successors[1].at(Square::B5),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn parallel_generation_matches_sequential() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "8/8/8/2r1q3/3P4/8/8/8",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
            "pppppppp/PPPPPPPP/pppppppp/8/PPPPPPPP/pppppppp/PPPPPPPP/8",
            "8/8/8/8/8/8/8/8",
        ] {
            let position = setup(fen);
            for color in [Color::White, Color::Black] {
                assert_eq!(
                    par_generate_pawn_moves(&position, color),
                    generate_pawn_moves(&position, color),
                    "{fen} {color}"
                );
            }
        }
    }

    #[test]
    fn batch() {
        let inputs = [
            (Position::starting(), Color::White),
            (Position::empty(), Color::Black),
            (setup("8/8/8/1p6/P7/8/8/8"), Color::Black),
        ];
        let results = batch_pawn_successors(&inputs);
        assert_eq!(results.len(), inputs.len());
        for ((position, color), successors) in inputs.iter().zip(&results) {
            assert_eq!(successors, &pawn_successors(position, *color));
        }
        assert_eq!(results[0].len(), 16);
        assert!(results[1].is_empty());
        assert_eq!(results[2].len(), 2);
    }

    #[test]
    fn perft() {
        assert_eq!(pawn_perft(&Position::starting(), Color::White, 0), 1);
        assert_eq!(pawn_perft(&Position::starting(), Color::White, 1), 16);
        assert_eq!(pawn_perft(&Position::starting(), Color::White, 2), 256);
        assert_eq!(pawn_perft(&Position::starting(), Color::White, 3), 3846);
        assert_eq!(pawn_perft(&Position::empty(), Color::White, 3), 0);
    }
}
