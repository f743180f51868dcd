#![no_main]
use itertools::Itertools;
use libfuzzer_sys::fuzz_target;
use pawnstorm::chess::core::{Color, PieceKind};
use pawnstorm::chess::movegen::{generate_pawn_moves, par_generate_pawn_moves, pawn_successors};
use pawnstorm::chess::position::Position;
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(position) = Position::from_fen(input) else {
        return;
    };
    for color in [Color::White, Color::Black] {
        let moves = generate_pawn_moves(&position, color);
        assert_eq!(par_generate_pawn_moves(&position, color), moves);
        assert!(moves.iter().map(ToString::to_string).all_unique());
        for (pawn_move, successor) in moves.iter().zip(pawn_successors(&position, color)) {
            assert!(successor.is_consistent());
            assert!(successor.is_vacant(pawn_move.from()));
            assert_eq!(
                successor.at(pawn_move.to()).map(|piece| piece.kind),
                Some(PieceKind::Pawn)
            );
            assert_eq!(
                successor.board().occupied().count() + u32::from(pawn_move.is_capture()),
                position.board().occupied().count()
            );
        }
    }
});
