//! Implementation of chess environment: board representation and (pawn) move
//! generation.

pub mod bitboard;
pub mod core;
pub mod movegen;
pub mod position;
pub mod render;
