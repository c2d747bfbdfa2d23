//! Rook move generation
//!
//! Rooks slide along ranks and files until blocked.

use crate::board::Position;
use crate::move_gen::sliding::{sliding_moves, ORTHOGONAL_DIRS};
use crate::move_gen::MoveList;
use crate::types::Piece;

/// Generate rook destinations from the piece's square
pub fn rook_moves(position: &Position, piece: &Piece, moves: &mut MoveList) {
    sliding_moves(position, piece, &ORTHOGONAL_DIRS, moves);
}
