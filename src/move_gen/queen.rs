//! Queen move generation
//!
//! A queen combines the rook's orthogonal rays with the bishop's diagonals.

use crate::board::Position;
use crate::move_gen::sliding::{sliding_moves, DIAGONAL_DIRS, ORTHOGONAL_DIRS};
use crate::move_gen::MoveList;
use crate::types::Piece;

/// Generate queen destinations from the piece's square
pub fn queen_moves(position: &Position, piece: &Piece, moves: &mut MoveList) {
    sliding_moves(position, piece, &ORTHOGONAL_DIRS, moves);
    sliding_moves(position, piece, &DIAGONAL_DIRS, moves);
}
