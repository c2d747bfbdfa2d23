//! Bishop move generation
//!
//! Bishops slide along the four diagonals until blocked.

use crate::board::Position;
use crate::move_gen::sliding::{sliding_moves, DIAGONAL_DIRS};
use crate::move_gen::MoveList;
use crate::types::Piece;

/// Generate bishop destinations from the piece's square
pub fn bishop_moves(position: &Position, piece: &Piece, moves: &mut MoveList) {
    sliding_moves(position, piece, &DIAGONAL_DIRS, moves);
}
