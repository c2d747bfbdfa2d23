//! King move generation
//!
//! Kings step one square in any of the eight directions. The two-square
//! castling destinations are not produced here: whether the king may castle
//! depends on attack queries and rook state, which `rules::castling`
//! resolves before adding those destinations to the legal set.

use crate::board::Position;
use crate::move_gen::MoveList;
use crate::types::Piece;

/// The eight one-square step offsets
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Generate one-square king destinations from the piece's square
pub fn king_moves(position: &Position, piece: &Piece, moves: &mut MoveList) {
    for &(dr, dc) in &KING_OFFSETS {
        if let Some(to) = piece.square().offset(dr, dc) {
            match position.piece_at(to) {
                None => moves.push(to),
                Some(other) if other.is_enemy(piece) => moves.push(to),
                Some(_) => {}
            }
        }
    }
}
