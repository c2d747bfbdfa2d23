//! Knight move generation
//!
//! Knights jump in an L shape: two squares in one direction and one square
//! perpendicular. They are the only pieces that ignore obstruction along the
//! way, so only the destination square matters.

use crate::board::Position;
use crate::move_gen::MoveList;
use crate::types::Piece;

/// The eight L-shaped jump offsets
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, 1),
];

/// Generate knight destinations from the piece's square
///
/// A destination is valid when it is on the board and either empty or
/// occupied by an enemy piece.
pub fn knight_moves(position: &Position, piece: &Piece, moves: &mut MoveList) {
    for &(dr, dc) in &KNIGHT_OFFSETS {
        if let Some(to) = piece.square().offset(dr, dc) {
            match position.piece_at(to) {
                None => moves.push(to),
                Some(other) if other.is_enemy(piece) => moves.push(to),
                Some(_) => {}
            }
        }
    }
}
