//! Shared ray walk for sliding pieces
//!
//! Bishops, rooks and queens all move along rays until something blocks
//! them. The walk visits each ray nearest square first: an empty square is
//! included and the walk continues, an enemy piece is included as a capture
//! and ends the ray, a friendly piece ends the ray without being included.

use crate::board::Position;
use crate::move_gen::MoveList;
use crate::types::Piece;

/// The four orthogonal ray directions as (row, col) deltas
pub const ORTHOGONAL_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The four diagonal ray directions as (row, col) deltas
pub const DIAGONAL_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Walk every ray in `directions` from the piece's square, appending
/// reachable destinations in nearest-first order
pub fn sliding_moves(
    position: &Position,
    piece: &Piece,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in directions {
        let mut current = piece.square();
        while let Some(next) = current.offset(dr, dc) {
            match position.piece_at(next) {
                None => {
                    moves.push(next);
                    current = next;
                }
                Some(blocker) if blocker.is_enemy(piece) => {
                    moves.push(next);
                    break;
                }
                Some(_) => break,
            }
        }
    }
}
