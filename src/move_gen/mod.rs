//! Candidate move generation, one module per piece kind
//!
//! Each generator produces the destinations a piece could reach given only
//! geometry and obstruction: sliding rays stop at the first blocker, pawn
//! pushes require empty squares, captures require an enemy on the target.
//! Check safety is not considered here; the `rules` layer filters these
//! candidates through its hypothetical-position validator, and castling
//! destinations are contributed there as well because their legality depends
//! on attack queries rather than on obstruction alone.
//!
//! Sliding generators enumerate each ray nearest square first, which is what
//! lets the obstruction walk stop at the first occupied square.

pub mod attack;
pub mod bishop;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod queen;
pub mod rook;
pub mod sliding;

use crate::board::Position;
use crate::types::{Piece, PieceKind, Square};
use smallvec::SmallVec;

pub use attack::is_square_attacked;

/// Destination list for a single piece; a queen tops out at 27 squares, so
/// this never spills to the heap
pub type MoveList = SmallVec<[Square; 27]>;

/// Obstruction-resolved, check-unchecked destinations for one piece
///
/// Dispatches on the piece kind. The result ignores whose turn it is and
/// whether the move would expose the mover's own king; it is the raw
/// candidate set the legality pipeline starts from.
pub fn pseudo_legal_moves(position: &Position, piece: &Piece, moves: &mut MoveList) {
    match piece.kind() {
        PieceKind::Pawn => pawn::pawn_moves(position, piece, moves),
        PieceKind::Knight => knight::knight_moves(position, piece, moves),
        PieceKind::Bishop => bishop::bishop_moves(position, piece, moves),
        PieceKind::Rook => rook::rook_moves(position, piece, moves),
        PieceKind::Queen => queen::queen_moves(position, piece, moves),
        PieceKind::King => king::king_moves(position, piece, moves),
    }
}
