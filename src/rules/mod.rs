//! Rules layer: composes geometry into fully legal moves
//!
//! The `move_gen` generators know shape and obstruction; this module layers
//! the remaining legality on top:
//!
//! - `check` - would the move leave the mover's own king attacked
//! - `castling` - eligibility and geometry of the combined king/rook move
//! - `promotion` - the pending-promotion handshake with the controller
//! - `terminal` - checkmate, stalemate and insufficient-material evaluation
//!
//! [`legal_destinations`] is the single composition point: candidate moves
//! plus castling destinations, filtered through the check-safety validator.

pub mod castling;
pub mod check;
pub mod promotion;
pub mod terminal;


use crate::board::Position;
use crate::move_gen::{pseudo_legal_moves, MoveList};
use crate::types::{Piece, PieceColor, PieceKind, Square};

/// Every square this piece may legally move to
///
/// Candidate shapes come from the per-kind generators, castling destinations
/// from the castling validator, and anything that would leave the mover's
/// own king in check is filtered out.
pub fn legal_destinations(position: &Position, piece: &Piece) -> MoveList {
    let mut candidates = MoveList::new();
    pseudo_legal_moves(position, piece, &mut candidates);
    if piece.kind() == PieceKind::King {
        castling::castle_destinations(position, piece, &mut candidates);
    }
    candidates.retain(|to| !check::move_leaves_king_in_check(position, piece, *to));
    candidates
}

/// Whether `to` is among the piece's legal destinations
pub fn is_legal_destination(position: &Position, piece: &Piece, to: Square) -> bool {
    legal_destinations(position, piece).contains(&to)
}

/// Whether the side has at least one legal move anywhere on the board
pub fn has_any_legal_move(position: &Position, color: PieceColor) -> bool {
    position
        .pieces_of(color)
        .any(|piece| !legal_destinations(position, piece).is_empty())
}
