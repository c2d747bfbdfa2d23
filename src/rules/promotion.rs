//! Pawn promotion
//!
//! When a pawn's move lands on the opponent's back rank the move is applied
//! but the pawn is not yet replaced; the controller holds a
//! [`PendingPromotion`] and waits for a piece choice. Everything needed to
//! undo the move on cancellation is captured here by value: the pawn as it
//! was before moving, any piece captured en route, and the en passant
//! window that the move closed.

use crate::types::{Piece, PieceColor, PieceId, PieceKind, Square, BOARD_SIZE};

/// The kinds a pawn may promote to
pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// The rank on which this side's pawns promote
pub fn promotion_row(color: PieceColor) -> u8 {
    match color {
        PieceColor::White => 0,
        PieceColor::Black => BOARD_SIZE - 1,
    }
}

/// Whether a move of this piece kind onto `target_row` triggers promotion
pub fn is_promotion_move(kind: PieceKind, color: PieceColor, target_row: u8) -> bool {
    kind == PieceKind::Pawn && target_row == promotion_row(color)
}

/// Whether the kind is an accepted promotion choice
pub fn is_valid_choice(kind: PieceKind) -> bool {
    PROMOTION_CHOICES.contains(&kind)
}

/// A promotion waiting for the player's piece choice
///
/// Lives only between the pawn reaching the last rank and the choice being
/// made or cancelled. The captured piece, if any, is stored by value so
/// cancellation reinserts the identical instance with its flags intact.
#[derive(Debug, Clone)]
pub struct PendingPromotion {
    /// The pawn exactly as it was before the move, including its square
    pub(crate) pawn_before: Piece,
    /// Where the pawn now stands, the promotion square
    pub(crate) to: Square,
    /// Piece captured by the promoting move, removed from the board for now
    pub(crate) captured: Option<Piece>,
    /// En passant window that was open before the move, restored on cancel
    pub(crate) prior_en_passant: Option<PieceId>,
}

impl PendingPromotion {
    /// The square awaiting the promotion choice
    pub fn square(&self) -> Square {
        self.to
    }

    /// Color of the promoting pawn
    pub fn color(&self) -> PieceColor {
        self.pawn_before.color()
    }
}
