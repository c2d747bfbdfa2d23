//! Check-safety validation
//!
//! A candidate move is illegal when, after making it, any enemy piece could
//! capture the mover's king. The test runs on a hypothetical position (a
//! clone with the move applied) so the real position is never mutated while
//! probing, and the attack query it delegates to is check-unchecked, which
//! bounds the recursion to exactly one level.

use crate::board::Position;
use crate::move_gen::is_square_attacked;
use crate::types::{Piece, PieceColor, Square};
use tracing::warn;

/// Would making this move leave the mover's own king attacked?
///
/// A hypothetical position with no king for the moving side does not reject
/// the move; there is no king to endanger. Such positions only arise from
/// scripted setups, never from a standard game.
pub fn move_leaves_king_in_check(position: &Position, piece: &Piece, to: Square) -> bool {
    let color = piece.color();
    let hypothetical = match position.hypothetical_after(piece.id(), to) {
        Ok(hypothetical) => hypothetical,
        Err(error) => {
            // a candidate that cannot even be simulated is never accepted
            warn!("[RULES] failed to simulate {} to {to}: {error}", piece.kind());
            return true;
        }
    };

    match hypothetical.king_of(color) {
        Some(king) => is_square_attacked(&hypothetical, king.square(), color.opponent()),
        None => false,
    }
}

/// Whether the side's king is currently attacked
///
/// Returns `None` when the side has no king on the board; the controller
/// reports that as an inconsistent state.
pub fn color_in_check(position: &Position, color: PieceColor) -> Option<bool> {
    position
        .king_of(color)
        .map(|king| is_square_attacked(position, king.square(), color.opponent()))
}
