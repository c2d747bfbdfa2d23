//! Attack queries
//!
//! Answers "could any piece of this color move onto that square", evaluated
//! with check safety disabled. This is the one primitive that must never
//! recurse into king-safety evaluation: the check-safety validator and the
//! castling-path validator are both built on top of it, and evaluating king
//! safety while answering an attack query would recurse forever.
//!
//! Pawn attacks are the two forward diagonals regardless of what occupies
//! them, which is what both king safety (the king stands on the queried
//! square) and castling-path validation (the square is empty) need.

use crate::board::Position;
use crate::types::{Piece, PieceColor, PieceKind, Square};

/// Whether any piece of `by` attacks `target`
pub fn is_square_attacked(position: &Position, target: Square, by: PieceColor) -> bool {
    position.pieces_of(by).any(|piece| attacks(position, piece, target))
}

/// Whether this piece attacks `target`, considering obstruction but not
/// king safety
fn attacks(position: &Position, piece: &Piece, target: Square) -> bool {
    let from = piece.square();
    if from == target {
        return false;
    }
    let dr = target.row() as i8 - from.row() as i8;
    let dc = target.col() as i8 - from.col() as i8;

    match piece.kind() {
        PieceKind::Pawn => dr == piece.color().forward_step() && dc.abs() == 1,
        PieceKind::Knight => {
            (dr.abs() == 2 && dc.abs() == 1) || (dr.abs() == 1 && dc.abs() == 2)
        }
        PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
        PieceKind::Bishop => dr.abs() == dc.abs() && ray_is_clear(position, from, target),
        PieceKind::Rook => (dr == 0 || dc == 0) && ray_is_clear(position, from, target),
        PieceKind::Queen => {
            (dr.abs() == dc.abs() || dr == 0 || dc == 0)
                && ray_is_clear(position, from, target)
        }
    }
}

/// Whether every square strictly between `from` and `target` is empty.
/// Callers guarantee the two squares share a rank, file or diagonal.
fn ray_is_clear(position: &Position, from: Square, target: Square) -> bool {
    let dr = (target.row() as i8 - from.row() as i8).signum();
    let dc = (target.col() as i8 - from.col() as i8).signum();

    let mut current = from;
    loop {
        let Some(next) = current.offset(dr, dc) else {
            return false;
        };
        if next == target {
            return true;
        }
        if !position.is_empty(next) {
            return false;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_rook_attack_blocked_by_intervening_piece() {
        let mut position = Position::empty();
        position.spawn(PieceKind::Rook, PieceColor::Black, sq(7, 0)).unwrap();
        assert!(is_square_attacked(&position, sq(7, 7), PieceColor::Black));

        position.spawn(PieceKind::Pawn, PieceColor::White, sq(7, 3)).unwrap();
        assert!(!is_square_attacked(&position, sq(7, 7), PieceColor::Black));
        assert!(is_square_attacked(&position, sq(7, 3), PieceColor::Black));
    }

    #[test]
    fn test_pawn_attacks_forward_diagonals_only() {
        let mut position = Position::empty();
        position.spawn(PieceKind::Pawn, PieceColor::White, sq(4, 4)).unwrap();

        assert!(is_square_attacked(&position, sq(3, 3), PieceColor::White));
        assert!(is_square_attacked(&position, sq(3, 5), PieceColor::White));
        assert!(!is_square_attacked(&position, sq(3, 4), PieceColor::White));
        assert!(!is_square_attacked(&position, sq(5, 3), PieceColor::White));
    }

    #[test]
    fn test_knight_jumps_over_blockers() {
        let mut position = Position::empty();
        position.spawn(PieceKind::Knight, PieceColor::Black, sq(0, 1)).unwrap();
        position.spawn(PieceKind::Pawn, PieceColor::Black, sq(1, 1)).unwrap();
        assert!(is_square_attacked(&position, sq(2, 2), PieceColor::Black));
        assert!(is_square_attacked(&position, sq(2, 0), PieceColor::Black));
        assert!(!is_square_attacked(&position, sq(1, 3), PieceColor::Black));
    }

    #[test]
    fn test_queen_attacks_along_rank_and_diagonal() {
        let mut position = Position::empty();
        position.spawn(PieceKind::Queen, PieceColor::White, sq(4, 4)).unwrap();
        assert!(is_square_attacked(&position, sq(4, 0), PieceColor::White));
        assert!(is_square_attacked(&position, sq(0, 0), PieceColor::White));
        assert!(!is_square_attacked(&position, sq(3, 2), PieceColor::White));
    }
}
