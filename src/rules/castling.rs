//! Castling eligibility
//!
//! Castling is legal when, for the chosen side of the board:
//!
//! - neither the king nor that rook has moved
//! - the king is not currently in check
//! - every square strictly between king and rook is empty
//! - neither square the king crosses (including the destination) is attacked
//!
//! Execution geometry lives in `Position::apply_move`: the king steps two
//! squares toward the rook and the rook jumps to the square the king
//! crossed. Kingside and queenside are symmetric with opposite offsets.

use crate::board::Position;
use crate::move_gen::{is_square_attacked, MoveList};
use crate::types::{Piece, PieceKind, Square, BOARD_SIZE};

#[derive(Debug, Clone, Copy)]
enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    fn rook_col(self) -> i8 {
        match self {
            CastleSide::Kingside => BOARD_SIZE as i8 - 1,
            CastleSide::Queenside => 0,
        }
    }

    fn step(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }
}

/// Append the castling destinations currently available to this king
pub fn castle_destinations(position: &Position, king: &Piece, moves: &mut MoveList) {
    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if can_castle(position, king, side) {
            if let Some(destination) = king.square().offset(0, 2 * side.step()) {
                moves.push(destination);
            }
        }
    }
}

fn can_castle(position: &Position, king: &Piece, side: CastleSide) -> bool {
    if king.kind() != PieceKind::King || king.has_moved() {
        return false;
    }

    let row = king.square().row() as i8;
    let Ok(rook_square) = Square::new(row, side.rook_col()) else {
        return false;
    };
    let rook_unmoved = position
        .piece_at(rook_square)
        .is_some_and(|p| p.kind() == PieceKind::Rook && p.is_friend(king) && !p.has_moved());
    if !rook_unmoved {
        return false;
    }

    let enemy = king.color().opponent();
    if is_square_attacked(position, king.square(), enemy) {
        return false;
    }

    // every square strictly between king and rook must be empty
    let king_col = king.square().col() as i8;
    let (low, high) = if king_col < side.rook_col() {
        (king_col, side.rook_col())
    } else {
        (side.rook_col(), king_col)
    };
    for col in (low + 1)..high {
        let Ok(between) = Square::new(row, col) else {
            return false;
        };
        if !position.is_empty(between) {
            return false;
        }
    }

    // the king may not pass through or land on an attacked square
    for distance in 1..=2 {
        let Some(crossed) = king.square().offset(0, distance * side.step()) else {
            return false;
        };
        if is_square_attacked(position, crossed, enemy) {
            return false;
        }
    }

    true
}
