//! Board position: the piece set plus auxiliary game state
//!
//! [`Position`] owns every live piece and the two pieces of auxiliary state
//! the rules need beyond piece placement: whose turn it is and which pawn, if
//! any, may be captured en passant on the very next move.
//!
//! All mutation funnels through a small set of crate-private routines so that
//! the "no two pieces on one square" invariant holds everywhere. Check-safety
//! evaluation works on a clone ([`Position::hypothetical_after`]); the real
//! position is never touched while a candidate move is being probed.

use crate::error::{RulesError, RulesResult};
use crate::types::{Piece, PieceColor, PieceId, PieceKind, Square, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything that changed while applying a single move
///
/// Returned by [`Position::apply_move`] so the controller can record history,
/// raise events and decide whether a promotion is now pending.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MoveEffects {
    pub kind: PieceKind,
    pub color: PieceColor,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub was_en_passant: bool,
    pub was_castle: bool,
}

/// The set of live pieces and auxiliary state for one game
///
/// Cloning a `Position` yields a fully independent snapshot (at most 32 small
/// copyable pieces), which is what the check-safety validator simulates moves
/// on and what callers may hand to parallel read-only queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pieces: Vec<Piece>,
    next_id: u32,
    side_to_move: PieceColor,
    en_passant_target: Option<PieceId>,
}

impl Position {
    /// An empty board with White to move, for scripted setups and tests
    pub fn empty() -> Self {
        Position {
            pieces: Vec::with_capacity(32),
            next_id: 0,
            side_to_move: PieceColor::White,
            en_passant_target: None,
        }
    }

    /// The standard starting position, 16 pieces per side
    pub fn standard() -> Self {
        let mut position = Position::empty();

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for col in 0..BOARD_SIZE as i8 {
            let kind = back_rank[col as usize];
            position.spawn_unchecked(kind, PieceColor::Black, Square::new(0, col).unwrap());
            position.spawn_unchecked(PieceKind::Pawn, PieceColor::Black, Square::new(1, col).unwrap());
            position.spawn_unchecked(PieceKind::Pawn, PieceColor::White, Square::new(6, col).unwrap());
            position.spawn_unchecked(kind, PieceColor::White, Square::new(7, col).unwrap());
        }

        position
    }

    /// Place a new piece on an empty square
    ///
    /// Fails with [`RulesError::InconsistentState`] if the square is already
    /// occupied; a position never holds two pieces on one square.
    pub fn spawn(
        &mut self,
        kind: PieceKind,
        color: PieceColor,
        square: Square,
    ) -> RulesResult<PieceId> {
        if self.piece_at(square).is_some() {
            return Err(RulesError::InconsistentState {
                message: format!("square {square} is already occupied"),
            });
        }
        Ok(self.spawn_unchecked(kind, color, square))
    }

    fn spawn_unchecked(&mut self, kind: PieceKind, color: PieceColor, square: Square) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.pieces.push(Piece::new(id, kind, color, square));
        id
    }

    /// All live pieces, in no particular order
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// All live pieces of one side
    pub fn pieces_of(&self, color: PieceColor) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.color() == color)
    }

    /// Look a piece up by identity
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    /// The piece occupying a square, if any
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.square() == square)
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub fn color_at(&self, square: Square) -> Option<PieceColor> {
        self.piece_at(square).map(|p| p.color())
    }

    /// The king of one side, if it is on the board
    pub fn king_of(&self, color: PieceColor) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.kind() == PieceKind::King && p.color() == color)
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.side_to_move
    }

    /// The pawn that may be captured en passant on the current move
    pub fn en_passant_target(&self) -> Option<PieceId> {
        self.en_passant_target
    }

    /// Signed material sum in pawn units, White minus Black
    pub fn material_balance(&self) -> i32 {
        self.pieces
            .iter()
            .map(|p| match p.color() {
                PieceColor::White => p.kind().value(),
                PieceColor::Black => -p.kind().value(),
            })
            .sum()
    }

    pub(crate) fn toggle_side(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    pub(crate) fn remove(&mut self, id: PieceId) -> Option<Piece> {
        let index = self.pieces.iter().position(|p| p.id() == id)?;
        let piece = self.pieces.swap_remove(index);
        debug!("[BOARD] {} taken from {}", piece.kind(), piece.square());
        Some(piece)
    }

    /// Put a previously removed piece back, identity and flags intact.
    /// Used when a pending promotion is cancelled.
    pub(crate) fn reinsert(&mut self, piece: Piece) -> RulesResult<()> {
        if self.piece_at(piece.square()).is_some() {
            return Err(RulesError::InconsistentState {
                message: format!("cannot reinsert onto occupied square {}", piece.square()),
            });
        }
        self.pieces.push(piece);
        Ok(())
    }

    pub(crate) fn relocate(&mut self, id: PieceId, square: Square) -> RulesResult<()> {
        if self.piece_at(square).is_some_and(|p| p.id() != id) {
            return Err(RulesError::InconsistentState {
                message: format!("cannot relocate onto occupied square {square}"),
            });
        }
        let piece = self.piece_mut(id)?;
        piece.square = square;
        Ok(())
    }

    pub(crate) fn restore_en_passant_target(&mut self, target: Option<PieceId>) {
        self.en_passant_target = target;
    }

    /// Replace a pawn with a freshly created piece of the chosen kind on the
    /// same square. The pawn is destroyed; the new piece has a new identity.
    pub(crate) fn promote(&mut self, pawn: PieceId, kind: PieceKind) -> RulesResult<PieceId> {
        let (color, square) = {
            let piece = self.piece(pawn).ok_or_else(|| RulesError::InconsistentState {
                message: "pending promotion refers to a missing pawn".to_string(),
            })?;
            (piece.color(), piece.square())
        };
        self.remove(pawn);
        let id = self.spawn_unchecked(kind, color, square);
        debug!("[BOARD] pawn on {square} promoted to {kind}");
        Ok(id)
    }

    /// Apply a move that already passed legality checks
    ///
    /// Handles, in order: the capture on the destination square, the en
    /// passant capture beside it, the one-ply en passant window, the rook
    /// jump of a castling king, and finally the mover's relocation and
    /// `has_moved` marking. Returns what happened so the controller can
    /// record and announce it.
    pub(crate) fn apply_move(&mut self, id: PieceId, to: Square) -> RulesResult<MoveEffects> {
        let mover = *self.piece(id).ok_or_else(|| RulesError::InconsistentState {
            message: "move application on a missing piece".to_string(),
        })?;
        let from = mover.square();

        let captured_id = self.piece_at(to).filter(|p| p.id() != id).map(|p| p.id());
        let mut captured = captured_id.and_then(|cid| self.remove(cid));

        // a pawn stepping diagonally onto an empty square takes the pawn that
        // just double-stepped past it, not anything on the destination
        let mut was_en_passant = false;
        if mover.kind() == PieceKind::Pawn && to.col() != from.col() && captured.is_none() {
            if let Some(victim_id) = self.en_passant_target {
                let victim_matches = self.piece(victim_id).is_some_and(|v| {
                    v.is_enemy(&mover) && v.square().col() == to.col() && v.square().row() == from.row()
                });
                if victim_matches {
                    captured = self.remove(victim_id);
                    was_en_passant = true;
                }
            }
        }

        // the window lasts exactly one ply: cleared on every move, re-armed
        // only by a pawn double step
        self.en_passant_target = None;
        let double_step = from.offset(2 * mover.color().forward_step(), 0);
        if mover.kind() == PieceKind::Pawn && double_step == Some(to) {
            self.en_passant_target = Some(id);
        }

        // a king moving two squares along its rank is a castle; the rook
        // jumps to the square the king crossed
        let mut was_castle = false;
        let col_delta = to.col() as i8 - from.col() as i8;
        if mover.kind() == PieceKind::King && to.row() == from.row() && col_delta.abs() == 2 {
            let rook_col = if col_delta > 0 { BOARD_SIZE as i8 - 1 } else { 0 };
            let rook_from = Square::new(from.row() as i8, rook_col)?;
            let rook_to = Square::new(from.row() as i8, (from.col() as i8 + to.col() as i8) / 2)?;
            let rook_id = self
                .piece_at(rook_from)
                .filter(|p| p.kind() == PieceKind::Rook && p.is_friend(&mover))
                .map(|p| p.id());
            if let Some(rid) = rook_id {
                self.relocate(rid, rook_to)?;
                self.mark_moved(rid)?;
                was_castle = true;
            }
        }

        self.relocate(id, to)?;
        self.mark_moved(id)?;

        Ok(MoveEffects {
            kind: mover.kind(),
            color: mover.color(),
            from,
            to,
            captured,
            was_en_passant,
            was_castle,
        })
    }

    /// The position as it would look after the move, leaving `self` untouched
    pub(crate) fn hypothetical_after(&self, id: PieceId, to: Square) -> RulesResult<Position> {
        let mut hypothetical = self.clone();
        hypothetical.apply_move(id, to)?;
        Ok(hypothetical)
    }

    fn piece_mut(&mut self, id: PieceId) -> RulesResult<&mut Piece> {
        self.pieces
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| RulesError::InconsistentState {
                message: "piece lookup by id failed".to_string(),
            })
    }

    fn mark_moved(&mut self, id: PieceId) -> RulesResult<()> {
        self.piece_mut(id)?.has_moved = true;
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_setup() {
        let position = Position::standard();
        assert_eq!(position.pieces().len(), 32);
        assert_eq!(position.side_to_move(), PieceColor::White);
        assert_eq!(position.material_balance(), 0);

        let white_king = position.king_of(PieceColor::White).unwrap();
        assert_eq!(white_king.square(), Square::new(7, 4).unwrap());
        let black_king = position.king_of(PieceColor::Black).unwrap();
        assert_eq!(black_king.square(), Square::new(0, 4).unwrap());

        for col in 0..8 {
            let pawn = position.piece_at(Square::new(6, col).unwrap()).unwrap();
            assert_eq!(pawn.kind(), PieceKind::Pawn);
            assert_eq!(pawn.color(), PieceColor::White);
        }
    }

    #[test]
    fn test_spawn_rejects_occupied_square() {
        let mut position = Position::empty();
        let square = Square::new(3, 3).unwrap();
        position.spawn(PieceKind::Rook, PieceColor::White, square).unwrap();
        assert!(matches!(
            position.spawn(PieceKind::Queen, PieceColor::Black, square),
            Err(RulesError::InconsistentState { .. })
        ));
    }

    #[test]
    fn test_apply_move_captures_by_identity() {
        let mut position = Position::empty();
        let rook = position
            .spawn(PieceKind::Rook, PieceColor::White, Square::new(7, 0).unwrap())
            .unwrap();
        let victim = position
            .spawn(PieceKind::Pawn, PieceColor::Black, Square::new(7, 5).unwrap())
            .unwrap();

        let effects = position.apply_move(rook, Square::new(7, 5).unwrap()).unwrap();
        assert_eq!(effects.captured.map(|p| p.id()), Some(victim));
        assert!(position.piece(victim).is_none());
        assert_eq!(position.pieces().len(), 1);
        assert!(position.piece(rook).unwrap().has_moved());
    }

    #[test]
    fn test_double_step_arms_en_passant_window_for_one_ply() {
        let mut position = Position::empty();
        let white = position
            .spawn(PieceKind::Pawn, PieceColor::White, Square::new(6, 4).unwrap())
            .unwrap();
        let black = position
            .spawn(PieceKind::Pawn, PieceColor::Black, Square::new(1, 0).unwrap())
            .unwrap();

        position.apply_move(white, Square::new(4, 4).unwrap()).unwrap();
        assert_eq!(position.en_passant_target(), Some(white));

        position.apply_move(black, Square::new(3, 0).unwrap()).unwrap();
        assert_eq!(position.en_passant_target(), Some(black));

        position.apply_move(white, Square::new(3, 4).unwrap()).unwrap();
        assert_eq!(position.en_passant_target(), None);
    }

    #[test]
    fn test_hypothetical_leaves_real_position_untouched() {
        let position = Position::standard();
        let pawn = position.piece_at(Square::new(6, 4).unwrap()).unwrap().id();

        let hypothetical = position.hypothetical_after(pawn, Square::new(4, 4).unwrap()).unwrap();

        assert!(position.piece_at(Square::new(4, 4).unwrap()).is_none());
        assert!(hypothetical.piece_at(Square::new(4, 4).unwrap()).is_some());
        assert_eq!(position.piece(pawn).unwrap().square(), Square::new(6, 4).unwrap());
    }
}
