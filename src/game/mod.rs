//! Game controller: the state machine driving a two-player game
//!
//! [`Game`] owns the authoritative [`Position`] and is its sole mutator.
//! The flow runs through four states:
//!
//! ```text
//! AwaitingSelection -> PieceSelected -> AwaitingSelection        (move or deselect)
//!                                    -> AwaitingPromotionChoice  (pawn on far rank)
//! AwaitingPromotionChoice -> AwaitingSelection                   (choice or cancel)
//! any state ------------> GameOver                               (after a side toggle)
//! ```
//!
//! `GameOver` is terminal; only [`Game::reset`] leaves it. Turn toggling,
//! terminal evaluation and history recording happen together inside a single
//! call, so no caller ever observes a half-applied move.

pub mod events;
pub mod history;

use crate::board::{MoveEffects, Position};
use crate::error::{RulesError, RulesResult};
use crate::move_gen::{pseudo_legal_moves, MoveList};
use crate::rules;
use crate::rules::check;
use crate::rules::promotion::{self, PendingPromotion};
use crate::rules::terminal::{self, GameResult};
use crate::types::{PieceColor, PieceId, PieceKind, Square};
pub use events::GameEvent;
use history::{MoveHistory, MoveRecord};
use tracing::{debug, info};

/// What a call to [`Game::select`] found on the square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionResult {
    /// A piece of the side to move is now selected
    Selected { square: Square },
    /// The square is empty; any previous selection was dropped
    Empty,
    /// The square holds an opponent piece; any previous selection was dropped
    OpponentPiece,
}

/// Result of a legal move submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was applied and the turn passed to the other side
    Applied { was_capture: bool },
    /// The move was applied but a promotion choice is required before the
    /// turn can pass
    PromotionPending,
}

#[derive(Debug, Clone)]
enum FlowState {
    AwaitingSelection,
    PieceSelected { piece: PieceId },
    AwaitingPromotionChoice { pending: PendingPromotion },
    GameOver { result: GameResult },
}

/// A running two-player game
pub struct Game {
    position: Position,
    state: FlowState,
    history: MoveHistory,
    events: Vec<GameEvent>,
    move_number: u32,
}

impl Game {
    /// A fresh game from the standard starting position
    pub fn new() -> Self {
        Game::from_position(Position::standard())
    }

    /// A game starting from a scripted position, White to move unless the
    /// position says otherwise
    pub fn from_position(position: Position) -> Self {
        Game {
            position,
            state: FlowState::AwaitingSelection,
            history: MoveHistory::new(),
            events: Vec::new(),
            move_number: 1,
        }
    }

    /// The authoritative position; cloning it yields an independent snapshot
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.position.side_to_move()
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Full-move counter, incremented after each Black move
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Signed material sum in pawn units, White minus Black
    pub fn material_balance(&self) -> i32 {
        self.position.material_balance()
    }

    /// The final result, once the game is over
    pub fn result(&self) -> Option<GameResult> {
        match &self.state {
            FlowState::GameOver { result } => Some(*result),
            _ => None,
        }
    }

    /// Square of the currently selected piece, if any
    pub fn selected_square(&self) -> Option<Square> {
        match &self.state {
            FlowState::PieceSelected { piece } => self.position.piece(*piece).map(|p| p.square()),
            _ => None,
        }
    }

    /// Square awaiting a promotion choice, if any
    pub fn pending_promotion_square(&self) -> Option<Square> {
        match &self.state {
            FlowState::AwaitingPromotionChoice { pending } => Some(pending.square()),
            _ => None,
        }
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Select the piece on a square, or drop the selection
    ///
    /// Only a piece of the side to move becomes the selection; an empty
    /// square or an opponent piece clears it. Fails after the game ended or
    /// while a promotion choice is pending.
    pub fn select(&mut self, row: i8, col: i8) -> RulesResult<SelectionResult> {
        let square = Square::new(row, col)?;
        self.ensure_accepting_moves()?;

        match self.position.piece_at(square) {
            Some(piece) if piece.color() == self.position.side_to_move() => {
                let id = piece.id();
                debug!("[GAME] selected {} on {square}", piece.kind());
                self.state = FlowState::PieceSelected { piece: id };
                Ok(SelectionResult::Selected { square })
            }
            Some(_) => {
                self.state = FlowState::AwaitingSelection;
                Ok(SelectionResult::OpponentPiece)
            }
            None => {
                self.state = FlowState::AwaitingSelection;
                Ok(SelectionResult::Empty)
            }
        }
    }

    /// Drop the current selection, if any
    pub fn deselect(&mut self) {
        if matches!(self.state, FlowState::PieceSelected { .. }) {
            self.state = FlowState::AwaitingSelection;
        }
    }

    /// Move the selected piece to the given square
    ///
    /// On success the selection is consumed: either the turn passes
    /// (`Applied`) or a promotion choice is now pending. On failure the
    /// position and the selection are left untouched.
    pub fn attempt_move(&mut self, row: i8, col: i8) -> RulesResult<MoveOutcome> {
        let to = Square::new(row, col)?;
        match &self.state {
            FlowState::GameOver { .. } => Err(RulesError::GameFinished),
            FlowState::AwaitingPromotionChoice { .. } => Err(RulesError::IllegalMove {
                message: "a promotion choice is pending".to_string(),
            }),
            FlowState::AwaitingSelection => Err(RulesError::IllegalMove {
                message: "no piece selected".to_string(),
            }),
            FlowState::PieceSelected { piece } => {
                let id = *piece;
                self.execute_move(id, to)
            }
        }
    }

    /// Select and move in one call, for programmatic and network callers
    pub fn submit_move(
        &mut self,
        from_row: i8,
        from_col: i8,
        to_row: i8,
        to_col: i8,
    ) -> RulesResult<MoveOutcome> {
        let from = Square::new(from_row, from_col)?;
        let to = Square::new(to_row, to_col)?;
        self.ensure_accepting_moves()?;

        let id = self
            .position
            .piece_at(from)
            .map(|p| p.id())
            .ok_or_else(|| RulesError::IllegalMove {
                message: format!("no piece on {from}"),
            })?;
        self.execute_move(id, to)
    }

    /// Replace the pending pawn with the chosen piece and complete the turn
    ///
    /// The choice is restricted to queen, rook, bishop and knight; an invalid
    /// kind leaves the pending promotion in place for a valid resubmission.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> RulesResult<MoveOutcome> {
        let pending = match &self.state {
            FlowState::AwaitingPromotionChoice { pending } => pending.clone(),
            FlowState::GameOver { .. } => return Err(RulesError::GameFinished),
            _ => {
                return Err(RulesError::InconsistentState {
                    message: "promotion confirmed with no pending promotion".to_string(),
                })
            }
        };
        if !promotion::is_valid_choice(kind) {
            return Err(RulesError::InvalidPromotionChoice { kind });
        }

        self.position.promote(pending.pawn_before.id(), kind)?;
        info!("[GAME] {} pawn on {} promoted to {kind}", pending.color(), pending.square());

        let effects = MoveEffects {
            kind: PieceKind::Pawn,
            color: pending.color(),
            from: pending.pawn_before.square(),
            to: pending.square(),
            captured: pending.captured,
            was_en_passant: false,
            was_castle: false,
        };
        self.finish_move(effects, Some(kind))
    }

    /// Abandon the pending promotion and restore the prior state
    ///
    /// The pawn returns to its pre-move square with its flags intact, any
    /// captured piece is reinserted as the identical instance, and the turn
    /// does not pass.
    pub fn cancel_promotion(&mut self) -> RulesResult<()> {
        let pending = match &self.state {
            FlowState::AwaitingPromotionChoice { pending } => pending.clone(),
            FlowState::GameOver { .. } => return Err(RulesError::GameFinished),
            _ => {
                return Err(RulesError::InconsistentState {
                    message: "promotion cancelled with no pending promotion".to_string(),
                })
            }
        };

        self.position.remove(pending.pawn_before.id());
        self.position.reinsert(pending.pawn_before)?;
        if let Some(captured) = pending.captured {
            self.position.reinsert(captured)?;
        }
        self.position.restore_en_passant_target(pending.prior_en_passant);
        self.state = FlowState::AwaitingSelection;
        info!(
            "[GAME] promotion cancelled, pawn restored to {}",
            pending.pawn_before.square()
        );
        Ok(())
    }

    /// Legal destinations of the piece on a square, for move-hint rendering
    ///
    /// An empty square yields an empty list. The result is sorted for stable
    /// display.
    pub fn legal_destinations(&self, row: i8, col: i8) -> RulesResult<Vec<Square>> {
        let square = Square::new(row, col)?;
        match self.position.piece_at(square) {
            Some(piece) => {
                let mut destinations: Vec<Square> =
                    rules::legal_destinations(&self.position, piece).into_vec();
                destinations.sort();
                Ok(destinations)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Whether the side's king is currently attacked
    pub fn is_in_check(&self, color: PieceColor) -> RulesResult<bool> {
        check::color_in_check(&self.position, color).ok_or_else(|| RulesError::InconsistentState {
            message: format!("no {color} king on the board"),
        })
    }

    /// The side to move gives up; the other side wins
    pub fn resign(&mut self) -> RulesResult<GameResult> {
        if matches!(self.state, FlowState::GameOver { .. }) {
            return Err(RulesError::GameFinished);
        }
        let result = GameResult::Resignation {
            winner: self.position.side_to_move().opponent(),
        };
        info!("[GAME] {}", result.message());
        self.state = FlowState::GameOver { result };
        self.events.push(GameEvent::GameOver { result });
        Ok(result)
    }

    /// Start over from the standard position; the only way out of `GameOver`
    pub fn reset(&mut self) {
        info!("[GAME] new game");
        self.position = Position::standard();
        self.state = FlowState::AwaitingSelection;
        self.history.clear();
        self.events.clear();
        self.move_number = 1;
    }

    fn ensure_accepting_moves(&self) -> RulesResult<()> {
        match &self.state {
            FlowState::GameOver { .. } => Err(RulesError::GameFinished),
            FlowState::AwaitingPromotionChoice { .. } => Err(RulesError::IllegalMove {
                message: "a promotion choice is pending".to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn execute_move(&mut self, id: PieceId, to: Square) -> RulesResult<MoveOutcome> {
        let piece = *self
            .position
            .piece(id)
            .ok_or_else(|| RulesError::InconsistentState {
                message: "selected piece is no longer on the board".to_string(),
            })?;

        if piece.color() != self.position.side_to_move() {
            return Err(RulesError::NotYourTurn {
                color: piece.color(),
            });
        }

        if !rules::is_legal_destination(&self.position, &piece, to) {
            let mut candidates = MoveList::new();
            pseudo_legal_moves(&self.position, &piece, &mut candidates);
            let message = if candidates.contains(&to) {
                format!("{} to {to} would leave the king in check", piece.kind())
            } else {
                format!("{} cannot reach {to} from {}", piece.kind(), piece.square())
            };
            return Err(RulesError::IllegalMove { message });
        }

        let prior_en_passant = self.position.en_passant_target();
        let effects = self.position.apply_move(id, to)?;
        match &effects.captured {
            Some(captured) => info!("[GAME] takes {} on {to}", captured.kind()),
            None => debug!("[GAME] {} moved to {to}", effects.kind),
        }

        if promotion::is_promotion_move(effects.kind, effects.color, to.row()) {
            let pending = PendingPromotion {
                pawn_before: piece,
                to,
                captured: effects.captured,
                prior_en_passant,
            };
            info!("[GAME] promotion pending on {to}");
            self.state = FlowState::AwaitingPromotionChoice { pending };
            self.events.push(GameEvent::PromotionRequired { square: to });
            return Ok(MoveOutcome::PromotionPending);
        }

        self.finish_move(effects, None)
    }

    /// Record, announce, toggle the turn and evaluate terminal conditions.
    /// Everything here happens before control returns to the caller, so a
    /// move is always observed fully applied.
    fn finish_move(
        &mut self,
        effects: MoveEffects,
        promoted_to: Option<PieceKind>,
    ) -> RulesResult<MoveOutcome> {
        let was_capture = effects.captured.is_some();
        self.events.push(GameEvent::MoveApplied {
            from: effects.from,
            to: effects.to,
            was_capture,
        });

        self.position.toggle_side();
        if effects.color == PieceColor::Black {
            self.move_number += 1;
        }

        let gives_check =
            check::color_in_check(&self.position, self.position.side_to_move()).unwrap_or(false);
        let result = terminal::evaluate(&self.position);

        self.history.add_move(MoveRecord {
            kind: effects.kind,
            color: effects.color,
            from: effects.from,
            to: effects.to,
            captured: effects.captured.map(|p| p.kind()),
            promotion: promoted_to,
            is_castle: effects.was_castle,
            is_en_passant: effects.was_en_passant,
            is_check: gives_check,
            is_checkmate: matches!(result, Some(GameResult::Checkmate { .. })),
        });

        match result {
            Some(result) => {
                info!("[GAME] {}", result.message());
                self.state = FlowState::GameOver { result };
                self.events.push(GameEvent::GameOver { result });
            }
            None => {
                self.state = FlowState::AwaitingSelection;
            }
        }

        Ok(MoveOutcome::Applied { was_capture })
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
