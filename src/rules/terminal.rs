//! Terminal-condition evaluation
//!
//! Runs after every completed move, for the side newly on turn. A side with
//! no legal move is either checkmated (in check) or stalemated (not in
//! check). Independently, the game is drawn as soon as neither side retains
//! enough material to ever deliver mate.

use crate::board::Position;
use crate::rules::{check, has_any_legal_move};
use crate::types::{PieceColor, PieceKind};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Why a finished game was drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawReason {
    /// The side to move had no legal move while not in check
    Stalemate,
    /// Neither side can ever deliver checkmate
    InsufficientMaterial,
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// The losing side's king had no escape from check
    Checkmate { winner: PieceColor },
    /// A side gave up; the other side wins
    Resignation { winner: PieceColor },
    Draw { reason: DrawReason },
}

impl GameResult {
    /// The winning side, if the game was not drawn
    pub fn winner(&self) -> Option<PieceColor> {
        match self {
            GameResult::Checkmate { winner } | GameResult::Resignation { winner } => Some(*winner),
            GameResult::Draw { .. } => None,
        }
    }

    /// Human-readable result line, also the final line of the game log
    pub fn message(&self) -> String {
        match self {
            GameResult::Checkmate { winner } => format!("{winner} won the game!"),
            GameResult::Resignation { winner } => format!("{winner} won by resignation!"),
            GameResult::Draw { reason } => match reason {
                DrawReason::Stalemate => "Draw by stalemate".to_string(),
                DrawReason::InsufficientMaterial => "Draw by insufficient material".to_string(),
            },
        }
    }
}

/// Evaluate the position for the side to move, after a completed move
///
/// Returns `None` while the game can continue.
pub fn evaluate(position: &Position) -> Option<GameResult> {
    let side = position.side_to_move();

    if !has_any_legal_move(position, side) {
        let result = match check::color_in_check(position, side) {
            Some(true) => {
                info!("[RULES] {side} is checkmated");
                GameResult::Checkmate {
                    winner: side.opponent(),
                }
            }
            _ => {
                info!("[RULES] {side} is stalemated");
                GameResult::Draw {
                    reason: DrawReason::Stalemate,
                }
            }
        };
        return Some(result);
    }

    if insufficient_material(position) {
        info!("[RULES] neither side retains mating material");
        return Some(GameResult::Draw {
            reason: DrawReason::InsufficientMaterial,
        });
    }

    None
}

/// Whether the remaining material makes checkmate impossible for both sides
///
/// Recognizes the dead positions: king against king, king and one minor
/// piece against king, and any number of bishops that all stand on one
/// square color. Two knights are treated as sufficient.
pub fn insufficient_material(position: &Position) -> bool {
    let mut minors = Vec::new();
    for piece in position.pieces() {
        match piece.kind() {
            PieceKind::King => {}
            PieceKind::Knight | PieceKind::Bishop => minors.push(piece),
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
        }
    }

    match minors.len() {
        0 | 1 => true,
        _ => {
            let all_bishops = minors.iter().all(|p| p.kind() == PieceKind::Bishop);
            let first_dark = minors[0].square().is_dark();
            all_bishops && minors.iter().all(|p| p.square().is_dark() == first_dark)
        }
    }
}
