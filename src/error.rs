//! Error types for the rules engine
//!
//! Every rule violation is reported as a typed error at the controller
//! boundary. Rejections leave the position untouched, so a caller may simply
//! re-prompt after an error.

use crate::types::{PieceColor, PieceKind};
use thiserror::Error;

/// Errors that can occur while querying or mutating a game
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Row or column outside the board; rejected before any state change
    #[error("invalid coordinate: ({row}, {col}) is outside the board")]
    InvalidCoordinate { row: i8, col: i8 },

    /// Shape, obstruction or check-safety violation
    #[error("illegal move: {message}")]
    IllegalMove { message: String },

    /// Move attempted by the side not on turn
    #[error("not your turn: {color} attempted to move")]
    NotYourTurn { color: PieceColor },

    /// Promotion kind outside {queen, rook, bishop, knight};
    /// the pending promotion is preserved for a valid resubmission
    #[error("invalid promotion choice: {kind}")]
    InvalidPromotionChoice { kind: PieceKind },

    /// Move or selection attempted after the game ended
    #[error("game is already over")]
    GameFinished,

    /// Contract violation in the controller itself (promotion confirmed with
    /// no pending promotion, no king found for a color). Unreachable through
    /// the public API of a correctly driven game.
    #[error("inconsistent game state: {message}")]
    InconsistentState { message: String },
}

/// Result type alias for rules engine operations
pub type RulesResult<T> = Result<T, RulesError>;
