//! Move history
//!
//! A chronological record of every completed move, kept for display and for
//! the plain-text game log an external collaborator writes out once the game
//! ends. The engine only supplies the formatted lines; file handling is not
//! its concern.

use crate::types::{PieceColor, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One completed move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub kind: PieceKind,
    pub color: PieceColor,
    pub from: Square,
    pub to: Square,
    /// Kind of the piece captured by this move, if any
    pub captured: Option<PieceKind>,
    /// Kind the pawn was promoted to, when the move ended in promotion
    pub promotion: Option<PieceKind>,
    pub is_castle: bool,
    pub is_en_passant: bool,
    /// Whether the move put the opponent in check
    pub is_check: bool,
    pub is_checkmate: bool,
}

impl fmt::Display for MoveRecord {
    /// Log-line format: piece name followed by the destination coordinates
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}, {}", self.kind.name(), self.to.row(), self.to.col())
    }
}

/// The complete move list of one game
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveHistory {
    moves: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn new() -> Self {
        MoveHistory::default()
    }

    pub fn add_move(&mut self, record: MoveRecord) {
        self.moves.push(record);
    }

    /// The most recent move, if any
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Number of half-moves played
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Formatted log lines, one per move, for the external log writer.
    /// The writer appends the result line itself.
    pub fn log_lines(&self) -> Vec<String> {
        self.moves.iter().map(|record| record.to_string()).collect()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }
}
