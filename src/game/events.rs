//! Events raised toward the presentation layer
//!
//! The controller queues one event per externally visible change; the
//! presentation layer drains the queue after each call and reacts (redraw,
//! open the promotion dialog, show the end-of-game banner).

use crate::rules::terminal::GameResult;
use crate::types::Square;
use serde::{Deserialize, Serialize};

/// Something the presentation layer should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A move was applied to the position
    MoveApplied {
        from: Square,
        to: Square,
        was_capture: bool,
    },
    /// A pawn reached the far rank and awaits the promotion choice
    PromotionRequired { square: Square },
    /// The game ended
    GameOver { result: GameResult },
}
