//! Board coordinates and piece value types
//!
//! Provides the small value types the rest of the engine is built from:
//! [`Square`], [`PieceColor`], [`PieceKind`] and [`Piece`]. Coordinates are
//! validated at construction time; an out-of-range row or column fails with
//! [`RulesError::InvalidCoordinate`] instead of being clamped.

use crate::error::{RulesError, RulesResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the board
pub const BOARD_SIZE: u8 = 8;

/// Side of the two players
///
/// White pieces start on rows 6 and 7 and move toward row 0; Black pieces
/// start on rows 0 and 1 and move toward row 7. Flipping the board for the
/// player seated as Black is a rendering concern and never changes these
/// directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    /// The other side
    pub fn opponent(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Row delta of a forward step for this side's pawns
    pub fn forward_step(self) -> i8 {
        match self {
            PieceColor::White => -1,
            PieceColor::Black => 1,
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceColor::White => write!(f, "White"),
            PieceColor::Black => write!(f, "Black"),
        }
    }
}

/// Closed set of piece kinds
///
/// All per-kind behavior is dispatched through `match` on this enum, so a
/// missing arm anywhere in the engine is a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Display name, capitalized, as used in move log lines
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    /// Material value in pawn units, used for the balance display.
    /// The king carries no material value.
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Board square as (row, column), both in `[0, 7]`
///
/// Row 0 is Black's back rank, row 7 is White's back rank. Construction is
/// fallible; every `Square` in the engine is known to be on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Create a square, rejecting out-of-range coordinates
    pub fn new(row: i8, col: i8) -> RulesResult<Self> {
        if !(0..BOARD_SIZE as i8).contains(&row) || !(0..BOARD_SIZE as i8).contains(&col) {
            return Err(RulesError::InvalidCoordinate { row, col });
        }
        Ok(Square {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Row index (0 = Black's back rank, 7 = White's back rank)
    pub fn row(self) -> u8 {
        self.row
    }

    /// Column index (0 = queenside rook file)
    pub fn col(self) -> u8 {
        self.col
    }

    /// The square `(row + dr, col + dc)`, or `None` when it falls off the board
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        Square::new(self.row as i8 + dr, self.col as i8 + dc).ok()
    }

    /// Color of the square itself; light and dark squares alternate.
    /// Two bishops confined to the same square color can never meet.
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Stable identity of a piece for the lifetime of a game
///
/// Two pieces may be compared by square for occupancy checks, but capture and
/// promotion rollback must target the exact instance, which the id provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub(crate) u32);

/// A live piece: kind, color, current square and castling bookkeeping
///
/// The color is fixed at creation. The square and the `has_moved` flag are
/// only mutated through [`crate::board::Position`]; nothing else in the
/// engine moves pieces around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub(crate) id: PieceId,
    pub(crate) kind: PieceKind,
    color: PieceColor,
    pub(crate) square: Square,
    pub(crate) has_moved: bool,
}

impl Piece {
    pub(crate) fn new(id: PieceId, kind: PieceKind, color: PieceColor, square: Square) -> Self {
        Piece {
            id,
            kind,
            color,
            square,
            has_moved: false,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> PieceColor {
        self.color
    }

    pub fn square(&self) -> Square {
        self.square
    }

    /// Whether the piece has moved at least once; decides castling
    /// eligibility for kings and rooks
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn is_friend(&self, other: &Piece) -> bool {
        self.color == other.color
    }

    pub fn is_enemy(&self, other: &Piece) -> bool {
        self.color != other.color
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: color: {}, row: {}, column: {}",
            self.kind,
            self.color,
            self.square.row(),
            self.square.col()
        )
    }
}
