//! Integration tests for the rules engine core
//!
//! Drives the engine through the public controller API on scripted
//! positions, verifying obstruction handling, special moves and the error
//! taxonomy without any presentation-layer involvement.

use chess_rules::{
    Game, MoveOutcome, Piece, PieceColor, PieceKind, Position, RulesError, Square,
};

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col).unwrap()
}

/// Build a position from (kind, color, (row, col)) triples
fn scripted(pieces: &[(PieceKind, PieceColor, (i8, i8))]) -> Position {
    let mut position = Position::empty();
    for &(kind, color, (row, col)) in pieces {
        position.spawn(kind, color, sq(row, col)).unwrap();
    }
    position
}

fn snapshot(game: &Game) -> Vec<Piece> {
    game.position().pieces().to_vec()
}

// ============================================================================
// Coordinate validation
// ============================================================================

#[test]
fn test_out_of_range_coordinates_rejected() {
    let mut game = Game::new();
    assert_eq!(
        game.select(8, 0),
        Err(RulesError::InvalidCoordinate { row: 8, col: 0 })
    );
    assert_eq!(
        game.select(-1, 4),
        Err(RulesError::InvalidCoordinate { row: -1, col: 4 })
    );
    assert_eq!(
        game.submit_move(6, 4, 6, 8),
        Err(RulesError::InvalidCoordinate { row: 6, col: 8 })
    );
}

// ============================================================================
// Obstruction
// ============================================================================

#[test]
fn test_rook_blocked_then_unblocked() {
    // rook on (7,0) with an own pawn on (7,3) cannot reach the far corner
    let blocked = Game::from_position(scripted(&[
        (PieceKind::King, PieceColor::White, (6, 0)),
        (PieceKind::Rook, PieceColor::White, (7, 0)),
        (PieceKind::Pawn, PieceColor::White, (7, 3)),
        (PieceKind::King, PieceColor::Black, (0, 7)),
    ]));
    let moves = blocked.legal_destinations(7, 0).unwrap();
    assert!(!moves.contains(&sq(7, 7)));
    assert!(moves.contains(&sq(7, 2)));

    // with the pawn gone the corner is reachable
    let open = Game::from_position(scripted(&[
        (PieceKind::King, PieceColor::White, (6, 0)),
        (PieceKind::Rook, PieceColor::White, (7, 0)),
        (PieceKind::King, PieceColor::Black, (0, 7)),
    ]));
    assert!(open.legal_destinations(7, 0).unwrap().contains(&sq(7, 7)));
}

#[test]
fn test_initial_position_has_twenty_moves_per_side() {
    let game = Game::new();
    let mut white_moves = 0;
    for piece in game.position().pieces_of(PieceColor::White) {
        let square = piece.square();
        white_moves += game
            .legal_destinations(square.row() as i8, square.col() as i8)
            .unwrap()
            .len();
    }
    assert_eq!(white_moves, 20, "16 pawn moves plus 4 knight moves");
}

// ============================================================================
// Turn order
// ============================================================================

#[test]
fn test_black_cannot_move_first() {
    let mut game = Game::new();
    assert_eq!(
        game.submit_move(1, 4, 2, 4),
        Err(RulesError::NotYourTurn {
            color: PieceColor::Black
        })
    );
    // rejection is idempotent: the board is unchanged and White may move
    assert!(game.position().piece_at(sq(1, 4)).is_some());
    assert!(game.submit_move(6, 4, 4, 4).is_ok());
}

// ============================================================================
// En passant
// ============================================================================

#[test]
fn test_en_passant_capture_sequence() {
    let mut game = Game::new();
    game.submit_move(6, 0, 5, 0).unwrap(); // White edge pawn forward
    game.submit_move(1, 3, 3, 3).unwrap(); // Black d-pawn double step
    game.submit_move(5, 0, 4, 0).unwrap();
    game.submit_move(3, 3, 4, 3).unwrap(); // Black pawn reaches row 4
    game.submit_move(6, 4, 4, 4).unwrap(); // White double step right beside it

    let outcome = game.submit_move(4, 3, 5, 4).unwrap();
    assert_eq!(outcome, MoveOutcome::Applied { was_capture: true });
    assert!(
        game.position().piece_at(sq(4, 4)).is_none(),
        "the passed White pawn is removed from (4, 4)"
    );
    let capturer = game.position().piece_at(sq(5, 4)).unwrap();
    assert_eq!(capturer.kind(), PieceKind::Pawn);
    assert_eq!(capturer.color(), PieceColor::Black);
    assert!(game.history().last_move().unwrap().is_en_passant);
}

#[test]
fn test_en_passant_expires_after_one_ply() {
    let mut game = Game::new();
    game.submit_move(6, 0, 5, 0).unwrap();
    game.submit_move(1, 3, 3, 3).unwrap();
    game.submit_move(5, 0, 4, 0).unwrap();
    game.submit_move(3, 3, 4, 3).unwrap();
    game.submit_move(6, 4, 4, 4).unwrap(); // arms the window
    game.submit_move(1, 7, 2, 7).unwrap(); // Black plays something else
    game.submit_move(4, 0, 3, 0).unwrap(); // White again

    // one ply too late
    assert!(matches!(
        game.submit_move(4, 3, 5, 4),
        Err(RulesError::IllegalMove { .. })
    ));
    assert!(game.position().piece_at(sq(4, 4)).is_some());
}

// ============================================================================
// Castling
// ============================================================================

#[test]
fn test_kingside_castle_moves_both_pieces() {
    let mut game = Game::from_position(scripted(&[
        (PieceKind::King, PieceColor::White, (7, 4)),
        (PieceKind::Rook, PieceColor::White, (7, 7)),
        (PieceKind::King, PieceColor::Black, (0, 4)),
    ]));
    assert!(game.legal_destinations(7, 4).unwrap().contains(&sq(7, 6)));

    game.submit_move(7, 4, 7, 6).unwrap();
    assert_eq!(
        game.position().piece_at(sq(7, 6)).map(|p| p.kind()),
        Some(PieceKind::King)
    );
    assert_eq!(
        game.position().piece_at(sq(7, 5)).map(|p| p.kind()),
        Some(PieceKind::Rook),
        "the rook relocates to the square the king crossed"
    );
    assert!(game.position().piece_at(sq(7, 7)).is_none());
    assert!(game.history().last_move().unwrap().is_castle);
}

#[test]
fn test_castle_refused_when_crossed_square_attacked() {
    let mut game = Game::from_position(scripted(&[
        (PieceKind::King, PieceColor::White, (7, 4)),
        (PieceKind::Rook, PieceColor::White, (7, 7)),
        (PieceKind::Rook, PieceColor::Black, (0, 5)),
        (PieceKind::King, PieceColor::Black, (0, 0)),
    ]));
    assert!(!game.legal_destinations(7, 4).unwrap().contains(&sq(7, 6)));
    assert!(matches!(
        game.submit_move(7, 4, 7, 6),
        Err(RulesError::IllegalMove { .. })
    ));
}

// ============================================================================
// Check safety at the API boundary
// ============================================================================

#[test]
fn test_move_never_leaves_own_king_in_check() {
    // the rook is pinned; abandoning the king is rejected and nothing moves
    let mut game = Game::from_position(scripted(&[
        (PieceKind::King, PieceColor::White, (7, 4)),
        (PieceKind::Rook, PieceColor::White, (7, 6)),
        (PieceKind::Rook, PieceColor::Black, (7, 7)),
        (PieceKind::King, PieceColor::Black, (0, 0)),
    ]));
    let before = snapshot(&game);
    let error = game.submit_move(7, 6, 5, 6).unwrap_err();
    assert!(matches!(error, RulesError::IllegalMove { .. }));
    assert_eq!(snapshot(&game), before);

    // capturing the pinning rook is fine
    game.submit_move(7, 6, 7, 7).unwrap();
    assert!(!game.is_in_check(PieceColor::White).unwrap());
}

#[test]
fn test_no_two_pieces_ever_share_a_square() {
    let mut game = Game::new();
    let moves = [
        (6, 4, 4, 4),
        (1, 4, 3, 4),
        (7, 6, 5, 5),
        (0, 1, 2, 2),
        (7, 5, 4, 2),
        (1, 3, 2, 3),
    ];
    for &(fr, fc, tr, tc) in &moves {
        game.submit_move(fr, fc, tr, tc).unwrap();
        let mut squares: Vec<Square> =
            game.position().pieces().iter().map(|p| p.square()).collect();
        squares.sort();
        squares.dedup();
        assert_eq!(squares.len(), game.position().pieces().len());
    }
}
