use std::collections::HashSet;

use super::*;
use crate::board::Position;
use crate::types::{Color, PieceKind};

#[test]
fn test_keys_are_distinct() {
    let keys: Vec<u64> = ZOBRIST.all_keys().collect();
    assert_eq!(keys.len(), PIECE_KEYS + 1 + 4 + 8);
    let unique: HashSet<u64> = keys.iter().copied().collect();
    assert_eq!(unique.len(), keys.len());
    assert!(!unique.contains(&0));
}

#[test]
fn test_piece_key_depends_on_color_kind_and_square() {
    let white_pawn = Piece {
        color: Color::White,
        kind: PieceKind::Pawn,
    };
    let black_pawn = Piece {
        color: Color::Black,
        kind: PieceKind::Pawn,
    };
    let white_knight = Piece {
        color: Color::White,
        kind: PieceKind::Knight,
    };
    let a = ZOBRIST.piece_key(white_pawn, 12);
    assert_ne!(a, ZOBRIST.piece_key(white_pawn, 13));
    assert_ne!(a, ZOBRIST.piece_key(black_pawn, 12));
    assert_ne!(a, ZOBRIST.piece_key(white_knight, 12));
}

#[test]
fn test_side_to_move_changes_hash() {
    let white = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let black = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
    assert_eq!(
        white.position_hash() ^ black.position_hash(),
        ZOBRIST.black_to_move()
    );
}
