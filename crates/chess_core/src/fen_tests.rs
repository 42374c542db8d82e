use super::*;

#[test]
fn test_startpos_round_trip() {
    let pos = Position::from_fen(START_FEN).unwrap();
    assert_eq!(pos, Position::startpos());
    assert_eq!(pos.to_fen(), START_FEN);
}

#[test]
fn test_missing_counters_default() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - -").unwrap();
    assert_eq!(pos.halfmove_clock, 0);
    assert_eq!(pos.fullmove_number, 1);
    assert_eq!(pos.to_fen(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
}

#[test]
fn test_unanswerable_double_push_writes_no_ep_square() {
    let mut pos = Position::startpos();
    pos.make_move(Move::new(12, 28)); // e2e4
    assert_eq!(pos.en_passant, Some(20));
    assert_eq!(
        pos.to_fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
    );
}

#[test]
fn test_capturable_ep_square_is_written() {
    let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
    let pos = Position::from_fen(fen).unwrap();
    assert_eq!(pos.to_fen(), fen);
}

#[test]
fn test_malformed_fens_are_rejected() {
    assert_eq!(
        Position::from_fen("8/8/8 w - -"),
        Err(FenError::RankCount(3))
    );
    assert_eq!(Position::from_fen("garbage"), Err(FenError::TooFewFields(1)));
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - -"),
        Err(FenError::SideToMove("x".to_string()))
    );
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4X3 w - -"),
        Err(FenError::InvalidPiece('X'))
    );
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K4 w - -"),
        Err(FenError::RankWidth { rank: 1 })
    );
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/4K3 w - -"),
        Err(FenError::KingCount(Color::Black))
    );
    assert!(matches!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
        Err(FenError::Counter { .. })
    ));
}
