use super::*;
use chess_core::{Move, legal_moves, move_to_uci};

fn rank(fen: &str, depth: u8) -> SearchOutcome {
    let pos = Position::from_fen(fen).unwrap();
    let mut nodes = 0;
    let tc = TimeControl::default();
    tc.start();
    rank_root_moves(&pos, depth, &mut nodes, &tc)
}

#[test]
fn test_ranks_every_root_move_best_first() {
    let outcome = rank(chess_core::START_FEN, 2);
    assert_eq!(outcome.root_moves.len(), 20);
    assert_eq!(outcome.depth, 2);
    assert!(!outcome.stopped);
    assert!(outcome.root_moves.iter().all(|rm| rm.is_current));
    assert!(
        outcome
            .root_moves
            .windows(2)
            .all(|w| w[0].score >= w[1].score)
    );
}

#[test]
fn test_finds_mate_in_one() {
    // Back-rank mate: Qe8#
    let outcome = rank("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1", 2);
    let best = outcome.root_moves[0];
    assert_eq!(move_to_uci(best.mv), "e1e8");
    assert_eq!(best.score, MATE_SCORE - 1);
}

#[test]
fn test_no_legal_moves_gives_empty_ranking() {
    let outcome = rank("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1", 3);
    assert!(outcome.root_moves.is_empty());
}

#[test]
fn test_node_budget_marks_carried_over_scores() {
    let pos = Position::startpos();
    let mut nodes = 0;
    // Enough for depth 1 (20 nodes) but not for all of depth 2.
    let tc = TimeControl::new(None, Some(100));
    tc.start();
    let outcome = rank_root_moves(&pos, 6, &mut nodes, &tc);

    assert!(outcome.stopped);
    assert_eq!(outcome.depth, 1);
    assert_eq!(outcome.root_moves.len(), 20);
    let current = outcome.root_moves.iter().filter(|rm| rm.is_current).count();
    assert!(current < 20);

    let all: Vec<Move> = legal_moves(&pos);
    assert!(outcome.root_moves.iter().all(|rm| all.contains(&rm.mv)));
}

#[test]
fn test_search_restores_position() {
    let pos = Position::startpos();
    let before = pos.clone();
    let mut nodes = 0;
    let tc = TimeControl::default();
    tc.start();
    rank_root_moves(&pos, 3, &mut nodes, &tc);
    assert_eq!(pos, before);
    assert!(nodes > 0);
}
