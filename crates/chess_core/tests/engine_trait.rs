use chess_core::{Engine, Move, Position, SearchLimits, SearchResult, parse_uci_move};

/// Always plays e2e4 when it is legal.
struct KingsPawn {
    stopped: bool,
}

impl Engine for KingsPawn {
    fn search(&mut self, pos: &Position, _limits: SearchLimits) -> SearchResult {
        SearchResult {
            best_move: parse_uci_move(pos, "e2e4"),
            score: 25,
            depth: 1,
            nodes: 1,
            stopped: self.stopped,
        }
    }

    fn name(&self) -> &str {
        "kings-pawn"
    }
}

fn e2e4() -> Move {
    parse_uci_move(&Position::startpos(), "e2e4").unwrap()
}

#[test]
fn test_default_multipv_reports_best_move_only() {
    let mut engine = KingsPawn { stopped: false };
    let ranked = engine.search_multipv(&Position::startpos(), SearchLimits::depth(1), 5);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].mv, e2e4());
    assert_eq!(ranked[0].score, 25);
    assert!(ranked[0].is_current);
}

#[test]
fn test_default_multipv_marks_stopped_score_stale() {
    let mut engine = KingsPawn { stopped: true };
    let ranked = engine.search_multipv(&Position::startpos(), SearchLimits::depth(1), 1);

    assert_eq!(ranked.len(), 1);
    assert!(!ranked[0].is_current);
}

#[test]
fn test_default_multipv_empty_without_moves() {
    let mut engine = KingsPawn { stopped: false };
    let mated = Position::from_fen("k7/1Q6/1K6/8/8/8/8/8 b - - 0 1").unwrap();

    assert!(engine.search_multipv(&Position::startpos(), SearchLimits::depth(1), 0).is_empty());
    assert!(engine.search_multipv(&mated, SearchLimits::depth(1), 3).is_empty());
}
