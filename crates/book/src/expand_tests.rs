use super::*;
use chess_core::{Color, RootMove, SearchResult, legal_moves, perft};

/// Scores the i-th legal move `-10 * i`, so the first legal move is best.
struct Descending;

impl Engine for Descending {
    fn search(&mut self, _pos: &Position, _limits: SearchLimits) -> SearchResult {
        unreachable!("expansion only uses multi-PV searches")
    }

    fn search_multipv(
        &mut self,
        pos: &Position,
        _limits: SearchLimits,
        multipv: usize,
    ) -> Vec<RootMove> {
        legal_moves(pos)
            .into_iter()
            .enumerate()
            .take(multipv)
            .map(|(i, mv)| RootMove {
                mv,
                score: -10 * i as i32,
                is_current: true,
            })
            .collect()
    }

    fn name(&self) -> &str {
        "descending"
    }
}

fn gated(engine: &mut Descending, range: i32, multipv: usize, depth_factor: i32) -> Selection<'_> {
    Selection::ScoreGated {
        engine,
        limits: SearchLimits::depth(1),
        multipv,
        band: ScoreBand::relative(range),
        depth_factor,
    }
}

#[test]
fn test_exhaustive_leaf_count_matches_perft() {
    let root = Position::startpos();
    let mut store = EntryStore::new();
    let report = expand(&root, 3, &mut Selection::All, false, &mut store);

    assert_eq!(report.leaves, perft(&mut root.clone(), 3));
    assert_eq!(report.leaves, 8902);
    assert_eq!(report.inserted, store.len());
    // Transpositions collapse.
    assert!(store.len() < 8902);
}

#[test]
fn test_depth_zero_records_root() {
    let root = Position::startpos();
    let mut store = EntryStore::new();
    let report = expand(&root, 0, &mut Selection::All, false, &mut store);

    assert_eq!(report.leaves, 1);
    let (fen, line) = store.iter().next().unwrap();
    assert_eq!(fen, chess_core::START_FEN);
    assert!(line.moves.is_empty());
}

#[test]
fn test_guided_depth_zero_records_children() {
    let root = Position::startpos();
    let mut engine = Descending;
    let mut store = EntryStore::new();
    let report = expand(&root, 0, &mut gated(&mut engine, 10_000, 3, 100), false, &mut store);

    assert_eq!(report.leaves, 3);
    assert_eq!(store.len(), 3);
    assert!(!store.contains(chess_core::START_FEN));
    assert!(store.iter().all(|(_, line)| line.moves.len() == 1));
}

#[test]
fn test_terminal_node_has_no_leaves() {
    // Black is checkmated.
    let root = Position::from_fen("k7/1Q6/1K6/8/8/8/8/8 b - - 0 1").unwrap();
    let mut store = EntryStore::new();
    let report = expand(&root, 2, &mut Selection::All, false, &mut store);

    assert_eq!(report, ExpandReport::default());
    assert!(store.is_empty());
}

#[test]
fn test_paths_lead_to_stored_position() {
    let root = Position::startpos();
    let mut store = EntryStore::new();
    expand(&root, 2, &mut Selection::All, false, &mut store);

    for (fen, line) in &store {
        let mut pos = Position::from_fen(&line.root).unwrap();
        for mv in &line.moves {
            let m = chess_core::parse_uci_move(&pos, mv).unwrap();
            pos.make_move(m);
        }
        assert_eq!(&pos.to_fen(), fen);
    }
}

#[test]
fn test_trim_drops_counters() {
    let root = Position::startpos();
    let mut store = EntryStore::new();
    expand(&root, 1, &mut Selection::All, true, &mut store);

    assert_eq!(store.len(), 20);
    assert!(store.iter().all(|(fen, _)| fen.split(' ').count() == 4));
}

#[test]
fn test_zero_range_follows_only_best_move() {
    let root = Position::startpos();
    let mut engine = Descending;
    let mut store = EntryStore::new();
    let report = expand(&root, 3, &mut gated(&mut engine, 0, 20, 100), false, &mut store);

    assert_eq!(report.leaves, 1);
    let (_, line) = store.iter().next().unwrap();
    assert_eq!(line.moves.len(), 3);
}

#[test]
fn test_multipv_caps_candidates() {
    let root = Position::startpos();
    let mut engine = Descending;
    let mut store = EntryStore::new();
    let report = expand(&root, 1, &mut gated(&mut engine, 10_000, 5, 100), false, &mut store);

    assert_eq!(report.leaves, 5);
}

#[test]
fn test_depth_factor_narrows_deeper_plies() {
    let root = Position::startpos();
    let mut engine = Descending;
    let mut store = EntryStore::new();
    // Range 20 admits 3 moves at the root; halved to 10 it admits 2 below.
    let report = expand(&root, 2, &mut gated(&mut engine, 20, 20, 50), false, &mut store);

    assert_eq!(report.leaves, 6);
}

#[test]
fn test_guided_leaves_are_subset_of_exhaustive() {
    let root = Position::startpos();
    let mut full = EntryStore::new();
    expand(&root, 2, &mut Selection::All, false, &mut full);

    let mut engine = Descending;
    let mut guided = EntryStore::new();
    expand(&root, 2, &mut gated(&mut engine, 30, 8, 100), false, &mut guided);

    assert!(!guided.is_empty());
    assert!(guided.iter().all(|(fen, _)| full.contains(fen)));
}

#[test]
fn test_root_unchanged_after_expansion() {
    let root = Position::startpos();
    let before = root.clone();
    let mut store = EntryStore::new();
    expand(&root, 2, &mut Selection::All, false, &mut store);
    assert_eq!(root, before);
    assert_eq!(root.side_to_move, Color::White);
}
