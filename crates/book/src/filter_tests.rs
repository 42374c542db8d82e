use std::sync::Arc;

use super::*;
use chess_core::{RootMove, SearchResult, legal_moves};

use crate::store::BookLine;

/// Gives the legal moves of any position the scores in `scores`, in order.
struct Fixed(Vec<i32>);

impl Engine for Fixed {
    fn search(&mut self, _pos: &Position, _limits: SearchLimits) -> SearchResult {
        unreachable!("filter only uses multi-PV searches")
    }

    fn search_multipv(
        &mut self,
        pos: &Position,
        _limits: SearchLimits,
        multipv: usize,
    ) -> Vec<RootMove> {
        legal_moves(pos)
            .into_iter()
            .zip(self.0.iter().copied())
            .take(multipv)
            .map(|(mv, score)| RootMove {
                mv,
                score,
                is_current: false,
            })
            .collect()
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

const WHITE_TO_MOVE: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1";
const BLACK_TO_MOVE: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";

fn store_of(fens: &[&str]) -> EntryStore {
    let mut store = EntryStore::new();
    for fen in fens {
        store.insert(
            fen.to_string(),
            BookLine {
                root: Arc::from(chess_core::START_FEN),
                moves: vec!["e2e4".to_string()],
            },
        );
    }
    store
}

fn params(multipv: usize, band: ScoreBand, abs_range: i32) -> FilterParams {
    FilterParams {
        multipv,
        band,
        abs_range,
    }
}

fn run(store: &EntryStore, scores: &[i32], params: FilterParams) -> (EntryStore, FilterReport) {
    let mut engine = Fixed(scores.to_vec());
    filter_entries(store, &mut engine, &SearchLimits::depth(1), &params)
}

#[test]
fn test_top_move_outside_absolute_range_is_dropped() {
    let store = store_of(&[WHITE_TO_MOVE]);

    let (kept, report) = run(&store, &[60], params(1, ScoreBand::relative(10), 50));
    assert!(kept.is_empty());
    assert_eq!(report.dropped, 1);

    let (kept, _) = run(&store, &[50], params(1, ScoreBand::relative(10), 50));
    assert_eq!(kept, store);
}

#[test]
fn test_top_move_is_judged_from_white_point_of_view() {
    let store = store_of(&[BLACK_TO_MOVE]);
    // +40 for Black is -40 for White: 80 away from a +40 bias.
    let band = ScoreBand {
        range: 10,
        bias: 40,
        absolute: false,
    };
    let (kept, _) = run(&store, &[40], params(1, band, 50));
    assert!(kept.is_empty());

    let (kept, _) = run(&store, &[-40], params(1, band, 50));
    assert_eq!(kept.len(), 1);
}

#[test]
fn test_later_candidate_outside_relative_band_drops_position() {
    let store = store_of(&[WHITE_TO_MOVE]);

    let (kept, _) = run(&store, &[10, 5, 0], params(3, ScoreBand::relative(10), 50));
    assert_eq!(kept.len(), 1);

    let (kept, _) = run(&store, &[10, 5, -1], params(3, ScoreBand::relative(10), 50));
    assert!(kept.is_empty());

    // The failing candidate is beyond MultiPV, so it is never seen.
    let (kept, _) = run(&store, &[10, 5, -1], params(2, ScoreBand::relative(10), 50));
    assert_eq!(kept.len(), 1);
}

#[test]
fn test_later_candidate_in_absolute_mode() {
    let store = store_of(&[WHITE_TO_MOVE]);
    let band = ScoreBand::absolute(20, 0);

    let (kept, _) = run(&store, &[15, -20], params(2, band, 50));
    assert_eq!(kept.len(), 1);

    let (kept, _) = run(&store, &[15, -21], params(2, band, 50));
    assert!(kept.is_empty());
}

#[test]
fn test_position_without_moves_passes() {
    // Black is checkmated.
    let store = store_of(&["k7/1Q6/1K6/8/8/8/8/8 b - - 0 1"]);
    let (kept, report) = run(&store, &[], params(4, ScoreBand::relative(0), 0));
    assert_eq!(kept.len(), 1);
    assert_eq!(report.kept, 1);
}

#[test]
fn test_malformed_fen_is_dropped() {
    let store = store_of(&[WHITE_TO_MOVE, "not a fen"]);
    let (kept, report) = run(&store, &[0], params(1, ScoreBand::relative(10), 50));

    assert_eq!(kept.len(), 1);
    assert!(kept.contains(WHITE_TO_MOVE));
    assert_eq!(report.malformed, 1);
    assert_eq!(report.dropped, 1);
}

#[test]
fn test_survivors_keep_their_line() {
    let store = store_of(&[WHITE_TO_MOVE]);
    let (kept, _) = run(&store, &[0], params(1, ScoreBand::relative(10), 50));
    assert_eq!(kept.get(WHITE_TO_MOVE), store.get(WHITE_TO_MOVE));
}
