//! Tree expansion: walk the game tree from a root and record the positions
//! found at a fixed depth.
//!
//! One traversal serves both modes. What differs is which children of a
//! node are followed, decided by a [`Selection`]:
//!
//! - [`Selection::All`] follows every legal move (exhaustive expansion; the
//!   number of leaves visited equals perft).
//! - [`Selection::ScoreGated`] asks the engine for a ranked candidate list
//!   and follows only the moves inside the [`ScoreBand`]. The band shrinks
//!   by the depth factor at each ply.

use std::sync::Arc;

use chess_core::{Engine, Move, Position, SearchLimits, legal_moves_into, move_to_uci};
use tracing::trace;

use crate::band::ScoreBand;
use crate::store::{BookLine, EntryStore, trim_fen};

/// Child selection policy for [`expand`].
pub enum Selection<'e> {
    /// Every legal move.
    All,
    /// Engine-ranked moves inside a score band.
    ScoreGated {
        engine: &'e mut dyn Engine,
        limits: SearchLimits,
        multipv: usize,
        band: ScoreBand,
        /// Percentage applied to the band's range at each ply.
        depth_factor: i32,
    },
}

/// Counters from one expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandReport {
    /// Leaves visited, transpositions included.
    pub leaves: u64,
    /// Leaves that were new to the store.
    pub inserted: usize,
}

/// Expand `depth` plies from `root` and merge the leaves into `store`.
///
/// With `trim` set, stored FENs lose their move counters. The root position
/// is left unchanged.
///
/// Exhaustive expansion to depth zero records the root itself. Guided
/// expansion always searches the root, so depth zero behaves like depth one.
pub fn expand(
    root: &Position,
    depth: u8,
    selection: &mut Selection<'_>,
    trim: bool,
    store: &mut EntryStore,
) -> ExpandReport {
    let root_fen: Arc<str> = Arc::from(root.to_fen());
    let (depth, band) = match selection {
        Selection::All => (depth, None),
        Selection::ScoreGated { band, .. } => (depth.max(1), Some(*band)),
    };

    let mut walker = Walker {
        selection,
        store,
        root_fen,
        trim,
        path: Vec::with_capacity(depth as usize),
        report: ExpandReport::default(),
    };
    let mut pos = root.clone();
    walker.walk(&mut pos, depth, band);
    walker.report
}

struct Walker<'a, 'e> {
    selection: &'a mut Selection<'e>,
    store: &'a mut EntryStore,
    root_fen: Arc<str>,
    trim: bool,
    path: Vec<String>,
    report: ExpandReport,
}

impl Walker<'_, '_> {
    fn walk(&mut self, pos: &mut Position, depth: u8, band: Option<ScoreBand>) {
        if depth == 0 {
            self.record(pos);
            return;
        }

        let children = self.children(pos, band);
        let next_band = match (&*self.selection, band) {
            (Selection::ScoreGated { depth_factor, .. }, Some(b)) => Some(b.decayed(*depth_factor)),
            _ => band,
        };

        for mv in children {
            self.path.push(move_to_uci(mv));
            self.walk(&mut pos.play(mv), depth - 1, next_band);
            self.path.pop();
        }
    }

    fn children(&mut self, pos: &mut Position, band: Option<ScoreBand>) -> Vec<Move> {
        match (&mut *self.selection, band) {
            (
                Selection::ScoreGated {
                    engine,
                    limits,
                    multipv,
                    ..
                },
                Some(band),
            ) => {
                let ranked = engine.search_multipv(pos, limits.clone(), *multipv);
                let Some(best) = ranked.first().map(|rm| rm.score) else {
                    return Vec::new();
                };
                let stm = pos.side_to_move;
                let kept: Vec<Move> = ranked
                    .iter()
                    .filter(|rm| band.admits(best, rm.score, stm))
                    .map(|rm| rm.mv)
                    .collect();
                trace!(
                    candidates = ranked.len(),
                    kept = kept.len(),
                    range = band.range,
                    "selected children"
                );
                kept
            }
            _ => {
                let mut moves = Vec::with_capacity(64);
                legal_moves_into(pos, &mut moves);
                moves
            }
        }
    }

    fn record(&mut self, pos: &Position) {
        self.report.leaves += 1;
        let fen = if self.trim {
            trim_fen(&pos.to_fen())
        } else {
            pos.to_fen()
        };
        let line = BookLine {
            root: Arc::clone(&self.root_fen),
            moves: self.path.clone(),
        };
        if self.store.insert(fen, line) {
            self.report.inserted += 1;
        }
    }
}

#[cfg(test)]
#[path = "expand_tests.rs"]
mod expand_tests;
