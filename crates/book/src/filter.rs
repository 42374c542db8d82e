//! Quality filter: re-search every stored position and keep the balanced ones.

use chess_core::{Engine, Position, SearchLimits};
use tracing::{debug, warn};

use crate::band::{ScoreBand, deviation};
use crate::store::EntryStore;

/// Thresholds applied by [`filter_entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParams {
    pub multipv: usize,
    /// Band every candidate after the first must satisfy.
    pub band: ScoreBand,
    /// Maximum distance of the best move's White-POV score from `band.bias`.
    pub abs_range: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub kept: usize,
    pub dropped: usize,
    /// Entries dropped because their FEN could not be decoded.
    pub malformed: usize,
}

/// Re-search each stored position as a fresh root and return the entries
/// that pass, with their lines unchanged.
///
/// An entry is dropped if its best move is further than `abs_range` from
/// the bias, or if any later candidate falls outside the band. Positions
/// without legal moves have no candidates and are kept. Entries that fail
/// to decode are dropped.
pub fn filter_entries(
    store: &EntryStore,
    engine: &mut dyn Engine,
    limits: &SearchLimits,
    params: &FilterParams,
) -> (EntryStore, FilterReport) {
    let mut kept = EntryStore::new();
    let mut report = FilterReport::default();

    for (fen, line) in store {
        let pos = match Position::from_fen(fen) {
            Ok(pos) => pos,
            Err(err) => {
                warn!(%fen, %err, "dropping undecodable book position");
                report.malformed += 1;
                report.dropped += 1;
                continue;
            }
        };

        if passes(&pos, engine, limits, params) {
            kept.insert(fen.clone(), line.clone());
            report.kept += 1;
        } else {
            report.dropped += 1;
        }
    }

    debug!(
        kept = report.kept,
        dropped = report.dropped,
        malformed = report.malformed,
        "filter finished"
    );
    (kept, report)
}

fn passes(
    pos: &Position,
    engine: &mut dyn Engine,
    limits: &SearchLimits,
    params: &FilterParams,
) -> bool {
    let ranked = engine.search_multipv(pos, limits.clone(), params.multipv);
    let Some((top, rest)) = ranked.split_first() else {
        return true;
    };

    let stm = pos.side_to_move;
    if deviation(top.score, stm, params.band.bias) > i64::from(params.abs_range) {
        return false;
    }
    rest.iter()
        .all(|rm| params.band.admits(top.score, rm.score, stm))
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod filter_tests;
