//! Classical Chess Engine
//!
//! Alpha-beta search with material and piece-square evaluation. Serves as
//! the evaluation service behind book generation: it can rank every root
//! move (multi-PV) rather than only report the best one.

mod eval;
mod search;

use chess_core::{Engine, Position, RootMove, SearchLimits, SearchResult};

/// Classical chess engine using negamax with alpha-beta pruning.
///
/// This engine uses:
/// - Iterative deepening with exact scores for every root move
/// - Material plus piece-square evaluation
/// - 50-move rule, threefold repetition and dead-material draws
/// - Time and node budgets
#[derive(Debug, Clone, Default)]
pub struct ClassicalEngine {
    /// Node counter for statistics
    nodes: u64,
}

impl ClassicalEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }

    fn rank(&mut self, pos: &Position, limits: &SearchLimits) -> search::SearchOutcome {
        self.nodes = 0;
        limits.start();
        search::rank_root_moves(pos, limits.depth, &mut self.nodes, &limits.time_control)
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        let outcome = self.rank(pos, &limits);
        let best = outcome.root_moves.first();

        SearchResult {
            best_move: best.map(|rm| rm.mv),
            score: best.map(|rm| rm.score).unwrap_or(0),
            depth: outcome.depth,
            nodes: self.nodes,
            stopped: outcome.stopped,
        }
    }

    fn search_multipv(
        &mut self,
        pos: &Position,
        limits: SearchLimits,
        multipv: usize,
    ) -> Vec<RootMove> {
        let mut root_moves = self.rank(pos, &limits).root_moves;
        root_moves.truncate(multipv);
        root_moves
    }

    fn name(&self) -> &str {
        "Classical v1.1"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
