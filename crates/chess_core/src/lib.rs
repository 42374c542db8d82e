pub mod board;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod time_control;
pub mod types;
pub mod uci;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use fen::*;
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use time_control::*;
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;

/// Score magnitude of a mate at the root; mates further away score lower.
pub const MATE_SCORE: i32 = 100_000;

// =============================================================================
// Engine trait implemented by all chess engines
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation score in centipawns from the side to move's perspective
    pub score: i32,
    /// Search depth reached
    pub depth: u8,
    /// Number of nodes searched (optional, for stats)
    pub nodes: u64,
    /// Whether search was stopped early due to time or node limits
    pub stopped: bool,
}

/// One ranked root move of a multi-PV search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootMove {
    pub mv: Move,
    /// Centipawns from the perspective of the side to move at the root.
    pub score: i32,
    /// False when the search stopped before re-scoring this move in its last
    /// iteration and `score` was carried over from the previous one.
    pub is_current: bool,
}

/// Trait that all chess engines must implement.
pub trait Engine: Send {
    /// Search the position with the given search limits.
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult;

    /// Rank up to `multipv` root moves, best first.
    ///
    /// Engines without a multi-PV mode report only their best move. An empty
    /// list means the position has no legal moves.
    fn search_multipv(
        &mut self,
        pos: &Position,
        limits: SearchLimits,
        multipv: usize,
    ) -> Vec<RootMove> {
        if multipv == 0 {
            return Vec::new();
        }
        let result = self.search(pos, limits);
        result
            .best_move
            .map(|mv| RootMove {
                mv,
                score: result.score,
                is_current: !result.stopped,
            })
            .into_iter()
            .collect()
    }

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str;

    /// Reset internal state for a new game (clear hash tables, history, etc.)
    fn new_game(&mut self) {}
}
