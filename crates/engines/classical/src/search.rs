//! Negamax search with alpha-beta pruning and a multi-PV root.

use chess_core::{MATE_SCORE, Position, RootMove, TimeControl, legal_moves_into};

use crate::eval::evaluate;

const INFINITY: i32 = MATE_SCORE + 1;

/// Ranked root moves plus how the search ended.
pub struct SearchOutcome {
    /// Every legal root move, best first.
    pub root_moves: Vec<RootMove>,
    /// Deepest fully completed iteration (0 if none completed).
    pub depth: u8,
    /// True if search was stopped early by the time or node budget
    pub stopped: bool,
}

/// Scores every root move with an exact (full-window) search, deepening one
/// ply at a time up to `depth`.
///
/// If the budget runs out part-way through an iteration, the moves already
/// re-scored in it keep their fresh score; the rest keep the score of the
/// previous iteration and are marked `is_current = false`.
pub fn rank_root_moves(
    pos: &Position,
    depth: u8,
    nodes: &mut u64,
    tc: &TimeControl,
) -> SearchOutcome {
    let mut tmp = pos.clone();
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut moves);

    // Seed with static scores so an immediately stopped search still ranks.
    let mut root_moves: Vec<RootMove> = moves
        .into_iter()
        .map(|mv| RootMove {
            mv,
            score: -evaluate(&tmp.play(mv)),
            is_current: false,
        })
        .collect();
    sort_best_first(&mut root_moves);

    let mut completed = 0;
    let mut stopped = false;
    let mut history = Vec::with_capacity(depth as usize + 2);
    history.push(tmp.position_hash());

    'deepening: for d in 1..=depth.max(1) {
        for rm in root_moves.iter_mut() {
            rm.is_current = false;
        }
        for rm in root_moves.iter_mut() {
            let mut child = tmp.play(rm.mv);
            history.push(child.position_hash());
            *nodes += 1;
            let score = negamax(&mut child, d - 1, 1, -INFINITY, INFINITY, &mut history, nodes, tc);
            history.pop();

            if let Some(score) = score {
                rm.score = -score;
                rm.is_current = true;
            } else {
                stopped = true;
                break 'deepening;
            }
        }
        completed = d;
        sort_best_first(&mut root_moves);
    }

    if stopped {
        sort_best_first(&mut root_moves);
    }

    SearchOutcome {
        root_moves,
        depth: completed,
        stopped,
    }
}

fn sort_best_first(root_moves: &mut [RootMove]) {
    root_moves.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Recursive negamax search with alpha-beta pruning.
///
/// Returns `None` when the search was aborted by the stop controller.
#[allow(clippy::too_many_arguments)]
fn negamax(
    pos: &mut Position,
    depth: u8,
    ply: i32,
    mut alpha: i32,
    beta: i32,
    history: &mut Vec<u64>,
    nodes: &mut u64,
    tc: &TimeControl,
) -> Option<i32> {
    if tc.check(*nodes) {
        return None;
    }

    if pos.is_fifty_move_draw() || pos.is_insufficient_material() {
        return Some(0);
    }

    if let Some(&key) = history.last()
        && history.iter().filter(|&&k| k == key).count() >= 3
    {
        return Some(0); // threefold repetition
    }

    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);

    if moves.is_empty() {
        if pos.in_check(pos.side_to_move) {
            return Some(-(MATE_SCORE - ply));
        }
        return Some(0); // Stalemate
    }

    if depth == 0 {
        return Some(evaluate(pos));
    }

    let mut best = -INFINITY;
    for mv in moves {
        let mut child = pos.play(mv);
        history.push(child.position_hash());
        *nodes += 1;
        let score = negamax(&mut child, depth - 1, ply + 1, -beta, -alpha, history, nodes, tc);
        history.pop();
        let score = -score?;

        best = best.max(score);
        alpha = alpha.max(best);
        if alpha >= beta {
            break; // Beta cutoff
        }
    }

    Some(best)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
