//! Search limits and the stop controller shared by engine implementations.
//!
//! A search may be bounded by depth, by wall-clock time and by a node
//! budget. Depth is handled by the engine's iterative deepening loop; time
//! and nodes are polled through [`TimeControl::check`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

/// How often (in nodes) the clock is consulted.
const CHECK_INTERVAL: u64 = 1024;

/// Search limits that control when an engine should stop searching.
///
/// Engines stop at whichever limit is hit first. When time or nodes run out
/// the engine returns immediately with what it has.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies (half-moves)
    pub depth: u8,
    /// Maximum time allowed for this search (None = infinite)
    pub move_time: Option<Duration>,
    /// Maximum nodes for this search (None = unbounded)
    pub nodes: Option<u64>,
    /// Stop controller polled during search
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Limits with only a depth constraint.
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            nodes: None,
            time_control: TimeControl::new(None, None),
        }
    }

    pub fn with_move_time(mut self, move_time: Duration) -> Self {
        self.move_time = Some(move_time);
        self.time_control = TimeControl::new(self.move_time, self.nodes);
        self
    }

    pub fn with_nodes(mut self, nodes: u64) -> Self {
        self.nodes = Some(nodes);
        self.time_control = TimeControl::new(self.move_time, self.nodes);
        self
    }

    /// Start the clock. Call this when search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Thread-safe stop controller.
///
/// Cheap to clone; clones share the stop flag and start time.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    start_time: Arc<RwLock<Option<Instant>>>,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>, node_limit: Option<u64>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start_time: Arc::new(RwLock::new(None)),
            time_limit,
            node_limit,
        }
    }

    /// Start the clock and clear any previous stop.
    pub fn start(&self) {
        *self
            .start_time
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
        self.stopped.store(false, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Poll the budget after `nodes` nodes. The node budget is exact; the
    /// clock is only read every `CHECK_INTERVAL` nodes. Returns true once
    /// the search must stop.
    pub fn check(&self, nodes: u64) -> bool {
        if self.is_stopped() {
            return true;
        }
        if self.node_limit.is_some_and(|limit| nodes >= limit) {
            self.stop();
            return true;
        }
        if nodes.is_multiple_of(CHECK_INTERVAL)
            && self.time_limit.is_some_and(|limit| self.elapsed() >= limit)
        {
            self.stop();
            return true;
        }
        false
    }

    /// Time since `start`, zero if never started.
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
