//! Run records, the capped run history and board restore.

use std::collections::BTreeSet;

use pathviz_core::{GridService, NodeKey, Point, PresentationSink, Range};
use serde::{Deserialize, Serialize};

use crate::board::{Board, MIN_WEIGHT};
use crate::error::StorageError;
use crate::storage::{Storage, Store};

/// Storage key of the run history list.
pub const HISTORY_KEY: &str = "run-history";

/// Default number of runs kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 15;

/// Statistics of one search run plus the full board it ran on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathFindingRun {
    pub algorithm_name: String,
    pub path_node_count: usize,
    /// Path length plus the weight of every path cell.
    pub path_cost: i64,
    pub processed_node_count: usize,
    /// Search time in milliseconds, animation excluded.
    pub time_taken: f64,
    /// Unix time in milliseconds.
    pub timestamp: u64,
    pub start: NodeKey,
    pub end: NodeKey,
    /// Weight value in effect when the run was captured.
    pub weight: i32,
    pub walls: BTreeSet<NodeKey>,
    pub weights: BTreeSet<NodeKey>,
}

// ---------------------------------------------------------------------------
// RunHistoryStore
// ---------------------------------------------------------------------------

/// Most-recent-first list of runs, persisted under [`HISTORY_KEY`].
pub struct RunHistoryStore<S> {
    store: Store<S>,
    runs: Vec<PathFindingRun>,
    limit: usize,
}

impl<S: Storage> RunHistoryStore<S> {
    /// Load the persisted history. Missing or unreadable data gives an empty
    /// history.
    pub fn load(store: Store<S>, limit: usize) -> Self {
        let mut runs = match store.get_parsed::<Vec<PathFindingRun>>(HISTORY_KEY) {
            Ok(runs) => runs.unwrap_or_default(),
            Err(e) => {
                log::warn!("discarding unreadable run history: {e}");
                Vec::new()
            }
        };
        runs.truncate(limit);
        Self { store, runs, limit }
    }

    /// Newest first.
    pub fn runs(&self) -> &[PathFindingRun] {
        &self.runs
    }

    pub fn latest(&self) -> Option<&PathFindingRun> {
        self.runs.first()
    }

    pub fn get(&self, index: usize) -> Option<&PathFindingRun> {
        self.runs.get(index)
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Record `run` as the most recent entry and persist the list.
    pub fn capture(&mut self, run: PathFindingRun) -> Result<(), StorageError> {
        self.runs.insert(0, run);
        self.runs.truncate(self.limit);
        self.store.set(HISTORY_KEY, &self.runs)
    }

    /// Forget every run.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.runs.clear();
        self.store.remove(HISTORY_KEY)
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }
}

// ---------------------------------------------------------------------------
// Restore
// ---------------------------------------------------------------------------

/// Move an end that was clamped onto the start off to the far edge.
fn avoid_start(start: Point, end: Point, bounds: Range) -> Point {
    let (w, h) = (bounds.width(), bounds.height());
    if w >= 2 {
        let x = if start.x == w - 1 { w - 2 } else { w - 1 };
        Point::new(x, end.y)
    } else if h >= 2 {
        let y = if start.y == h - 1 { h - 2 } else { h - 1 };
        Point::new(end.x, y)
    } else {
        end
    }
}

/// Rebuild the board recorded in `run`.
///
/// The board is reset, then walls and weights (with the run's weight) are
/// replayed; coordinates outside the current grid are dropped. Start and end
/// are clamped into the grid. An end that needed clamping and landed on the
/// start is moved to the right edge; an end that was already inside the grid
/// is placed as recorded even if it now equals the clamped start.
///
/// The previous endpoint cells fall back to whatever the run recorded for
/// them, which after the reset is usually an empty cell.
///
/// Returns how many walls and weights were dropped.
pub fn restore<G: GridService>(
    board: &mut Board<G>,
    run: &PathFindingRun,
    sink: &mut impl PresentationSink,
) -> usize {
    let (old_start, old_end) = (board.start(), board.end());
    board.reset(sink);
    let bounds = board.bounds();
    let mut dropped = 0;

    for key in &run.walls {
        let p = key.point();
        if bounds.contains(p) {
            board.set_wall(p, sink);
        } else {
            dropped += 1;
        }
    }
    if run.weight < MIN_WEIGHT {
        log::warn!(
            "restoring {} run: recorded weight {} is invalid, using {}",
            run.algorithm_name,
            run.weight,
            board.weight()
        );
    }
    for key in &run.weights {
        let p = key.point();
        if bounds.contains(p) {
            board.set_weighted(p, Some(run.weight), sink);
        } else {
            dropped += 1;
        }
    }
    if dropped > 0 {
        log::warn!(
            "restoring {} run: {dropped} obstacle(s) fall outside the {}x{} grid",
            run.algorithm_name,
            bounds.width(),
            bounds.height()
        );
    }

    let start = bounds.clamp(run.start.point());
    board.set_start(start, sink);

    let recorded = run.end.point();
    let mut end = bounds.clamp(recorded);
    if end != recorded && end == start {
        end = avoid_start(start, end, bounds);
    }
    board.set_end(end, sink);

    for p in [old_start, old_end] {
        if !board.is_endpoint(p) && bounds.contains(p) {
            let state = board.base_state(p);
            board.present(p, state, sink);
        }
    }

    dropped
}
