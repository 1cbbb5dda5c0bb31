//! Timed, cancellable reveal of a search result.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use pathviz_core::{
    Algorithm, AnimationContext, Cell, GridError, GridService, PresentationSink,
    PresentationState, SearchResult,
};

use crate::board::Board;
use crate::history::PathFindingRun;

/// `path.len()` plus the weight of every path cell.
pub fn path_cost(path: &[Cell]) -> i64 {
    path.len() as i64 + path.iter().map(|c| i64::from(c.weight)).sum::<i64>()
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Run `algorithm` between the board's endpoints and animate the result.
///
/// Every processed cell, then every path cell, is shown as current, held
/// for one step of `ctx`, then settled. Endpoints keep their own state.
/// Cancellation is checked before each cell; a cancelled run stops without
/// touching further cells and still returns the full run record.
pub fn play<G: GridService>(
    board: &mut Board<G>,
    algorithm: Algorithm,
    ctx: &AnimationContext,
    sink: &mut impl PresentationSink,
) -> Result<PathFindingRun, GridError> {
    log::debug!("{algorithm}: searching {} -> {}", board.start(), board.end());

    let started = Instant::now();
    let result = board.find_path(algorithm)?;
    let time_taken = started.elapsed().as_secs_f64() * 1000.0;

    let (walls, weights) = board.snapshot();
    let run = PathFindingRun {
        algorithm_name: algorithm.name().to_string(),
        path_node_count: result.path.len(),
        path_cost: path_cost(&result.path),
        processed_node_count: result.processed.len(),
        time_taken,
        timestamp: unix_millis(),
        start: board.start().into(),
        end: board.end().into(),
        weight: board.weight(),
        walls,
        weights,
    };

    if animate(board, &result, ctx, sink) {
        log::debug!("{algorithm}: animation finished");
    } else {
        log::debug!("{algorithm}: animation cancelled");
    }
    Ok(run)
}

/// Reveal `result`. Returns false if `ctx` was cancelled.
fn animate<G: GridService>(
    board: &mut Board<G>,
    result: &SearchResult,
    ctx: &AnimationContext,
    sink: &mut impl PresentationSink,
) -> bool {
    let phases: [(&[Cell], fn(&Cell) -> PresentationState); 2] = [
        (result.processed.as_slice(), PresentationState::visited),
        (result.path.as_slice(), PresentationState::path),
    ];
    for (cells, settle) in phases {
        for cell in cells {
            if ctx.is_cancelled() {
                return false;
            }
            let p = cell.pos();
            let endpoint = board.is_endpoint(p);
            if !endpoint {
                board.present(p, PresentationState::Current, sink);
            }
            ctx.pause(ctx.step());
            if !endpoint {
                board.present(p, settle(cell), sink);
            }
        }
    }
    true
}
