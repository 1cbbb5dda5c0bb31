//! Animated painting of maze candidates onto the board.

use pathviz_core::{AnimationContext, GridService, Point, PresentationSink};

use crate::board::Board;

/// What maze candidates become.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayType {
    #[default]
    Wall,
    Weight,
}

/// Paints an ordered candidate list in mirrored pairs.
///
/// The list is split into chunks of `chunk_size`. Within a chunk, position
/// `i` is paired with `len - 1 - i`; the middle element of an odd chunk is
/// painted on its own. Chunks advance together: every step paints the next
/// pair of each chunk, then waits half a step of the context.
#[derive(Debug, Clone, Copy)]
pub struct MazeGenerator {
    chunk_size: usize,
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new(500)
    }
}

impl MazeGenerator {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Paint `coords` as `play_type`. Cancellation is checked before each
    /// step. Returns true if every step ran.
    pub fn fill<G: GridService>(
        &self,
        board: &mut Board<G>,
        coords: &[Point],
        play_type: PlayType,
        ctx: &AnimationContext,
        sink: &mut impl PresentationSink,
    ) -> bool {
        log::debug!(
            "maze fill: {} candidates as {play_type:?}, chunks of {}",
            coords.len(),
            self.chunk_size
        );
        let chunks: Vec<&[Point]> = coords.chunks(self.chunk_size).collect();
        let steps = chunks.iter().map(|c| c.len().div_ceil(2)).max().unwrap_or(0);

        for i in 0..steps {
            if ctx.is_cancelled() {
                log::debug!("maze fill cancelled after {i} of {steps} steps");
                return false;
            }
            for chunk in &chunks {
                let Some(&a) = chunk.get(i) else {
                    continue;
                };
                let j = chunk.len() - 1 - i;
                if j < i {
                    continue;
                }
                paint(board, a, play_type, sink);
                if j != i {
                    paint(board, chunk[j], play_type, sink);
                }
            }
            ctx.pause(ctx.half_step());
        }
        true
    }
}

/// Paint one candidate unless it is an endpoint or already occupied.
fn paint<G: GridService>(
    board: &mut Board<G>,
    p: Point,
    play_type: PlayType,
    sink: &mut impl PresentationSink,
) {
    if !board.has_cell(p) || board.is_endpoint(p) {
        return;
    }
    let cell = board.cell(p);
    if !cell.passable || cell.weight > 0 {
        return;
    }
    match play_type {
        PlayType::Wall => board.set_wall(p, sink),
        PlayType::Weight => board.set_weighted(p, None, sink),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_board;
    use pathviz_core::{CellEvent, NodeKey, NullSink, PresentationState};

    fn keys(events: &[CellEvent]) -> Vec<NodeKey> {
        events.iter().map(|e| e.key).collect()
    }

    fn row(n: i32) -> Vec<Point> {
        (0..n).map(|x| Point::new(x, 0)).collect()
    }

    #[test]
    fn pairs_mirror_positions_including_the_middle() {
        let mut b = test_board(7, 3);
        b.move_start(Point::new(0, 2), &mut NullSink);
        b.move_end(Point::new(6, 2), &mut NullSink);
        let mut events = Vec::new();
        let done = MazeGenerator::new(500).fill(
            &mut b,
            &row(5),
            PlayType::Wall,
            &AnimationContext::new(0),
            &mut events,
        );
        assert!(done);
        assert_eq!(
            keys(&events),
            vec![
                NodeKey::new(0, 0),
                NodeKey::new(4, 0),
                NodeKey::new(1, 0),
                NodeKey::new(3, 0),
                NodeKey::new(2, 0),
            ]
        );
    }

    #[test]
    fn chunks_advance_in_lockstep() {
        let mut b = test_board(8, 3);
        b.move_start(Point::new(0, 2), &mut NullSink);
        b.move_end(Point::new(7, 2), &mut NullSink);
        let mut events = Vec::new();
        MazeGenerator::new(4).fill(
            &mut b,
            &row(8),
            PlayType::Wall,
            &AnimationContext::new(0),
            &mut events,
        );
        let xs: Vec<i32> = events.iter().map(|e| e.key.point().x).collect();
        assert_eq!(xs, vec![0, 3, 4, 7, 1, 2, 5, 6]);
    }

    #[test]
    fn skips_endpoints_walls_and_weights() {
        let mut b = test_board(6, 1);
        let (start, end) = (b.start(), b.end());
        b.set_wall(Point::new(0, 0), &mut NullSink);
        b.set_weighted(Point::new(5, 0), Some(2), &mut NullSink);
        let mut events = Vec::new();
        MazeGenerator::default().fill(
            &mut b,
            &row(6),
            PlayType::Weight,
            &AnimationContext::new(0),
            &mut events,
        );
        let painted: Vec<Point> = events.iter().map(|e| e.key.point()).collect();
        assert!(!painted.contains(&start) && !painted.contains(&end));
        assert!(!painted.contains(&Point::new(0, 0)));
        assert!(!painted.contains(&Point::new(5, 0)));
        assert_eq!(painted.len(), 2);
        assert!(events.iter().all(|e| e.state == PresentationState::Weight));
        assert_eq!(b.cell(Point::new(5, 0)).weight, 2);
        assert!(b.cell(start).is_default());
    }

    #[test]
    fn cancellation_abandons_remaining_pairs() {
        struct CancelAt(AnimationContext, usize);
        impl PresentationSink for CancelAt {
            fn present(&mut self, _: CellEvent) {
                if self.1 > 0 {
                    self.1 -= 1;
                    if self.1 == 0 {
                        self.0.cancel();
                    }
                }
            }
        }

        let mut b = test_board(10, 3);
        b.move_start(Point::new(0, 2), &mut NullSink);
        b.move_end(Point::new(9, 2), &mut NullSink);
        let ctx = AnimationContext::new(0);
        // Cancel on the first cell of the second pair; that pair still
        // completes.
        let mut sink = CancelAt(ctx.clone(), 3);
        let done = MazeGenerator::default().fill(&mut b, &row(10), PlayType::Wall, &ctx, &mut sink);
        assert!(!done);
        let walls = b.snapshot().0;
        assert_eq!(
            walls.into_iter().map(|k| k.point().x).collect::<Vec<_>>(),
            vec![0, 1, 8, 9]
        );
    }

    #[test]
    fn empty_input_completes_immediately() {
        let mut b = test_board(4, 4);
        let done = MazeGenerator::default().fill(
            &mut b,
            &[],
            PlayType::Wall,
            &AnimationContext::new(0),
            &mut NullSink,
        );
        assert!(done);
    }
}
