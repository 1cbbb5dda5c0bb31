//! [`Board`]: a grid service plus the start/end pair and the presentation
//! state last emitted for every cell.
//!
//! All cell mutations that should be visible go through the board so each
//! one is followed by exactly one [`CellEvent`].

use std::collections::BTreeSet;

use pathviz_core::{
    Algorithm, Cell, CellEvent, GridError, GridService, MazeType, NodeKey, Point, PresentationSink,
    PresentationState, Range, SearchResult,
};

/// Start and end positions for a fresh `width` x `height` board: a quarter
/// of the width in from either side, on the middle row.
pub fn default_endpoints(width: i32, height: i32) -> (Point, Point) {
    let y = height.div_euclid(2);
    let start = Point::new(width.div_euclid(4), y);
    let mut end = Point::new((3 * width).div_euclid(4), y);
    if end == start {
        if width > 1 {
            end.x = width - 1;
        } else if height > 1 {
            end.y = if start.y == 0 { height - 1 } else { 0 };
        }
    }
    (start, end)
}

/// Smallest weight a weighted cell can carry.
pub const MIN_WEIGHT: i32 = 1;

pub struct Board<G> {
    service: G,
    start: Point,
    end: Point,
    weight: i32,
    shown: Vec<PresentationState>,
}

impl<G: GridService> Board<G> {
    /// Wrap `service`, placing the endpoints at their defaults. `weight` is
    /// the value given to newly weighted cells, raised to [`MIN_WEIGHT`].
    pub fn new(service: G, weight: i32) -> Self {
        let mut board = Self {
            service,
            start: Point::ZERO,
            end: Point::ZERO,
            weight: weight.max(MIN_WEIGHT),
            shown: Vec::new(),
        };
        board.place_default_endpoints();
        board
    }

    fn place_default_endpoints(&mut self) {
        self.shown = vec![PresentationState::Empty; self.bounds().len()];
        let (start, end) = default_endpoints(self.service.width(), self.service.height());
        self.start = start;
        self.end = end;
        for p in [start, end] {
            self.service.set_weight(p, 0);
            self.service.set_passable(p, true);
        }
        self.record(start, PresentationState::Start);
        self.record(end, PresentationState::End);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn service(&self) -> &G {
        &self.service
    }

    pub fn bounds(&self) -> Range {
        self.service.bounds()
    }

    pub fn has_cell(&self, p: Point) -> bool {
        self.service.has_cell(p)
    }

    pub fn cell(&self, p: Point) -> Cell {
        self.service.cell(p)
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn is_endpoint(&self, p: Point) -> bool {
        p == self.start || p == self.end
    }

    /// Weight given to newly weighted cells.
    pub fn weight(&self) -> i32 {
        self.weight
    }

    /// Presentation state last emitted for `p`.
    pub fn shown(&self, p: Point) -> PresentationState {
        self.index(p)
            .and_then(|i| self.shown.get(i).copied())
            .unwrap_or_default()
    }

    /// Current walls and weights, endpoints excluded.
    pub fn snapshot(&self) -> (BTreeSet<NodeKey>, BTreeSet<NodeKey>) {
        let mut walls = BTreeSet::new();
        let mut weights = BTreeSet::new();
        for p in self.bounds() {
            if self.is_endpoint(p) {
                continue;
            }
            let c = self.service.cell(p);
            if !c.passable {
                walls.insert(p.into());
            } else if c.weight > 0 {
                weights.insert(p.into());
            }
        }
        (walls, weights)
    }

    pub fn find_path(&mut self, algorithm: Algorithm) -> Result<SearchResult, GridError> {
        self.service.find_path(self.start, self.end, algorithm)
    }

    pub fn generate_maze(&mut self, maze_type: MazeType) -> Result<Vec<Point>, GridError> {
        self.service.generate_maze(maze_type)
    }

    // -----------------------------------------------------------------------
    // Presentation
    // -----------------------------------------------------------------------

    fn index(&self, p: Point) -> Option<usize> {
        let b = self.bounds();
        b.contains(p)
            .then(|| ((p.y - b.min.y) * b.width() + (p.x - b.min.x)) as usize)
    }

    fn record(&mut self, p: Point, state: PresentationState) {
        if let Some(slot) = self.index(p).and_then(|i| self.shown.get_mut(i)) {
            *slot = state;
        }
    }

    /// Emit `state` for `p` without touching cell data.
    pub fn present(&mut self, p: Point, state: PresentationState, sink: &mut impl PresentationSink) {
        self.record(p, state);
        sink.present(CellEvent::new(p.into(), state));
    }

    /// The state a cell rests in when no search is shown.
    pub fn base_state(&self, p: Point) -> PresentationState {
        if p == self.start {
            PresentationState::Start
        } else if p == self.end {
            PresentationState::End
        } else {
            PresentationState::base(&self.service.cell(p))
        }
    }

    /// Emit the resting state of every cell.
    pub fn redraw(&mut self, sink: &mut impl PresentationSink) {
        for p in self.bounds() {
            let state = self.base_state(p);
            self.present(p, state, sink);
        }
    }

    // -----------------------------------------------------------------------
    // Single-cell mutations
    // -----------------------------------------------------------------------

    /// Make `p` a wall.
    pub fn set_wall(&mut self, p: Point, sink: &mut impl PresentationSink) {
        self.service.set_weight(p, 0);
        self.service.set_passable(p, false);
        self.present(p, PresentationState::Wall, sink);
    }

    /// Make `p` an open, unweighted cell.
    pub fn set_default(&mut self, p: Point, sink: &mut impl PresentationSink) {
        self.service.set_weight(p, 0);
        self.service.set_passable(p, true);
        self.present(p, PresentationState::Empty, sink);
    }

    /// Weight `p` with `weight`, or the board's weight when `None` or below
    /// [`MIN_WEIGHT`].
    pub fn set_weighted(&mut self, p: Point, weight: Option<i32>, sink: &mut impl PresentationSink) {
        let weight = weight.filter(|&w| w >= MIN_WEIGHT).unwrap_or(self.weight);
        self.service.set_weight(p, weight);
        self.service.set_passable(p, true);
        self.present(p, PresentationState::Weight, sink);
    }

    /// Mark `p` as the start. The previous start keeps its cell data.
    pub fn set_start(&mut self, p: Point, sink: &mut impl PresentationSink) {
        self.service.set_weight(p, 0);
        self.service.set_passable(p, true);
        self.start = p;
        self.present(p, PresentationState::Start, sink);
    }

    /// Mark `p` as the end. The previous end keeps its cell data.
    pub fn set_end(&mut self, p: Point, sink: &mut impl PresentationSink) {
        self.service.set_weight(p, 0);
        self.service.set_passable(p, true);
        self.end = p;
        self.present(p, PresentationState::End, sink);
    }

    /// Demote the current start to a default cell and promote `p`.
    ///
    /// The old start is left alone when it is also the end.
    pub fn move_start(&mut self, p: Point, sink: &mut impl PresentationSink) {
        let prev = self.start;
        if prev != p && prev != self.end {
            self.set_default(prev, sink);
        }
        self.set_start(p, sink);
    }

    /// Demote the current end to a default cell and promote `p`.
    ///
    /// The old end is left alone when it is also the start.
    pub fn move_end(&mut self, p: Point, sink: &mut impl PresentationSink) {
        let prev = self.end;
        if prev != p && prev != self.start {
            self.set_default(prev, sink);
        }
        self.set_end(p, sink);
    }

    // -----------------------------------------------------------------------
    // Whole-board operations
    // -----------------------------------------------------------------------

    /// Clear every wall and weight. Endpoints stay where they are.
    pub fn reset(&mut self, sink: &mut impl PresentationSink) {
        self.service.reset();
        for p in self.bounds() {
            if !self.is_endpoint(p) {
                self.present(p, PresentationState::Empty, sink);
            }
        }
    }

    /// Clear the search animation, returning cells to their resting state.
    pub fn reset_path(&mut self, sink: &mut impl PresentationSink) {
        for p in self.bounds() {
            if !self.is_endpoint(p) && self.shown(p).is_search_state() {
                let state = self.base_state(p);
                self.present(p, state, sink);
            }
        }
    }

    /// Use `weight` for new weights and re-weight every weighted cell.
    ///
    /// Weights below [`MIN_WEIGHT`] are ignored; returns whether `weight`
    /// was applied.
    pub fn apply_weight(&mut self, weight: i32) -> bool {
        if weight < MIN_WEIGHT {
            log::warn!("ignoring weight {weight}: weights start at {MIN_WEIGHT}");
            return false;
        }
        self.weight = weight;
        for p in self.bounds() {
            if self.service.cell(p).weight > 0 {
                self.service.set_weight(p, weight);
            }
        }
        true
    }

    /// Resize the grid. Every cell is reset and the endpoints return to
    /// their default positions.
    pub fn resize(&mut self, width: i32, height: i32, sink: &mut impl PresentationSink) {
        self.service.resize(width, height);
        self.place_default_endpoints();
        self.redraw(sink);
    }
}

/// A seeded board with weight 15, for tests across the crate.
#[cfg(test)]
pub(crate) fn test_board(w: i32, h: i32) -> Board<crate::Universe<rand::rngs::StdRng>> {
    use rand::SeedableRng;
    Board::new(
        crate::Universe::with_rng(w, h, rand::rngs::StdRng::seed_from_u64(3)),
        15,
    )
}
