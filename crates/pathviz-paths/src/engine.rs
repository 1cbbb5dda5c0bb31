use pathviz_core::{Algorithm, Cell, Point, Range, SearchResult};

use crate::traits::Pather;

/// Sentinel distance meaning "not reached yet".
///
/// Distances are `i64` so that summing `i32` weights along any board-sized
/// path cannot overflow.
pub const UNREACHABLE: i64 = i64::MAX;

const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Per-node scratch state
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    pub(crate) g: i64,
    pub(crate) parent: usize,
    pub(crate) visited: bool,
    // backward side of the bidirectional searches
    pub(crate) back_g: i64,
    pub(crate) back_parent: usize,
    pub(crate) back_visited: bool,
    pub(crate) generation: u32,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            parent: NO_PARENT,
            visited: false,
            back_g: UNREACHABLE,
            back_parent: NO_PARENT,
            back_visited: false,
            generation: 0,
        }
    }
}

/// Heap entry ordered by `f`, then insertion order, for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i64,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, oldest first.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

/// Runs searches over a [`Pather`] and keeps their scratch buffers.
///
/// Node state is invalidated lazily with a generation counter, so a new
/// query costs nothing up front. The engine follows the pather's bounds:
/// querying a grid of a different size reallocates once.
pub struct SearchEngine {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    // reused by every neighbour expansion
    pub(crate) nbuf: Vec<Point>,
}

impl SearchEngine {
    /// Create an engine for the given grid rectangle.
    pub fn new(bounds: Range) -> Self {
        Self {
            rng: bounds,
            width: bounds.width().max(0) as usize,
            nodes: vec![Node::default(); bounds.len()],
            generation: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range, reallocating node storage only when
    /// it grows.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;

        if new_len <= self.nodes.len() {
            self.generation = self.generation.wrapping_add(1);
            return;
        }

        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;
    }

    /// Board rectangle the node storage currently covers.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Run `algorithm` from `start` to `end`.
    pub fn search<P: Pather>(
        &mut self,
        pather: &P,
        start: Point,
        end: Point,
        algorithm: Algorithm,
    ) -> SearchResult {
        match algorithm {
            Algorithm::Bfs => self.bfs(pather, start, end),
            Algorithm::Dijkstra => self.dijkstra(pather, start, end),
            Algorithm::Astar => self.astar(pather, start, end),
            Algorithm::GreedyBfs => self.greedy(pather, start, end),
            Algorithm::Dfs => self.dfs(pather, start, end),
            Algorithm::BfsBidirectional => self.bfs_bidirectional(pather, start, end),
            Algorithm::AstarBidirectional => self.astar_bidirectional(pather, start, end),
        }
    }

    // -----------------------------------------------------------------------
    // Query lifecycle
    // -----------------------------------------------------------------------

    /// Start a new query: follow the pather's bounds and invalidate every
    /// node.
    pub(crate) fn begin<P: Pather>(&mut self, pather: &P) {
        let bounds = pather.bounds();
        if bounds != self.rng {
            self.set_range(bounds);
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale nodes could alias the new generation.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
    }

    /// Node state for this query.
    #[inline]
    pub(crate) fn node(&self, idx: usize) -> Node {
        let n = self.nodes[idx];
        if n.generation == self.generation {
            n
        } else {
            Node::default()
        }
    }

    /// Mutable node state for this query, resetting stale entries.
    #[inline]
    pub(crate) fn node_mut(&mut self, idx: usize) -> &mut Node {
        let generation = self.generation;
        let n = &mut self.nodes[idx];
        if n.generation != generation {
            *n = Node {
                generation,
                ..Node::default()
            };
        }
        n
    }

    /// Walk parent links back from `end_idx` and return the path start → end.
    pub(crate) fn reconstruct<P: Pather>(&self, pather: &P, end_idx: usize) -> Vec<Cell> {
        let mut path = Vec::new();
        let mut ci = end_idx;
        while ci != NO_PARENT {
            path.push(pather.cell(self.point(ci)));
            ci = self.node(ci).parent;
        }
        path.reverse();
        path
    }

    /// Path through `meet`: the forward chain from the start, then the
    /// backward chain from `meet` down to the end.
    pub(crate) fn reconstruct_joined<P: Pather>(&self, pather: &P, meet: usize) -> Vec<Cell> {
        let mut path = self.reconstruct(pather, meet);
        let mut ci = self.node(meet).back_parent;
        while ci != NO_PARENT {
            path.push(pather.cell(self.point(ci)));
            ci = self.node(ci).back_parent;
        }
        path
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Flat node index of `p`, if it lies on the board.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let off = p - self.rng.min;
        Some(off.y as usize * self.width + off.x as usize)
    }

    /// Inverse of [`idx`](Self::idx).
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        self.rng.min + Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }
}

// ---------------------------------------------------------------------------
// Shared test helpers
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod testutil {
    use std::collections::{HashSet, VecDeque};

    use pathviz_core::{Cell, Grid, Point};

    use crate::traits::{Pather, step_cost};

    /// Build a grid from rows: `#` wall, `.` open, digit `d` weight `d`.
    pub(crate) fn grid_from(rows: &[&str]) -> Grid {
        let h = rows.len() as i32;
        let w = rows.first().map_or(0, |r| r.len()) as i32;
        let mut g = Grid::new(w, h);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match ch {
                    '#' => g.set_passable(p, false),
                    d if d.is_ascii_digit() => g.set_weight(p, d as i32 - '0' as i32),
                    _ => {}
                }
            }
        }
        g
    }

    /// Check that `path` is a contiguous walk over passable cells.
    pub(crate) fn assert_valid_path(g: &Grid, path: &[Cell], start: Point, end: Point) {
        assert_eq!(path.first().map(Cell::pos), Some(start));
        assert_eq!(path.last().map(Cell::pos), Some(end));
        for w in path.windows(2) {
            let d = w[1].pos() - w[0].pos();
            assert_eq!(d.x.abs() + d.y.abs(), 1, "non-adjacent step {:?}", w);
        }
        assert!(path.iter().all(|c| g.at(c.pos()).passable));
    }

    /// Cost of a path as the search sees it: every step after the start.
    pub(crate) fn walk_cost(path: &[Cell]) -> i64 {
        path.iter().skip(1).map(step_cost).sum()
    }

    /// All cells reachable from `start` by flood fill.
    pub(crate) fn component(g: &Grid, start: Point) -> HashSet<Point> {
        let mut seen = HashSet::from([start]);
        let mut q = VecDeque::from([start]);
        let mut buf = Vec::new();
        while let Some(p) = q.pop_front() {
            buf.clear();
            g.neighbors(p, &mut buf);
            for &n in &buf {
                if seen.insert(n) {
                    q.push_back(n);
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::Grid;

    #[test]
    fn shrinking_keeps_node_storage() {
        let mut eng = SearchEngine::new(Range::sized(20, 20));
        let cap = eng.nodes.len();
        eng.set_range(Range::sized(5, 5));
        assert_eq!(eng.range(), Range::sized(5, 5));
        assert_eq!(eng.nodes.len(), cap);
        assert_eq!(eng.width, 5);
    }

    #[test]
    fn growing_reallocates_node_storage() {
        let mut eng = SearchEngine::new(Range::sized(5, 5));
        eng.set_range(Range::sized(20, 20));
        assert_eq!(eng.nodes.len(), 400);
    }

    #[test]
    fn engine_follows_grid_size() {
        let mut eng = SearchEngine::new(Range::sized(2, 2));
        let g = Grid::new(6, 4);
        let res = eng.bfs(&g, Point::new(0, 0), Point::new(5, 3));
        assert_eq!(eng.range(), g.bounds());
        assert_eq!(res.path.len(), 10);
    }

    #[test]
    fn index_round_trip() {
        let eng = SearchEngine::new(Range::sized(7, 3));
        for p in Range::sized(7, 3) {
            let i = eng.idx(p).unwrap();
            assert_eq!(eng.point(i), p);
        }
        assert!(eng.idx(Point::new(7, 0)).is_none());
    }

    #[test]
    fn search_dispatches_every_algorithm() {
        let g = Grid::new(5, 5);
        let mut eng = SearchEngine::new(g.bounds());
        for algo in Algorithm::ALL {
            let res = eng.search(&g, Point::new(0, 0), Point::new(4, 4), algo);
            assert!(res.found(), "{algo} found no path");
            assert_eq!(res.processed.first().map(Cell::pos), Some(Point::new(0, 0)));
        }
    }

    #[test]
    fn node_ref_orders_smallest_f_then_oldest() {
        use std::collections::BinaryHeap;
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 1, f: 5, seq: 0 });
        heap.push(NodeRef { idx: 2, f: 3, seq: 1 });
        heap.push(NodeRef { idx: 3, f: 3, seq: 2 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|n| n.idx)).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }
}
