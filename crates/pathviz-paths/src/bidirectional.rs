use std::collections::{BinaryHeap, VecDeque};

use pathviz_core::{Point, SearchResult};

use crate::distance::manhattan;
use crate::engine::{Node, NodeRef, SearchEngine, UNREACHABLE};
use crate::traits::{Pather, step_cost};

/// Which of the two searches a step belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    Forward,
    Backward,
}

impl Side {
    fn other(self) -> Self {
        match self {
            Side::Forward => Side::Backward,
            Side::Backward => Side::Forward,
        }
    }
}

impl Node {
    fn visited_on(&self, side: Side) -> bool {
        match side {
            Side::Forward => self.visited,
            Side::Backward => self.back_visited,
        }
    }

    fn set_visited_on(&mut self, side: Side) {
        match side {
            Side::Forward => self.visited = true,
            Side::Backward => self.back_visited = true,
        }
    }

    fn g_on(&self, side: Side) -> i64 {
        match side {
            Side::Forward => self.g,
            Side::Backward => self.back_g,
        }
    }

    fn link(&mut self, side: Side, g: i64, parent: usize) {
        match side {
            Side::Forward => {
                self.g = g;
                self.parent = parent;
            }
            Side::Backward => {
                self.back_g = g;
                self.back_parent = parent;
            }
        }
    }
}

impl SearchEngine {
    /// Breadth-first search run from both ends at once.
    ///
    /// The two frontiers take turns expanding one node each, starting with
    /// the one rooted at `start`. The search stops when a side dequeues a
    /// node the other side has already discovered; the path is the forward
    /// chain up to that node followed by the backward chain down to `end`.
    /// The path is at most two steps longer than a shortest one.
    pub fn bfs_bidirectional<P: Pather>(
        &mut self,
        pather: &P,
        start: Point,
        end: Point,
    ) -> SearchResult {
        self.begin(pather);
        let mut result = SearchResult::default();
        let (Some(si), Some(ei)) = (self.idx(start), self.idx(end)) else {
            return result;
        };

        let mut forward = VecDeque::from([si]);
        let mut backward = VecDeque::from([ei]);
        self.node_mut(si).visited = true;
        self.node_mut(si).g = 0;
        self.node_mut(ei).back_visited = true;
        self.node_mut(ei).back_g = 0;

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while !(forward.is_empty() && backward.is_empty()) {
            let meet = self
                .bfs_step(pather, Side::Forward, &mut forward, &mut nbuf, &mut result)
                .or_else(|| {
                    self.bfs_step(pather, Side::Backward, &mut backward, &mut nbuf, &mut result)
                });
            if let Some(mi) = meet {
                result.path = self.reconstruct_joined(pather, mi);
                break;
            }
        }

        self.nbuf = nbuf;
        result
    }

    /// A* run from both ends at once, each side guided by the Manhattan
    /// distance to the opposite endpoint.
    ///
    /// Sides alternate one expansion each. The search stops when a side
    /// expands a node the other side has reached, so the path is valid but
    /// not always the cheapest.
    pub fn astar_bidirectional<P: Pather>(
        &mut self,
        pather: &P,
        start: Point,
        end: Point,
    ) -> SearchResult {
        self.begin(pather);
        let mut result = SearchResult::default();
        let (Some(si), Some(ei)) = (self.idx(start), self.idx(end)) else {
            return result;
        };

        let mut seq = 0u64;
        let mut forward = BinaryHeap::from([NodeRef {
            idx: si,
            f: manhattan(start, end).into(),
            seq,
        }]);
        let mut backward = BinaryHeap::from([NodeRef {
            idx: ei,
            f: manhattan(end, start).into(),
            seq,
        }]);
        self.node_mut(si).g = 0;
        self.node_mut(ei).back_g = 0;

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while !(forward.is_empty() && backward.is_empty()) {
            let meet = self
                .astar_step(pather, Side::Forward, end, &mut forward, &mut seq, &mut nbuf, &mut result)
                .or_else(|| {
                    self.astar_step(
                        pather,
                        Side::Backward,
                        start,
                        &mut backward,
                        &mut seq,
                        &mut nbuf,
                        &mut result,
                    )
                });
            if let Some(mi) = meet {
                result.path = self.reconstruct_joined(pather, mi);
                break;
            }
        }

        self.nbuf = nbuf;
        result
    }

    /// Expand the next node of one BFS frontier. Returns it if the other
    /// side has already discovered it.
    fn bfs_step<P: Pather>(
        &mut self,
        pather: &P,
        side: Side,
        frontier: &mut VecDeque<usize>,
        nbuf: &mut Vec<Point>,
        result: &mut SearchResult,
    ) -> Option<usize> {
        let ci = frontier.pop_front()?;
        let cp = self.point(ci);
        result.processed.push(pather.cell(cp));

        let current = self.node(ci);
        if current.visited_on(side.other()) {
            return Some(ci);
        }

        nbuf.clear();
        pather.neighbors(cp, nbuf);
        for &np in nbuf.iter() {
            let Some(ni) = self.idx(np) else {
                continue;
            };
            let n = self.node_mut(ni);
            if n.visited_on(side) {
                continue;
            }
            n.set_visited_on(side);
            n.link(side, current.g_on(side) + 1, ci);
            frontier.push_back(ni);
        }
        None
    }

    /// Expand the best open node of one A* side. Returns it if the other
    /// side has already reached it.
    #[allow(clippy::too_many_arguments)]
    fn astar_step<P: Pather>(
        &mut self,
        pather: &P,
        side: Side,
        goal: Point,
        open: &mut BinaryHeap<NodeRef>,
        seq: &mut u64,
        nbuf: &mut Vec<Point>,
        result: &mut SearchResult,
    ) -> Option<usize> {
        // Skip stale entries.
        let ci = loop {
            let entry = open.pop()?;
            if !self.node(entry.idx).visited_on(side) {
                break entry.idx;
            }
        };
        self.node_mut(ci).set_visited_on(side);

        let cp = self.point(ci);
        result.processed.push(pather.cell(cp));

        let current = self.node(ci);
        if current.g_on(side.other()) != UNREACHABLE {
            return Some(ci);
        }

        nbuf.clear();
        pather.neighbors(cp, nbuf);
        for &np in nbuf.iter() {
            let Some(ni) = self.idx(np) else {
                continue;
            };
            let tentative = current.g_on(side) + step_cost(&pather.cell(np));
            let n = self.node_mut(ni);
            if n.visited_on(side) || tentative >= n.g_on(side) {
                continue;
            }
            n.link(side, tentative, ci);
            *seq += 1;
            open.push(NodeRef {
                idx: ni,
                f: tentative + i64::from(manhattan(np, goal)),
                seq: *seq,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pathviz_core::{Cell, Grid, Point, Range};
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    use crate::SearchEngine;
    use crate::engine::testutil::{assert_valid_path, component, grid_from, walk_cost};

    fn random_grid(rng: &mut StdRng, w: i32, h: i32, start: Point, end: Point) -> Grid {
        let mut g = Grid::new(w, h);
        for p in Range::sized(w, h) {
            match rng.random_range(0..10) {
                0..=2 => g.set_passable(p, false),
                3 => g.set_weight(p, rng.random_range(1..20)),
                _ => {}
            }
        }
        g.set_passable(start, true);
        g.set_passable(end, true);
        g
    }

    #[test]
    fn bfs_meets_in_the_middle_of_a_corridor() {
        let g = Grid::new(9, 1);
        let mut eng = SearchEngine::new(g.bounds());
        let res = eng.bfs_bidirectional(&g, Point::new(0, 0), Point::new(8, 0));
        assert_valid_path(&g, &res.path, Point::new(0, 0), Point::new(8, 0));
        assert_eq!(res.path.len(), 9);
        // Sides alternate, so the middle cell is the last one expanded.
        let order: Vec<i32> = res.processed.iter().map(|c| c.x).collect();
        assert_eq!(order, vec![0, 8, 1, 7, 2, 6, 3, 5, 4]);
    }

    #[test]
    fn bfs_path_is_near_shortest() {
        let mut rng = StdRng::seed_from_u64(21);
        let (start, end) = (Point::new(0, 0), Point::new(10, 7));
        for _ in 0..40 {
            let g = random_grid(&mut rng, 11, 8, start, end);
            let mut eng = SearchEngine::new(g.bounds());
            let one = eng.bfs(&g, start, end);
            let two = eng.bfs_bidirectional(&g, start, end);
            assert_eq!(one.found(), two.found());
            if two.found() {
                assert_valid_path(&g, &two.path, start, end);
                assert!(two.path.len() >= one.path.len());
                assert!(two.path.len() <= one.path.len() + 2);
            }
        }
    }

    #[test]
    fn astar_path_is_valid_and_never_beats_dijkstra() {
        let mut rng = StdRng::seed_from_u64(5);
        let (start, end) = (Point::new(0, 3), Point::new(9, 3));
        for _ in 0..40 {
            let g = random_grid(&mut rng, 10, 7, start, end);
            let mut eng = SearchEngine::new(g.bounds());
            let d = eng.dijkstra(&g, start, end);
            let a = eng.astar_bidirectional(&g, start, end);
            assert_eq!(a.found(), d.found());
            if a.found() {
                assert_valid_path(&g, &a.path, start, end);
                assert!(walk_cost(&a.path) >= walk_cost(&d.path));
            }
        }
    }

    #[test]
    fn astar_single_route_matches_one_directional() {
        let mut g = grid_from(&[
            "......", //
            "####.#", //
            "......", //
        ]);
        g.set_weight(Point::new(4, 1), 7);
        let (start, end) = (Point::new(0, 0), Point::new(0, 2));
        let mut eng = SearchEngine::new(g.bounds());
        let one = eng.astar(&g, start, end);
        let two = eng.astar_bidirectional(&g, start, end);
        assert_valid_path(&g, &two.path, start, end);
        assert_eq!(walk_cost(&two.path), walk_cost(&one.path));
        assert_eq!(two.path, one.path);
    }

    #[test]
    fn maximum_weight_does_not_overflow() {
        let mut g = Grid::new(5, 1);
        g.set_weight(Point::new(2, 0), i32::MAX);
        let mut eng = SearchEngine::new(g.bounds());
        let res = eng.astar_bidirectional(&g, Point::new(0, 0), Point::new(4, 0));
        assert_eq!(walk_cost(&res.path), i64::from(i32::MAX) + 4);
    }

    #[test]
    fn start_equal_to_end_is_a_single_cell() {
        let g = Grid::new(3, 3);
        let mut eng = SearchEngine::new(g.bounds());
        let p = Point::new(1, 1);
        for res in [eng.bfs_bidirectional(&g, p, p), eng.astar_bidirectional(&g, p, p)] {
            assert_eq!(res.path.iter().map(Cell::pos).collect::<Vec<_>>(), vec![p]);
        }
    }

    #[test]
    fn disconnected_drains_both_components() {
        let g = grid_from(&[
            "..#..", //
            "..#..", //
        ]);
        let (start, end) = (Point::new(0, 0), Point::new(4, 1));
        let mut eng = SearchEngine::new(g.bounds());
        for res in [
            eng.bfs_bidirectional(&g, start, end),
            eng.astar_bidirectional(&g, start, end),
        ] {
            assert!(res.path.is_empty());
            let processed: HashSet<Point> = res.processed.iter().map(Cell::pos).collect();
            let both: HashSet<Point> = component(&g, start)
                .union(&component(&g, end))
                .copied()
                .collect();
            assert_eq!(processed, both);
            assert_eq!(res.processed.len(), 8);
        }
    }
}
