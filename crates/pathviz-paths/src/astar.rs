use std::collections::BinaryHeap;

use pathviz_core::{Point, SearchResult};

use crate::distance::manhattan;
use crate::engine::{NodeRef, SearchEngine};
use crate::traits::{Pather, step_cost};

impl SearchEngine {
    /// A* from `start` to `end`, guided by Manhattan distance.
    ///
    /// Step costs are `1 + weight`, so the heuristic never overestimates and
    /// the path cost matches [`dijkstra`](Self::dijkstra).
    pub fn astar<P: Pather>(&mut self, pather: &P, start: Point, end: Point) -> SearchResult {
        self.begin(pather);
        let mut result = SearchResult::default();
        let (Some(si), Some(ei)) = (self.idx(start), self.idx(end)) else {
            return result;
        };

        let mut seq = 0u64;
        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        self.node_mut(si).g = 0;
        open.push(NodeRef {
            idx: si,
            f: manhattan(start, end).into(),
            seq,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop() {
            let ci = current.idx;

            // Skip stale entries.
            if self.node(ci).visited {
                continue;
            }
            self.node_mut(ci).visited = true;

            let cp = self.point(ci);
            result.processed.push(pather.cell(cp));

            if ci == ei {
                result.path = self.reconstruct(pather, ei);
                break;
            }

            let current_g = self.node(ci).g;
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = current_g + step_cost(&pather.cell(np));
                let n = self.node_mut(ni);
                if n.visited || tentative >= n.g {
                    continue;
                }
                n.g = tentative;
                n.parent = ci;
                seq += 1;
                open.push(NodeRef {
                    idx: ni,
                    f: tentative + i64::from(manhattan(np, end)),
                    seq,
                });
            }
        }

        self.nbuf = nbuf;
        result
    }
}

#[cfg(test)]
mod tests {
    use pathviz_core::{Grid, Point, Range};
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    use crate::SearchEngine;
    use crate::engine::testutil::{assert_valid_path, grid_from, walk_cost};

    #[test]
    fn straight_line_expands_little() {
        let g = Grid::new(20, 5);
        let mut eng = SearchEngine::new(g.bounds());
        let res = eng.astar(&g, Point::new(0, 2), Point::new(19, 2));
        assert_eq!(res.path.len(), 20);
        assert!(res.processed.len() < 40);
    }

    #[test]
    fn same_cost_as_dijkstra() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = Range::sized(9, 7);
        for _ in 0..40 {
            let mut g = Grid::new(9, 7);
            for p in bounds {
                match rng.random_range(0..10) {
                    0..=2 => g.set_passable(p, false),
                    3 => g.set_weight(p, rng.random_range(1..20)),
                    _ => {}
                }
            }
            let (start, end) = (Point::new(0, 0), Point::new(8, 6));
            g.set_passable(start, true);
            g.set_passable(end, true);

            let mut eng = SearchEngine::new(bounds);
            let d = eng.dijkstra(&g, start, end);
            let a = eng.astar(&g, start, end);
            assert_eq!(a.found(), d.found());
            if a.found() {
                assert_valid_path(&g, &a.path, start, end);
                assert_eq!(walk_cost(&a.path), walk_cost(&d.path));
            }
        }
    }

    #[test]
    fn maximum_weight_on_the_only_corridor() {
        let mut g = Grid::new(5, 1);
        g.set_weight(Point::new(2, 0), i32::MAX);
        g.set_weight(Point::new(3, 0), i32::MAX);
        let mut eng = SearchEngine::new(g.bounds());
        let res = eng.astar(&g, Point::new(0, 0), Point::new(4, 0));
        assert_valid_path(&g, &res.path, Point::new(0, 0), Point::new(4, 0));
        assert_eq!(walk_cost(&res.path), 2 * i64::from(i32::MAX) + 4);
    }

    #[test]
    fn unreachable_returns_empty_path() {
        let g = grid_from(&[
            "..#..", //
            "..#..", //
        ]);
        let mut eng = SearchEngine::new(g.bounds());
        let res = eng.astar(&g, Point::new(0, 0), Point::new(4, 1));
        assert!(res.path.is_empty());
        assert_eq!(res.processed.len(), 4);
    }
}
