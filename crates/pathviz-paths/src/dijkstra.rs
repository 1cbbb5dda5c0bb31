use pathviz_core::{Point, SearchResult};

use crate::engine::{SearchEngine, UNREACHABLE};
use crate::traits::{Pather, step_cost};

impl SearchEngine {
    /// Dijkstra's shortest path from `start` to `end`.
    ///
    /// The unvisited set holds every passable cell in row-major order. Each
    /// round scans all of it for the smallest tentative distance (first one
    /// wins on ties), removes that node and relaxes its neighbours with
    /// `distance + weight + 1`, updating only on a strictly smaller value.
    /// The search ends when `end` is taken or the smallest remaining distance
    /// is unreachable.
    ///
    /// The scan is quadratic in the number of cells, which is fine for
    /// boards of a few thousand cells.
    pub fn dijkstra<P: Pather>(&mut self, pather: &P, start: Point, end: Point) -> SearchResult {
        self.begin(pather);
        let mut result = SearchResult::default();
        let (Some(si), Some(ei)) = (self.idx(start), self.idx(end)) else {
            return result;
        };

        let mut unvisited: Vec<usize> = (0..self.rng.len())
            .filter(|&i| pather.cell(self.point(i)).passable)
            .collect();
        self.node_mut(si).g = 0;

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some((pos, current_g)) = self.closest(&unvisited) {
            if current_g == UNREACHABLE {
                break;
            }
            let ci = unvisited.remove(pos);
            let cp = self.point(ci);
            result.processed.push(pather.cell(cp));

            if ci == ei {
                result.path = self.reconstruct(pather, ei);
                break;
            }

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = current_g + step_cost(&pather.cell(np));
                let n = self.node_mut(ni);
                if tentative < n.g {
                    n.g = tentative;
                    n.parent = ci;
                }
            }
        }

        self.nbuf = nbuf;
        result
    }

    /// Position in `set` of the node with the smallest distance, and that
    /// distance. Ties go to the earliest position.
    fn closest(&self, set: &[usize]) -> Option<(usize, i64)> {
        let mut best: Option<(usize, i64)> = None;
        for (pos, &i) in set.iter().enumerate() {
            let g = self.node(i).g;
            match best {
                Some((_, bg)) if g >= bg => {}
                _ => best = Some((pos, g)),
            }
        }
        best
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
    use crate::traits::{Pather, step_cost};

    #[test]
    fn forced_through_weighted_cell() {
        // Only one corridor from (0,0) to (4,4), passing the weight-10 cell
        // at (2,2).
        let mut g = grid_from(&[
            ".####", //
            ".####", //
            "....#", //
            "###.#", //
            "###..", //
        ]);
        g.set_weight(Point::new(2, 2), 10);

        let mut eng = SearchEngine::new(g.bounds());
        let res = eng.dijkstra(&g, Point::new(0, 0), Point::new(4, 4));
        assert_valid_path(&g, &res.path, Point::new(0, 0), Point::new(4, 4));
        assert!(res.path.iter().any(|c| c.pos() == Point::new(2, 2)));
        let cost = res.path.len() as i32 + res.path.iter().map(|c| c.weight).sum::<i32>();
        assert_eq!(res.path.len(), 9);
        assert_eq!(cost, 19);
    }

    #[test]
    fn maximum_weight_on_the_only_corridor() {
        let mut g = Grid::new(5, 1);
        g.set_weight(Point::new(2, 0), i32::MAX);
        let mut eng = SearchEngine::new(g.bounds());
        let res = eng.dijkstra(&g, Point::new(0, 0), Point::new(4, 0));
        assert_valid_path(&g, &res.path, Point::new(0, 0), Point::new(4, 0));
        assert_eq!(walk_cost(&res.path), i64::from(i32::MAX) + 4);
    }

    #[test]
    fn weights_are_avoided_when_cheaper() {
        let g = grid_from(&[
            ".....", //
            ".999.", //
            ".....", //
        ]);
        let mut eng = SearchEngine::new(g.bounds());
        let res = eng.dijkstra(&g, Point::new(0, 1), Point::new(4, 1));
        assert!(res.path.iter().all(|c| c.weight == 0));
        assert_eq!(walk_cost(&res.path), 6);
    }

    #[test]
    fn disconnected_processes_exactly_the_reachable_component() {
        let g = grid_from(&[
            "..#...", //
            ".3#...", //
            "###...", //
        ]);
        let start = Point::new(0, 0);
        let mut eng = SearchEngine::new(g.bounds());
        let res = eng.dijkstra(&g, start, Point::new(5, 2));
        assert!(res.path.is_empty());
        let processed: HashSet<Point> = res.processed.iter().map(Cell::pos).collect();
        assert_eq!(processed, component(&g, start));
        assert_eq!(res.processed.len(), processed.len());
    }

    #[test]
    fn processed_distances_never_decrease() {
        let g = grid_from(&[
            "..2..", //
            ".#.5.", //
            "..1..", //
            "3..#.", //
        ]);
        let mut eng = SearchEngine::new(g.bounds());
        let res = eng.dijkstra(&g, Point::new(0, 0), Point::new(4, 3));
        let dists: Vec<i64> = res
            .processed
            .iter()
            .map(|c| eng.node(eng.idx(c.pos()).unwrap()).g)
            .collect();
        assert!(dists.windows(2).all(|w| w[0] <= w[1]), "{dists:?}");
    }

    #[test]
    fn ties_resolve_in_row_major_order() {
        let g = Grid::new(3, 3);
        let mut eng = SearchEngine::new(g.bounds());
        let res = eng.dijkstra(&g, Point::new(1, 1), Point::new(2, 2));
        let order: Vec<Point> = res.processed.iter().take(5).map(Cell::pos).collect();
        assert_eq!(
            order,
            vec![
                Point::new(1, 1),
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 2),
            ]
        );
    }

    /// Cheapest walk cost from `start` to `end` over all simple paths.
    fn brute_force(g: &Grid, start: Point, end: Point) -> Option<i64> {
        fn go(
            g: &Grid,
            p: Point,
            end: Point,
            cost: i64,
            seen: &mut HashSet<Point>,
            best: &mut Option<i64>,
        ) {
            if p == end {
                *best = Some(best.map_or(cost, |b| b.min(cost)));
                return;
            }
            let mut buf = Vec::new();
            g.neighbors(p, &mut buf);
            for n in buf {
                if seen.insert(n) {
                    go(g, n, end, cost + step_cost(&g.at(n)), seen, best);
                    seen.remove(&n);
                }
            }
        }
        let mut best = None;
        let mut seen = HashSet::from([start]);
        go(g, start, end, 0, &mut seen, &mut best);
        best
    }

    #[test]
    fn matches_brute_force_on_small_grids() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = Range::sized(4, 3);
        for _ in 0..60 {
            let mut g = Grid::new(4, 3);
            for p in bounds {
                match rng.random_range(0..10) {
                    0..=1 => g.set_passable(p, false),
                    2..=4 => g.set_weight(p, rng.random_range(1..6)),
                    _ => {}
                }
            }
            let start = Point::new(0, 0);
            let end = Point::new(3, 2);
            g.set_passable(start, true);
            g.set_weight(start, 0);
            g.set_passable(end, true);
            g.set_weight(end, 0);

            let mut eng = SearchEngine::new(bounds);
            let res = eng.dijkstra(&g, start, end);
            match brute_force(&g, start, end) {
                Some(best) => {
                    assert_valid_path(&g, &res.path, start, end);
                    assert_eq!(walk_cost(&res.path), best);
                }
                None => assert!(res.path.is_empty()),
            }
        }
    }
}
