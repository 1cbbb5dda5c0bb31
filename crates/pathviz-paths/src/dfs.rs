use pathviz_core::{Point, SearchResult};

use crate::engine::SearchEngine;
use crate::traits::Pather;

impl SearchEngine {
    /// Depth-first search from `start` to `end`.
    ///
    /// Nodes are marked visited when popped; a node pushed several times
    /// keeps the parent of its most recent push, which is the entry that
    /// pops first.
    pub fn dfs<P: Pather>(&mut self, pather: &P, start: Point, end: Point) -> SearchResult {
        self.begin(pather);
        let mut result = SearchResult::default();
        let (Some(si), Some(ei)) = (self.idx(start), self.idx(end)) else {
            return result;
        };

        let mut stack = vec![si];
        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = stack.pop() {
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

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let n = self.node_mut(ni);
                if n.visited {
                    continue;
                }
                n.parent = ci;
                stack.push(ni);
            }
        }

        self.nbuf = nbuf;
        result
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pathviz_core::{Cell, Grid, Point};

    use crate::SearchEngine;
    use crate::engine::testutil::{assert_valid_path, component, grid_from};

    #[test]
    fn path_is_valid_on_open_grid() {
        let g = Grid::new(6, 5);
        let mut eng = SearchEngine::new(g.bounds());
        let res = eng.dfs(&g, Point::new(2, 2), Point::new(5, 0));
        assert_valid_path(&g, &res.path, Point::new(2, 2), Point::new(5, 0));
        let unique: HashSet<Point> = res.path.iter().map(Cell::pos).collect();
        assert_eq!(unique.len(), res.path.len());
    }

    #[test]
    fn unreachable_covers_component_once() {
        let g = grid_from(&[
            "...#.", //
            ".#.#.", //
            "...#.", //
        ]);
        let start = Point::new(0, 0);
        let mut eng = SearchEngine::new(g.bounds());
        let res = eng.dfs(&g, start, Point::new(4, 2));
        assert!(res.path.is_empty());
        let processed: HashSet<Point> = res.processed.iter().map(Cell::pos).collect();
        assert_eq!(processed.len(), res.processed.len());
        assert_eq!(processed, component(&g, start));
    }
}
