use std::collections::VecDeque;

use pathviz_core::{Point, SearchResult};

use crate::engine::SearchEngine;
use crate::traits::Pather;

impl SearchEngine {
    /// Breadth-first search from `start` to `end`, ignoring weights.
    ///
    /// The frontier is a FIFO fed at the front and drained at the back. A
    /// node is marked visited as soon as it is discovered, so it is queued at
    /// most once. The search stops the moment `end` is dequeued; if `end` is
    /// unreachable the whole reachable component ends up in `processed` and
    /// the path is empty.
    pub fn bfs<P: Pather>(&mut self, pather: &P, start: Point, end: Point) -> SearchResult {
        self.begin(pather);
        let mut result = SearchResult::default();
        let (Some(si), Some(ei)) = (self.idx(start), self.idx(end)) else {
            return result;
        };

        let mut frontier: VecDeque<usize> = VecDeque::new();
        self.node_mut(si).visited = true;
        frontier.push_front(si);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = frontier.pop_back() {
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
                n.visited = true;
                n.parent = ci;
                frontier.push_front(ni);
            }
        }

        self.nbuf = nbuf;
        result
    }
}
