use std::collections::BinaryHeap;

use pathviz_core::{Point, SearchResult};

use crate::distance::manhattan;
use crate::engine::{NodeRef, SearchEngine};
use crate::traits::Pather;

impl SearchEngine {
    /// Greedy best-first search: always expand the discovered node that
    /// looks closest to `end` (Manhattan distance plus its weight).
    ///
    /// Fast, but the path is not guaranteed to be the cheapest.
    pub fn greedy<P: Pather>(&mut self, pather: &P, start: Point, end: Point) -> SearchResult {
        self.begin(pather);
        let mut result = SearchResult::default();
        let (Some(si), Some(ei)) = (self.idx(start), self.idx(end)) else {
            return result;
        };

        let mut seq = 0u64;
        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        self.node_mut(si).visited = true;
        open.push(NodeRef { idx: si, f: 0, seq });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(NodeRef { idx: ci, .. }) = open.pop() {
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
                seq += 1;
                open.push(NodeRef {
                    idx: ni,
                    f: i64::from(manhattan(np, end)) + i64::from(pather.cell(np).weight),
                    seq,
                });
            }
        }

        self.nbuf = nbuf;
        result
    }
}
