//! Search algorithms over weighted, 4-connected grids.
//!
//! Every algorithm reports the cells it expanded, in order, alongside the
//! final path, so that callers can replay the search:
//!
//! - **BFS** unweighted shortest path ([`SearchEngine::bfs`])
//! - **Dijkstra** weighted shortest path with a linear minimum scan
//!   ([`SearchEngine::dijkstra`])
//! - **A\*** weighted shortest path guided by Manhattan distance
//!   ([`SearchEngine::astar`])
//! - **Greedy best-first** ([`SearchEngine::greedy`])
//! - **Depth-first** ([`SearchEngine::dfs`])
//! - **Bidirectional BFS** and **bidirectional A\***, searching from both
//!   ends until the frontiers meet ([`SearchEngine::bfs_bidirectional`],
//!   [`SearchEngine::astar_bidirectional`])
//!
//! All algorithms run through [`SearchEngine`], which owns and reuses its
//! per-node scratch state between queries.
//!
//! Moving onto a cell costs `1 + weight`. Impassable cells are never
//! neighbours, so they are never expanded.

mod astar;
mod bfs;
mod bidirectional;
mod dfs;
mod dijkstra;
mod distance;
mod engine;
mod greedy;
mod neighbors;
mod traits;

pub use distance::manhattan;
pub use engine::{SearchEngine, UNREACHABLE};
pub use neighbors::CARDINAL;
pub use traits::{Pather, step_cost};
