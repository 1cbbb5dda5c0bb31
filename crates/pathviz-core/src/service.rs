//! The [`GridService`] contract: cell storage plus the search and maze
//! algorithms that the playback and maze-fill layers consume.

use std::fmt;

use crate::cell::Cell;
use crate::error::GridError;
use crate::geom::{Point, Range};

/// Output of a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Cells from start to end inclusive; empty if the end is unreachable.
    pub path: Vec<Cell>,
    /// Every expanded cell, in visitation order.
    pub processed: Vec<Cell>,
}

impl SearchResult {
    /// Whether a path was found.
    #[inline]
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Search algorithm selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Astar,
    Dijkstra,
    Bfs,
    Dfs,
    GreedyBfs,
    BfsBidirectional,
    AstarBidirectional,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Astar,
        Algorithm::Dijkstra,
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::GreedyBfs,
        Algorithm::BfsBidirectional,
        Algorithm::AstarBidirectional,
    ];

    /// Human-readable name, recorded in run history.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Astar => "A*",
            Self::Dijkstra => "Dijkstra",
            Self::Bfs => "Breadth-First Search",
            Self::Dfs => "Depth-First Search",
            Self::GreedyBfs => "Greedy Best-First Search",
            Self::BfsBidirectional => "Bidirectional BFS",
            Self::AstarBidirectional => "Bidirectional A*",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maze / obstacle generator selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MazeType {
    /// Roughly 25 % of cells.
    Random25,
    Random50,
    Random75,
    RecursiveDivision,
}

impl MazeType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random25 => "Random 25%",
            Self::Random50 => "Random 50%",
            Self::Random75 => "Random 75%",
            Self::RecursiveDivision => "Recursive Division",
        }
    }
}

/// Cell storage with search and maze generation.
///
/// Mutators silently ignore coordinates outside the grid. Search endpoints
/// must lie inside it.
pub trait GridService {
    fn width(&self) -> i32;

    fn height(&self) -> i32;

    /// `[0, width) × [0, height)`.
    fn bounds(&self) -> Range {
        Range::sized(self.width(), self.height())
    }

    /// The cell at `p`.
    fn cell(&self, p: Point) -> Cell;

    /// Whether `p` addresses a cell of this grid.
    fn has_cell(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    fn set_weight(&mut self, p: Point, weight: i32);

    fn set_passable(&mut self, p: Point, passable: bool);

    /// Make every cell passable with weight 0.
    fn reset(&mut self);

    /// Replace the grid with a fresh one of the given size.
    fn resize(&mut self, width: i32, height: i32);

    /// Candidate coordinates for a maze, in the generator's own order.
    fn generate_maze(&mut self, maze_type: MazeType) -> Result<Vec<Point>, GridError>;

    /// Search from `start` to `end`.
    fn find_path(
        &mut self,
        start: Point,
        end: Point,
        algorithm: Algorithm,
    ) -> Result<SearchResult, GridError>;
}
