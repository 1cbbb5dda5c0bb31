//! [`Universe`]: the concrete [`GridService`] behind the visualizer.

use pathviz_core::{
    Algorithm, Cell, Grid, GridError, GridService, MazeType, Point, SearchResult,
};
use pathviz_mazes::MazeGen;
use pathviz_paths::SearchEngine;
use rand::Rng;
use rand::rngs::ThreadRng;

/// Cell storage plus the search engine and maze generator that run over it.
pub struct Universe<R: Rng = ThreadRng> {
    grid: Grid,
    engine: SearchEngine,
    mazes: MazeGen<R>,
}

impl Universe {
    /// A `width` x `height` universe seeded from the thread RNG.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_rng(width, height, rand::rng())
    }
}

impl<R: Rng> Universe<R> {
    pub fn with_rng(width: i32, height: i32, rng: R) -> Self {
        let grid = Grid::new(width, height);
        Self {
            engine: SearchEngine::new(grid.bounds()),
            grid,
            mazes: MazeGen::new(rng),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

impl<R: Rng> GridService for Universe<R> {
    fn width(&self) -> i32 {
        self.grid.width()
    }

    fn height(&self) -> i32 {
        self.grid.height()
    }

    fn cell(&self, p: Point) -> Cell {
        self.grid.at(p)
    }

    fn set_weight(&mut self, p: Point, weight: i32) {
        self.grid.set_weight(p, weight.max(0));
    }

    fn set_passable(&mut self, p: Point, passable: bool) {
        self.grid.set_passable(p, passable);
    }

    fn reset(&mut self) {
        self.grid.reset();
    }

    fn resize(&mut self, width: i32, height: i32) {
        self.grid.resize(width, height);
        self.engine.set_range(self.grid.bounds());
    }

    fn generate_maze(&mut self, maze_type: MazeType) -> Result<Vec<Point>, GridError> {
        Ok(self.mazes.generate(self.grid.bounds(), maze_type))
    }

    fn find_path(
        &mut self,
        start: Point,
        end: Point,
        algorithm: Algorithm,
    ) -> Result<SearchResult, GridError> {
        for p in [start, end] {
            if !self.grid.contains(p) {
                return Err(GridError::OutOfBounds(p));
            }
        }
        Ok(self.engine.search(&self.grid, start, end, algorithm))
    }
}
