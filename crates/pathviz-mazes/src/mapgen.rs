//! Maze candidate generation.
//!
//! Two families:
//! - **Random fill**: every cell is proposed independently with a fixed
//!   probability (25, 50 or 75 percent).
//! - **Recursive division**: the outer border, then walls splitting the
//!   interior into ever smaller chambers, each wall with a single gap.

use pathviz_core::{MazeType, Point, Range};
use rand::{Rng, RngExt};

/// Direction of the next dividing wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Inclusive chamber bounds in grid rows and columns.
#[derive(Debug, Clone, Copy)]
struct Chamber {
    row_start: i32,
    row_end: i32,
    col_start: i32,
    col_end: i32,
}

/// Maze candidate generator driven by `rng`.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Ordered candidate coordinates for `kind` inside `bounds`.
    pub fn generate(&mut self, bounds: Range, kind: MazeType) -> Vec<Point> {
        match kind {
            MazeType::Random25 => self.random_fill(bounds, 25),
            MazeType::Random50 => self.random_fill(bounds, 50),
            MazeType::Random75 => self.random_fill(bounds, 75),
            MazeType::RecursiveDivision => self.recursive_division(bounds),
        }
    }

    /// Propose each cell of `bounds` with probability `pct` percent, in
    /// row-major order.
    pub fn random_fill(&mut self, bounds: Range, pct: u32) -> Vec<Point> {
        bounds
            .iter()
            .filter(|_| self.rng.random_range(0..100u32) < pct)
            .collect()
    }

    /// Recursive-division maze over `bounds`.
    ///
    /// Emits the surrounding border first (left/right per row, then
    /// top/bottom per column, corners repeated), then the dividing walls in
    /// depth-first order. Walls sit on even offsets and gaps on odd ones, so
    /// chambers stay connected. Grids smaller than 5x5 produce nothing.
    pub fn recursive_division(&mut self, bounds: Range) -> Vec<Point> {
        let (w, h) = (bounds.width(), bounds.height());
        let chamber = Chamber {
            row_start: 2,
            row_end: h - 3,
            col_start: 2,
            col_end: w - 3,
        };
        if chamber.row_end < chamber.row_start || chamber.col_end < chamber.col_start {
            return Vec::new();
        }

        let mut out = Vec::new();
        for row in 0..h {
            out.push(Point::new(0, row));
            out.push(Point::new(w - 1, row));
        }
        for col in 0..w {
            out.push(Point::new(col, 0));
            out.push(Point::new(col, h - 1));
        }

        self.divide(Range::sized(w, h), chamber, Orientation::Horizontal, &mut out);

        out.into_iter().map(|p| p + bounds.min).collect()
    }

    fn divide(&mut self, grid: Range, c: Chamber, orientation: Orientation, out: &mut Vec<Point>) {
        if c.row_end < c.row_start || c.col_end < c.col_start {
            return;
        }

        let rows: Vec<i32> = match orientation {
            Orientation::Horizontal => (c.row_start..=c.row_end).step_by(2).collect(),
            Orientation::Vertical => (c.row_start - 1..=c.row_end + 1).step_by(2).collect(),
        };
        let cols: Vec<i32> = match orientation {
            Orientation::Horizontal => (c.col_start - 1..=c.col_end + 1).step_by(2).collect(),
            Orientation::Vertical => (c.col_start..=c.col_end).step_by(2).collect(),
        };
        let row = rows[self.rng.random_range(0..rows.len())];
        let col = cols[self.rng.random_range(0..cols.len())];

        match orientation {
            Orientation::Horizontal => {
                out.extend(
                    (c.col_start - 1..=c.col_end + 1)
                        .filter(|&x| x != col)
                        .map(|x| Point::new(x, row))
                        .filter(|&p| grid.contains(p)),
                );

                let top = Chamber { row_end: row - 2, ..c };
                let next = if top.row_end - c.row_start > c.col_end - c.col_start {
                    orientation
                } else {
                    Orientation::Vertical
                };
                self.divide(grid, top, next, out);

                let bottom = Chamber { row_start: row + 2, ..c };
                let next = if c.row_end - bottom.row_start > c.col_end - c.col_start {
                    orientation
                } else {
                    Orientation::Vertical
                };
                self.divide(grid, bottom, next, out);
            }
            Orientation::Vertical => {
                out.extend(
                    (c.row_start - 1..=c.row_end + 1)
                        .filter(|&y| y != row)
                        .map(|y| Point::new(col, y))
                        .filter(|&p| grid.contains(p)),
                );

                let left = Chamber { col_end: col - 2, ..c };
                let next = if c.row_end - c.row_start > left.col_end - c.col_start {
                    Orientation::Horizontal
                } else {
                    orientation
                };
                self.divide(grid, left, next, out);

                let right = Chamber { col_start: col + 2, ..c };
                let next = if c.row_end - c.row_start > c.col_end - right.col_start {
                    Orientation::Horizontal
                } else {
                    orientation
                };
                self.divide(grid, right, next, out);
            }
        }
    }
}
