use pathviz_core::{Cell, Grid, Point, Range};

use crate::neighbors;

/// Read-only view of a grid as seen by the search algorithms.
pub trait Pather {
    /// Range of valid coordinates.
    fn bounds(&self) -> Range;

    /// The cell at `p`.
    fn cell(&self, p: Point) -> Cell;

    /// Append the passable cardinal neighbours of `p` into `buf`. The caller
    /// clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

impl Pather for Grid {
    fn bounds(&self) -> Range {
        Grid::bounds(self)
    }

    fn cell(&self, p: Point) -> Cell {
        self.at(p)
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        neighbors::cardinal(
            p,
            |n| self.get(n).is_some_and(|c| c.passable),
            buf,
        );
    }
}

/// Cost of stepping onto `cell`. Negative weights count as 0.
#[inline]
pub fn step_cost(cell: &Cell) -> i64 {
    i64::from(cell.weight.max(0)) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_neighbors_skip_walls_and_edges() {
        let mut g = Grid::new(3, 3);
        g.set_passable(Point::new(1, 0), false);
        let mut buf = Vec::new();
        g.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(
            buf,
            vec![Point::new(1, 2), Point::new(0, 1), Point::new(2, 1)]
        );

        buf.clear();
        g.neighbors(Point::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Point::new(0, 1)]);
    }

    #[test]
    fn step_cost_adds_weight() {
        let mut c = Cell::new(0, 0);
        assert_eq!(step_cost(&c), 1);
        c.weight = 10;
        assert_eq!(step_cost(&c), 11);
        c.weight = i32::MAX;
        assert_eq!(step_cost(&c), i64::from(i32::MAX) + 1);
        c.weight = -4;
        assert_eq!(step_cost(&c), 1);
    }
}
