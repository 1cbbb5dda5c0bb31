//! The [`Grid`] type: row-major storage of weighted [`Cell`]s.
//!
//! A `Grid` has a single owner (the board's composition root); every other
//! component borrows it. Resizing discards all cell state.

use crate::cell::Cell;
use crate::geom::{Point, Range};

/// A 2D grid of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Create a new grid of the given dimensions, every cell passable with
    /// weight 0.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::sized(width, height);
        Self {
            cells: bounds.iter().map(|p| Cell::new(p.x, p.y)).collect(),
            bounds,
        }
    }

    /// Replace the grid with a fresh one of the given dimensions.
    pub fn resize(&mut self, width: i32, height: i32) {
        *self = Self::new(width, height);
    }

    /// Set every cell back to passable with weight 0.
    pub fn reset(&mut self) {
        for c in &mut self.cells {
            c.weight = 0;
            c.passable = true;
        }
    }

    /// The bounding range `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.bounds.width() as usize + p.x as usize)
    }

    /// Borrow the cell at `p`, or `None` outside bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Read the cell at `p`. Returns a default cell at `p` if `p` is outside
    /// bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Cell {
        self.get(p).copied().unwrap_or(Cell::new(p.x, p.y))
    }

    /// Set the weight of the cell at `p`. No-op outside bounds.
    pub fn set_weight(&mut self, p: Point, weight: i32) {
        if let Some(i) = self.index(p) {
            self.cells[i].weight = weight;
        }
    }

    /// Set the passability of the cell at `p`. No-op outside bounds.
    pub fn set_passable(&mut self, p: Point, passable: bool) {
        if let Some(i) = self.index(p) {
            self.cells[i].passable = passable;
        }
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_new_defaults_every_cell() {
        let g = Grid::new(4, 3);
        assert_eq!(g.iter().count(), 12);
        assert!(g.iter().all(|c| c.is_default()));
        assert_eq!(g.at(Point::new(3, 2)), Cell::new(3, 2));
    }

    #[test]
    fn grid_set_and_get() {
        let mut g = Grid::new(4, 3);
        g.set_passable(Point::new(2, 1), false);
        g.set_weight(Point::new(0, 2), 7);
        assert!(g.at(Point::new(2, 1)).is_wall());
        assert_eq!(g.at(Point::new(0, 2)).weight, 7);
        // out of bounds returns default and ignores writes
        g.set_passable(Point::new(10, 10), false);
        assert_eq!(g.at(Point::new(10, 10)), Cell::new(10, 10));
        assert!(g.get(Point::new(-1, 0)).is_none());
    }

    #[test]
    fn grid_cells_know_their_position() {
        let g = Grid::new(5, 4);
        for c in g.iter() {
            assert_eq!(g.at(c.pos()), *c);
        }
    }

    #[test]
    fn grid_reset_and_resize() {
        let mut g = Grid::new(3, 3);
        g.set_passable(Point::new(1, 1), false);
        g.set_weight(Point::new(2, 2), 4);
        g.reset();
        assert!(g.iter().all(|c| c.is_default()));

        g.set_passable(Point::new(0, 0), false);
        g.resize(6, 2);
        assert_eq!(g.width(), 6);
        assert_eq!(g.height(), 2);
        assert!(g.iter().all(|c| c.is_default()));
    }
}
