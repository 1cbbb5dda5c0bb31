//! The [`Cell`] type: one weighted, possibly impassable grid unit.

use crate::geom::Point;
use crate::key::NodeKey;

/// A grid cell.
///
/// `weight == 0` means unweighted; a positive weight is extra traversal cost
/// on top of the unit step cost.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub weight: i32,
    pub passable: bool,
}

impl Cell {
    /// A default (passable, unweighted) cell at `(x, y)`.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            weight: 0,
            passable: true,
        }
    }

    /// Position of the cell.
    #[inline]
    pub const fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Canonical key of the cell.
    #[inline]
    pub const fn key(&self) -> NodeKey {
        NodeKey::new(self.x, self.y)
    }

    #[inline]
    pub const fn is_weighted(&self) -> bool {
        self.weight > 0
    }

    /// Whether the cell is a wall.
    #[inline]
    pub const fn is_wall(&self) -> bool {
        !self.passable
    }

    /// Whether the cell is passable and unweighted.
    #[inline]
    pub const fn is_default(&self) -> bool {
        self.passable && self.weight == 0
    }
}
