//! Errors reported across the [`GridService`](crate::GridService) boundary.

use thiserror::Error;

use crate::geom::Point;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(Point),

    #[error("grid service failure: {0}")]
    Service(String),
}
