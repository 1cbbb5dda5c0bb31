//! The presentation boundary: [`PresentationState`], [`CellEvent`] and
//! [`PresentationSink`].
//!
//! The engine never touches a rendering surface. Every visible change is an
//! ordered `(NodeKey, PresentationState)` event pushed into a sink; a separate
//! layer decides how to draw it.

use std::fmt;
use std::sync::mpsc::Sender;

use crate::cell::Cell;
use crate::key::NodeKey;

/// Display state of one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PresentationState {
    #[default]
    Empty,
    Wall,
    Weight,
    Start,
    End,
    Current,
    Visited,
    VisitedWeight,
    Path,
    PathWeight,
}

impl PresentationState {
    /// Class-style name of the state (`""` for [`Empty`](Self::Empty)).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Wall => "wall",
            Self::Weight => "weight",
            Self::Start => "start",
            Self::End => "end",
            Self::Current => "current",
            Self::Visited => "visited",
            Self::VisitedWeight => "visited-weight",
            Self::Path => "path",
            Self::PathWeight => "path-weight",
        }
    }

    /// The resting state implied by a cell's data alone.
    pub const fn base(cell: &Cell) -> Self {
        if !cell.passable {
            Self::Wall
        } else if cell.weight > 0 {
            Self::Weight
        } else {
            Self::Empty
        }
    }

    /// Settled state after a cell was expanded by a search.
    pub const fn visited(cell: &Cell) -> Self {
        if cell.weight > 0 {
            Self::VisitedWeight
        } else {
            Self::Visited
        }
    }

    /// Settled state of a cell on the final path.
    pub const fn path(cell: &Cell) -> Self {
        if cell.weight > 0 {
            Self::PathWeight
        } else {
            Self::Path
        }
    }

    /// Whether the state belongs to a search animation (as opposed to board
    /// editing).
    pub const fn is_search_state(self) -> bool {
        matches!(
            self,
            Self::Current | Self::Visited | Self::VisitedWeight | Self::Path | Self::PathWeight
        )
    }
}

impl fmt::Display for PresentationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single presentation change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellEvent {
    pub key: NodeKey,
    pub state: PresentationState,
}

impl CellEvent {
    #[inline]
    pub const fn new(key: NodeKey, state: PresentationState) -> Self {
        Self { key, state }
    }
}

/// Receiver of presentation events, applied in emission order.
pub trait PresentationSink {
    fn present(&mut self, event: CellEvent);
}

impl PresentationSink for Vec<CellEvent> {
    fn present(&mut self, event: CellEvent) {
        self.push(event);
    }
}

/// Forward events to another thread. A hung-up receiver drops events.
impl PresentationSink for Sender<CellEvent> {
    fn present(&mut self, event: CellEvent) {
        let _ = self.send(event);
    }
}

impl<S: PresentationSink + ?Sized> PresentationSink for &mut S {
    fn present(&mut self, event: CellEvent) {
        (**self).present(event);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn present(&mut self, _event: CellEvent) {}
}
