//! **pathviz-core**: core types for the grid pathfinding visualizer.
//!
//! This crate provides the types shared by every layer: geometry primitives,
//! cell identity ([`NodeKey`]), weighted cells and their storage, the
//! [`GridService`] contract, the per-run [`AnimationContext`], and the
//! presentation boundary through which the engine reports visible changes.

pub mod cell;
pub mod context;
pub mod error;
pub mod geom;
pub mod grid;
pub mod key;
pub mod messages;
pub mod present;
pub mod service;

pub use cell::Cell;
pub use context::{AnimationContext, AnimationSpeed};
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::Grid;
pub use key::{NodeKey, ParseKeyError};
pub use messages::Modifiers;
pub use present::{CellEvent, NullSink, PresentationSink, PresentationState};
pub use service::{Algorithm, GridService, MazeType, SearchResult};
