//! Pathfinding visualizer engine.
//!
//! A [`Visualizer`] owns a [`Board`] (a [`GridService`](pathviz_core::GridService)
//! plus the start/end pair) and drives it from [`BoardMsg`]s: editing
//! gestures through the [`Dispatcher`], animated searches through
//! [`play`], animated maze fills through the [`MazeGenerator`], and a
//! persisted [`RunHistoryStore`] that can rebuild any recorded board.
//!
//! Every visible change is reported to a
//! [`PresentationSink`](pathviz_core::PresentationSink) as a
//! [`CellEvent`](pathviz_core::CellEvent).

pub mod board;
pub mod channel;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod history;
pub mod maze;
pub mod model;
pub mod playback;
pub mod storage;
pub mod universe;

pub use board::{Board, MIN_WEIGHT, default_endpoints};
pub use channel::Channel;
pub use config::VisualizerConfig;
pub use dispatch::{Dispatcher, Selection, apply};
pub use error::{Error, Result, StorageError};
pub use history::{HISTORY_KEY, PathFindingRun, RunHistoryStore, restore};
pub use maze::{MazeGenerator, PlayType};
pub use model::{BoardMsg, RunNotice, Visualizer};
pub use playback::{path_cost, play};
pub use storage::{FileStorage, MemoryStorage, Storage, Store};
pub use universe::Universe;
