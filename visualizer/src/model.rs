//! The [`Visualizer`] composition root: owns the board and every component
//! that acts on it, and handles [`BoardMsg`]s one at a time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pathviz_core::{
    Algorithm, AnimationContext, GridService, MazeType, Modifiers, Point, PresentationSink,
};

use crate::board::Board;
use crate::channel::Channel;
use crate::config::VisualizerConfig;
use crate::dispatch::{Dispatcher, Selection};
use crate::error::Result;
use crate::history::{PathFindingRun, RunHistoryStore, restore};
use crate::maze::{MazeGenerator, PlayType};
use crate::playback::play;
use crate::storage::{FileStorage, Storage, Store};
use crate::universe::Universe;

/// A request to the visualizer.
#[derive(Debug, Clone)]
pub enum BoardMsg {
    FindPath {
        algorithm: Algorithm,
        context: AnimationContext,
    },
    GenerateMaze {
        play_type: PlayType,
        maze_type: MazeType,
        context: AnimationContext,
    },
    ResetBoard,
    ResetPath,
    WeightChange(i32),
    SelectionChange(Selection),
    RestoreRunHistory(Box<PathFindingRun>),
    ClearHistory,
    Click {
        pos: Point,
        modifiers: Modifiers,
    },
    Hover {
        pos: Point,
        primary_held: bool,
        modifiers: Modifiers,
    },
    Resize {
        width: i32,
        height: i32,
    },
}

/// Published when a long-running operation ends.
#[derive(Debug, Clone, PartialEq)]
pub enum RunNotice {
    /// A find-path run finished or was cancelled.
    Run(PathFindingRun),
    /// A maze fill ran to completion.
    Done,
}

pub struct Visualizer<G, S> {
    board: Board<G>,
    dispatcher: Dispatcher,
    history: RunHistoryStore<S>,
    mazes: MazeGenerator,
    notices: Channel<RunNotice>,
    running: Arc<AtomicBool>,
    config: VisualizerConfig,
}

impl Visualizer<Universe, FileStorage> {
    /// A visualizer over a fresh [`Universe`], persisting to the configured
    /// directory.
    pub fn from_config(config: VisualizerConfig) -> Self {
        let universe = Universe::new(config.width, config.height);
        let storage = FileStorage::new(&config.storage_dir);
        Self::new(universe, storage, config)
    }
}

impl<G: GridService, S: Storage> Visualizer<G, S> {
    pub fn new(service: G, storage: S, config: VisualizerConfig) -> Self {
        let running = Arc::new(AtomicBool::new(false));
        let store = Store::new(storage, config.storage_prefix.clone());
        Self {
            board: Board::new(service, config.weight),
            dispatcher: Dispatcher::new(Arc::clone(&running)),
            history: RunHistoryStore::load(store, config.history_limit),
            mazes: MazeGenerator::new(config.maze_chunk_size),
            notices: Channel::new(),
            running,
            config,
        }
    }

    pub fn board(&self) -> &Board<G> {
        &self.board
    }

    pub fn history(&self) -> &RunHistoryStore<S> {
        &self.history
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn selection(&self) -> Selection {
        self.dispatcher.selection()
    }

    /// Receive every [`RunNotice`] published from now on.
    pub fn subscribe(&self) -> std::sync::mpsc::Receiver<RunNotice> {
        self.notices.subscribe()
    }

    /// Shared flag that is set while a run or maze fill is in progress.
    pub fn running(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Emit the resting state of every cell.
    pub fn redraw(&mut self, sink: &mut impl PresentationSink) {
        self.board.redraw(sink);
    }

    /// A fresh per-run context at the configured speed.
    pub fn new_context(&self) -> AnimationContext {
        self.config.speed.into()
    }

    /// Handle one message. Find-path and maze messages block until their
    /// animation ends; cancel them through their context.
    pub fn update(&mut self, msg: BoardMsg, sink: &mut impl PresentationSink) -> Result<()> {
        match msg {
            BoardMsg::FindPath { algorithm, context } => {
                let run = self.find_path(algorithm, &context, sink)?;
                self.notices.publish(RunNotice::Run(run.clone()));
                if let Err(e) = self.history.capture(run) {
                    log::warn!("run history not saved: {e}");
                }
            }
            BoardMsg::GenerateMaze {
                play_type,
                maze_type,
                context,
            } => {
                if self.generate_maze(play_type, maze_type, &context, sink)? {
                    self.notices.publish(RunNotice::Done);
                }
            }
            BoardMsg::ResetBoard => self.board.reset(sink),
            BoardMsg::ResetPath => self.board.reset_path(sink),
            BoardMsg::WeightChange(weight) => {
                self.board.apply_weight(weight);
            }
            BoardMsg::SelectionChange(selection) => self.dispatcher.set_selection(selection),
            BoardMsg::RestoreRunHistory(run) => {
                restore(&mut self.board, &run, sink);
            }
            BoardMsg::ClearHistory => self.history.clear()?,
            BoardMsg::Click { pos, modifiers } => {
                self.dispatcher.click(&mut self.board, pos, modifiers, sink)
            }
            BoardMsg::Hover {
                pos,
                primary_held,
                modifiers,
            } => self
                .dispatcher
                .hover(&mut self.board, pos, primary_held, modifiers, sink),
            BoardMsg::Resize { width, height } => self.board.resize(width, height, sink),
        }
        Ok(())
    }

    fn find_path(
        &mut self,
        algorithm: Algorithm,
        ctx: &AnimationContext,
        sink: &mut impl PresentationSink,
    ) -> Result<PathFindingRun> {
        self.board.reset_path(sink);
        self.running.store(true, Ordering::Relaxed);
        let run = play(&mut self.board, algorithm, ctx, sink);
        self.running.store(false, Ordering::Relaxed);
        let run = run?;
        log::info!(
            "{}: {} path cells, cost {}, {} processed in {:.2} ms",
            run.algorithm_name,
            run.path_node_count,
            run.path_cost,
            run.processed_node_count,
            run.time_taken
        );
        Ok(run)
    }

    fn generate_maze(
        &mut self,
        play_type: PlayType,
        maze_type: MazeType,
        ctx: &AnimationContext,
        sink: &mut impl PresentationSink,
    ) -> Result<bool> {
        let coords = self.board.generate_maze(maze_type)?;
        log::debug!("{}: {} candidates", maze_type.name(), coords.len());
        self.running.store(true, Ordering::Relaxed);
        let done = self.mazes.fill(&mut self.board, &coords, play_type, ctx, sink);
        self.running.store(false, Ordering::Relaxed);
        Ok(done)
    }
}
