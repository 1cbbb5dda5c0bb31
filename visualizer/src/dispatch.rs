//! Maps pointer gestures and the active selection to board mutations.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pathviz_core::{GridService, Modifiers, Point, PresentationSink};

use crate::board::Board;

/// What a plain click does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Wall,
    Weight,
    Start,
    End,
}

/// Applies selections to the board.
///
/// Clicks and hover painting are ignored while the shared running flag is
/// set.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    selection: Selection,
    running: Arc<AtomicBool>,
}

impl Dispatcher {
    pub fn new(running: Arc<AtomicBool>) -> Self {
        Self {
            selection: Selection::default(),
            running,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Handle a click on `p`. Shift toggles a weight; the set-start and
    /// set-end modifiers place an endpoint; otherwise the active selection
    /// applies.
    pub fn click<G: GridService>(
        &self,
        board: &mut Board<G>,
        p: Point,
        modifiers: Modifiers,
        sink: &mut impl PresentationSink,
    ) {
        if self.is_running() || !board.has_cell(p) {
            return;
        }
        let selection = if modifiers.contains(Modifiers::SHIFT) {
            Selection::Weight
        } else if modifiers.contains(Modifiers::SET_START) {
            Selection::Start
        } else if modifiers.contains(Modifiers::SET_END) {
            Selection::End
        } else {
            self.selection
        };
        apply(board, selection, p, sink);
    }

    /// Handle the pointer entering `p`. Paints only while the primary button
    /// is held, only for the wall and weight selections, and never over an
    /// endpoint. Painting sets rather than toggles.
    pub fn hover<G: GridService>(
        &self,
        board: &mut Board<G>,
        p: Point,
        primary_held: bool,
        modifiers: Modifiers,
        sink: &mut impl PresentationSink,
    ) {
        if !primary_held
            || self.is_running()
            || !matches!(self.selection, Selection::Wall | Selection::Weight)
            || !board.has_cell(p)
            || board.is_endpoint(p)
        {
            return;
        }
        if modifiers.contains(Modifiers::SHIFT) || self.selection == Selection::Weight {
            board.set_weighted(p, None, sink);
        } else if board.cell(p).passable {
            board.set_wall(p, sink);
        }
    }
}

/// Apply `selection` to `p`.
///
/// Wall and weight toggle and skip endpoints; start and end move the
/// endpoint unless `p` holds the other one.
pub fn apply<G: GridService>(
    board: &mut Board<G>,
    selection: Selection,
    p: Point,
    sink: &mut impl PresentationSink,
) {
    match selection {
        Selection::Wall => {
            if board.is_endpoint(p) {
                return;
            }
            if board.cell(p).passable {
                board.set_wall(p, sink);
            } else {
                board.set_default(p, sink);
            }
        }
        Selection::Weight => {
            if board.is_endpoint(p) {
                return;
            }
            if board.cell(p).weight > 0 {
                board.set_default(p, sink);
            } else {
                board.set_weighted(p, None, sink);
            }
        }
        Selection::Start => {
            if p != board.end() {
                board.move_start(p, sink);
            }
        }
        Selection::End => {
            if p != board.start() {
                board.move_end(p, sink);
            }
        }
    }
}
