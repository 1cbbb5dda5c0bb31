//! Terminal pathfinding visualizer.
//!
//! Usage: `pathviz [config.json]`
//!
//! Click to edit the board (shift: weight, ctrl: start, alt: end), drag to
//! paint. Keys: `1`-`7` pick an algorithm, `f`/space run it, `m` maze,
//! `r` random walls, `w` random weights, `s` cycle the click selection,
//! `p` clear the path, `c` clear the board, `h` restore the latest run,
//! `+`/`-` change speed, `q`/`Esc` cancel a run or quit.

use std::io::Stdout;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use pathviz_core::{Algorithm, AnimationContext, AnimationSpeed, MazeType, Point};
use pathviz_crossterm::{Input, TerminalRenderer, grid_size, poll_input};
use visualizer::{
    BoardMsg, FileStorage, PlayType, Selection, Universe, Visualizer, VisualizerConfig,
};

type App = Visualizer<Universe, FileStorage>;

const POLL: Duration = Duration::from_millis(20);

/// One preset faster or slower than `ms`.
fn shift_speed(ms: u64, faster: bool) -> u64 {
    let presets = AnimationSpeed::ALL;
    let i = presets
        .iter()
        .position(|s| s.millis() == ms)
        .unwrap_or(2);
    let j = if faster {
        (i + 1).min(presets.len() - 1)
    } else {
        i.saturating_sub(1)
    };
    presets[j].millis()
}

fn next_selection(s: Selection) -> Selection {
    match s {
        Selection::Wall => Selection::Weight,
        Selection::Weight => Selection::Start,
        Selection::Start => Selection::End,
        Selection::End => Selection::Wall,
    }
}

/// Run `f` while a second thread watches the keyboard: `q`/`Esc` cancel
/// `ctx`, `+`/`-` change its speed.
fn with_cancel_keys<T>(origin: Point, ctx: &AnimationContext, f: impl FnOnce() -> T) -> T {
    let done = AtomicBool::new(false);
    thread::scope(|s| {
        s.spawn(|| {
            while !done.load(Ordering::Relaxed) {
                match poll_input(origin, POLL) {
                    Ok(Some(Input::Quit)) => ctx.cancel(),
                    Ok(Some(Input::Key('+'))) => ctx.set_speed(shift_speed(ctx.speed(), true)),
                    Ok(Some(Input::Key('-'))) => ctx.set_speed(shift_speed(ctx.speed(), false)),
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
        });
        let out = f();
        done.store(true, Ordering::Relaxed);
        out
    })
}

struct Session {
    app: App,
    renderer: TerminalRenderer<Stdout>,
    algorithm: Algorithm,
    speed: u64,
    message: String,
}

impl Session {
    fn status(&mut self) -> std::io::Result<()> {
        let text = format!(
            " {} | click: {:?} | {} ms/step | {}",
            self.algorithm,
            self.app.selection(),
            self.speed,
            self.message
        );
        self.renderer.status(&text)
    }

    fn context(&self) -> AnimationContext {
        AnimationContext::new(self.speed)
    }

    fn send(&mut self, msg: BoardMsg) -> visualizer::Result<()> {
        let origin = self.renderer.origin();
        let ctx = match &msg {
            BoardMsg::FindPath { context, .. } | BoardMsg::GenerateMaze { context, .. } => {
                Some(context.clone())
            }
            _ => None,
        };
        let (app, renderer) = (&mut self.app, &mut self.renderer);
        match ctx {
            Some(ctx) => with_cancel_keys(origin, &ctx, || app.update(msg, renderer))?,
            None => app.update(msg, renderer)?,
        }
        if let Some(e) = self.renderer.take_error() {
            return Err(e.into());
        }
        Ok(())
    }

    fn maze(&mut self, play_type: PlayType, maze_type: MazeType) -> visualizer::Result<()> {
        let context = self.context();
        self.send(BoardMsg::GenerateMaze {
            play_type,
            maze_type,
            context,
        })?;
        self.message = format!("{} maze", maze_type.name());
        Ok(())
    }

    fn find_path(&mut self) -> visualizer::Result<()> {
        let notices = self.app.subscribe();
        let context = self.context();
        self.send(BoardMsg::FindPath {
            algorithm: self.algorithm,
            context,
        })?;
        if let Ok(visualizer::RunNotice::Run(run)) = notices.try_recv() {
            self.message = format!(
                "{} cells, cost {}, {} processed",
                run.path_node_count, run.path_cost, run.processed_node_count
            );
        }
        Ok(())
    }

    /// Fit the board to a terminal of `columns` x `rows`.
    fn resize(&mut self, columns: u16, rows: u16) -> visualizer::Result<()> {
        let (width, height) = grid_size(self.renderer.origin(), columns, rows);
        if width < 1 || height < 1 {
            return Ok(());
        }
        self.renderer.clear()?;
        self.send(BoardMsg::Resize { width, height })?;
        self.message = format!("{width}x{height} board");
        Ok(())
    }

    /// Handle one input. Returns false to quit.
    fn handle(&mut self, input: Input) -> visualizer::Result<bool> {
        match input {
            Input::Quit => return Ok(false),
            Input::Key(c @ '1'..='7') => {
                let i = c as usize - '1' as usize;
                self.algorithm = Algorithm::ALL[i];
            }
            Input::Key('f' | ' ') => self.find_path()?,
            Input::Key('m') => self.maze(PlayType::Wall, MazeType::RecursiveDivision)?,
            Input::Key('r') => self.maze(PlayType::Wall, MazeType::Random25)?,
            Input::Key('w') => self.maze(PlayType::Weight, MazeType::Random25)?,
            Input::Key('s') => {
                let next = next_selection(self.app.selection());
                self.send(BoardMsg::SelectionChange(next))?;
            }
            Input::Key('p') => self.send(BoardMsg::ResetPath)?,
            Input::Key('c') => self.send(BoardMsg::ResetBoard)?,
            Input::Key('h') => {
                if let Some(run) = self.app.history().latest().cloned() {
                    self.message = format!("restored {} run", run.algorithm_name);
                    self.send(BoardMsg::RestoreRunHistory(Box::new(run)))?;
                }
            }
            Input::Key('+') => self.speed = shift_speed(self.speed, true),
            Input::Key('-') => self.speed = shift_speed(self.speed, false),
            Input::Press { pos, modifiers } => {
                self.send(BoardMsg::Click { pos, modifiers })?;
            }
            Input::Drag { pos, modifiers } => self.send(BoardMsg::Hover {
                pos,
                primary_held: true,
                modifiers,
            })?,
            Input::Resize { width, height } => self.resize(width, height)?,
            Input::Key(_) | Input::Release => {}
        }
        Ok(true)
    }

    fn run(&mut self) -> visualizer::Result<()> {
        self.renderer.init()?;
        self.app.redraw(&mut self.renderer);
        loop {
            self.status()?;
            let Some(input) = poll_input(self.renderer.origin(), POLL)? else {
                continue;
            };
            if !self.handle(input)? {
                return Ok(());
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = VisualizerConfig::load(path.as_deref())?;
    let speed = config.speed.millis();

    let mut session = Session {
        app: Visualizer::from_config(config),
        renderer: TerminalRenderer::stdout(),
        algorithm: Algorithm::Dijkstra,
        speed,
        message: String::new(),
    };
    let result = session.run();
    session.renderer.close();
    result?;

    if let Some(run) = session.app.history().latest() {
        println!(
            "last run: {} | {} path cells | cost {} | {} processed | {:.2} ms",
            run.algorithm_name,
            run.path_node_count,
            run.path_cost,
            run.processed_node_count,
            run.time_taken
        );
    }
    Ok(())
}
