//! Crossterm rendering layer for pathviz.
//!
//! [`TerminalRenderer`] is a [`PresentationSink`]: every [`CellEvent`] is
//! drawn immediately as a two-column coloured block. [`poll_input`] turns
//! crossterm events into board gestures in grid coordinates.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};

use pathviz_core::{CellEvent, Modifiers, Point, PresentationSink, PresentationState};

/// Terminal columns used by one grid cell.
pub const CELL_COLUMNS: u16 = 2;

/// Background colour for each presentation state.
pub fn state_color(state: PresentationState) -> Color {
    match state {
        PresentationState::Empty => Color::Rgb { r: 30, g: 10, b: 60 },
        PresentationState::Wall => Color::Rgb { r: 12, g: 53, b: 71 },
        PresentationState::Weight => Color::Rgb { r: 128, g: 64, b: 0 },
        PresentationState::Start => Color::Rgb { r: 255, g: 235, b: 59 },
        PresentationState::End => Color::Rgb { r: 118, g: 255, b: 5 },
        PresentationState::Current => Color::Rgb { r: 255, g: 255, b: 255 },
        PresentationState::Visited => Color::Rgb { r: 0, g: 188, b: 212 },
        PresentationState::VisitedWeight => Color::Rgb { r: 0, g: 120, b: 140 },
        PresentationState::Path => Color::Rgb { r: 255, g: 64, b: 129 },
        PresentationState::PathWeight => Color::Rgb { r: 190, g: 30, b: 90 },
    }
}

/// Maps crossterm modifiers to board [`Modifiers`]: shift toggles weights,
/// control places the start and alt places the end.
fn to_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut m = Modifiers::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | Modifiers::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | Modifiers::SET_START;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | Modifiers::SET_END;
    }
    m
}

/// Terminal position of the top-left column of grid cell `p`.
pub fn to_screen(origin: Point, p: Point) -> (u16, u16) {
    let x = origin.x + p.x * CELL_COLUMNS as i32;
    let y = origin.y + p.y;
    (x.max(0) as u16, y.max(0) as u16)
}

/// Grid cell under terminal position `(column, row)`, if any.
pub fn to_grid(origin: Point, column: u16, row: u16) -> Option<Point> {
    let x = column as i32 - origin.x;
    let y = row as i32 - origin.y;
    if x < 0 || y < 0 {
        return None;
    }
    Some(Point::new(x / CELL_COLUMNS as i32, y))
}

/// Board dimensions that fit a `columns` x `rows` terminal below and right
/// of `origin`.
pub fn grid_size(origin: Point, columns: u16, rows: u16) -> (i32, i32) {
    let w = (columns as i32 - origin.x).max(0) / CELL_COLUMNS as i32;
    let h = (rows as i32 - origin.y).max(0);
    (w, h)
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Draws presentation events to a terminal.
///
/// Write errors cannot surface through [`PresentationSink::present`]; the
/// first one is kept and later events are dropped until it is taken with
/// [`take_error`](Self::take_error).
pub struct TerminalRenderer<W: Write> {
    out: W,
    origin: Point,
    mouse_enabled: bool,
    error: Option<io::Error>,
}

impl TerminalRenderer<io::Stdout> {
    /// Renderer writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            origin: Point::new(0, 1),
            mouse_enabled: true,
            error: None,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Terminal offset of grid cell (0, 0). Row 0 is left for the status
    /// line by default.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Enter raw mode and the alternate screen.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(self.out, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    /// Restore the terminal. Errors are ignored so this is safe to call on
    /// every exit path.
    pub fn close(&mut self) {
        if self.mouse_enabled {
            let _ = execute!(self.out, event::DisableMouseCapture);
        }
        let _ = execute!(self.out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }

    /// Draw one event.
    pub fn draw(&mut self, event: CellEvent) -> io::Result<()> {
        let (x, y) = to_screen(self.origin, event.key.point());
        queue!(
            self.out,
            cursor::MoveTo(x, y),
            SetBackgroundColor(state_color(event.state)),
            Print("  "),
            ResetColor
        )?;
        self.out.flush()
    }

    /// Blank the whole screen.
    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.out, ResetColor, terminal::Clear(ClearType::All))
    }

    /// Replace the status line above the grid.
    pub fn status(&mut self, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            Print(text)
        )?;
        self.out.flush()
    }

    /// The first write error since the last call, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PresentationSink for TerminalRenderer<W> {
    fn present(&mut self, event: CellEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.draw(event) {
            self.error = Some(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A terminal gesture in grid terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// `q` or `Esc`.
    Quit,
    Key(char),
    Press { pos: Point, modifiers: Modifiers },
    Drag { pos: Point, modifiers: Modifiers },
    Release,
    Resize { width: u16, height: u16 },
}

/// Wait up to `timeout` for the next gesture.
pub fn poll_input(origin: Point, timeout: Duration) -> io::Result<Option<Input>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(match event::read()? {
        Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => match code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Input::Quit),
            KeyCode::Char(c) => Some(Input::Key(c)),
            _ => None,
        },
        Event::Mouse(me) => {
            let modifiers = to_modifiers(me.modifiers);
            let cell = to_grid(origin, me.column, me.row);
            match (me.kind, cell) {
                (MouseEventKind::Down(MouseButton::Left), Some(pos)) => {
                    Some(Input::Press { pos, modifiers })
                }
                (MouseEventKind::Drag(MouseButton::Left), Some(pos)) => {
                    Some(Input::Drag { pos, modifiers })
                }
                (MouseEventKind::Up(_), _) => Some(Input::Release),
                _ => None,
            }
        }
        Event::Resize(width, height) => Some(Input::Resize { width, height }),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::NodeKey;

    #[test]
    fn screen_and_grid_coordinates_agree() {
        let origin = Point::new(0, 1);
        for p in [Point::new(0, 0), Point::new(3, 2), Point::new(10, 7)] {
            let (x, y) = to_screen(origin, p);
            assert_eq!(to_grid(origin, x, y), Some(p));
            assert_eq!(to_grid(origin, x + 1, y), Some(p));
        }
        assert_eq!(to_grid(origin, 4, 0), None);
    }

    #[test]
    fn grid_size_leaves_room_for_the_status_line() {
        let origin = Point::new(0, 1);
        assert_eq!(grid_size(origin, 80, 24), (40, 23));
        assert_eq!(grid_size(origin, 81, 2), (40, 1));
        assert_eq!(grid_size(origin, 1, 0), (0, 0));
        let (w, h) = grid_size(origin, 80, 24);
        let (x, y) = to_screen(origin, Point::new(w - 1, h - 1));
        assert!(x + CELL_COLUMNS <= 80 && y < 24);
    }

    #[test]
    fn modifier_mapping() {
        assert_eq!(to_modifiers(KeyModifiers::NONE), Modifiers::NONE);
        assert_eq!(to_modifiers(KeyModifiers::SHIFT), Modifiers::SHIFT);
        let m = to_modifiers(KeyModifiers::CONTROL | KeyModifiers::ALT);
        assert!(m.contains(Modifiers::SET_START | Modifiers::SET_END));
    }

    #[test]
    fn states_have_distinct_colors() {
        use PresentationState::*;
        let all = [
            Empty, Wall, Weight, Start, End, Current, Visited, VisitedWeight, Path, PathWeight,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(state_color(*a), state_color(*b), "{a:?} / {b:?}");
            }
        }
    }

    #[test]
    fn draw_writes_to_the_cell_position() {
        let mut r = TerminalRenderer::new(Vec::new()).with_origin(Point::new(0, 1));
        r.present(CellEvent::new(NodeKey::new(2, 3), PresentationState::Wall));
        assert!(r.take_error().is_none());
        let out = String::from_utf8_lossy(&r.into_inner()).into_owned();
        // MoveTo is 1-based: row 4 col 5.
        assert!(out.contains("\x1b[5;5H"), "{out:?}");
        assert!(out.contains("  "));
    }
}
