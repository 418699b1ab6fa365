//! Crossterm terminal front-end for stepmaze.
//!
//! Provides a [`TerminalView`] that draws a [`Grid`] as two-column colored
//! blocks and turns terminal events into [`Input`] values.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use stepmaze_core::{CellState, Grid, Point};

/// Terminal columns per grid cell.
pub const CELL_COLUMNS: u16 = 2;

/// A user action decoded from a terminal event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Left click on a grid cell (the point may be outside the grid).
    Select(Point),
    /// Carve a new maze.
    Regenerate,
    /// Clear the search and pick new endpoints.
    Reset,
    /// Switch between Dijkstra and A* for the next search.
    ToggleAStar,
    Quit,
}

const START: Color = Color::Rgb { r: 255, g: 100, b: 0 };
const GOAL: Color = Color::Rgb { r: 255, g: 255, b: 0 };

/// Fill color for a cell in `state`.
pub fn state_color(state: CellState) -> Color {
    match state {
        CellState::Undiscovered => Color::Rgb { r: 50, g: 50, b: 50 },
        CellState::Discovered => Color::Rgb { r: 255, g: 0, b: 0 },
        CellState::Visited => Color::Rgb { r: 0, g: 255, b: 0 },
        CellState::Path => Color::Rgb { r: 0, g: 0, b: 255 },
        CellState::Blocked => Color::Rgb { r: 180, g: 130, b: 80 },
    }
}

/// Maps a key press to an [`Input`].
fn key_input(code: KeyCode, modifiers: KeyModifiers) -> Option<Input> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char('g') => Some(Input::Regenerate),
        KeyCode::Char('r') => Some(Input::Reset),
        KeyCode::Char('a') => Some(Input::ToggleAStar),
        _ => None,
    }
}

/// Grid point under terminal cell (`column`, `row`).
pub fn screen_to_grid(column: u16, row: u16) -> Point {
    Point::new((column / CELL_COLUMNS) as i32, row as i32)
}

/// Maps a crossterm [`Event`] to an [`Input`].
pub fn to_input(ev: &Event) -> Option<Input> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => key_input(*code, *modifiers),
        Event::Mouse(me) => match me.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(Input::Select(screen_to_grid(me.column, me.row)))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Raw-mode, alternate-screen terminal view.
pub struct TerminalView {
    active: bool,
}

impl TerminalView {
    /// Create a new view. The terminal is untouched until [`init`](Self::init).
    pub fn new() -> Self {
        Self { active: false }
    }

    /// Enter raw mode and the alternate screen, capturing the mouse.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        self.active = true;
        Ok(())
    }

    /// Wait up to `timeout` for events and decode all that are pending.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Vec<Input>> {
        let mut inputs = Vec::new();
        if !event::poll(timeout)? {
            return Ok(inputs);
        }
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            if matches!(ev, Event::Resize(..)) {
                execute!(io::stdout(), terminal::Clear(ClearType::All))?;
            }
            inputs.extend(to_input(&ev));
        }
        Ok(inputs)
    }

    /// Draw the whole grid with endpoint overlays, then `status` below it.
    pub fn draw(
        &mut self,
        grid: &Grid,
        start: Option<Point>,
        goal: Option<Point>,
        status: &str,
    ) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        let block = " ".repeat(CELL_COLUMNS as usize);

        for y in 0..grid.height() {
            queue!(stdout, cursor::MoveTo(0, y as u16))?;
            for x in 0..grid.width() {
                let p = Point::new(x, y);
                let color = if Some(p) == start {
                    START
                } else if Some(p) == goal {
                    GOAL
                } else {
                    grid.state_at(p).map_or(Color::Reset, state_color)
                };
                queue!(stdout, SetBackgroundColor(color), Print(&block))?;
            }
        }

        queue!(
            stdout,
            ResetColor,
            cursor::MoveTo(0, grid.height() as u16),
            terminal::Clear(ClearType::UntilNewLine),
            SetForegroundColor(Color::Grey),
            Print(status),
            ResetColor
        )?;
        stdout.flush()
    }

    /// Leave the alternate screen and restore the terminal. Idempotent.
    pub fn close(&mut self) {
        if !self.active {
            return;
        }
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        self.active = false;
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalView {
    fn drop(&mut self) {
        self.close();
    }
}
