//! Terminal I/O boundary.
//!
//! The game core only talks to an [`IoDevice`]; [`TerminalDevice`] is the
//! crossterm-backed implementation used by the binary.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::error::{GameError, Result};

/// Terminal columns taken by one maze cell.
pub const CELL_W: usize = 2;

/// Rows drawn below the maze: hazard sentinel, status line, key help.
pub const HUD_ROWS: usize = 3;

pub trait IoDevice {
    fn clear(&mut self) -> Result<()>;

    /// Draws one maze cell at grid coordinates.
    fn draw_glyph_at(&mut self, row: usize, col: usize, glyph: &str, color: Color) -> Result<()>;

    /// Draws free text starting at a grid row, `col` measured in cells.
    fn draw_text_at(&mut self, row: usize, col: usize, text: &str, color: Color) -> Result<()>;

    fn read_key_non_blocking(&mut self) -> Result<Option<KeyCode>>;

    /// Waits up to `timeout` for a key and returns as soon as one arrives.
    fn read_key_timeout(&mut self, timeout: Duration) -> Result<Option<KeyCode>> {
        if let Some(key) = self.read_key_non_blocking()? {
            return Ok(Some(key));
        }
        self.sleep(timeout);
        self.read_key_non_blocking()
    }

    /// Drops every key that is already waiting.
    fn discard_pending_keys(&mut self) -> Result<()> {
        while self.read_key_non_blocking()?.is_some() {}
        Ok(())
    }

    fn sleep(&mut self, duration: Duration);

    fn hide_cursor(&mut self, hidden: bool) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Key presses and auto-repeats count as input; releases do not.
pub fn key_from_event(event: Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) => match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => Some(key.code),
            KeyEventKind::Release => None,
        },
        _ => None,
    }
}

pub struct TerminalDevice<W: Write> {
    out: W,
}

impl<W: Write> TerminalDevice<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Checks the terminal can hold a `dim × dim` maze plus the HUD rows.
    pub fn ensure_fits(&self, dim: usize) -> Result<()> {
        let need_cols = (dim * CELL_W) as u16;
        let need_rows = (dim + HUD_ROWS) as u16;
        let (cols, rows) = terminal::size()?;
        if cols < need_cols || rows < need_rows {
            return Err(GameError::TerminalTooSmall {
                need_cols,
                need_rows,
                cols,
                rows,
            });
        }
        Ok(())
    }
}

impl<W: Write> IoDevice for TerminalDevice<W> {
    fn clear(&mut self) -> Result<()> {
        self.out.queue(Clear(ClearType::All))?;
        self.out.queue(MoveTo(0, 0))?;
        Ok(())
    }

    fn draw_glyph_at(&mut self, row: usize, col: usize, glyph: &str, color: Color) -> Result<()> {
        self.out.queue(MoveTo((col * CELL_W) as u16, row as u16))?;
        self.out.queue(SetForegroundColor(color))?;
        self.out.queue(Print(glyph))?;
        let w = UnicodeWidthStr::width(glyph);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                self.out.queue(Print(' '))?;
            }
        }
        self.out.queue(ResetColor)?;
        Ok(())
    }

    fn draw_text_at(&mut self, row: usize, col: usize, text: &str, color: Color) -> Result<()> {
        self.out.queue(MoveTo((col * CELL_W) as u16, row as u16))?;
        self.out.queue(SetForegroundColor(color))?;
        self.out.queue(Clear(ClearType::UntilNewLine))?;
        self.out.queue(Print(text))?;
        self.out.queue(ResetColor)?;
        Ok(())
    }

    fn read_key_non_blocking(&mut self) -> Result<Option<KeyCode>> {
        while event::poll(Duration::ZERO)? {
            if let Some(code) = key_from_event(event::read()?) {
                return Ok(Some(code));
            }
        }
        Ok(None)
    }

    fn read_key_timeout(&mut self, timeout: Duration) -> Result<Option<KeyCode>> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(None);
            }
            if let Some(code) = key_from_event(event::read()?) {
                return Ok(Some(code));
            }
        }
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }

    fn hide_cursor(&mut self, hidden: bool) -> Result<()> {
        if hidden {
            self.out.queue(Hide)?;
        } else {
            self.out.queue(Show)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(GameError::from)
    }
}

impl TerminalDevice<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}
