#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event::KeyCode;
use crossterm::style::Color;
use maze_game::{IoDevice, ManualTimeSource, Result, TimeSource};

/// Feeds queued keys and records what gets drawn. Every key carries the
/// clock reading at which it arrives; sleeping advances the shared manual
/// clock.
pub struct ScriptedDevice {
    pub keys: VecDeque<(Duration, KeyCode)>,
    pub clock: ManualTimeSource,
    pub clears: usize,
    pub glyphs: Vec<(usize, usize, String, Color)>,
    pub texts: Vec<(usize, String)>,
    pub cursor_hidden: bool,
}

impl ScriptedDevice {
    pub fn new(clock: ManualTimeSource) -> Self {
        Self {
            keys: VecDeque::new(),
            clock,
            clears: 0,
            glyphs: Vec::new(),
            texts: Vec::new(),
            cursor_hidden: false,
        }
    }

    pub fn with_keys(clock: ManualTimeSource, keys: &[KeyCode]) -> Self {
        let mut device = Self::new(clock);
        for key in keys {
            device.push_key(*key);
        }
        device
    }

    /// Queues a key that is already waiting.
    pub fn push_key(&mut self, key: KeyCode) {
        let now = self.clock.elapsed();
        self.keys.push_back((now, key));
    }

    /// Queues a key that shows up once the clock reaches `at`.
    pub fn push_key_at(&mut self, at: Duration, key: KeyCode) {
        self.keys.push_back((at, key));
    }

    pub fn printed(&self, needle: &str) -> bool {
        self.texts.iter().any(|(_, text)| text.contains(needle))
    }
}

impl IoDevice for ScriptedDevice {
    fn clear(&mut self) -> Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn draw_glyph_at(&mut self, row: usize, col: usize, glyph: &str, color: Color) -> Result<()> {
        self.glyphs.push((row, col, glyph.to_string(), color));
        Ok(())
    }

    fn draw_text_at(&mut self, row: usize, _col: usize, text: &str, _color: Color) -> Result<()> {
        self.texts.push((row, text.to_string()));
        Ok(())
    }

    fn read_key_non_blocking(&mut self) -> Result<Option<KeyCode>> {
        match self.keys.front() {
            Some((at, _)) if *at <= self.clock.elapsed() => {
                Ok(self.keys.pop_front().map(|(_, key)| key))
            }
            _ => Ok(None),
        }
    }

    fn sleep(&mut self, duration: Duration) {
        self.clock.advance(duration);
    }

    fn hide_cursor(&mut self, hidden: bool) -> Result<()> {
        self.cursor_hidden = hidden;
        Ok(())
    }
}

/// 10x10 layout: corridor on row 0, a vertical shaft at column 0 and an
/// open pocket around (5, 5) with a wall directly above it.
pub const LAYOUT: [&str; 10] = [
    "..........",
    ".#########",
    ".........#",
    ".#########",
    ".#########",
    "......####",
    ".#########",
    ".#########",
    ".#########",
    ".#########",
];
