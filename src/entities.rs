use crossterm::style::Color;

use crate::device::IoDevice;
use crate::error::Result;
use crate::position::Position;

pub const ITEM_COLORS: [Color; 5] = [
    Color::Green,
    Color::Cyan,
    Color::Magenta,
    Color::Red,
    Color::White,
];

fn draw_at<D: IoDevice>(device: &mut D, pos: Position, glyph: &str, color: Color) -> Result<()> {
    if pos.row < 0 || pos.col < 0 {
        return Ok(());
    }
    device.draw_glyph_at(pos.row as usize, pos.col as usize, glyph, color)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    position: Position,
    has_hazard_tool: bool,
}

impl Player {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            has_hazard_tool: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves without any checks; callers validate against the maze first.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn has_hazard_tool(&self) -> bool {
        self.has_hazard_tool
    }

    pub fn set_hazard_tool(&mut self, held: bool) {
        self.has_hazard_tool = held;
    }

    pub fn glyph(&self) -> (&'static str, Color) {
        ("A", Color::Yellow)
    }

    pub fn render<D: IoDevice>(&self, device: &mut D) -> Result<()> {
        let (glyph, color) = self.glyph();
        draw_at(device, self.position, glyph, color)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectibleItem {
    pub position: Position,
    pub color: Color,
}

impl CollectibleItem {
    pub fn new(position: Position, color: Color) -> Self {
        Self { position, color }
    }

    pub fn glyph(&self) -> (&'static str, Color) {
        ("◆", self.color)
    }

    pub fn render<D: IoDevice>(&self, device: &mut D) -> Result<()> {
        let (glyph, color) = self.glyph();
        draw_at(device, self.position, glyph, color)
    }
}

/// The bomb. While held it parks at a sentinel one row below the maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HazardPickup {
    position: Position,
    color: Color,
    sentinel: Position,
}

impl HazardPickup {
    pub fn new(position: Position, dim: usize) -> Self {
        Self {
            position,
            color: Color::Red,
            sentinel: Self::held_sentinel(dim),
        }
    }

    pub fn held_sentinel(dim: usize) -> Position {
        Position::new(dim as i32, dim as i32 - 1)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_held(&self) -> bool {
        self.position == self.sentinel
    }

    pub fn hold(&mut self) {
        self.position = self.sentinel;
    }

    pub fn respawn(&mut self, position: Position) {
        self.position = position;
    }

    pub fn glyph(&self) -> (&'static str, Color) {
        if self.is_held() {
            ("B", Color::DarkGrey)
        } else {
            ("B", self.color)
        }
    }

    pub fn render<D: IoDevice>(&self, device: &mut D) -> Result<()> {
        let (glyph, color) = self.glyph();
        draw_at(device, self.position, glyph, color)
    }
}
