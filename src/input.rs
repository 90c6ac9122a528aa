use crossterm::event::KeyCode;

use crate::position::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Collect,
    UseHazardTool,
    Quit,
}

impl Command {
    /// Maps a raw key to a game command. Letters are case-insensitive.
    pub fn from_key(key: KeyCode) -> Option<Command> {
        match key {
            KeyCode::Up => Some(Command::Move(Direction::Up)),
            KeyCode::Down => Some(Command::Move(Direction::Down)),
            KeyCode::Left => Some(Command::Move(Direction::Left)),
            KeyCode::Right => Some(Command::Move(Direction::Right)),
            KeyCode::Enter => Some(Command::Collect),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Command::Move(Direction::Up)),
                'a' => Some(Command::Move(Direction::Left)),
                's' => Some(Command::Move(Direction::Down)),
                'd' => Some(Command::Move(Direction::Right)),
                ' ' => Some(Command::Collect),
                'b' => Some(Command::UseHazardTool),
                'q' => Some(Command::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}

pub const KEY_HELP: &str = "wasd/arrows: move  enter/space: collect  b: bomb  q: quit";
