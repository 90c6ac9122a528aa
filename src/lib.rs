//! Terminal maze game: a Sidewinder-carved maze, items to collect against
//! the clock and a bomb that blasts through walls.

pub mod clock;
pub mod config;
pub mod device;
pub mod entities;
pub mod error;
pub mod input;
pub mod maze;
pub mod position;
pub mod session;

pub use clock::{GameClock, ManualTimeSource, Mark, SystemTimeSource, TimeSource};
pub use config::GameConfig;
pub use device::{IoDevice, TerminalDevice};
pub use entities::{CollectibleItem, HazardPickup, Player};
pub use error::{GameError, Result};
pub use input::Command;
pub use maze::{Cell, MazeGrid};
pub use position::{Direction, Position};
pub use session::{GameSession, SessionState};
