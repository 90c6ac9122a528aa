//! The game loop and its state machine.
//!
//! A [`GameSession`] owns the maze, every entity, the clock and the RNG for
//! one play-through. Each [`GameSession::tick`] checks the time limit, polls
//! one key, applies it, handles the bomb respawn timer and redraws only when
//! something visible changed or the remaining-time display is a minute old.

use std::time::Duration;

use crossterm::style::Color;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::clock::{GameClock, Mark, TimeSource};
use crate::device::IoDevice;
use crate::entities::{CollectibleItem, HazardPickup, Player, ITEM_COLORS};
use crate::error::Result;
use crate::input::{Command, KEY_HELP};
use crate::maze::MazeGrid;
use crate::position::Position;

pub const ENTRANCE: Position = Position::new(0, 0);
pub const HAZARD_RESPAWN_SECS: u64 = 5;
pub const RENDER_REFRESH_MINUTES: u64 = 1;

pub const WIN_MESSAGE: &str = "Every item collected. You win!";
pub const LOSE_MESSAGE: &str = "Time is up. You lose!";
pub const EXIT_MESSAGE: &str = "You left the maze.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Won,
    Lost,
    Exited,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        self != SessionState::Running
    }

    pub fn summary(self) -> Option<&'static str> {
        match self {
            SessionState::Running => None,
            SessionState::Won => Some(WIN_MESSAGE),
            SessionState::Lost => Some(LOSE_MESSAGE),
            SessionState::Exited => Some(EXIT_MESSAGE),
        }
    }

    fn color(self) -> Color {
        match self {
            SessionState::Won => Color::Green,
            SessionState::Lost => Color::Red,
            _ => Color::White,
        }
    }
}

/// Whole minutes allowed for a session with `item_count` items.
pub fn time_limit_minutes(item_count: usize) -> u64 {
    ((item_count / 10) as u64).max(1)
}

pub struct GameSession<T: TimeSource> {
    maze: MazeGrid,
    player: Player,
    items: Vec<CollectibleItem>,
    hazard: HazardPickup,
    clock: GameClock<T>,
    rng: StdRng,
    state: SessionState,
    time_limit: u64,
    render_dirty: bool,
}

impl<T: TimeSource> GameSession<T> {
    /// Generates a maze of `dim × dim`, scatters `dim` items over it and
    /// drops the bomb somewhere on the exit corridor.
    pub fn new(dim: usize, mut rng: StdRng, source: T) -> Self {
        let mut maze = MazeGrid::new(dim);
        maze.generate(&mut rng);

        let free = maze.free_cells();
        let spots: Vec<Position> = free.choose_multiple(&mut rng, dim).copied().collect();
        let items: Vec<CollectibleItem> = spots
            .into_iter()
            .map(|pos| {
                let color = ITEM_COLORS.choose(&mut rng).copied().unwrap_or(Color::Green);
                CollectibleItem::new(pos, color)
            })
            .collect();
        log::info!("spawned {} items in a {}x{} maze", items.len(), dim, dim);

        let hazard = HazardPickup::new(random_corridor_cell(&maze, &mut rng), dim);
        Self::from_parts(maze, Player::new(ENTRANCE), items, hazard, rng, source)
    }

    pub fn from_parts(
        maze: MazeGrid,
        player: Player,
        items: Vec<CollectibleItem>,
        hazard: HazardPickup,
        rng: StdRng,
        source: T,
    ) -> Self {
        let time_limit = time_limit_minutes(items.len());
        Self {
            maze,
            player,
            items,
            hazard,
            clock: GameClock::new(source),
            rng,
            state: SessionState::Running,
            time_limit,
            render_dirty: true,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn maze(&self) -> &MazeGrid {
        &self.maze
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn items(&self) -> &[CollectibleItem] {
        &self.items
    }

    pub fn hazard(&self) -> &HazardPickup {
        &self.hazard
    }

    pub fn time_limit_minutes(&self) -> u64 {
        self.time_limit
    }

    pub fn remaining_minutes(&self) -> u64 {
        self.time_limit
            .saturating_sub(self.clock.minutes_since(Mark::SessionStart))
    }

    pub fn is_render_dirty(&self) -> bool {
        self.render_dirty
    }

    /// Ticks until the session ends, then shows the summary for the final
    /// state. Each tick waits at most `tick` for a key and moves on as soon
    /// as one arrives, so held keys never pile up behind the loop.
    pub fn run<D: IoDevice>(&mut self, device: &mut D, tick: Duration) -> Result<SessionState> {
        while !self.step(device, Some(tick))?.is_terminal() {}
        self.emit_summary(device)?;
        Ok(self.state)
    }

    /// One iteration with a non-blocking key read.
    pub fn tick<D: IoDevice>(&mut self, device: &mut D) -> Result<SessionState> {
        self.step(device, None)
    }

    fn step<D: IoDevice>(
        &mut self,
        device: &mut D,
        wait: Option<Duration>,
    ) -> Result<SessionState> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }

        if self.clock.minutes_since(Mark::SessionStart) >= self.time_limit {
            self.transition(SessionState::Lost);
            return Ok(self.state);
        }

        if self.clock.minutes_since(Mark::LastRender) >= RENDER_REFRESH_MINUTES {
            self.render_dirty = true;
        }

        let key = match wait {
            Some(timeout) => device.read_key_timeout(timeout)?,
            None => device.read_key_non_blocking()?,
        };
        if let Some(command) = key.and_then(Command::from_key) {
            self.apply(command);
        }
        if self.state == SessionState::Running && self.items.is_empty() {
            self.transition(SessionState::Won);
        }

        self.update_hazard();

        if self.render_dirty {
            self.render(device)?;
        }
        Ok(self.state)
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Move(dir) => {
                let target = self.player.position().step(dir);
                if self.maze.is_position_available(target) {
                    self.player.set_position(target);
                    self.render_dirty = true;
                }
            }
            Command::Collect => self.collect(),
            Command::UseHazardTool => {
                if self.player.has_hazard_tool() {
                    let pos = self.player.position();
                    self.maze.create_hole(pos);
                    self.player.set_hazard_tool(false);
                    self.render_dirty = true;
                    log::debug!("bomb detonated at {:?}", pos);
                }
            }
            Command::Quit => self.transition(SessionState::Exited),
        }
    }

    pub fn render<D: IoDevice>(&mut self, device: &mut D) -> Result<()> {
        let dim = self.maze.dim();
        device.clear()?;
        self.maze.render(device)?;
        for item in &self.items {
            item.render(device)?;
        }
        self.hazard.render(device)?;
        self.player.render(device)?;

        let mut status = format!(
            "Time left: {} min  Items left: {}",
            self.remaining_minutes(),
            self.items.len()
        );
        if self.player.has_hazard_tool() {
            status.push_str("  Bomb ready");
        }
        device.draw_text_at(dim + 1, 0, &status, Color::White)?;
        device.draw_text_at(dim + 2, 0, KEY_HELP, Color::DarkGrey)?;
        device.flush()?;

        self.render_dirty = false;
        self.clock.set_mark(Mark::LastRender);
        Ok(())
    }

    pub fn emit_summary<D: IoDevice>(&self, device: &mut D) -> Result<()> {
        if let Some(message) = self.state.summary() {
            device.draw_text_at(self.maze.dim() + 1, 0, message, self.state.color())?;
            device.flush()?;
        }
        Ok(())
    }

    fn collect(&mut self) {
        let pos = self.player.position();
        let before = self.items.len();
        self.items.retain(|item| item.position != pos);
        let mut changed = self.items.len() != before;

        if !self.hazard.is_held() && self.hazard.position() == pos {
            self.player.set_hazard_tool(true);
            self.hazard.hold();
            self.clock.set_mark(Mark::HazardPickup);
            changed = true;
            log::debug!("bomb picked up at {:?}", pos);
        }

        if changed {
            self.render_dirty = true;
        }
    }

    fn update_hazard(&mut self) {
        if !self.hazard.is_held() {
            return;
        }
        if self.clock.seconds_since(Mark::HazardPickup) >= HAZARD_RESPAWN_SECS {
            let pos = random_corridor_cell(&self.maze, &mut self.rng);
            self.hazard.respawn(pos);
            self.render_dirty = true;
            log::debug!("bomb respawned at {:?}", pos);
        }
    }

    fn transition(&mut self, next: SessionState) {
        log::info!("session {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Holds the end screen until the player presses quit. Keys typed before
/// the screen appeared are thrown away first.
pub fn wait_for_quit<D: IoDevice>(device: &mut D, poll: Duration) -> Result<()> {
    device.discard_pending_keys()?;
    loop {
        if let Some(key) = device.read_key_timeout(poll)? {
            if Command::from_key(key) == Some(Command::Quit) {
                return Ok(());
            }
        }
    }
}

fn random_corridor_cell(maze: &MazeGrid, rng: &mut StdRng) -> Position {
    let col = maze.open_columns(0).choose(rng).copied().unwrap_or(0);
    Position::new(0, col)
}
