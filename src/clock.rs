//! Session timers.
//!
//! [`GameClock`] measures elapsed time against three marks. The time source
//! is injected so tests can drive it by hand.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub trait TimeSource {
    /// Monotonic time since the source was created.
    fn elapsed(&self) -> Duration;
}

#[derive(Clone, Debug)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven time. Clones share the same reading.
#[derive(Clone, Debug, Default)]
pub struct ManualTimeSource {
    now: Rc<Cell<Duration>>,
}

impl ManualTimeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl TimeSource for ManualTimeSource {
    fn elapsed(&self) -> Duration {
        self.now.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    SessionStart,
    HazardPickup,
    LastRender,
}

impl Mark {
    fn slot(self) -> usize {
        match self {
            Mark::SessionStart => 0,
            Mark::HazardPickup => 1,
            Mark::LastRender => 2,
        }
    }
}

pub struct GameClock<T: TimeSource> {
    source: T,
    marks: [Duration; 3],
}

impl<T: TimeSource> GameClock<T> {
    /// All marks start at the current reading.
    pub fn new(source: T) -> Self {
        let now = source.elapsed();
        Self {
            source,
            marks: [now; 3],
        }
    }

    pub fn now(&self) -> Duration {
        self.source.elapsed()
    }

    pub fn set_mark(&mut self, mark: Mark) {
        self.marks[mark.slot()] = self.now();
    }

    pub fn since(&self, mark: Mark) -> Duration {
        self.now().saturating_sub(self.marks[mark.slot()])
    }

    pub fn seconds_since(&self, mark: Mark) -> u64 {
        self.since(mark).as_secs()
    }

    pub fn minutes_since(&self, mark: Mark) -> u64 {
        self.since(mark).as_secs() / 60
    }
}
