use std::time::Duration;

pub const MIN_MAZE_SIZE: usize = 10;
pub const MAX_MAZE_SIZE: usize = 30;
pub const DEFAULT_MAZE_SIZE: usize = 25;
pub const DEFAULT_TICK_MS: u64 = 300;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub maze_size: usize,
    pub seed: Option<u64>,
    pub tick: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            maze_size: DEFAULT_MAZE_SIZE,
            seed: None,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

impl GameConfig {
    /// Reads `MAZE_SIZE` (or the first argument), `MAZE_SEED` and
    /// `MAZE_TICK_MS`. Anything unparsable falls back to the default.
    pub fn from_env() -> Self {
        let size_arg = std::env::args()
            .nth(1)
            .or_else(|| std::env::var("MAZE_SIZE").ok());
        let maze_size = match size_arg {
            Some(raw) => parse_maze_size(&raw),
            None => DEFAULT_MAZE_SIZE,
        };
        let seed = std::env::var("MAZE_SEED")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok());
        let tick_ms = std::env::var("MAZE_TICK_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_TICK_MS);
        Self {
            maze_size,
            seed,
            tick: Duration::from_millis(tick_ms),
        }
    }
}

pub fn clamp_maze_size(raw: i64) -> usize {
    raw.clamp(MIN_MAZE_SIZE as i64, MAX_MAZE_SIZE as i64) as usize
}

pub fn parse_maze_size(raw: &str) -> usize {
    match raw.trim().parse::<i64>() {
        Ok(v) => {
            let size = clamp_maze_size(v);
            if size as i64 != v {
                log::info!("maze size {} clamped to {}", v, size);
            }
            size
        }
        Err(_) => {
            log::warn!("unreadable maze size {:?}, using {}", raw, DEFAULT_MAZE_SIZE);
            DEFAULT_MAZE_SIZE
        }
    }
}
