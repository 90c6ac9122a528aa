use std::fs::OpenOptions;
use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::style::Color;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;

use maze_game::session::wait_for_quit;
use maze_game::{GameConfig, GameSession, IoDevice, SystemTimeSource, TerminalDevice};

const END_POLL_MS: u64 = 50;

fn main() -> Result<()> {
    init_logging();
    let config = GameConfig::from_env();
    log::info!(
        "starting maze v{} (size {}, tick {:?}, seed {:?})",
        env!("CARGO_PKG_VERSION"),
        config.maze_size,
        config.tick,
        config.seed
    );

    let mut device = TerminalDevice::stdout();
    device.ensure_fits(config.maze_size)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    device.hide_cursor(true)?;

    let result = run(&mut device, &config);

    device.hide_cursor(false)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    if let Err(ref e) = result {
        log::error!("game exited with error: {}", e);
    }
    result
}

fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("maze.log")
    {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // stderr would scribble over the maze
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn run<D: IoDevice>(device: &mut D, config: &GameConfig) -> Result<()> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = GameSession::new(config.maze_size, rng, SystemTimeSource::new());
    let state = session.run(device, config.tick)?;
    log::info!("session finished: {:?}", state);

    device.draw_text_at(config.maze_size + 2, 0, "press q to leave", Color::DarkGrey)?;
    device.flush()?;
    wait_for_quit(device, Duration::from_millis(END_POLL_MS))?;
    Ok(())
}
