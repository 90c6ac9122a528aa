use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(
        "terminal too small: need at least {need_cols}x{need_rows} (cols x rows), current {cols}x{rows}"
    )]
    TerminalTooSmall {
        need_cols: u16,
        need_rows: u16,
        cols: u16,
        rows: u16,
    },

    #[error("invalid maze layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
