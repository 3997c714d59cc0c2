use std::io;
use thiserror::Error;

/// Errors from the host side of the machine. The engine itself is total and
/// never fails; only terminal I/O and bad settings end up here.
#[derive(Debug, Error)]
pub enum Error {
    /// Writing to the terminal or reading the keyboard failed.
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),

    /// A configuration value is outside what the hardware supports.
    #[error("invalid configuration: {0}")]
    Config(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
