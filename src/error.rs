//! Error types shared by the score store and the interactive loop
//!
//! Malformed player input never shows up here: it is re-prompted where it
//! is read. Everything in `GameError` is reported by the menu loop, which
//! then carries on with the next iteration.

use std::io;
use std::path::PathBuf;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, GameError>;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("could not read score record {}: {source}", .path.display())]
    RecordRead { path: PathBuf, source: io::Error },

    #[error("score record {} is malformed: {source}", .path.display())]
    RecordParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("could not write score record {}: {source}", .path.display())]
    RecordWrite { path: PathBuf, source: io::Error },

    /// Input stream reached end of file
    #[error("input closed")]
    InputClosed,
}

impl GameError {
    /// Errors that end the session instead of being reported and skipped
    pub fn ends_session(&self) -> bool {
        matches!(self, GameError::InputClosed)
    }
}
