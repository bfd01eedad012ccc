//! Number Guess - a console number guessing game
//!
//! Core modules:
//! - `round`: One guessing round (target draw, guess feedback, timing)
//! - `scores`: Best score per difficulty, persisted as JSON
//! - `menu`: Interactive loop tying rounds to the score store
//! - `console`: Line-oriented input/output boundary
//! - `settings`: Optional settings file

pub mod console;
pub mod difficulty;
pub mod error;
pub mod menu;
pub mod round;
pub mod scores;
pub mod settings;

pub use console::Console;
pub use difficulty::Difficulty;
pub use error::{GameError, Result};
pub use round::{Feedback, Round, RoundResult, play_round};
pub use scores::{BestScore, ScoreBoard, ScoreStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Smallest number a target or guess can be
    pub const MIN_GUESS: u32 = 1;
    /// Largest number a target or guess can be
    pub const MAX_GUESS: u32 = 100;
    /// Default score record file, relative to the working directory
    pub const RECORD_FILE: &str = "high_scores.json";
}
