//! Best-score records per difficulty
//!
//! Persisted as a JSON object keyed by difficulty name. An unset field is
//! written as `null`, so "no score yet" round-trips exactly and always
//! loses to a real result.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::{GameError, Result};

/// Best result for one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BestScore {
    /// Fewest attempts, `None` if nothing recorded
    #[serde(default)]
    pub attempts: Option<u32>,
    /// Seconds for that attempt count, `None` if unset or unsolved
    #[serde(default)]
    pub time: Option<f64>,
}

impl BestScore {
    pub fn is_set(&self) -> bool {
        self.attempts.is_some()
    }

    /// Whether a round result beats this record.
    ///
    /// Fewer attempts wins; equal attempts fall back to time. Missing values
    /// compare as +infinity, so an unsolved round never beats an existing
    /// record with the same attempt count.
    pub fn is_beaten_by(&self, attempts: u32, elapsed_secs: Option<f64>) -> bool {
        match self.attempts {
            None => true,
            Some(best) if attempts < best => true,
            Some(best) if attempts == best => match (elapsed_secs, self.time) {
                (Some(t), Some(best_t)) => t < best_t,
                (Some(_), None) => true,
                (None, _) => false,
            },
            Some(_) => false,
        }
    }
}

/// Best scores for every difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBoard {
    scores: BTreeMap<Difficulty, BestScore>,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self {
            scores: Difficulty::ALL
                .into_iter()
                .map(|d| (d, BestScore::default()))
                .collect(),
        }
    }
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unset entry for every difficulty the board lacks
    fn fill_missing(&mut self) {
        for difficulty in Difficulty::ALL {
            self.scores.entry(difficulty).or_default();
        }
    }

    /// Best score for a difficulty (unset if the record has no entry)
    pub fn get(&self, difficulty: Difficulty) -> BestScore {
        self.scores.get(&difficulty).copied().unwrap_or_default()
    }

    /// Store the result if it beats the current best; returns whether it did
    pub fn record(&mut self, difficulty: Difficulty, attempts: u32, elapsed_secs: Option<f64>) -> bool {
        let best = self.scores.entry(difficulty).or_default();
        if !best.is_beaten_by(attempts, elapsed_secs) {
            return false;
        }
        *best = BestScore {
            attempts: Some(attempts),
            time: elapsed_secs,
        };
        true
    }

    /// Human-readable table, one line per difficulty
    pub fn summary(&self) -> String {
        let mut lines = vec![String::from("--- High Scores ---")];
        for difficulty in Difficulty::ALL {
            let best = self.get(difficulty);
            let text = match (best.attempts, best.time) {
                (Some(attempts), Some(time)) => format!("{attempts} attempts in {time:.2} seconds"),
                (Some(attempts), None) => format!("{attempts} attempts (unsolved)"),
                (None, _) => String::from("No high score yet"),
            };
            lines.push(format!("{} Difficulty: {}", difficulty.label(), text));
        }
        lines.join("\n")
    }
}

/// Score board backed by a record file.
///
/// The file is read on first use and rewritten whole on every improvement.
/// A missing file reads as an empty board and is not created until a score
/// is actually recorded.
#[derive(Debug)]
pub struct ScoreStore {
    path: PathBuf,
    board: Option<ScoreBoard>,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            board: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the board, reading the record file if not already loaded
    pub fn load(&mut self) -> Result<&ScoreBoard> {
        if self.board.is_none() {
            self.board = Some(read_board(&self.path)?);
        }
        Ok(self.board.get_or_insert_with(ScoreBoard::new))
    }

    /// Record a round result, persisting the whole board on improvement
    pub fn update(
        &mut self,
        difficulty: Difficulty,
        attempts: u32,
        elapsed_secs: Option<f64>,
    ) -> Result<bool> {
        let mut board = self.load()?.clone();
        if !board.record(difficulty, attempts, elapsed_secs) {
            log::debug!(
                "No improvement on {}: {} attempts, {:?}s",
                difficulty,
                attempts,
                elapsed_secs
            );
            return Ok(false);
        }

        write_board(&self.path, &board)?;
        log::info!(
            "New best on {}: {} attempts, {:?}s",
            difficulty,
            attempts,
            elapsed_secs
        );
        self.board = Some(board);
        Ok(true)
    }

    /// Summary text of the current board
    pub fn display(&mut self) -> Result<String> {
        Ok(self.load()?.summary())
    }
}

fn read_board(path: &Path) -> Result<ScoreBoard> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("No score record at {}, starting fresh", path.display());
            return Ok(ScoreBoard::new());
        }
        Err(source) => {
            return Err(GameError::RecordRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut board: ScoreBoard = match serde_json::from_str(&text) {
        Ok(board) => board,
        // Older records wrote unset scores as bare `Infinity`, which is not JSON
        Err(_) if text.contains("Infinity") => {
            log::warn!(
                "Score record {} uses Infinity for unset scores, reading them as null",
                path.display()
            );
            serde_json::from_str(&text.replace("Infinity", "null")).map_err(|source| {
                GameError::RecordParse {
                    path: path.to_path_buf(),
                    source,
                }
            })?
        }
        Err(source) => {
            log::warn!(
                "Score record {} is malformed; fix or delete it to record new scores",
                path.display()
            );
            return Err(GameError::RecordParse {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    board.fill_missing();
    log::info!("Loaded score record from {}", path.display());
    Ok(board)
}

/// Write via a sibling temp file and rename over the record
fn write_board(path: &Path, board: &ScoreBoard) -> Result<()> {
    let write_err = |source: io::Error| GameError::RecordWrite {
        path: path.to_path_buf(),
        source,
    };

    let json = serde_json::to_string_pretty(board).map_err(|e| write_err(io::Error::other(e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, json).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(write_err)?;
    log::debug!("Score record saved to {}", path.display());
    Ok(())
}
