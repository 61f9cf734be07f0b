//! Persisted last/high score.

use crate::core::constants::SCORES_FILE;
use crate::utils::persistence::{load_json, save_json, save_path};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub last_score: u64,
    pub high_score: u64,
    /// Unix timestamp of the last recorded run.
    #[serde(default)]
    pub last_played: i64,
}

impl ScoreRecord {
    /// Fold a finished run into the record. Returns true on a new high score.
    pub fn apply_run(&mut self, run_best: u64, now: i64) -> bool {
        self.last_score = run_best;
        self.last_played = now;
        if run_best > self.high_score {
            self.high_score = run_best;
            true
        } else {
            false
        }
    }
}

/// Where finished runs are recorded.
pub trait ScoreStore {
    fn load(&self) -> io::Result<ScoreRecord>;

    /// Persist a finished run's best score and return the updated record.
    fn record_run(&mut self, run_best: u64) -> io::Result<ScoreRecord>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&self) -> io::Result<ScoreRecord> {
        (**self).load()
    }

    fn record_run(&mut self, run_best: u64) -> io::Result<ScoreRecord> {
        (**self).record_run(run_best)
    }
}

/// `~/.cutejump/scores.json`.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            path: save_path(SCORES_FILE)?,
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self) -> io::Result<ScoreRecord> {
        Ok(load_json(&self.path)?.unwrap_or_default())
    }

    fn record_run(&mut self, run_best: u64) -> io::Result<ScoreRecord> {
        let mut record = self.load()?;
        let new_high = record.apply_run(run_best, chrono::Utc::now().timestamp());
        save_json(&self.path, &record)?;
        if new_high {
            tracing::info!(high_score = record.high_score, "New high score");
        }
        Ok(record)
    }
}

/// In-memory store for tests and sessions without a writable home.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    record: ScoreRecord,
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> io::Result<ScoreRecord> {
        Ok(self.record)
    }

    fn record_run(&mut self, run_best: u64) -> io::Result<ScoreRecord> {
        self.record
            .apply_run(run_best, chrono::Utc::now().timestamp());
        Ok(self.record)
    }
}
