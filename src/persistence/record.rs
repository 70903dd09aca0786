//! Best record storage
//!
//! The record is loaded once when a session starts and written at most once
//! when it ends, only if the final score beats it.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::GameState;

/// Errors raised while writing a record
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to write record file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Best level and score reached so far
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub level: u32,
    pub score: f64,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            level: 1,
            score: 0.0,
        }
    }
}

impl Record {
    pub fn new(level: u32, score: f64) -> Self {
        Self { level, score }
    }

    /// A finished run replaces the record only with a strictly higher,
    /// positive score
    pub fn should_replace(&self, score: f64) -> bool {
        score > self.score && score > 0.0
    }
}

/// Where the record lives between sessions
pub trait RecordStore {
    /// Load the stored record. Never fails: anything unreadable yields the
    /// default record.
    fn load(&mut self) -> Record;

    fn save(&mut self, record: &Record) -> Result<(), RecordError>;
}

/// Record kept in a JSON file
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the user's local data directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("the-ball").join("record.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for FileRecordStore {
    fn load(&mut self) -> Record {
        if !self.path.exists() {
            info!("No record file at {:?}, starting fresh", self.path);
            return Record::default();
        }

        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(record) => {
                    info!("Loaded record from {:?}", self.path);
                    record
                }
                Err(e) => {
                    warn!("Failed to parse record: {}", e);
                    Record::default()
                }
            },
            Err(e) => {
                warn!("Failed to read record file: {}", e);
                Record::default()
            }
        }
    }

    fn save(&mut self, record: &Record) -> Result<(), RecordError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)?;
        info!("Saved record to {:?}", self.path);
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    pub record: Option<Record>,
    /// Number of successful saves
    pub saves: usize,
}

impl MemoryRecordStore {
    pub fn with_record(record: Record) -> Self {
        Self {
            record: Some(record),
            saves: 0,
        }
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&mut self) -> Record {
        self.record.unwrap_or_default()
    }

    fn save(&mut self, record: &Record) -> Result<(), RecordError> {
        self.record = Some(*record);
        self.saves += 1;
        Ok(())
    }
}

/// How a finished session compared to the stored record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOutcome {
    pub level: u32,
    pub score: f64,
    /// Record as it stood before this session
    pub previous: Record,
    pub new_record: bool,
}

/// Compare the session against the record it started with and persist the
/// result if it is better
pub fn finish_session(
    state: &GameState,
    store: &mut dyn RecordStore,
) -> Result<SessionOutcome, RecordError> {
    let previous = state.record;
    let new_record = previous.should_replace(state.score);
    if new_record {
        store.save(&Record::new(state.level, state.score))?;
        info!(
            "New record: level {} score {:.1} (was {:.1})",
            state.level, state.score, previous.score
        );
    }
    Ok(SessionOutcome {
        level: state.level,
        score: state.score,
        previous,
        new_record,
    })
}
