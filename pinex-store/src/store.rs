//! Durable per-participant trial logs.
//!
//! The store only ever moves whole logs: read once at session start for
//! recovery, written in full after every scored guess. One writer per
//! participant key, so no locking.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use pinex_core::{ParticipantId, TrialRecord};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("trial log i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("trial log is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Whole-log keyed storage of a participant's scored guesses.
pub trait RecordStore {
    /// The persisted log, or `None` if this participant has none yet.
    fn get(&self, participant: ParticipantId) -> Result<Option<Vec<TrialRecord>>, StoreError>;

    /// Replaces the participant's log with `records`.
    fn put(&mut self, participant: ParticipantId, records: &[TrialRecord])
    -> Result<(), StoreError>;
}

/// One JSON file per participant under a data directory, named
/// `participant_<id>_data.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, participant: ParticipantId) -> PathBuf {
        self.dir.join(format!("participant_{participant}_data.json"))
    }
}

impl RecordStore for JsonFileStore {
    fn get(&self, participant: ParticipantId) -> Result<Option<Vec<TrialRecord>>, StoreError> {
        let path = self.path_for(participant);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let records = serde_json::from_str(&raw)?;
        Ok(Some(records))
    }

    fn put(
        &mut self,
        participant: ParticipantId,
        records: &[TrialRecord],
    ) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(participant);
        std::fs::write(&path, serde_json::to_string(records)?)?;
        debug!(participant = participant.get(), records = records.len(), "trial log persisted");
        Ok(())
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    logs: HashMap<u32, Vec<TrialRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, participant: ParticipantId) -> Result<Option<Vec<TrialRecord>>, StoreError> {
        Ok(self.logs.get(&participant.get()).cloned())
    }

    fn put(
        &mut self,
        participant: ParticipantId,
        records: &[TrialRecord],
    ) -> Result<(), StoreError> {
        self.logs.insert(participant.get(), records.to_vec());
        Ok(())
    }
}
