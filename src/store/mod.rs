use log::warn;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::PathBuf};
use thiserror::Error;


/// Version of the on-disk record format. Records written under a different
/// version are discarded on load, so incompatible upgrades reset the best
/// score instead of misreading it.
const FORMAT_VERSION: u32 = 1;

/// The best streak ever reached and who reached it. Durable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub best_count: u32,
    pub best_contributor: String,
}

impl Record {
    /// Offer a new score. It is kept only if it strictly exceeds the
    /// current best; returns whether the record improved.
    pub fn register(&mut self, count: u32, contributor: &str) -> bool {
        if count > self.best_count {
            self.best_count = count;
            self.best_contributor = contributor.to_owned();
            true
        } else {
            false
        }
    }
}

/// Failure modes for record storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record file io failed")]
    Io(#[from] io::Error),
    #[error("record serialization failed")]
    Serialization(#[from] serde_json::Error),
}

/// Durable storage for the best-streak record.
pub trait RecordStore {
    /// Load the stored record, or the default if none is stored.
    fn load(&self) -> Result<Record, StoreError>;

    /// Persist the given record.
    fn save(&self, record: &Record) -> Result<(), StoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct VersionedRecord {
    version: u32,
    #[serde(flatten)]
    record: Record,
}

/// Record storage backed by a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Result<Record, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Record::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(decode(&contents).unwrap_or_else(|| {
            warn!(
                "Discarding unreadable or outdated record file {:?}",
                self.path
            );
            Record::default()
        }))
    }

    fn save(&self, record: &Record) -> Result<(), StoreError> {
        let file = fs::File::create(&self.path)?;
        let stored = VersionedRecord {
            version: FORMAT_VERSION,
            record: record.clone(),
        };
        serde_json::to_writer(file, &stored)?;
        Ok(())
    }
}

/// Decode a stored record, rejecting unknown format versions.
fn decode(contents: &str) -> Option<Record> {
    let stored: VersionedRecord = serde_json::from_str(contents).ok()?;
    (stored.version == FORMAT_VERSION).then_some(stored.record)
}
