mod records;

pub use records::{Framework, HistoryItem, Profile, SavedPrompt, TopicRecord};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::TARGET_STORE;

/// A record addressable by id.
pub trait Record {
    fn id(&self) -> &str;
}

/// A collection persisted as a single JSON array file. Every mutation is
/// read-full-array, modify in memory, write-full-array; callers are expected
/// to be serialized end to end (single-instance assumption).
pub struct JsonStore<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the full collection. A missing file reads as an empty
    /// collection; so does an unreadable or corrupt one. The log line is the
    /// only signal a corrupt file produces.
    pub fn load_all(&self) -> Vec<T> {
        if !self.path.exists() {
            return Vec::new();
        }

        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) => {
                error!(target: TARGET_STORE, "Failed to read {}: {}", self.path.display(), err);
                return Vec::new();
            }
        };

        match serde_json::from_str(&data) {
            Ok(records) => records,
            Err(err) => {
                error!(target: TARGET_STORE, "Failed to parse {}: {}", self.path.display(), err);
                Vec::new()
            }
        }
    }

    /// Appends at the end and returns the refreshed collection. No
    /// uniqueness check on any key.
    pub fn append(&self, record: T) -> Vec<T> {
        let mut records = self.load_all();
        records.push(record);
        self.save_all(&records);
        records
    }

    /// Inserts at the front, for newest-first collections.
    pub fn prepend(&self, record: T) -> Vec<T> {
        let mut records = self.load_all();
        records.insert(0, record);
        self.save_all(&records);
        records
    }

    /// Writes the whole array back. Failures are logged and otherwise
    /// swallowed: the change is simply absent on the next load.
    fn save_all(&self, records: &[T]) {
        let json = match serde_json::to_string_pretty(records) {
            Ok(json) => json,
            Err(err) => {
                error!(target: TARGET_STORE, "Failed to serialize {}: {}", self.path.display(), err);
                return;
            }
        };

        if let Err(err) = fs::write(&self.path, json) {
            error!(target: TARGET_STORE, "Failed to write {}: {}", self.path.display(), err);
        } else {
            debug!(target: TARGET_STORE, "Saved {} records to {}", records.len(), self.path.display());
        }
    }
}

impl<T> JsonStore<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    pub fn find_by_id(&self, id: &str) -> Option<T> {
        self.load_all().into_iter().find(|record| record.id() == id)
    }

    /// Removes every record with a matching id and returns the remainder.
    /// An unknown id is a silent no-op.
    pub fn delete_by_id(&self, id: &str) -> Vec<T> {
        let mut records = self.load_all();
        records.retain(|record| record.id() != id);
        self.save_all(&records);
        records
    }
}

impl JsonStore<SavedPrompt> {
    /// Flips the favorite flag in place and persists. Returns the updated
    /// record, or None when the id is unknown.
    pub fn toggle_favorite(&self, id: &str) -> Option<SavedPrompt> {
        let mut prompts = self.load_all();
        let prompt = prompts.iter_mut().find(|prompt| prompt.id == id)?;
        prompt.is_favorite = !prompt.is_favorite;
        let updated = prompt.clone();
        self.save_all(&prompts);
        Some(updated)
    }
}
