use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
///
/// A corrupt persisted record is *not* an error: repositories recover from it
/// internally by deleting the record and returning an empty result.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Key under which the done-set record is persisted.
///
/// The value is a JSON array of node-identifier strings.
pub const PROGRESS_KEY: &str = "roadmap.done";

/// Repository contract for the persisted done-set.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Read the persisted identifier list.
    ///
    /// A missing record yields an empty list. A corrupt or non-array record
    /// is deleted, logged, and also yields an empty list, so the caller is
    /// never interrupted by record rot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the store itself cannot be reached.
    async fn load(&self) -> Result<Vec<String>, StorageError>;

    /// Replace the persisted record with the full current list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    async fn save(&self, ids: &[String]) -> Result<(), StorageError>;

    /// Delete the persisted record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be deleted.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Decodes a raw persisted record.
///
/// `None` means the record is corrupt (not JSON, or not an array) and should
/// be discarded. Non-string entries inside an otherwise valid array are
/// dropped silently, matching the tolerance applied to unknown identifiers.
#[must_use]
pub fn decode_progress_record(raw: &str) -> Option<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let entries = value.as_array()?;
    Some(
        entries
            .iter()
            .filter_map(|entry| entry.as_str().map(ToOwned::to_owned))
            .collect(),
    )
}

/// Encodes the identifier list into the persisted record shape.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_progress_record(ids: &[String]) -> Result<String, StorageError> {
    serde_json::to_string(ids).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw record verbatim, bypassing encoding. Lets tests exercise
    /// the corrupt-record recovery path.
    pub fn put_raw(&self, value: &str) {
        if let Ok(mut guard) = self.records.lock() {
            guard.insert(PROGRESS_KEY.to_string(), value.to_string());
        }
    }

    /// Returns the raw persisted record, if any.
    #[must_use]
    pub fn raw_record(&self) -> Option<String> {
        self.records
            .lock()
            .ok()
            .and_then(|guard| guard.get(PROGRESS_KEY).cloned())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load(&self) -> Result<Vec<String>, StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let Some(raw) = guard.get(PROGRESS_KEY).cloned() else {
            return Ok(Vec::new());
        };
        match decode_progress_record(&raw) {
            Some(ids) => Ok(ids),
            None => {
                tracing::warn!("discarding corrupt progress record");
                guard.remove(PROGRESS_KEY);
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, ids: &[String]) -> Result<(), StorageError> {
        let encoded = encode_progress_record(ids)?;
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(PROGRESS_KEY.to_string(), encoded);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(PROGRESS_KEY);
        Ok(())
    }
}

/// Aggregates the progress repository behind a trait object for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(InMemoryRepository::new());
        Self { progress }
    }
}
