//! Shared error types for the services crate.

use thiserror::Error;

use roadmap_core::roadmap::RoadmapError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressService`.
///
/// Persistence failures are deliberately *not* represented here: a failed
/// save keeps the in-memory mutation and is reported through
/// [`ProgressUpdate::persisted`](crate::ProgressUpdate), never as an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    /// Completion was attempted on a node whose prerequisites are unmet.
    /// Carries the display titles of the pending prerequisites, in
    /// dataset-declared order.
    #[error("complete first: {}", pending.join(", "))]
    Locked { pending: Vec<String> },

    #[error("unknown node '{0}'")]
    UnknownNode(String),
}

/// Errors emitted by `TransferService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransferError {
    /// The import text is neither a JSON array of identifiers nor an object
    /// with a `done` array.
    #[error("not a valid progress document")]
    InvalidDocument,

    #[error("failed to encode progress document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors emitted while loading the roadmap dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Roadmap(#[from] RoadmapError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
