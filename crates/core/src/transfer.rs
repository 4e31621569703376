//! Portable progress document for export/import.
//!
//! The wire shape is `{ "version": 1, "exportedAt": <ISO-8601>, "done": [ids] }`.
//! Parsing of the looser *import* shapes (bare array, or object with a `done`
//! field) lives in the services layer, which owns JSON handling; this module
//! only defines the canonical document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::NodeId;
use crate::progress::DoneSet;

/// Current export document version.
pub const EXPORT_VERSION: u32 = 1;

/// The canonical exported progress document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDocument {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub done: Vec<NodeId>,
}

impl ProgressDocument {
    /// Snapshots the done-set at the given timestamp.
    #[must_use]
    pub fn new(done: &DoneSet, exported_at: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_VERSION,
            exported_at,
            done: done.iter().cloned().collect(),
        }
    }
}
