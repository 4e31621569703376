use roadmap_core::Clock;
use roadmap_core::progress::DoneSet;
use roadmap_core::transfer::ProgressDocument;

use crate::error::TransferError;

/// Serializes and parses portable progress documents.
///
/// Export produces the canonical `{version, exportedAt, done}` document.
/// Import is tolerant about shape history: a bare identifier array and an
/// object with a `done` array are both accepted; anything else is rejected
/// outright, with no partial application.
#[derive(Clone)]
pub struct TransferService {
    clock: Clock,
}

impl TransferService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }

    /// Pretty-printed export document for the given done-set.
    ///
    /// # Errors
    ///
    /// Returns `TransferError::Encode` if serialization fails.
    pub fn export(&self, done: &DoneSet) -> Result<String, TransferError> {
        let document = ProgressDocument::new(done, self.clock.now());
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Suggested file name for an export, stamped with the clock's date.
    #[must_use]
    pub fn export_file_name(&self) -> String {
        format!(
            "roadmap-progress-{}.json",
            self.clock.now().format("%Y%m%d")
        )
    }

    /// Extracts the identifier list from an import document.
    ///
    /// Non-string array entries are dropped silently (matching the tolerance
    /// for unknown identifiers downstream); validation against the roadmap is
    /// the progress service's job.
    ///
    /// # Errors
    ///
    /// Returns `TransferError::InvalidDocument` when the text is not JSON, or
    /// is JSON of any shape other than an array or an object with a `done`
    /// array.
    pub fn parse(&self, text: &str) -> Result<Vec<String>, TransferError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|_| TransferError::InvalidDocument)?;

        let entries = match &value {
            serde_json::Value::Array(entries) => entries,
            serde_json::Value::Object(fields) => fields
                .get("done")
                .and_then(serde_json::Value::as_array)
                .ok_or(TransferError::InvalidDocument)?,
            _ => return Err(TransferError::InvalidDocument),
        };

        Ok(entries
            .iter()
            .filter_map(|entry| entry.as_str().map(ToOwned::to_owned))
            .collect())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
