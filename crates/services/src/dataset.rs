use roadmap_core::model::Level;
use roadmap_core::roadmap::Roadmap;

use crate::error::DatasetError;

/// Parses a JSON dataset (an array of levels) into an indexed roadmap.
///
/// Dangling `requires` references survive the build; each one is logged here
/// so dataset authors see them without the viewer breaking.
///
/// # Errors
///
/// Returns `DatasetError::Parse` for malformed JSON and
/// `DatasetError::Roadmap` for duplicate identifiers or invalid nodes.
pub fn roadmap_from_json(json: &str) -> Result<Roadmap, DatasetError> {
    let levels: Vec<Level> = serde_json::from_str(json)?;
    let roadmap = Roadmap::new(levels)?;

    for (node, missing) in roadmap.dangling_requires() {
        tracing::warn!(
            node = %node,
            missing = %missing,
            "node requires an identifier that is not in the dataset"
        );
    }

    Ok(roadmap)
}
