use serde::{Deserialize, Serialize};

use crate::model::ids::LevelId;
use crate::model::node::Node;

/// An ordered grouping of nodes for display.
///
/// Level order matters for layout only; unlock logic never consults it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: LevelId,

    /// Display label, e.g. "Foundations".
    pub label: String,

    /// CSS badge style class for the level header.
    pub badge: String,

    #[serde(default)]
    pub nodes: Vec<Node>,
}
