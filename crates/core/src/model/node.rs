use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::ids::NodeId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NodeError {
    #[error("node identifier cannot be empty")]
    EmptyId,

    #[error("node '{id}' has an empty title")]
    EmptyTitle { id: NodeId },

    #[error("node '{id}' has a non-positive estimated hours value")]
    InvalidEstimatedHours { id: NodeId },
}

//
// ─── NODE TYPES ────────────────────────────────────────────────────────────────
//

/// An external study resource attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub url: String,
}

impl Resource {
    /// Returns the resource URL when it passes the scheme allow-list.
    ///
    /// Only `http` and `https` are accepted; `javascript:`, `data:`, and
    /// unparsable values yield `None` and the entry is dropped from display.
    #[must_use]
    pub fn safe_url(&self) -> Option<Url> {
        let url = Url::parse(self.url.trim()).ok()?;
        match url.scheme() {
            "http" | "https" => Some(url),
            _ => None,
        }
    }
}

/// A self-check question attached to a node.
///
/// Dataset field names are the short `q`/`a` of the original document format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "q")]
    pub prompt: String,

    #[serde(rename = "a", default)]
    pub answer: Option<String>,
}

/// One topic/unit in the roadmap.
///
/// Nodes are immutable dataset content; `requires` lists the identifiers of
/// prerequisite nodes that must be in the done-set before this node can be
/// marked complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub title: String,

    /// Subject label, e.g. "Algebra". Dataset field `sub`.
    #[serde(rename = "sub")]
    pub subject: String,

    /// Free-text description; markdown is allowed and sanitized at render time.
    #[serde(rename = "desc")]
    pub description: String,

    /// Icon glyph shown on the card and in the detail panel.
    pub icon: String,

    #[serde(default)]
    pub topics: Vec<String>,

    #[serde(default)]
    pub requires: Vec<NodeId>,

    #[serde(default)]
    pub estimated_hours: Option<f64>,

    /// `None` means the dataset supplied no resource list at all, which is
    /// distinct from an empty or fully-unsafe list.
    #[serde(default)]
    pub resources: Option<Vec<Resource>>,

    #[serde(default)]
    pub questions: Option<Vec<Question>>,
}

impl Node {
    /// Validates dataset-supplied fields.
    ///
    /// # Errors
    ///
    /// Returns `NodeError` when the identifier or title is empty, or when
    /// `estimated_hours` is present but not a positive finite number.
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.id.as_str().trim().is_empty() {
            return Err(NodeError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(NodeError::EmptyTitle {
                id: self.id.clone(),
            });
        }
        if let Some(hours) = self.estimated_hours
            && !(hours.is_finite() && hours > 0.0)
        {
            return Err(NodeError::InvalidEstimatedHours {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Returns true when the node declares at least one prerequisite.
    #[must_use]
    pub fn has_prerequisites(&self) -> bool {
        !self.requires.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
