use std::collections::HashMap;

use thiserror::Error;

use crate::model::{Level, Node, NodeError, NodeId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoadmapError {
    /// Two nodes share an identifier. Duplicates would silently shadow each
    /// other in the lookup, so the dataset is rejected outright.
    #[error("duplicate node identifier '{id}'")]
    DuplicateNode { id: NodeId },

    #[error(transparent)]
    Node(#[from] NodeError),
}

//
// ─── ROADMAP INDEX ─────────────────────────────────────────────────────────────
//

/// The immutable roadmap: levels in dataset order plus a lookup by node
/// identifier. Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Roadmap {
    levels: Vec<Level>,
    index: HashMap<NodeId, (usize, usize)>,
    dangling: Vec<(NodeId, NodeId)>,
}

impl Roadmap {
    /// Flattens the level list into an indexed roadmap.
    ///
    /// A `requires` entry that names a non-existent node is tolerated: the
    /// roadmap still builds, and the pair is recorded in
    /// [`dangling_requires`](Self::dangling_requires) so callers can log it.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapError::DuplicateNode` when two nodes share an
    /// identifier, or `RoadmapError::Node` when a node fails validation.
    pub fn new(levels: Vec<Level>) -> Result<Self, RoadmapError> {
        let mut index = HashMap::new();
        for (li, level) in levels.iter().enumerate() {
            for (ni, node) in level.nodes.iter().enumerate() {
                node.validate()?;
                if index.insert(node.id.clone(), (li, ni)).is_some() {
                    return Err(RoadmapError::DuplicateNode {
                        id: node.id.clone(),
                    });
                }
            }
        }

        let mut dangling = Vec::new();
        for level in &levels {
            for node in &level.nodes {
                for required in &node.requires {
                    if !index.contains_key(required) {
                        dangling.push((node.id.clone(), required.clone()));
                    }
                }
            }
        }

        Ok(Self {
            levels,
            index,
            dangling,
        })
    }

    /// Looks a node up by identifier.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        let (li, ni) = *self.index.get(id)?;
        Some(&self.levels[li].nodes[ni])
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Levels in dataset order.
    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// All nodes in flattened dataset order (level by level).
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.levels.iter().flat_map(|level| level.nodes.iter())
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    /// `(node, missing prerequisite)` pairs found at build time.
    #[must_use]
    pub fn dangling_requires(&self) -> &[(NodeId, NodeId)] {
        &self.dangling
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
