use std::collections::BTreeSet;

use crate::model::NodeId;
use crate::roadmap::Roadmap;

//
// ─── DONE-SET ──────────────────────────────────────────────────────────────────
//

/// The set of node identifiers the user has marked complete.
///
/// Ordered set semantics: no duplicates, deterministic iteration (and thus
/// deterministic export documents). Membership means the user marked the
/// topic complete, irrespective of the node's *current* unlock status;
/// un-doing a prerequisite never cascades revocation to dependents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoneSet(BTreeSet<NodeId>);

impl DoneSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a done-set keeping only identifiers known to the roadmap.
    ///
    /// Used on load and on import, where stale or foreign identifiers are
    /// silently dropped rather than errored.
    #[must_use]
    pub fn from_known(ids: impl IntoIterator<Item = NodeId>, roadmap: &Roadmap) -> Self {
        Self(ids.into_iter().filter(|id| roadmap.contains(id)).collect())
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.0.contains(id)
    }

    /// Returns true when the id was newly inserted.
    pub fn insert(&mut self, id: NodeId) -> bool {
        self.0.insert(id)
    }

    /// Returns true when the id was present.
    pub fn remove(&mut self, id: &NodeId) -> bool {
        self.0.remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.0.iter()
    }

    /// Identifier strings in iteration order, the shape persisted to storage.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|id| id.as_str().to_owned()).collect()
    }
}

impl FromIterator<NodeId> for DoneSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

//
// ─── AGGREGATE PROGRESS ────────────────────────────────────────────────────────
//

/// Aggregate completion numbers for the progress header.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressStats {
    pub done: usize,
    pub total: usize,
    pub percent: f64,
    /// Sum of `estimated_hours` over not-yet-done nodes; missing hours count
    /// as zero.
    pub remaining_hours: f64,
}

impl ProgressStats {
    #[must_use]
    pub fn compute(roadmap: &Roadmap, done: &DoneSet) -> Self {
        let total = roadmap.node_count();
        let done_count = roadmap.nodes().filter(|n| done.contains(&n.id)).count();
        let percent = if total == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            {
                done_count as f64 / total as f64 * 100.0
            }
        };
        let remaining_hours = roadmap
            .nodes()
            .filter(|n| !done.contains(&n.id))
            .filter_map(|n| n.estimated_hours)
            .sum();

        Self {
            done: done_count,
            total,
            percent,
            remaining_hours,
        }
    }

    /// True when no study hours remain, which drives the completion message.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining_hours <= 0.0
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
