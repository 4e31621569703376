//! The unlock/prerequisite evaluation rule.
//!
//! A node is unlocked when every identifier in its `requires` list is in the
//! done-set; nodes with no prerequisites are always unlocked. These are pure
//! functions over the roadmap and a done-set snapshot. Level order plays no
//! part.

use thiserror::Error;

use crate::model::{Node, NodeId};
use crate::progress::DoneSet;
use crate::roadmap::Roadmap;

/// True iff all of the node's prerequisites are complete.
#[must_use]
pub fn is_unlocked(node: &Node, done: &DoneSet) -> bool {
    node.requires.iter().all(|id| done.contains(id))
}

/// A prerequisite resolved for display.
///
/// `Missing` covers a `requires` entry that names no node in the roadmap;
/// display falls back to the raw identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Prerequisite<'a> {
    Known(&'a Node),
    Missing(&'a NodeId),
}

impl Prerequisite<'_> {
    /// Display title: node title, or the raw identifier for a missing node.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Prerequisite::Known(node) => &node.title,
            Prerequisite::Missing(id) => id.as_str(),
        }
    }
}

/// The node's unmet prerequisites, in dataset-declared order.
#[must_use]
pub fn pending_prerequisites<'a>(
    node: &'a Node,
    done: &DoneSet,
    roadmap: &'a Roadmap,
) -> Vec<Prerequisite<'a>> {
    node.requires
        .iter()
        .filter(|id| !done.contains(id))
        .map(|id| match roadmap.node(id) {
            Some(required) => Prerequisite::Known(required),
            None => Prerequisite::Missing(id),
        })
        .collect()
}

/// Rejection raised when a locked node is toggled towards done.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("node '{id}' is locked behind incomplete prerequisites")]
pub struct CompletionBlocked {
    pub id: NodeId,
    /// Identifiers of the unmet prerequisites, dataset order.
    pub pending: Vec<NodeId>,
}

/// The toggle gate: done=false→true only while unlocked.
///
/// The reverse transition (un-marking) is always permitted and never cascades
/// to dependents, so callers only consult this when *adding* to the done-set.
///
/// # Errors
///
/// Returns `CompletionBlocked` naming the unmet prerequisites when the node
/// is still locked.
pub fn check_completion(node: &Node, done: &DoneSet) -> Result<(), CompletionBlocked> {
    let pending: Vec<NodeId> = node
        .requires
        .iter()
        .filter(|id| !done.contains(id))
        .cloned()
        .collect();
    if pending.is_empty() {
        Ok(())
    } else {
        Err(CompletionBlocked {
            id: node.id.clone(),
            pending,
        })
    }
}

/// First node in dataset order that is neither done nor locked.
///
/// Drives the "next topic" action; `None` means every unlocked node is done.
#[must_use]
pub fn next_available<'a>(roadmap: &'a Roadmap, done: &DoneSet) -> Option<&'a Node> {
    roadmap
        .nodes()
        .find(|node| !done.contains(&node.id) && is_unlocked(node, done))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
