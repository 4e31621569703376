//! Case-insensitive substring search over precomputed per-node text,
//! combined with a completion-status filter.

use std::collections::HashMap;

use crate::model::{Node, NodeId};
use crate::progress::DoneSet;
use crate::roadmap::Roadmap;

/// Completion-status filter for the node grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Done,
    Pending,
}

impl StatusFilter {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Done => "done",
            StatusFilter::Pending => "pending",
        }
    }

    #[must_use]
    pub fn matches(self, node: &Node, done: &DoneSet) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Done => done.contains(&node.id),
            StatusFilter::Pending => !done.contains(&node.id),
        }
    }
}

/// Trims and lower-cases raw input into the canonical query form.
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Precomputed lower-cased search text per node: title, subject, description,
/// and topics concatenated. Built once next to the roadmap.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    text: HashMap<NodeId, String>,
}

impl SearchIndex {
    #[must_use]
    pub fn new(roadmap: &Roadmap) -> Self {
        let text = roadmap
            .nodes()
            .map(|node| {
                let haystack = format!(
                    "{} {} {} {}",
                    node.title,
                    node.subject,
                    node.description,
                    node.topics.join(" ")
                )
                .to_lowercase();
                (node.id.clone(), haystack)
            })
            .collect();
        Self { text }
    }

    /// True when the normalized query is empty or occurs in the node's text.
    #[must_use]
    pub fn matches(&self, id: &NodeId, normalized_query: &str) -> bool {
        if normalized_query.is_empty() {
            return true;
        }
        self.text
            .get(id)
            .is_some_and(|haystack| haystack.contains(normalized_query))
    }

    /// The combined visibility rule: query match AND status-filter match.
    #[must_use]
    pub fn is_visible(
        &self,
        node: &Node,
        done: &DoneSet,
        normalized_query: &str,
        filter: StatusFilter,
    ) -> bool {
        self.matches(&node.id, normalized_query) && filter.matches(node, done)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Level, LevelId};

    fn node(id: &str, title: &str, topics: &[&str]) -> Node {
        Node {
            id: NodeId::new(id),
            title: title.to_string(),
            subject: "Math".to_string(),
            description: "Core ideas.".to_string(),
            icon: "•".to_string(),
            topics: topics.iter().map(ToString::to_string).collect(),
            requires: Vec::new(),
            estimated_hours: None,
            resources: None,
            questions: None,
        }
    }

    fn roadmap() -> Roadmap {
        Roadmap::new(vec![Level {
            id: LevelId::new("l1"),
            label: "L1".to_string(),
            badge: "badge".to_string(),
            nodes: vec![
                node("alg", "Algebra Basics", &["Linear equations"]),
                node("geo", "Geometry", &["Triangles"]),
            ],
        }])
        .unwrap()
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_query("  ALGebra  "), "algebra");
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn empty_query_matches_everything() {
        let rm = roadmap();
        let index = SearchIndex::new(&rm);
        assert!(index.matches(&NodeId::new("alg"), ""));
        assert!(index.matches(&NodeId::new("geo"), ""));
    }

    #[test]
    fn matches_title_subject_description_and_topics() {
        let rm = roadmap();
        let index = SearchIndex::new(&rm);
        let alg = NodeId::new("alg");
        assert!(index.matches(&alg, "algebra"));
        assert!(index.matches(&alg, "math"));
        assert!(index.matches(&alg, "core ideas"));
        assert!(index.matches(&alg, "linear eq"));
        assert!(!index.matches(&alg, "triangles"));
    }

    #[test]
    fn filter_and_query_compose() {
        let rm = roadmap();
        let index = SearchIndex::new(&rm);
        let done: DoneSet = [NodeId::new("geo")].into_iter().collect();

        let alg = rm.node(&NodeId::new("alg")).unwrap();
        let geo = rm.node(&NodeId::new("geo")).unwrap();

        // filter=pending, query="alg": only the not-done algebra node shows.
        assert!(index.is_visible(alg, &done, "alg", StatusFilter::Pending));
        assert!(!index.is_visible(geo, &done, "alg", StatusFilter::Pending));
        assert!(!index.is_visible(geo, &done, "", StatusFilter::Pending));
        assert!(index.is_visible(geo, &done, "", StatusFilter::Done));
        assert!(index.is_visible(alg, &done, "", StatusFilter::All));
    }
}
