use roadmap_core::model::Node;
use roadmap_core::progress::DoneSet;
use roadmap_core::roadmap::Roadmap;
use roadmap_core::search::{SearchIndex, StatusFilter};
use roadmap_core::unlock::is_unlocked;

/// Three-valued visual/ARIA state of a node card.
///
/// `Done` wins over `Locked`: a completed node whose prerequisite was later
/// un-done keeps its done badge (no cascading revocation), and the mixed
/// state shows up in the detail panel's prerequisite banner instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeVisual {
    Available,
    Done,
    Locked,
}

impl NodeVisual {
    #[must_use]
    pub fn of(node: &Node, done: &DoneSet) -> Self {
        if done.contains(&node.id) {
            NodeVisual::Done
        } else if is_unlocked(node, done) {
            NodeVisual::Available
        } else {
            NodeVisual::Locked
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            NodeVisual::Available => "node",
            NodeVisual::Done => "node done",
            NodeVisual::Locked => "node locked",
        }
    }
}

/// DOM id of a node card button; used for focus restore after the panel
/// closes and for scroll-into-view on "next topic".
#[must_use]
pub fn node_dom_id(id: &str) -> String {
    format!("node-{id}")
}

/// "~8h" style label; whole hours drop the decimal.
#[must_use]
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("~{}h", hours as i64)
    } else {
        format!("~{hours}h")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeCardVm {
    pub id: String,
    pub dom_id: String,
    pub icon: String,
    pub title: String,
    pub subject: String,
    pub hours_label: Option<String>,
    pub visual: NodeVisual,
    pub aria_label: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelVm {
    pub id: String,
    pub label: String,
    pub badge_class: String,
    pub visible: bool,
    pub nodes: Vec<NodeCardVm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapVm {
    pub levels: Vec<LevelVm>,
    pub visible_count: usize,
    /// Query or filter label to echo in the empty state, when nothing is
    /// visible under a non-trivial query/filter.
    pub empty_state: Option<String>,
}

/// Maps the whole snapshot to the node grid. Pure and idempotent: the same
/// inputs always produce the same classification.
#[must_use]
pub fn build_roadmap_vm(
    roadmap: &Roadmap,
    search: &SearchIndex,
    done: &DoneSet,
    query: &str,
    filter: StatusFilter,
) -> RoadmapVm {
    let mut visible_count = 0;
    let levels: Vec<LevelVm> = roadmap
        .levels()
        .iter()
        .map(|level| {
            let nodes: Vec<NodeCardVm> = level
                .nodes
                .iter()
                .map(|node| {
                    let visual = NodeVisual::of(node, done);
                    let visible = search.is_visible(node, done, query, filter);
                    let aria_label = match visual {
                        NodeVisual::Available => node.title.clone(),
                        NodeVisual::Done => format!("{} — completed", node.title),
                        NodeVisual::Locked => format!("{} — locked", node.title),
                    };
                    NodeCardVm {
                        id: node.id.as_str().to_owned(),
                        dom_id: node_dom_id(node.id.as_str()),
                        icon: node.icon.clone(),
                        title: node.title.clone(),
                        subject: node.subject.clone(),
                        hours_label: node.estimated_hours.map(format_hours),
                        visual,
                        aria_label,
                        visible,
                    }
                })
                .collect();

            let level_visible = nodes.iter().filter(|n| n.visible).count();
            visible_count += level_visible;
            LevelVm {
                id: level.id.as_str().to_owned(),
                label: level.label.clone(),
                badge_class: format!("level-badge {}", level.badge),
                visible: level_visible > 0,
                nodes,
            }
        })
        .collect();

    let empty_state = if visible_count == 0 && (!query.is_empty() || filter != StatusFilter::All)
    {
        Some(if query.is_empty() {
            filter.label().to_owned()
        } else {
            query.to_owned()
        })
    } else {
        None
    };

    RoadmapVm {
        levels,
        visible_count,
        empty_state,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
