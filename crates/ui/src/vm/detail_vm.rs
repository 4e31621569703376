use roadmap_core::model::Node;
use roadmap_core::progress::DoneSet;
use roadmap_core::roadmap::Roadmap;
use roadmap_core::unlock::{Prerequisite, is_unlocked, pending_prerequisites};

use super::markdown_vm::markdown_to_html;
use super::node_vm::format_hours;

/// Prerequisite banner of the detail panel, one of three distinct states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrereqBanner {
    NoneDeclared,
    Satisfied { titles: Vec<String> },
    Pending { titles: Vec<String> },
}

/// State of the primary action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkAction {
    /// Disabled, naming the blocking prerequisites.
    Locked { pending: Vec<String> },
    Mark,
    Undo,
}

impl MarkAction {
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            MarkAction::Locked { pending } => {
                format!("Complete first: {}", pending.join(", "))
            }
            MarkAction::Mark => "Mark as complete".to_string(),
            MarkAction::Undo => "Undo completion".to_string(),
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self, MarkAction::Locked { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceVm {
    pub name: String,
    pub href: String,
}

/// Resource tab content.
///
/// `Listed` carries the node's own safe resources. `Fallback` is the static
/// default pair shown when the dataset supplied no resource list at all.
/// `Empty` marks a node that *did* supply resources, none of which survived
/// the scheme allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceListVm {
    Listed(Vec<ResourceVm>),
    Fallback(Vec<ResourceVm>),
    Empty,
}

impl ResourceListVm {
    #[must_use]
    pub fn entries(&self) -> &[ResourceVm] {
        match self {
            ResourceListVm::Listed(entries) | ResourceListVm::Fallback(entries) => entries,
            ResourceListVm::Empty => &[],
        }
    }
}

/// The static fallback shown for nodes without a resource list.
#[must_use]
pub fn default_resources() -> Vec<ResourceVm> {
    vec![
        ResourceVm {
            name: "Khan Academy".to_string(),
            href: "https://www.khanacademy.org/".to_string(),
        },
        ResourceVm {
            name: "MIT OpenCourseWare".to_string(),
            href: "https://ocw.mit.edu/".to_string(),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionVm {
    pub number: usize,
    pub prompt: String,
    pub answer: String,
}

/// Everything the detail panel renders for one node, derived from the
/// current snapshot. Recomputed on every render; never cached across
/// mutations.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailVm {
    pub id: String,
    pub icon: String,
    pub title: String,
    pub description_html: String,
    pub subject_tag: String,
    pub hours_tag: Option<String>,
    pub is_done: bool,
    pub banner: PrereqBanner,
    pub action: MarkAction,
    pub topics: Vec<String>,
    pub resources: ResourceListVm,
    pub questions: Vec<QuestionVm>,
}

#[must_use]
pub fn build_detail_vm(node: &Node, done: &DoneSet, roadmap: &Roadmap) -> DetailVm {
    let pending: Vec<String> = pending_prerequisites(node, done, roadmap)
        .iter()
        .map(|p| p.title().to_owned())
        .collect();

    let banner = if !node.has_prerequisites() {
        PrereqBanner::NoneDeclared
    } else if pending.is_empty() {
        let titles = node
            .requires
            .iter()
            .map(|id| match roadmap.node(id) {
                Some(required) => Prerequisite::Known(required).title().to_owned(),
                None => id.as_str().to_owned(),
            })
            .collect();
        PrereqBanner::Satisfied { titles }
    } else {
        PrereqBanner::Pending {
            titles: pending.clone(),
        }
    };

    let is_done = done.contains(&node.id);
    let action = if !is_done && !is_unlocked(node, done) {
        MarkAction::Locked { pending }
    } else if is_done {
        MarkAction::Undo
    } else {
        MarkAction::Mark
    };

    let resources = match &node.resources {
        None => ResourceListVm::Fallback(default_resources()),
        Some(listed) => {
            let safe: Vec<ResourceVm> = listed
                .iter()
                .filter_map(|res| {
                    res.safe_url().map(|url| ResourceVm {
                        name: if res.name.trim().is_empty() {
                            "Resource".to_string()
                        } else {
                            res.name.clone()
                        },
                        href: url.to_string(),
                    })
                })
                .collect();
            if safe.is_empty() {
                ResourceListVm::Empty
            } else {
                ResourceListVm::Listed(safe)
            }
        }
    };

    let questions = match &node.questions {
        Some(listed) if !listed.is_empty() => listed
            .iter()
            .enumerate()
            .map(|(i, q)| QuestionVm {
                number: i + 1,
                prompt: q.prompt.clone(),
                answer: q
                    .answer
                    .clone()
                    .unwrap_or_else(|| "No answer recorded.".to_string()),
            })
            .collect(),
        _ => vec![QuestionVm {
            number: 1,
            prompt: format!("Explain in your own words: {}.", node.title),
            answer: "Write your own answer, then compare it with the description.".to_string(),
        }],
    };

    DetailVm {
        id: node.id.as_str().to_owned(),
        icon: node.icon.clone(),
        title: node.title.clone(),
        description_html: markdown_to_html(&node.description),
        subject_tag: node.subject.clone(),
        hours_tag: node.estimated_hours.map(format_hours),
        is_done,
        banner,
        action,
        topics: node.topics.clone(),
        resources,
        questions,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_core::model::{Level, LevelId, NodeId, Question, Resource};

    fn node(id: &str, requires: &[&str]) -> Node {
        Node {
            id: NodeId::new(id),
            title: format!("Topic {id}"),
            subject: "Math".to_string(),
            description: "Core ideas.".to_string(),
            icon: "•".to_string(),
            topics: vec!["First".to_string()],
            requires: requires.iter().map(|r| NodeId::new(*r)).collect(),
            estimated_hours: Some(4.0),
            resources: None,
            questions: None,
        }
    }

    fn roadmap_with(nodes: Vec<Node>) -> Roadmap {
        Roadmap::new(vec![Level {
            id: LevelId::new("l1"),
            label: "L1".to_string(),
            badge: "badge".to_string(),
            nodes,
        }])
        .unwrap()
    }

    fn done(ids: &[&str]) -> DoneSet {
        ids.iter().map(|id| NodeId::new(*id)).collect()
    }

    #[test]
    fn banner_has_three_distinct_states() {
        let rm = roadmap_with(vec![node("a", &[]), node("b", &["a"])]);

        let a = rm.node(&NodeId::new("a")).unwrap();
        let vm = build_detail_vm(a, &DoneSet::new(), &rm);
        assert_eq!(vm.banner, PrereqBanner::NoneDeclared);

        let b = rm.node(&NodeId::new("b")).unwrap();
        let vm = build_detail_vm(b, &DoneSet::new(), &rm);
        assert_eq!(
            vm.banner,
            PrereqBanner::Pending {
                titles: vec!["Topic a".to_string()]
            }
        );

        let vm = build_detail_vm(b, &done(&["a"]), &rm);
        assert_eq!(
            vm.banner,
            PrereqBanner::Satisfied {
                titles: vec!["Topic a".to_string()]
            }
        );
    }

    #[test]
    fn action_tracks_lock_and_done_state() {
        let rm = roadmap_with(vec![node("a", &[]), node("b", &["a"])]);
        let b = rm.node(&NodeId::new("b")).unwrap();

        let vm = build_detail_vm(b, &DoneSet::new(), &rm);
        assert!(vm.action.is_locked());
        assert_eq!(vm.action.label(), "Complete first: Topic a");

        let vm = build_detail_vm(b, &done(&["a"]), &rm);
        assert_eq!(vm.action, MarkAction::Mark);

        let vm = build_detail_vm(b, &done(&["a", "b"]), &rm);
        assert_eq!(vm.action, MarkAction::Undo);
    }

    #[test]
    fn done_node_with_pending_prereq_shows_both_states() {
        let rm = roadmap_with(vec![node("a", &[]), node("b", &["a"])]);
        let b = rm.node(&NodeId::new("b")).unwrap();

        // "b" completed, then "a" un-done: done badge stays, banner reverts
        // to pending, and the action offers undo rather than re-locking.
        let vm = build_detail_vm(b, &done(&["b"]), &rm);
        assert!(vm.is_done);
        assert_eq!(
            vm.banner,
            PrereqBanner::Pending {
                titles: vec!["Topic a".to_string()]
            }
        );
        assert_eq!(vm.action, MarkAction::Undo);
    }

    #[test]
    fn unsafe_resources_never_render() {
        let mut nd = node("a", &[]);
        nd.resources = Some(vec![
            Resource {
                name: "evil".to_string(),
                url: "javascript:alert(1)".to_string(),
            },
            Resource {
                name: "Example".to_string(),
                url: "https://example.com/".to_string(),
            },
        ]);
        let rm = roadmap_with(vec![nd]);
        let a = rm.node(&NodeId::new("a")).unwrap();
        let vm = build_detail_vm(a, &DoneSet::new(), &rm);

        let entries = vm.resources.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].href, "https://example.com/");
    }

    #[test]
    fn missing_resource_list_falls_back_to_defaults() {
        let rm = roadmap_with(vec![node("a", &[])]);
        let a = rm.node(&NodeId::new("a")).unwrap();
        let vm = build_detail_vm(a, &DoneSet::new(), &rm);
        assert!(matches!(&vm.resources, ResourceListVm::Fallback(entries) if entries.len() == 2));
    }

    #[test]
    fn all_unsafe_resources_show_empty_placeholder() {
        let mut nd = node("a", &[]);
        nd.resources = Some(vec![Resource {
            name: "evil".to_string(),
            url: "data:text/html,x".to_string(),
        }]);
        let rm = roadmap_with(vec![nd]);
        let a = rm.node(&NodeId::new("a")).unwrap();
        let vm = build_detail_vm(a, &DoneSet::new(), &rm);
        assert_eq!(vm.resources, ResourceListVm::Empty);
    }

    #[test]
    fn questions_default_to_self_reflection_prompt() {
        let rm = roadmap_with(vec![node("a", &[])]);
        let a = rm.node(&NodeId::new("a")).unwrap();
        let vm = build_detail_vm(a, &DoneSet::new(), &rm);
        assert_eq!(vm.questions.len(), 1);
        assert_eq!(
            vm.questions[0].prompt,
            "Explain in your own words: Topic a."
        );
    }

    #[test]
    fn supplied_questions_are_numbered() {
        let mut nd = node("a", &[]);
        nd.questions = Some(vec![
            Question {
                prompt: "What is x?".to_string(),
                answer: Some("An unknown.".to_string()),
            },
            Question {
                prompt: "Why?".to_string(),
                answer: None,
            },
        ]);
        let rm = roadmap_with(vec![nd]);
        let a = rm.node(&NodeId::new("a")).unwrap();
        let vm = build_detail_vm(a, &DoneSet::new(), &rm);
        assert_eq!(vm.questions[0].number, 1);
        assert_eq!(vm.questions[1].number, 2);
        assert_eq!(vm.questions[1].answer, "No answer recorded.");
    }
}
