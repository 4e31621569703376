//! Focus-trap derivation for the detail panel.
//!
//! The focusable set is derived from whatever is currently visible: panel
//! chrome, tab buttons, and the active tab's interactive content. Anything
//! in a hidden tab is excluded, as is any disabled button. The keydown
//! handler asks the DOM only for the currently focused element id; the wrap
//! arithmetic lives here where it can be unit-tested.

use super::detail_vm::{DetailVm, ResourceListVm};

/// DOM id of the panel's close button.
pub const CLOSE_BUTTON_ID: &str = "detail-close";

/// DOM id of the primary action button.
pub const MARK_BUTTON_ID: &str = "mark-btn";

/// Tabs of the detail panel; exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailTab {
    #[default]
    Overview,
    Topics,
    Resources,
    Questions,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::Overview,
        DetailTab::Topics,
        DetailTab::Resources,
        DetailTab::Questions,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DetailTab::Overview => "Overview",
            DetailTab::Topics => "Topics",
            DetailTab::Resources => "Resources",
            DetailTab::Questions => "Questions",
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            DetailTab::Overview => "overview",
            DetailTab::Topics => "topics",
            DetailTab::Resources => "resources",
            DetailTab::Questions => "questions",
        }
    }

    #[must_use]
    pub fn button_id(self) -> String {
        format!("tab-btn-{}", self.key())
    }

    #[must_use]
    pub fn panel_id(self) -> String {
        format!("tab-{}", self.key())
    }

    /// Roving tab order, wrapping at the ends (ArrowRight).
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Roving tab order, wrapping at the ends (ArrowLeft).
    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[must_use]
pub fn resource_link_id(index: usize) -> String {
    format!("resource-link-{index}")
}

#[must_use]
pub fn question_toggle_id(index: usize) -> String {
    format!("question-toggle-{index}")
}

/// The ordered focusable element ids inside the open panel.
#[must_use]
pub fn focusable_targets(detail: &DetailVm, active: DetailTab) -> Vec<String> {
    let mut targets = vec![CLOSE_BUTTON_ID.to_string()];
    targets.extend(DetailTab::ALL.iter().map(|tab| tab.button_id()));

    match active {
        DetailTab::Overview => {
            // A disabled mark button cannot take focus and must not trap it.
            if !detail.action.is_locked() {
                targets.push(MARK_BUTTON_ID.to_string());
            }
        }
        DetailTab::Topics => {}
        DetailTab::Resources => {
            if !matches!(detail.resources, ResourceListVm::Empty) {
                for (i, _) in detail.resources.entries().iter().enumerate() {
                    targets.push(resource_link_id(i));
                }
            }
        }
        DetailTab::Questions => {
            for (i, _) in detail.questions.iter().enumerate() {
                targets.push(question_toggle_id(i));
            }
        }
    }

    targets
}

/// The id to focus after a Tab/Shift+Tab press, wrapping first↔last.
///
/// `current` is the id of `document.activeElement`; anything unknown (or
/// focus sitting outside the trap) snaps back to the boundary element.
#[must_use]
pub fn next_focus<'a>(
    targets: &'a [String],
    current: Option<&str>,
    backwards: bool,
) -> Option<&'a str> {
    if targets.is_empty() {
        return None;
    }
    let position = current.and_then(|id| targets.iter().position(|t| t == id));
    let next = match position {
        None => {
            if backwards {
                targets.len() - 1
            } else {
                0
            }
        }
        Some(p) => {
            if backwards {
                (p + targets.len() - 1) % targets.len()
            } else {
                (p + 1) % targets.len()
            }
        }
    };
    Some(targets[next].as_str())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
