use dioxus::prelude::*;
use std::time::Duration;

use roadmap_core::progress::DoneSet;
use roadmap_core::search::StatusFilter;

use crate::context::AppContext;
use crate::vm::DetailTab;

/// Debounce window for search input.
pub const SEARCH_DEBOUNCE_MS: u64 = 250;

/// How long a transient status message stays on screen.
pub const FEEDBACK_CLEAR_MS: u64 = 2_600;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub kind: FeedbackKind,
}

/// Shared view state for the roadmap page.
///
/// Lives above the router outlet (see `routes::Layout`) so the active tab and
/// search/filter state survive open/close route transitions. Everything here
/// is transient; only the done-set reaches storage, via the progress service.
#[derive(Clone, Copy)]
pub struct RoadmapState {
    pub done: Signal<DoneSet>,
    pub progress_loaded: Signal<bool>,

    pub filter: Signal<StatusFilter>,
    /// Live text as typed; feeds the debounce.
    pub search_input: Signal<String>,
    /// Normalized query actually applied to the grid.
    pub search_query: Signal<String>,
    /// Monotonic counter; a stale debounce task sees a newer generation and
    /// drops its result (last write wins).
    pub search_generation: Signal<u64>,

    pub active_tab: Signal<DetailTab>,
    /// Mirror of the open-node route segment; the one place open/close state
    /// is written (see `sync_open_node`).
    pub open_node: Signal<Option<String>>,
    /// DOM id of the element that opened the panel, for focus restore.
    pub last_trigger: Signal<Option<String>>,

    pub feedback: Signal<Option<Feedback>>,
    pub feedback_generation: Signal<u64>,

    pub show_clear_modal: Signal<bool>,
    pub show_import_modal: Signal<bool>,
    pub import_text: Signal<String>,
}

pub fn use_roadmap_state(ctx: &AppContext) -> RoadmapState {
    let mut done = use_signal(DoneSet::new);
    let mut progress_loaded = use_signal(|| false);

    let filter = use_signal(StatusFilter::default);
    let search_input = use_signal(String::new);
    let search_query = use_signal(String::new);
    let search_generation = use_signal(|| 0_u64);

    let active_tab = use_signal(DetailTab::default);
    let open_node = use_signal(|| None::<String>);
    let last_trigger = use_signal(|| None::<String>);

    let feedback = use_signal(|| None::<Feedback>);
    let feedback_generation = use_signal(|| 0_u64);

    let show_clear_modal = use_signal(|| false);
    let show_import_modal = use_signal(|| false);
    let import_text = use_signal(String::new);

    let progress = ctx.progress();
    use_future(move || {
        let progress = progress.clone();
        async move {
            let restored = progress.load().await;
            done.set(restored);
            progress_loaded.set(true);
        }
    });

    RoadmapState {
        done,
        progress_loaded,
        filter,
        search_input,
        search_query,
        search_generation,
        active_tab,
        open_node,
        last_trigger,
        feedback,
        feedback_generation,
        show_clear_modal,
        show_import_modal,
        import_text,
    }
}

/// Mirrors the route's open-node segment into view state, idempotently.
///
/// Every open/close path (card clicks, the close button, Escape, history
/// navigation, pasted deep links) ends up here, so route state and panel
/// state cannot chase each other into a loop: writes happen only on an
/// actual change.
pub fn sync_open_node(state: &RoadmapState, open_id: Option<&String>) {
    let mut open_node = state.open_node;
    if open_node.peek().as_ref() != open_id {
        open_node.set(open_id.cloned());
    }
}

/// Shows a transient status message that clears itself.
///
/// A newer message bumps the generation, which cancels the pending clear of
/// the previous one; the auto-clear only fires if its message is still the
/// latest.
pub fn show_feedback(state: &RoadmapState, message: impl Into<String>, kind: FeedbackKind) {
    let mut feedback = state.feedback;
    let mut feedback_generation = state.feedback_generation;

    let generation = feedback_generation() + 1;
    feedback_generation.set(generation);
    feedback.set(Some(Feedback {
        message: message.into(),
        kind,
    }));

    spawn(async move {
        tokio::time::sleep(Duration::from_millis(FEEDBACK_CLEAR_MS)).await;
        if feedback_generation() == generation {
            feedback.set(None);
        }
    });
}
