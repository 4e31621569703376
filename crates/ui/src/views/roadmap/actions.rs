use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use roadmap_core::model::NodeId;
use roadmap_core::search::{StatusFilter, normalize_query};
use roadmap_core::unlock::next_available;
use services::ProgressError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{DetailTab, build_roadmap_vm, node_dom_id};

use super::scripts;
use super::state::{FeedbackKind, RoadmapState, SEARCH_DEBOUNCE_MS, show_feedback};

/// Opens the detail panel for a node, via the router (replace, no history
/// entry). Reopening while already open keeps the active tab; a fresh open
/// resets to the default tab.
pub(super) fn build_open_action(state: &RoadmapState) -> Callback<String> {
    let state = *state;
    let navigator = use_navigator();
    use_callback(move |id: String| {
        let was_open = state.open_node.peek().is_some();
        let mut active_tab = state.active_tab;
        let mut last_trigger = state.last_trigger;
        if !was_open {
            active_tab.set(DetailTab::default());
        }
        last_trigger.set(Some(node_dom_id(&id)));
        let _ = navigator.replace(Route::NodeDetail { id });
    })
}

/// Closes the panel by navigating back to the root route; focus restore and
/// inert teardown follow from the open-node effect in the router layout.
pub(super) fn build_close_action() -> Callback<()> {
    let navigator = use_navigator();
    use_callback(move |()| {
        let _ = navigator.replace(Route::Home {});
    })
}

/// Flips a node's completion through the progress service. A gate rejection
/// leaves the set untouched; a failed save keeps the in-memory change and
/// warns. Both surface in the feedback line.
pub(super) fn build_toggle_action(state: &RoadmapState, ctx: &AppContext) -> Callback<String> {
    let state = *state;
    let progress = ctx.progress();
    use_callback(move |id: String| {
        let progress = progress.clone();
        let mut done = state.done;
        spawn(async move {
            let current = done.peek().clone();
            match progress.toggle(&current, &NodeId::new(id)).await {
                Ok(result) => {
                    let persisted = result.update.persisted;
                    done.set(result.update.done);
                    if !persisted {
                        show_feedback(
                            &state,
                            "Could not save progress (storage unavailable).",
                            FeedbackKind::Error,
                        );
                    }
                }
                Err(ProgressError::Locked { pending }) => {
                    show_feedback(
                        &state,
                        format!("Complete first: {}", pending.join(", ")),
                        FeedbackKind::Error,
                    );
                }
                Err(err) => {
                    show_feedback(&state, err.to_string(), FeedbackKind::Error);
                }
            }
        });
    })
}

/// Filter buttons apply immediately; only typing is debounced.
pub(super) fn build_filter_action(state: &RoadmapState) -> Callback<StatusFilter> {
    let state = *state;
    use_callback(move |filter: StatusFilter| {
        let mut current = state.filter;
        current.set(filter);
    })
}

/// Debounced search: each keystroke supersedes the previous pending
/// recomputation (generation check, last write wins). Applying a non-empty
/// query also reports the match count.
pub(super) fn build_search_action(state: &RoadmapState, ctx: &AppContext) -> Callback<String> {
    let state = *state;
    let roadmap = ctx.roadmap();
    let search = ctx.search();
    use_callback(move |raw: String| {
        let roadmap = roadmap.clone();
        let search = search.clone();
        let mut search_input = state.search_input;
        let mut search_generation = state.search_generation;
        let mut search_query = state.search_query;

        search_input.set(raw.clone());
        let generation = search_generation.peek().wrapping_add(1);
        search_generation.set(generation);

        spawn(async move {
            tokio::time::sleep(Duration::from_millis(SEARCH_DEBOUNCE_MS)).await;
            if *search_generation.peek() != generation {
                return;
            }
            let query = normalize_query(&raw);
            search_query.set(query.clone());
            if query.is_empty() {
                return;
            }
            let done = state.done.peek().clone();
            let filter = *state.filter.peek();
            let vm = build_roadmap_vm(&roadmap, &search, &done, &query, filter);
            if vm.visible_count > 0 {
                show_feedback(
                    &state,
                    format!("{} topic(s) found.", vm.visible_count),
                    FeedbackKind::Info,
                );
            } else {
                show_feedback(&state, "No matching topics.", FeedbackKind::Error);
            }
        });
    })
}

/// Jumps to the first unlocked, not-yet-done node and opens its panel.
pub(super) fn build_next_action(state: &RoadmapState, ctx: &AppContext) -> Callback<()> {
    let state = *state;
    let roadmap = ctx.roadmap();
    let navigator = use_navigator();
    use_callback(move |()| {
        let done = state.done.peek().clone();
        match next_available(&roadmap, &done) {
            Some(node) => {
                let id = node.id.as_str().to_owned();
                let was_open = state.open_node.peek().is_some();
                let mut active_tab = state.active_tab;
                let mut last_trigger = state.last_trigger;
                if !was_open {
                    active_tab.set(DetailTab::default());
                }
                last_trigger.set(Some("next-btn".to_string()));
                let dom_id = node_dom_id(&id);
                spawn(async move {
                    scripts::scroll_into_view(&dom_id).await;
                });
                let _ = navigator.replace(Route::NodeDetail { id });
            }
            None => {
                show_feedback(
                    &state,
                    "All available topics are complete. Well done!",
                    FeedbackKind::Info,
                );
            }
        }
    })
}

/// Copies the current deep link to the clipboard.
pub(super) fn build_share_action(state: &RoadmapState) -> Callback<()> {
    let state = *state;
    use_callback(move |()| {
        spawn(async move {
            if scripts::copy_current_location().await {
                show_feedback(&state, "Link copied!", FeedbackKind::Info);
            } else {
                show_feedback(&state, "Could not copy the link.", FeedbackKind::Error);
            }
        });
    })
}

/// Copies the export document to the clipboard.
pub(super) fn build_export_action(state: &RoadmapState, ctx: &AppContext) -> Callback<()> {
    let state = *state;
    let transfer = ctx.transfer();
    use_callback(move |()| {
        let transfer = transfer.clone();
        spawn(async move {
            let done = state.done.peek().clone();
            match transfer.export(&done) {
                Ok(json) => {
                    if scripts::write_clipboard_text(&json).await {
                        show_feedback(&state, "Progress copied to clipboard.", FeedbackKind::Info);
                    } else {
                        show_feedback(
                            &state,
                            "Could not copy progress to clipboard.",
                            FeedbackKind::Error,
                        );
                    }
                }
                Err(err) => show_feedback(&state, err.to_string(), FeedbackKind::Error),
            }
        });
    })
}

/// Applies the pasted import document, replacing the done-set wholesale.
pub(super) fn build_import_action(state: &RoadmapState, ctx: &AppContext) -> Callback<()> {
    let state = *state;
    let transfer = ctx.transfer();
    let progress = ctx.progress();
    use_callback(move |()| {
        let transfer = transfer.clone();
        let progress = progress.clone();
        let mut done = state.done;
        let mut show_import_modal = state.show_import_modal;
        let mut import_text = state.import_text;
        spawn(async move {
            let text = import_text.peek().clone();
            match transfer.parse(&text) {
                Ok(ids) => {
                    let applied = progress.replace(ids).await;
                    let persisted = applied.update.persisted;
                    done.set(applied.update.done);
                    show_import_modal.set(false);
                    import_text.set(String::new());
                    if persisted {
                        let mut message =
                            format!("Import complete: {} topics.", applied.imported);
                        if applied.dropped > 0 {
                            message.push_str(&format!(" ({} unknown dropped.)", applied.dropped));
                        }
                        show_feedback(&state, message, FeedbackKind::Info);
                    } else {
                        show_feedback(
                            &state,
                            "Imported, but saving failed (storage unavailable).",
                            FeedbackKind::Error,
                        );
                    }
                }
                Err(_) => {
                    // Leave the dialog open so the text can be corrected.
                    show_feedback(&state, "Invalid import file.", FeedbackKind::Error);
                }
            }
        });
    })
}

/// Empties the done-set; the confirmation dialog has already been accepted.
pub(super) fn build_clear_action(state: &RoadmapState, ctx: &AppContext) -> Callback<()> {
    let state = *state;
    let progress = ctx.progress();
    use_callback(move |()| {
        let progress = progress.clone();
        let mut done = state.done;
        let mut show_clear_modal = state.show_clear_modal;
        spawn(async move {
            let update = progress.clear().await;
            let persisted = update.persisted;
            done.set(update.done);
            show_clear_modal.set(false);
            if persisted {
                show_feedback(&state, "Progress cleared.", FeedbackKind::Info);
            } else {
                show_feedback(
                    &state,
                    "Cleared, but saving failed (storage unavailable).",
                    FeedbackKind::Error,
                );
            }
        });
    })
}
