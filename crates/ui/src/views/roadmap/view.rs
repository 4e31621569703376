use dioxus::prelude::*;

use roadmap_core::model::NodeId;

use crate::context::AppContext;
use crate::vm::{DetailTab, build_detail_vm, build_progress_vm, build_roadmap_vm};

use super::actions::{
    build_clear_action, build_close_action, build_export_action, build_filter_action,
    build_import_action, build_next_action, build_open_action, build_search_action,
    build_share_action, build_toggle_action,
};
use super::components::{DetailModal, LevelSection, RoadmapOverlays, Toolbar};
use super::state::{FeedbackKind, RoadmapState};

/// The whole page: toolbar, level grid, feedback line, detail panel.
///
/// Panel visibility comes from `state.open_node`, which the layout keeps in
/// sync with the route. Everything rendered here is a pure function of the
/// current snapshot {done, query, filter, open node, active tab}; rendering
/// twice with unchanged state produces identical output.
#[component]
pub fn RoadmapView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<RoadmapState>();

    let roadmap = ctx.roadmap();
    let search = ctx.search();

    let on_open = build_open_action(&state);
    let on_close = build_close_action();
    let on_toggle = build_toggle_action(&state, &ctx);
    let on_search = build_search_action(&state, &ctx);
    let on_filter = build_filter_action(&state);
    let on_next = build_next_action(&state, &ctx);
    let on_share = build_share_action(&state);
    let on_export = build_export_action(&state, &ctx);
    let on_import = build_import_action(&state, &ctx);
    let on_clear = build_clear_action(&state, &ctx);

    let on_tab = use_callback(move |tab: DetailTab| {
        let mut active_tab = state.active_tab;
        active_tab.set(tab);
    });

    let on_import_open = use_callback(move |()| {
        let mut show_import_modal = state.show_import_modal;
        show_import_modal.set(true);
    });
    let on_import_cancel = use_callback(move |()| {
        let mut show_import_modal = state.show_import_modal;
        show_import_modal.set(false);
    });
    let on_import_input = use_callback(move |text: String| {
        let mut import_text = state.import_text;
        import_text.set(text);
    });
    let on_clear_open = use_callback(move |()| {
        let mut show_clear_modal = state.show_clear_modal;
        show_clear_modal.set(true);
    });
    let on_clear_cancel = use_callback(move |()| {
        let mut show_clear_modal = state.show_clear_modal;
        show_clear_modal.set(false);
    });

    let done = state.done.read().clone();
    let progress_loaded = *state.progress_loaded.read();
    let query = state.search_query.read().clone();
    let filter = *state.filter.read();
    let active_tab = *state.active_tab.read();
    let open_node = state.open_node.read().clone();
    let feedback = state.feedback.read().clone();
    let show_clear_modal = *state.show_clear_modal.read();
    let show_import_modal = *state.show_import_modal.read();
    let import_text = state.import_text.read().clone();

    let roadmap_vm = build_roadmap_vm(&roadmap, &search, &done, &query, filter);
    let progress_vm = build_progress_vm(&roadmap, &done);
    let detail_vm = open_node
        .as_ref()
        .and_then(|id| roadmap.node(&NodeId::new(id.as_str())))
        .map(|node| build_detail_vm(node, &done, &roadmap));

    let feedback_class = match feedback.as_ref().map(|f| f.kind) {
        Some(FeedbackKind::Error) => "feedback feedback-error",
        Some(FeedbackKind::Info) => "feedback feedback-info",
        None => "feedback",
    };
    let feedback_message = match &feedback {
        Some(feedback) => feedback.message.clone(),
        None if !progress_loaded => "Restoring saved progress…".to_string(),
        None => String::new(),
    };

    let level_count = roadmap_vm.levels.len();

    rsx! {
        div { id: "roadmap-main", class: "page",
            Toolbar {
                progress: progress_vm,
                search_input: state.search_input.read().clone(),
                filter,
                on_search,
                on_filter,
                on_next,
                on_share,
                on_export,
                on_import_open,
                on_clear_open,
            }

            main { class: "roadmap", id: "roadmap",
                for (i, level) in roadmap_vm.levels.iter().cloned().enumerate() {
                    LevelSection {
                        vm: level,
                        show_connector: i + 1 < level_count,
                        on_open,
                    }
                }

                if let Some(label) = &roadmap_vm.empty_state {
                    div { class: "empty-state visible", id: "empty-state",
                        "No topics match "
                        span { class: "empty-query", id: "empty-query", "\"{label}\"" }
                    }
                }
            }

            div {
                class: "{feedback_class}",
                id: "feedback",
                role: "status",
                aria_live: "polite",
                "{feedback_message}"
            }
        }

        if let Some(vm) = detail_vm {
            DetailModal {
                vm,
                active_tab,
                on_close,
                on_toggle,
                on_tab,
            }
        }

        RoadmapOverlays {
            show_clear_modal,
            show_import_modal,
            import_text,
            on_clear_cancel,
            on_clear_confirm: on_clear,
            on_import_input,
            on_import_cancel,
            on_import_confirm: on_import,
        }
    }
}
