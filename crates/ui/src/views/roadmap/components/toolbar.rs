use dioxus::prelude::*;

use roadmap_core::search::StatusFilter;

use crate::vm::ProgressVm;

const FILTERS: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Done, StatusFilter::Pending];

#[component]
pub fn Toolbar(
    progress: ProgressVm,
    search_input: String,
    filter: StatusFilter,
    on_search: Callback<String>,
    on_filter: Callback<StatusFilter>,
    on_next: Callback<()>,
    on_share: Callback<()>,
    on_export: Callback<()>,
    on_import_open: Callback<()>,
    on_clear_open: Callback<()>,
) -> Element {
    rsx! {
        header { class: "toolbar",
            h1 { class: "toolbar-title", "Learning Roadmap" }

            div {
                class: "progress-bar-wrap",
                role: "progressbar",
                aria_valuemin: "0",
                aria_valuemax: "{progress.total}",
                aria_valuenow: "{progress.done}",
                div { class: "progress-bar", id: "pbar", style: "{progress.bar_style}" }
            }
            div { class: "progress-labels",
                span { id: "plabel", "{progress.count_label}" }
                span { id: "hlabel", "{progress.hours_label}" }
            }

            div { class: "toolbar-controls",
                input {
                    id: "search-input",
                    class: "search-input",
                    r#type: "search",
                    placeholder: "Search topics…",
                    aria_label: "Search topics",
                    value: "{search_input}",
                    oninput: move |evt| on_search.call(evt.value()),
                }

                div { class: "filters", role: "group", aria_label: "Filter by status",
                    for option in FILTERS {
                        button {
                            class: if option == filter { "filter-btn active" } else { "filter-btn" },
                            r#type: "button",
                            aria_pressed: if option == filter { "true" } else { "false" },
                            onclick: move |_| on_filter.call(option),
                            "{option.label()}"
                        }
                    }
                }

                div { class: "toolbar-actions",
                    button {
                        id: "next-btn",
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_next.call(()),
                        "Next topic"
                    }
                    button {
                        id: "share-btn",
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| on_share.call(()),
                        "Share"
                    }
                    button {
                        id: "export-btn",
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| on_export.call(()),
                        "Export"
                    }
                    button {
                        id: "import-btn",
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| on_import_open.call(()),
                        "Import"
                    }
                    button {
                        id: "clear-btn",
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: move |_| on_clear_open.call(()),
                        "Clear progress"
                    }
                }
            }
        }
    }
}
