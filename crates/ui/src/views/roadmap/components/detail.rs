use dioxus::prelude::*;

use crate::vm::{
    CLOSE_BUTTON_ID, DetailTab, DetailVm, MARK_BUTTON_ID, PrereqBanner, ResourceListVm,
    focusable_targets, next_focus, question_toggle_id, resource_link_id,
};

use super::super::scripts;

/// The node detail panel with modal semantics: role=dialog, a focus trap over
/// the currently visible subtree, Escape to close, and inert background
/// (applied by the router layout while a node route is open).
#[component]
pub fn DetailModal(
    vm: DetailVm,
    active_tab: DetailTab,
    on_close: Callback<()>,
    on_toggle: Callback<String>,
    on_tab: Callback<DetailTab>,
) -> Element {
    let trap_vm = vm.clone();
    let on_keydown = move |evt: KeyboardEvent| {
        match evt.data.key() {
            Key::Escape => {
                evt.prevent_default();
                on_close.call(());
            }
            Key::Tab => {
                // The platform's tab order would escape the dialog; walk our
                // own focusable set instead, wrapping first↔last.
                evt.prevent_default();
                let backwards = evt.data.modifiers().contains(Modifiers::SHIFT);
                let targets = focusable_targets(&trap_vm, active_tab);
                spawn(async move {
                    let current = scripts::active_element_id().await;
                    if let Some(next) = next_focus(&targets, current.as_deref(), backwards) {
                        scripts::focus_element(next).await;
                    }
                });
            }
            _ => {}
        }
    };

    let on_tabs_keydown = move |evt: KeyboardEvent| {
        let next = match evt.data.key() {
            Key::ArrowRight => active_tab.next(),
            Key::ArrowLeft => active_tab.prev(),
            Key::Home => DetailTab::Overview,
            Key::End => DetailTab::Questions,
            _ => return,
        };
        evt.prevent_default();
        on_tab.call(next);
        let button_id = next.button_id();
        spawn(async move {
            scripts::focus_element(&button_id).await;
        });
    };

    let node_id = vm.id.clone();

    rsx! {
        div {
            class: "modal-overlay open",
            id: "modal",
            onclick: move |_| on_close.call(()),

            div {
                class: "modal-box",
                id: "modal-box",
                role: "dialog",
                aria_modal: "true",
                aria_labelledby: "modal-title",
                onclick: move |evt| evt.stop_propagation(),
                onkeydown: on_keydown,

                header { class: "modal-header",
                    span { class: "modal-icon", id: "modal-icon", aria_hidden: "true", "{vm.icon}" }
                    h2 { class: "modal-title", id: "modal-title", "{vm.title}" }
                    button {
                        id: CLOSE_BUTTON_ID,
                        class: "modal-close",
                        r#type: "button",
                        aria_label: "Close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }

                div { class: "modal-tags", id: "modal-tags",
                    span { class: "tag", "{vm.subject_tag}" }
                    if let Some(hours) = &vm.hours_tag {
                        span { class: "tag tag-hours", "{hours}" }
                    }
                }

                div { class: "modal-tabs", role: "tablist", onkeydown: on_tabs_keydown,
                    for tab in DetailTab::ALL {
                        button {
                            id: "{tab.button_id()}",
                            class: if tab == active_tab { "tab-btn active" } else { "tab-btn" },
                            r#type: "button",
                            role: "tab",
                            aria_selected: if tab == active_tab { "true" } else { "false" },
                            aria_controls: "{tab.panel_id()}",
                            tabindex: if tab == active_tab { "0" } else { "-1" },
                            onclick: move |_| on_tab.call(tab),
                            "{tab.label()}"
                        }
                    }
                }

                section {
                    class: "tab-panel",
                    id: "{DetailTab::Overview.panel_id()}",
                    role: "tabpanel",
                    hidden: active_tab != DetailTab::Overview,

                    div {
                        class: "modal-desc",
                        id: "modal-desc",
                        dangerous_inner_html: "{vm.description_html}",
                    }

                    match &vm.banner {
                        PrereqBanner::NoneDeclared => rsx! {},
                        PrereqBanner::Satisfied { titles } => {
                            let list = titles.join(", ");
                            rsx! {
                                div { class: "prereq-block done-req", id: "prereq-block",
                                    "Prerequisite complete: {list}"
                                }
                            }
                        }
                        PrereqBanner::Pending { titles } => {
                            let list = titles.join(", ");
                            rsx! {
                                div { class: "prereq-block pending", id: "prereq-block",
                                    "Prerequisite pending: {list}"
                                }
                            }
                        }
                    }

                    button {
                        id: MARK_BUTTON_ID,
                        class: if vm.is_done { "mark-btn undone" } else { "mark-btn" },
                        r#type: "button",
                        disabled: vm.action.is_locked(),
                        onclick: move |_| on_toggle.call(node_id.clone()),
                        "{vm.action.label()}"
                    }
                }

                section {
                    class: "tab-panel",
                    id: "{DetailTab::Topics.panel_id()}",
                    role: "tabpanel",
                    hidden: active_tab != DetailTab::Topics,

                    ul { class: "modal-topics", id: "modal-topics",
                        for topic in vm.topics.iter() {
                            li { "{topic}" }
                        }
                    }
                }

                section {
                    class: "tab-panel",
                    id: "{DetailTab::Resources.panel_id()}",
                    role: "tabpanel",
                    hidden: active_tab != DetailTab::Resources,

                    div { class: "modal-resources", id: "modal-resources",
                        if matches!(vm.resources, ResourceListVm::Empty) {
                            div { class: "resource-item", "No resources available." }
                        } else {
                            for (i, resource) in vm.resources.entries().iter().enumerate() {
                                div { class: "resource-item",
                                    a {
                                        id: "{resource_link_id(i)}",
                                        href: "{resource.href}",
                                        target: "_blank",
                                        rel: "noopener noreferrer",
                                        "{resource.name}"
                                    }
                                }
                            }
                        }
                    }
                }

                section {
                    class: "tab-panel",
                    id: "{DetailTab::Questions.panel_id()}",
                    role: "tabpanel",
                    hidden: active_tab != DetailTab::Questions,

                    div { class: "modal-questions", id: "modal-questions",
                        for (i, question) in vm.questions.iter().enumerate() {
                            details { class: "question-item",
                                summary { id: "{question_toggle_id(i)}",
                                    "{question.number}. {question.prompt}"
                                }
                                p { "{question.answer}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
