use dioxus::prelude::*;

use crate::vm::LevelVm;

#[component]
pub fn LevelSection(vm: LevelVm, show_connector: bool, on_open: Callback<String>) -> Element {
    if !vm.visible {
        return rsx! {};
    }

    rsx! {
        section { class: "level", "data-level-id": "{vm.id}",
            div { class: "level-header",
                span { class: "{vm.badge_class}", "{vm.label}" }
            }

            div { class: "nodes-row",
                for node in vm.nodes.iter().filter(|n| n.visible).cloned() {
                    button {
                        id: "{node.dom_id}",
                        class: "{node.visual.css_class()}",
                        r#type: "button",
                        aria_label: "{node.aria_label}",
                        aria_haspopup: "dialog",
                        aria_controls: "modal-box",
                        onclick: move |_| on_open.call(node.id.clone()),

                        div { class: "node-icon", aria_hidden: "true", "{node.icon}" }
                        div { class: "node-title", "{node.title}" }
                        div { class: "node-sub", "{node.subject}" }
                        if let Some(hours) = &node.hours_label {
                            div { class: "node-hours", "{hours}" }
                        }
                    }
                }
            }

            if show_connector {
                div { class: "connector", aria_hidden: "true", "↓" }
            }
        }
    }
}
