use dioxus::prelude::*;

/// Confirmation and import dialogs layered over the roadmap page.
#[component]
pub fn RoadmapOverlays(
    show_clear_modal: bool,
    show_import_modal: bool,
    import_text: String,
    on_clear_cancel: Callback<()>,
    on_clear_confirm: Callback<()>,
    on_import_input: Callback<String>,
    on_import_cancel: Callback<()>,
    on_import_confirm: Callback<()>,
) -> Element {
    rsx! {
        if show_clear_modal {
            div {
                class: "overlay-backdrop",
                onclick: move |_| on_clear_cancel.call(()),
                div {
                    class: "overlay-modal",
                    onclick: move |evt| evt.stop_propagation(),
                    h3 { class: "overlay-title", "Clear all progress?" }
                    p { class: "overlay-body",
                        "This removes every completed topic saved on this device."
                    }
                    div { class: "overlay-actions",
                        button {
                            class: "btn",
                            r#type: "button",
                            onclick: move |_| on_clear_cancel.call(()),
                            "Cancel"
                        }
                        button {
                            class: "btn btn-danger",
                            r#type: "button",
                            onclick: move |_| on_clear_confirm.call(()),
                            "Clear"
                        }
                    }
                }
            }
        }
        if show_import_modal {
            div {
                class: "overlay-backdrop",
                onclick: move |_| on_import_cancel.call(()),
                div {
                    class: "overlay-modal",
                    onclick: move |evt| evt.stop_propagation(),
                    h3 { class: "overlay-title", "Import progress" }
                    p { class: "overlay-body",
                        "Paste an exported progress document. The imported set replaces the current one."
                    }
                    textarea {
                        class: "overlay-textarea",
                        id: "import-text",
                        rows: "8",
                        placeholder: "{{\"version\": 1, \"done\": [...]}}",
                        value: "{import_text}",
                        oninput: move |evt| on_import_input.call(evt.value()),
                    }
                    div { class: "overlay-actions",
                        button {
                            class: "btn",
                            r#type: "button",
                            onclick: move |_| on_import_cancel.call(()),
                            "Cancel"
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| on_import_confirm.call(()),
                            "Import"
                        }
                    }
                }
            }
        }
    }
}
