use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable, use_route};

use roadmap_core::model::NodeId;
use roadmap_core::unlock::is_unlocked;

use crate::context::AppContext;
use crate::views::RoadmapView;
use crate::views::roadmap::scripts;
use crate::views::roadmap::state::{sync_open_node, use_roadmap_state};
use crate::vm::{CLOSE_BUTTON_ID, MARK_BUTTON_ID};

/// The route is the single source of truth for the detail panel: `/node/:id`
/// means the panel is open on that node, `/` means it is closed. Back/forward
/// navigation and pasted deep links drive the panel through the same routes
/// the in-app open/close actions use.
#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", RoadmapHome)] Home {},
        #[route("/node/:id", RoadmapNode)] NodeDetail { id: String },
}

#[component]
fn Layout() -> Element {
    // Panel/tab/search state lives above the Outlet so it survives route
    // changes (reopening on another node keeps the active tab).
    let ctx = use_context::<AppContext>();
    let state = use_roadmap_state(&ctx);
    use_context_provider(|| state);

    // Funnel every open/close path through one idempotent sync: card clicks,
    // the close button, Escape, back/forward, pasted deep links. A deep link
    // to an unknown node renders as closed rather than trapping focus in an
    // empty dialog.
    let route = use_route::<Route>();
    let open_id = match &route {
        Route::NodeDetail { id } if ctx.roadmap().contains(&NodeId::new(id.as_str())) => {
            Some(id.clone())
        }
        _ => None,
    };
    sync_open_node(&state, open_id.as_ref());

    // Inert background and focus hand-off track open/close transitions,
    // whichever path triggered them.
    let roadmap = ctx.roadmap();
    let mut prev_open = use_signal(|| None::<String>);
    use_effect(move || {
        let open = state.open_node.read().clone();
        if open == *prev_open.peek() {
            return;
        }
        let was_open = prev_open.peek().is_some();
        prev_open.set(open.clone());
        match open {
            Some(id) => {
                let done = state.done.peek().clone();
                let target = match roadmap.node(&NodeId::new(id.as_str())) {
                    Some(node) if !done.contains(&node.id) && !is_unlocked(node, &done) => {
                        // The mark button is disabled while locked.
                        CLOSE_BUTTON_ID
                    }
                    Some(_) => MARK_BUTTON_ID,
                    None => CLOSE_BUTTON_ID,
                }
                .to_string();
                spawn(async move {
                    scripts::set_background_inert(true).await;
                    scripts::focus_element(&target).await;
                });
            }
            None => {
                let trigger = state.last_trigger.peek().clone();
                spawn(async move {
                    scripts::set_background_inert(false).await;
                    if was_open && let Some(trigger) = trigger {
                        scripts::focus_element(&trigger).await;
                    }
                });
            }
        }
    });

    rsx! {
        div { class: "app",
            Outlet::<Route> {}
        }
    }
}

#[component]
fn RoadmapHome() -> Element {
    rsx! { RoadmapView {} }
}

#[component]
fn RoadmapNode(id: String) -> Element {
    // The open node is read from the synced view state, not from the prop;
    // the route segment only exists so the address stays shareable.
    let _ = id;
    rsx! { RoadmapView {} }
}
