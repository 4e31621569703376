use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use roadmap_core::model::NodeId;
use roadmap_core::roadmap::Roadmap;
use roadmap_core::time::fixed_clock;
use services::{AppServices, ProgressService, TransferService, roadmap_from_json};
use storage::repository::{InMemoryRepository, ProgressRepository, Storage};

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::RoadmapView;
use crate::views::roadmap::state::sync_open_node;
use crate::views::roadmap::use_roadmap_state;

/// Three-node dataset: `algebra` is free, `calculus` requires it, and the
/// resource lists cover the unsafe-scheme, safe, and fallback cases.
pub const TEST_DATASET: &str = r#"[
    {
        "id": "foundations",
        "label": "Foundations",
        "badge": "badge-green",
        "nodes": [
            {
                "id": "algebra",
                "title": "Algebra Basics",
                "sub": "Algebra",
                "desc": "Expressions and equations.",
                "icon": "x",
                "topics": ["Linear equations", "Factoring"],
                "estimatedHours": 6,
                "resources": [
                    {"name": "evil", "url": "javascript:alert(1)"},
                    {"name": "Example", "url": "https://example.com/algebra"}
                ]
            },
            {
                "id": "geometry",
                "title": "Geometry",
                "sub": "Geometry",
                "desc": "Shapes and proofs.",
                "icon": "△",
                "topics": ["Triangles"],
                "estimatedHours": 5
            }
        ]
    },
    {
        "id": "advanced",
        "label": "Advanced",
        "badge": "badge-blue",
        "nodes": [
            {
                "id": "calculus",
                "title": "Calculus",
                "sub": "Analysis",
                "desc": "Limits and derivatives.",
                "icon": "∫",
                "topics": ["Limits"],
                "requires": ["algebra"],
                "estimatedHours": 9
            }
        ]
    }
]"#;

#[derive(Clone)]
struct TestApp {
    roadmap: Arc<Roadmap>,
    progress: Arc<ProgressService>,
    transfer: Arc<TransferService>,
}

impl UiApp for TestApp {
    fn roadmap(&self) -> Arc<Roadmap> {
        Arc::clone(&self.roadmap)
    }

    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn transfer(&self) -> Arc<TransferService> {
        Arc::clone(&self.transfer)
    }
}

#[derive(Clone, PartialEq)]
struct HarnessOpen(Option<String>);

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    open: Option<String>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| HarnessOpen(props.open.clone()));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_roadmap_state(&ctx);
    use_context_provider(|| state);

    // Mirror of `routes::Layout`: unknown identifiers render as closed.
    let open = use_context::<HarnessOpen>();
    let open_id = open
        .0
        .filter(|id| ctx.roadmap().contains(&NodeId::new(id.as_str())));
    sync_open_node(&state, open_id.as_ref());

    rsx! { RoadmapView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: Arc<InMemoryRepository>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Lets spawned futures (initial progress load, debounce timers) settle.
    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Builds the harness over in-memory storage. `seeded_done` is written to the
/// store before the view loads, so it arrives through the normal restore
/// path.
pub async fn setup_view_harness(open: Option<&str>, seeded_done: &[&str]) -> ViewHarness {
    let repo = Arc::new(InMemoryRepository::new());
    if !seeded_done.is_empty() {
        let ids: Vec<String> = seeded_done.iter().map(ToString::to_string).collect();
        repo.save(&ids).await.expect("seed progress");
    }

    let storage = Storage {
        progress: repo.clone(),
    };
    let roadmap = Arc::new(roadmap_from_json(TEST_DATASET).expect("test dataset"));
    let services = AppServices::with_storage(storage, fixed_clock(), roadmap);

    let app = Arc::new(TestApp {
        roadmap: services.roadmap(),
        progress: services.progress(),
        transfer: services.transfer(),
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            open: open.map(ToString::to_string),
        },
    );

    ViewHarness { dom, repo }
}
