use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

/// Root component: stylesheet, window title, router, and a last-resort error
/// surface so a render failure never leaves a blank window.
#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Roadmap" }

        ErrorBoundary {
            handle_error: |errors: ErrorContext| rsx! {
                div { class: "fatal",
                    h1 { "Something went wrong" }
                    p { "Restart the app to continue. Details:" }
                    pre { "{errors:?}" }
                }
            },
            Router::<Route> {}
        }
    }
}
