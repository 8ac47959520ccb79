use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::{AppContext, SessionContext};
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();

    // The signed-in reader as a subscribable value. Seeded from the
    // launch token resolution, updated by the navbar sign-in form.
    use_context_provider(|| SessionContext::new(ctx.launch_profile()));

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Per-view headings live in the content pane.
        document::Title { "Bookshelf" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
