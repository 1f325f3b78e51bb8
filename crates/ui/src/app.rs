use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Daily Reading" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    FatalError { details: format!("{errors:?}") }
                },
                Router::<Route> {}
            }
        }
    }
}

#[component]
fn FatalError(details: String) -> Element {
    rsx! {
        div { class: "fatal",
            h1 { "The reading app hit a problem" }
            p { "Restart the app to continue. Submitted results are kept on the server." }
            details {
                summary { "Details" }
                pre { "{details}" }
            }
        }
    }
}
