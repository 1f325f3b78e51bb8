use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{HistoryView, HomeView, ReadingView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/history", HistoryView)] History {},
    #[end_layout]
    #[route("/reading", ReadingView)] Reading {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Daily Reading" }
            ul {
                li { Link { to: Route::Home {}, "Today" } }
                li { Link { to: Route::History {}, "History" } }
            }
            AccountPanel {}
        }
    }
}

#[component]
fn AccountPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();

    let account = use_resource({
        let auth = auth.clone();
        move || {
            let auth = auth.clone();
            async move {
                let _ = auth.token().await;
                (auth.user_id(), auth.is_signed_out())
            }
        }
    });

    let sign_out = move |_: MouseEvent| {
        let auth = auth.clone();
        spawn(async move {
            if let Err(err) = auth.sign_out().await {
                log::warn!("provider sign-out failed: {err}");
            }
            let mut account = account;
            account.restart();
        });
    };

    let (user_id, signed_out) = account
        .read()
        .as_ref()
        .cloned()
        .unwrap_or((None, false));

    rsx! {
        div { class: "account",
            if signed_out {
                p { class: "account__status", "Signed out" }
            } else {
                if let Some(user_id) = user_id {
                    p { class: "account__status", "Signed in as {user_id}" }
                }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: sign_out,
                    "Sign out"
                }
            }
        }
    }
}
