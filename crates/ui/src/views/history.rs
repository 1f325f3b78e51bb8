use dioxus::prelude::*;
use reading_core::model::ResultRecord;
use reading_core::scorer::percent;
use services::history;

use super::review::{ResultReview, ScoreRing};
use super::suggestions::SuggestionsPanel;
use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{HistoryItemVm, build_review, map_history_items};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Load {
    Refresh,
    More,
}

#[component]
pub fn HistoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let api = ctx.api();
    let feed = use_signal(|| ctx.history_feed());
    let error = use_signal(|| None::<ViewError>);
    let mut selected = use_signal(|| None::<String>);

    let load = use_callback(move |kind: Load| {
        let mut feed = feed;
        let mut error = error;
        let request = match kind {
            Load::Refresh => Some(feed.write().begin_refresh()),
            Load::More => feed.write().begin_load_more(),
        };
        let Some(request) = request else {
            return;
        };
        let api = api.clone();
        spawn(async move {
            let outcome = history::fetch(api.as_ref(), &request).await;
            match feed.write().finish(&request, outcome) {
                Ok(()) => error.set(None),
                Err(_) => error.set(Some(ViewError::FetchFailed)),
            }
        });
    });

    use_effect(move || load.call(Load::Refresh));

    let (items, loading, loaded, has_more) = {
        let guard = feed.read();
        (
            map_history_items(guard.items()),
            guard.is_loading(),
            guard.is_loaded(),
            guard.has_more(),
        )
    };
    let detail = selected
        .read()
        .as_deref()
        .and_then(|id| feed.read().find(id).cloned());

    rsx! {
        div { class: "page history",
            h2 { "History" }

            if let Some(err) = *error.read() {
                p { class: "error", "{err.message()}" }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| load.call(Load::Refresh),
                    "Retry"
                }
            }

            if !loaded && loading {
                p { "Loading..." }
            } else if loaded && items.is_empty() {
                p { "No results yet. Finish today's quiz to start your history." }
            } else {
                ul { class: "history__list",
                    for item in items {
                        HistoryRow {
                            key: "{item.result_id}",
                            item: item.clone(),
                            on_open: move |id: String| selected.set(Some(id)),
                        }
                    }
                }
            }

            if has_more {
                button {
                    class: "btn btn-secondary history__more",
                    r#type: "button",
                    disabled: loading,
                    onclick: move |_| load.call(Load::More),
                    if loading { "Loading..." } else { "Load more" }
                }
            }

            if let Some(record) = detail {
                ResultDetail {
                    record,
                    on_close: move |()| selected.set(None),
                }
            }
        }
    }
}

#[component]
fn HistoryRow(item: HistoryItemVm, on_open: EventHandler<String>) -> Element {
    let id = item.result_id.clone();
    rsx! {
        li { class: "history-item",
            button {
                class: "history-item__open",
                r#type: "button",
                onclick: move |_| on_open.call(id.clone()),
                span { class: "history-item__date", "{item.date_label}" }
                span { class: "history-item__title", "{item.title}" }
                span { class: "history-item__score", "{item.score_label} ({item.percent}%)" }
            }
        }
    }
}

#[component]
fn ResultDetail(record: ResultRecord, on_close: EventHandler<()>) -> Element {
    let review = build_review(&record.passage.quiz, &record.ledger());
    let score_percent = percent(record.client_score, record.total);
    let title = record.passage.title.clone();

    rsx! {
        div {
            class: "modal-overlay",
            onkeydown: move |evt: KeyboardEvent| {
                if evt.data.key() == Key::Escape {
                    evt.prevent_default();
                    on_close.call(());
                }
            },
            div {
                class: "modal",
                role: "dialog",
                aria_modal: "true",
                header { class: "modal__header",
                    h3 { "{title}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
                ScoreRing {
                    percent: score_percent,
                    correct: record.client_score,
                    total: record.total,
                }
                SuggestionsPanel { suggestions: record.suggestions.clone() }
                ResultReview { review }
            }
        }
    }
}
