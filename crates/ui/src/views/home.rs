use dioxus::prelude::*;
use dioxus_router::use_navigator;
use reading_core::model::{AnswerLedger, TodayResult};
use reading_core::scorer::percent;

use super::read_along::PassageReadAlong;
use super::review::{ResultReview, ScoreRing};
use super::suggestions::SuggestionsPanel;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{build_review, format_reading_date};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let reading_service = ctx.reading_service();

    let resource = use_resource(move || {
        let reading_service = reading_service.clone();
        async move { reading_service.today().await.map_err(ViewError::from) }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page home",
            h2 { "Welcome Back!" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(today) => rsx! {
                    TodayPanel { today }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
            }
        }
    }
}

#[component]
fn TodayPanel(today: TodayResult) -> Element {
    let navigator = use_navigator();
    let date = format_reading_date(&today.date);

    let Some(result) = today.completed().cloned() else {
        return rsx! {
            p { class: "home__subtitle", "Today's reading is ready. Take your time with it." }
            div { class: "card home__today",
                p { class: "home__date", "{date}" }
                if !today.passage.title.is_empty() {
                    h3 { "{today.passage.title}" }
                }
                button {
                    class: "btn btn-primary",
                    id: "home-start",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Reading {});
                    },
                    "Start Today's Quiz"
                }
            }
        };
    };

    let total = u32::try_from(today.quiz.len()).unwrap_or(u32::MAX);
    let score_percent = percent(result.score, total);
    let review = build_review(&today.quiz, &AnswerLedger::from_submitted(&result.answers));

    rsx! {
        p { class: "home__subtitle", "You've finished today's reading. Here's how it went." }
        div { class: "card home__today",
            p { class: "home__date", "{date}" }
            h3 { "{today.passage.title}" }
            ScoreRing { percent: score_percent, correct: result.score, total }
        }
        SuggestionsPanel { suggestions: today.suggestions.clone() }
        section { class: "home__passage",
            h3 { "Passage" }
            PassageReadAlong { text: today.passage.body.clone() }
        }
        ResultReview { review }
    }
}
