use dioxus::prelude::*;
use reading_core::scorer::ReviewFilter;

use crate::vm::ReviewVm;

#[component]
pub fn ScoreRing(percent: u8, correct: u32, total: u32) -> Element {
    rsx! {
        div { class: "score-ring", style: "--score: {percent}%",
            span { class: "score-ring__percent", "{percent}%" }
            span { class: "score-ring__detail", "{correct} of {total} correct" }
        }
    }
}

/// Per-question review with an All / Incorrect-only toggle.
#[component]
pub fn ResultReview(review: ReviewVm) -> Element {
    let mut filter = use_signal(ReviewFilter::default);
    let current = filter();
    let incorrect = review.incorrect_count();
    let visible: Vec<_> = review.visible(current).cloned().collect();

    rsx! {
        section { class: "review",
            div { class: "review__filters",
                button {
                    class: if current == ReviewFilter::All { "chip chip--active" } else { "chip" },
                    r#type: "button",
                    onclick: move |_| filter.set(ReviewFilter::All),
                    "All"
                }
                button {
                    class: if current == ReviewFilter::IncorrectOnly { "chip chip--active" } else { "chip" },
                    r#type: "button",
                    onclick: move |_| filter.set(ReviewFilter::IncorrectOnly),
                    "Incorrect only ({incorrect})"
                }
            }
            if visible.is_empty() {
                p { class: "review__empty", "Every answer was correct." }
            }
            ol { class: "review__list",
                for question in visible {
                    li { key: "{question.number}", class: "review-question",
                        p { class: "review-question__text",
                            "{question.number}. {question.question}"
                        }
                        if !question.answered {
                            p { class: "review-question__unanswered", "Not answered" }
                        }
                        ul {
                            for option in question.options.iter() {
                                li { class: option.class(), "{option.text}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
