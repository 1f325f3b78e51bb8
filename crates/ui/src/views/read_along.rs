use std::rc::Rc;

use dioxus::prelude::*;
use reading_core::sentence::split_sentences;
use services::{NoSpeech, ReadAloud, ReadAlongPlayer, ReadAlongState, SpeechEngine};

use crate::context::AppContext;
use crate::speech::WebSpeechEngine;

fn speech_engine(ctx: &AppContext) -> Rc<dyn SpeechEngine> {
    if ctx.speech_enabled() {
        Rc::new(WebSpeechEngine)
    } else {
        Rc::new(NoSpeech)
    }
}

/// Passage text with a play/stop control; the sentence being spoken is highlighted.
#[component]
pub fn PassageReadAlong(text: ReadSignal<String>) -> Element {
    let ctx = use_context::<AppContext>();
    let snapshot = use_signal(|| ReadAlongState {
        sentences: split_sentences(&text.peek()),
        ..ReadAlongState::default()
    });
    let player = use_hook(|| {
        let player = Rc::new(ReadAlongPlayer::new(speech_engine(&ctx), &text.peek()));
        player.set_listener(move |state| {
            // The listener can outlive the scope while the player is torn down.
            let mut snapshot = snapshot;
            if let Ok(mut current) = snapshot.try_write() {
                *current = state.clone();
            }
        });
        player
    });

    let retext = Rc::clone(&player);
    use_effect(move || {
        let text = text.read();
        if retext.sentences() != split_sentences(&text) {
            retext.set_text(&text);
        }
    });

    let state = snapshot.read().clone();
    let label = if state.playing { "Stop" } else { "Read Along" };

    rsx! {
        div { class: "read-along",
            button {
                class: "btn btn-secondary read-along__toggle",
                r#type: "button",
                onclick: move |_| player.toggle(),
                "{label}"
            }
            p { class: "read-along__text",
                for (index, sentence) in state.sentences.iter().enumerate() {
                    span {
                        key: "{index}",
                        class: if state.current_index == Some(index) { "sentence sentence--active" } else { "sentence" },
                        "{sentence}"
                    }
                }
            }
        }
    }
}

/// Speaks a short text such as a vocabulary word; a second click stops it.
#[component]
pub fn ReadAloudButton(text: String) -> Element {
    let ctx = use_context::<AppContext>();
    let speaker = use_hook(|| Rc::new(ReadAloud::new(speech_engine(&ctx))));

    rsx! {
        button {
            class: "btn btn-icon read-aloud",
            r#type: "button",
            title: "Listen",
            onclick: move |_| speaker.toggle(&text),
            "🔊"
        }
    }
}
