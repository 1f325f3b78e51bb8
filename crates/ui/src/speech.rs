//! Speech synthesis through the webview's `speechSynthesis` API.

use dioxus::document::eval;
use dioxus::prelude::*;
use serde::Deserialize;
use services::{SpeechCallback, SpeechEngine, SpeechError, SpeechOptions, SpeechOutcome};

/// Message posted back by the utterance script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum SpeechEvent {
    Done,
    Stopped,
    Error { detail: String },
    Unavailable,
}

impl From<SpeechEvent> for SpeechOutcome {
    fn from(event: SpeechEvent) -> Self {
        match event {
            SpeechEvent::Done => Self::Done,
            SpeechEvent::Stopped => Self::Stopped,
            SpeechEvent::Error { detail } => Self::Failed(SpeechError::Engine(detail)),
            SpeechEvent::Unavailable => Self::Failed(SpeechError::Unavailable),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WebSpeechEngine;

impl SpeechEngine for WebSpeechEngine {
    fn speak(&self, text: &str, options: &SpeechOptions, on_finish: SpeechCallback) {
        let mut script = eval(&utterance_script(text, options));
        spawn(async move {
            let outcome = match script.recv::<SpeechEvent>().await {
                Ok(event) => SpeechOutcome::from(event),
                Err(err) => {
                    log::warn!("speech bridge closed: {err:?}");
                    SpeechOutcome::Failed(SpeechError::Engine("speech bridge closed".into()))
                }
            };
            on_finish(outcome);
        });
    }

    fn stop(&self) {
        let _ = eval("if (window.speechSynthesis) { window.speechSynthesis.cancel(); }");
    }
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

fn utterance_script(text: &str, options: &SpeechOptions) -> String {
    let text = js_string(text);
    let voice = options
        .voice
        .as_deref()
        .map_or_else(|| "null".to_string(), js_string);
    let language = options
        .language
        .as_deref()
        .map_or_else(|| "null".to_string(), js_string);
    let rate = options.rate;
    let pitch = options.pitch;
    format!(
        r#"(function() {{
            const synth = window.speechSynthesis;
            if (!synth || typeof SpeechSynthesisUtterance === "undefined") {{
                dioxus.send({{ kind: "unavailable" }});
                return;
            }}
            const utterance = new SpeechSynthesisUtterance({text});
            utterance.rate = {rate};
            utterance.pitch = {pitch};
            const lang = {language};
            if (lang) utterance.lang = lang;
            const voiceName = {voice};
            if (voiceName) {{
                const match = synth.getVoices().find((v) => v.name === voiceName);
                if (match) utterance.voice = match;
            }}
            utterance.onend = () => dioxus.send({{ kind: "done" }});
            utterance.onerror = (event) => {{
                if (event.error === "interrupted" || event.error === "canceled") {{
                    dioxus.send({{ kind: "stopped" }});
                }} else {{
                    dioxus.send({{ kind: "error", detail: String(event.error) }});
                }}
            }};
            synth.speak(utterance);
        }})();"#
    )
}
