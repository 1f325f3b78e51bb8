use dioxus::prelude::*;
use reading_core::model::Suggestions;

use super::read_along::ReadAloudButton;

#[component]
pub fn SuggestionsPanel(suggestions: Suggestions) -> Element {
    if !suggestions.has_vocabulary() && !suggestions.has_grammar_tip() {
        return rsx! {};
    }

    rsx! {
        section { class: "suggestions",
            h3 { "Suggestions" }
            if suggestions.has_vocabulary() {
                h4 { "Vocabulary" }
                ul { class: "suggestions__vocabulary",
                    for entry in suggestions.vocabulary.iter().cloned() {
                        li { key: "{entry.word}",
                            strong { "{entry.word}" }
                            ReadAloudButton { text: entry.word.clone() }
                            span { class: "suggestions__definition", "{entry.definition}" }
                        }
                    }
                }
            }
            if suggestions.has_grammar_tip() {
                h4 { "Grammar Tip" }
                p { class: "suggestions__grammar", "{suggestions.grammar_tip}" }
            }
        }
    }
}
