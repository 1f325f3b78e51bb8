/// Returns true for characters that end a sentence.
#[must_use]
pub fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Split passage text into sentences for read-along.
///
/// A sentence runs up to and including a run of terminators (`"Wait?!"` stays
/// whole). Whitespace after a terminator starts the next fragment, and fragments
/// that are only whitespace are dropped. Text without terminators is a single
/// sentence; empty or blank text has none.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut in_terminators = false;

    for (offset, ch) in text.char_indices() {
        if is_terminator(ch) {
            in_terminators = true;
        } else if in_terminators {
            push_fragment(&mut sentences, &text[start..offset]);
            start = offset;
            in_terminators = false;
        }
    }
    push_fragment(&mut sentences, &text[start..]);

    sentences
}

fn push_fragment(sentences: &mut Vec<String>, fragment: &str) {
    if !fragment.trim().is_empty() {
        sentences.push(fragment.to_string());
    }
}
