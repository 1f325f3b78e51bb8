//! Text-to-speech abstraction.
//!
//! Engines run on the UI thread and report completion through a one-shot
//! callback, so nothing here is `Send`.

use crate::error::SpeechError;

/// How an utterance ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechOutcome {
    /// Spoken to the end.
    Done,
    /// Interrupted by `stop()` or by the platform.
    Stopped,
    Failed(SpeechError),
}

/// Invoked exactly once when an utterance ends.
pub type SpeechCallback = Box<dyn FnOnce(SpeechOutcome)>;

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechOptions {
    pub rate: f32,
    pub pitch: f32,
    pub voice: Option<String>,
    /// BCP 47 tag such as `en-US`.
    pub language: Option<String>,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            rate: 0.95,
            pitch: 1.0,
            voice: None,
            language: None,
        }
    }
}

impl SpeechOptions {
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }
}

/// A platform speech synthesizer.
pub trait SpeechEngine {
    /// Start speaking `text`. Implementations may call `on_finish` synchronously.
    fn speak(&self, text: &str, options: &SpeechOptions, on_finish: SpeechCallback);

    /// Cancel any in-flight utterance immediately.
    fn stop(&self);
}

/// Engine for environments without speech; every utterance fails at once.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSpeech;

impl SpeechEngine for NoSpeech {
    fn speak(&self, _text: &str, _options: &SpeechOptions, on_finish: SpeechCallback) {
        on_finish(SpeechOutcome::Failed(SpeechError::Unavailable));
    }

    fn stop(&self) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};

    use super::*;

    /// Records utterances and lets the test decide when each one ends.
    #[derive(Default)]
    pub(crate) struct ScriptedEngine {
        pub(crate) spoken: RefCell<Vec<String>>,
        pub(crate) options: RefCell<Vec<SpeechOptions>>,
        pub(crate) stops: Cell<usize>,
        pending: RefCell<Option<SpeechCallback>>,
    }

    impl ScriptedEngine {
        /// End the current utterance with `outcome`.
        pub(crate) fn finish(&self, outcome: SpeechOutcome) {
            let callback = self.pending.borrow_mut().take();
            if let Some(callback) = callback {
                callback(outcome);
            }
        }

        pub(crate) fn has_pending(&self) -> bool {
            self.pending.borrow().is_some()
        }
    }

    impl SpeechEngine for ScriptedEngine {
        fn speak(&self, text: &str, options: &SpeechOptions, on_finish: SpeechCallback) {
            self.spoken.borrow_mut().push(text.to_string());
            self.options.borrow_mut().push(options.clone());
            *self.pending.borrow_mut() = Some(on_finish);
        }

        fn stop(&self) {
            self.stops.set(self.stops.get() + 1);
            // Platforms report the interrupted utterance as stopped.
            self.finish(SpeechOutcome::Stopped);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn default_options_match_read_along_pace() {
        let options = SpeechOptions::default().with_language("en-US");
        assert!((options.rate - 0.95).abs() < f32::EPSILON);
        assert!((options.pitch - 1.0).abs() < f32::EPSILON);
        assert_eq!(options.language.as_deref(), Some("en-US"));
    }

    #[test]
    fn no_speech_fails_immediately() {
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        NoSpeech.speak(
            "hello",
            &SpeechOptions::default(),
            Box::new(move |outcome| *sink.borrow_mut() = Some(outcome)),
        );
        assert_eq!(
            *seen.borrow(),
            Some(SpeechOutcome::Failed(SpeechError::Unavailable))
        );
    }
}
