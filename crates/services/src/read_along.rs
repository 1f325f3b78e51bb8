//! Sentence-by-sentence read-along playback.
//!
//! The player lives on the UI thread. Each `play()` starts a new generation;
//! completion callbacks carry the generation they were issued for and are
//! ignored once it is superseded.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use reading_core::sentence::split_sentences;

use crate::speech::{SpeechEngine, SpeechOptions, SpeechOutcome};

/// Snapshot of the player for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadAlongState {
    pub sentences: Vec<String>,
    /// Sentence being spoken, `None` when idle.
    pub current_index: Option<usize>,
    pub playing: bool,
}

type Listener = Rc<dyn Fn(&ReadAlongState)>;

struct Inner {
    engine: Rc<dyn SpeechEngine>,
    options: SpeechOptions,
    state: ReadAlongState,
    generation: u64,
    listener: Option<Listener>,
}

/// Speaks a passage one sentence at a time, highlighting the current one.
pub struct ReadAlongPlayer {
    inner: Rc<RefCell<Inner>>,
}

impl ReadAlongPlayer {
    #[must_use]
    pub fn new(engine: Rc<dyn SpeechEngine>, text: &str) -> Self {
        Self::with_options(engine, text, SpeechOptions::default())
    }

    #[must_use]
    pub fn with_options(engine: Rc<dyn SpeechEngine>, text: &str, options: SpeechOptions) -> Self {
        let state = ReadAlongState {
            sentences: split_sentences(text),
            ..ReadAlongState::default()
        };
        Self {
            inner: Rc::new(RefCell::new(Inner {
                engine,
                options,
                state,
                generation: 0,
                listener: None,
            })),
        }
    }

    /// Called with a fresh snapshot after every state change.
    pub fn set_listener(&self, listener: impl Fn(&ReadAlongState) + 'static) {
        self.inner.borrow_mut().listener = Some(Rc::new(listener));
    }

    #[must_use]
    pub fn state(&self) -> ReadAlongState {
        self.inner.borrow().state.clone()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.inner.borrow().state.playing
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.inner.borrow().state.current_index
    }

    #[must_use]
    pub fn sentences(&self) -> Vec<String> {
        self.inner.borrow().state.sentences.clone()
    }

    /// Replace the passage, stopping any playback.
    pub fn set_text(&self, text: &str) {
        self.stop();
        self.inner.borrow_mut().state.sentences = split_sentences(text);
        notify(&self.inner);
    }

    /// Restart from the first sentence. No-op without sentences.
    pub fn play(&self) {
        if self.inner.borrow().state.sentences.is_empty() {
            return;
        }
        self.stop();
        let generation = {
            let mut inner = self.inner.borrow_mut();
            inner.state.playing = true;
            inner.generation
        };
        speak_from(&self.inner, generation, 0);
    }

    /// Cancel playback and clear the highlight. Idempotent.
    pub fn stop(&self) {
        stop_inner(&self.inner);
    }

    pub fn toggle(&self) {
        if self.is_playing() {
            self.stop();
        } else {
            self.play();
        }
    }
}

impl Drop for ReadAlongPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn notify(inner: &Rc<RefCell<Inner>>) {
    let (listener, state) = {
        let inner = inner.borrow();
        (inner.listener.clone(), inner.state.clone())
    };
    if let Some(listener) = listener {
        listener(&state);
    }
}

fn stop_inner(inner: &Rc<RefCell<Inner>>) {
    let engine = {
        let mut guard = inner.borrow_mut();
        let active = guard.state.playing || guard.state.current_index.is_some();
        if !active {
            return;
        }
        guard.generation += 1;
        guard.state.playing = false;
        guard.state.current_index = None;
        Rc::clone(&guard.engine)
    };
    engine.stop();
    notify(inner);
}

fn speak_from(inner: &Rc<RefCell<Inner>>, generation: u64, index: usize) {
    let step = {
        let mut guard = inner.borrow_mut();
        if guard.generation != generation {
            return;
        }
        match guard.state.sentences.get(index).cloned() {
            Some(text) => {
                guard.state.current_index = Some(index);
                Some((Rc::clone(&guard.engine), text, guard.options.clone()))
            }
            None => {
                guard.state.playing = false;
                guard.state.current_index = None;
                None
            }
        }
    };
    notify(inner);

    let Some((engine, text, options)) = step else {
        return;
    };
    let weak: Weak<RefCell<Inner>> = Rc::downgrade(inner);
    engine.speak(
        &text,
        &options,
        Box::new(move |outcome| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if inner.borrow().generation != generation {
                return;
            }
            match outcome {
                SpeechOutcome::Done => speak_from(&inner, generation, index + 1),
                SpeechOutcome::Stopped => stop_inner(&inner),
                SpeechOutcome::Failed(err) => {
                    log::warn!("read-along stopped after speech error: {err}");
                    stop_inner(&inner);
                }
            }
        }),
    );
}

//
// ─── READ ALOUD ───────────────────────────────────────────────────────────────
//

/// One-shot speaker for short texts such as vocabulary words.
pub struct ReadAloud {
    engine: Rc<dyn SpeechEngine>,
    options: SpeechOptions,
    speaking: Rc<Cell<bool>>,
    generation: Rc<Cell<u64>>,
}

impl ReadAloud {
    #[must_use]
    pub fn new(engine: Rc<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            options: SpeechOptions::default().with_language("en-US"),
            speaking: Rc::new(Cell::new(false)),
            generation: Rc::new(Cell::new(0)),
        }
    }

    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.speaking.get()
    }

    pub fn speak(&self, text: &str) {
        self.stop();
        let generation = self.generation.get();
        self.speaking.set(true);
        let speaking = Rc::clone(&self.speaking);
        let current = Rc::clone(&self.generation);
        self.engine.speak(
            text,
            &self.options,
            Box::new(move |outcome| {
                if current.get() != generation {
                    return;
                }
                if let SpeechOutcome::Failed(err) = outcome {
                    log::warn!("read-aloud failed: {err}");
                }
                speaking.set(false);
            }),
        );
    }

    pub fn stop(&self) {
        if !self.speaking.get() {
            return;
        }
        self.generation.set(self.generation.get() + 1);
        self.speaking.set(false);
        self.engine.stop();
    }

    pub fn toggle(&self, text: &str) {
        if self.is_speaking() {
            self.stop();
        } else {
            self.speak(text);
        }
    }
}

impl Drop for ReadAloud {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpeechError;
    use crate::speech::testing::ScriptedEngine;
    use crate::speech::NoSpeech;

    const TEXT: &str = "One. Two! Three?";

    fn player(engine: &Rc<ScriptedEngine>, text: &str) -> ReadAlongPlayer {
        ReadAlongPlayer::new(Rc::clone(engine) as Rc<dyn SpeechEngine>, text)
    }

    #[test]
    fn plays_every_sentence_in_order() {
        let engine = Rc::new(ScriptedEngine::default());
        let player = player(&engine, TEXT);

        player.play();
        assert_eq!(player.current_index(), Some(0));
        engine.finish(SpeechOutcome::Done);
        assert_eq!(player.current_index(), Some(1));
        engine.finish(SpeechOutcome::Done);
        engine.finish(SpeechOutcome::Done);

        assert_eq!(*engine.spoken.borrow(), vec!["One.", " Two!", " Three?"]);
        assert_eq!(player.state().current_index, None);
        assert!(!player.is_playing());
    }

    #[test]
    fn stop_on_idle_player_is_a_no_op() {
        let engine = Rc::new(ScriptedEngine::default());
        let player = player(&engine, TEXT);

        player.stop();
        player.stop();
        assert_eq!(engine.stops.get(), 0);
        assert_eq!(player.state().current_index, None);
    }

    #[test]
    fn play_without_sentences_does_nothing() {
        let engine = Rc::new(ScriptedEngine::default());
        let player = player(&engine, "   ");
        player.play();
        assert!(!player.is_playing());
        assert!(engine.spoken.borrow().is_empty());
    }

    #[test]
    fn stop_cancels_and_ignores_late_callbacks() {
        let engine = Rc::new(ScriptedEngine::default());
        let player = player(&engine, TEXT);

        player.play();
        player.stop();
        assert_eq!(engine.stops.get(), 1);
        assert!(!player.is_playing());
        assert_eq!(player.current_index(), None);
        assert!(!engine.has_pending());
        assert_eq!(engine.spoken.borrow().len(), 1);
    }

    #[test]
    fn replay_restarts_from_the_first_sentence() {
        let engine = Rc::new(ScriptedEngine::default());
        let player = player(&engine, TEXT);

        player.play();
        engine.finish(SpeechOutcome::Done);
        player.play();

        assert_eq!(player.current_index(), Some(0));
        assert!(player.is_playing());
        assert_eq!(*engine.spoken.borrow(), vec!["One.", " Two!", "One."]);
    }

    #[test]
    fn engine_stop_or_error_ends_playback() {
        let engine = Rc::new(ScriptedEngine::default());
        let player = player(&engine, TEXT);

        player.play();
        engine.finish(SpeechOutcome::Stopped);
        assert!(!player.is_playing());

        player.play();
        engine.finish(SpeechOutcome::Failed(SpeechError::Engine("boom".into())));
        assert!(!player.is_playing());
        assert_eq!(player.current_index(), None);
    }

    #[test]
    fn synchronous_failures_do_not_loop() {
        let player = ReadAlongPlayer::new(Rc::new(NoSpeech), TEXT);
        player.play();
        assert!(!player.is_playing());
    }

    #[test]
    fn toggle_and_listener_follow_state() {
        let engine = Rc::new(ScriptedEngine::default());
        let player = player(&engine, TEXT);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        player.set_listener(move |state| sink.borrow_mut().push(state.current_index));

        player.toggle();
        assert!(player.is_playing());
        player.toggle();
        assert!(!player.is_playing());
        assert_eq!(*seen.borrow(), vec![Some(0), None]);
    }

    #[test]
    fn dropping_the_player_stops_speech() {
        let engine = Rc::new(ScriptedEngine::default());
        {
            let player = player(&engine, TEXT);
            player.play();
        }
        assert_eq!(engine.stops.get(), 1);
    }

    #[test]
    fn set_text_resets_sentences() {
        let engine = Rc::new(ScriptedEngine::default());
        let player = player(&engine, TEXT);
        player.play();
        player.set_text("Only one");

        assert_eq!(player.sentences(), vec!["Only one"]);
        assert!(!player.is_playing());
    }

    #[test]
    fn read_aloud_tracks_speaking() {
        let engine = Rc::new(ScriptedEngine::default());
        let speaker = ReadAloud::new(Rc::clone(&engine) as Rc<dyn SpeechEngine>);

        speaker.toggle("harbor");
        assert!(speaker.is_speaking());
        assert_eq!(engine.options.borrow()[0].language.as_deref(), Some("en-US"));
        engine.finish(SpeechOutcome::Done);
        assert!(!speaker.is_speaking());

        speaker.speak("tide");
        speaker.toggle("tide");
        assert!(!speaker.is_speaking());
        assert_eq!(engine.stops.get(), 1);
    }
}
