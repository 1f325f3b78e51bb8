//! Quiz session state machine.
//!
//! The machine is a pure function over [`QuizState`]; callers own the state and
//! act on the returned [`QuizEffect`] (show a dialog, call the backend, leave).

use crate::model::{AnswerLedger, ReadingSession, SubmissionRequest, SubmissionResult};

//
// ─── STAGE ────────────────────────────────────────────────────────────────────
//

/// Phase of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStage {
    #[default]
    Passage,
    Question,
    /// Terminal until the session is reset.
    Submitted,
}

//
// ─── DIALOGS ──────────────────────────────────────────────────────────────────
//

/// Data shown when the user asks to submit from the last question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitConfirmation {
    unanswered: Vec<usize>,
}

impl SubmitConfirmation {
    #[must_use]
    pub fn new(unanswered: Vec<usize>) -> Self {
        Self { unanswered }
    }

    /// Zero-based indices of unanswered questions.
    #[must_use]
    pub fn unanswered(&self) -> &[usize] {
        &self.unanswered
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.unanswered.len()
    }

    #[must_use]
    pub fn all_answered(&self) -> bool {
        self.unanswered.is_empty()
    }

    /// Where "review" jumps to.
    #[must_use]
    pub fn first_unanswered(&self) -> Option<usize> {
        self.unanswered.first().copied()
    }

    /// One-based question numbers for display.
    #[must_use]
    pub fn question_numbers(&self) -> Vec<usize> {
        self.unanswered.iter().map(|index| index + 1).collect()
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self.unanswered.len() {
            0 => "All questions are answered. Ready to submit?".to_string(),
            count => {
                let noun = if count == 1 { "question" } else { "questions" };
                let numbers = self
                    .question_numbers()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("You have {count} unanswered {noun}: {numbers}")
            }
        }
    }
}

/// Confirmation prompt currently awaiting the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Leave,
    Submit(SubmitConfirmation),
}

//
// ─── EVENTS & EFFECTS ─────────────────────────────────────────────────────────
//

/// Input to the state machine. `Back` also covers the OS back gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    Next,
    Back,
    Select(String),
    ConfirmSubmit,
    SubmitSucceeded(SubmissionResult),
    SubmitFailed,
    ReviewUnanswered,
    DismissDialog,
    ConfirmLeave,
    Reset,
}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEffect {
    RequestLeaveConfirmation,
    RequestSubmitConfirmation(SubmitConfirmation),
    Submit(SubmissionRequest),
    Leave,
}

//
// ─── STATE ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizState {
    stage: SessionStage,
    current: usize,
    ledger: AnswerLedger,
    selection_made: bool,
    submitting: bool,
    dialog: Option<Dialog>,
    result: Option<SubmissionResult>,
}

impl QuizState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stage(&self) -> SessionStage {
        self.stage
    }

    /// Current question pointer; meaningful in the question stage.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn ledger(&self) -> &AnswerLedger {
        &self.ledger
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    /// The OS back gesture is intercepted only before submission.
    #[must_use]
    pub fn handles_back(&self) -> bool {
        matches!(self.stage, SessionStage::Passage | SessionStage::Question)
    }

    /// The option picked for the current question, if any.
    #[must_use]
    pub fn current_choice(&self) -> Option<&str> {
        if self.stage == SessionStage::Question {
            self.ledger.chosen(self.current)
        } else {
            None
        }
    }

    fn at_question(mut self, index: usize) -> Self {
        self.stage = SessionStage::Question;
        self.current = index;
        self.selection_made = false;
        self.dialog = None;
        self
    }
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: QuizState,
    pub effect: Option<QuizEffect>,
}

impl Transition {
    fn stay(state: QuizState) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    fn with(state: QuizState, effect: QuizEffect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }
}

//
// ─── TRANSITION ───────────────────────────────────────────────────────────────
//

/// Apply `event` to `state` for the given reading.
///
/// Events that do not apply to the current stage return the state unchanged.
/// While a submission is in flight only its outcome and `Reset` are accepted.
#[must_use]
pub fn transition(reading: &ReadingSession, state: QuizState, event: QuizEvent) -> Transition {
    if matches!(event, QuizEvent::Reset) {
        return Transition::stay(QuizState::new());
    }

    if state.submitting {
        return match event {
            QuizEvent::SubmitSucceeded(result) => {
                let mut state = state;
                state.submitting = false;
                state.dialog = None;
                state.stage = SessionStage::Submitted;
                state.result = Some(result);
                Transition::stay(state)
            }
            QuizEvent::SubmitFailed => {
                let mut state = state;
                state.submitting = false;
                state.dialog = None;
                Transition::stay(state)
            }
            _ => Transition::stay(state),
        };
    }

    match (state.stage, event) {
        (SessionStage::Passage, QuizEvent::Next) => Transition::stay(state.at_question(0)),
        (SessionStage::Passage, QuizEvent::Back) => {
            let mut state = state;
            state.dialog = Some(Dialog::Leave);
            Transition::with(state, QuizEffect::RequestLeaveConfirmation)
        }

        (SessionStage::Question, QuizEvent::Select(option)) => {
            let valid = reading
                .item(state.current)
                .is_some_and(|item| item.has_option(&option));
            if !valid {
                return Transition::stay(state);
            }
            let mut state = state;
            state.ledger.choose(state.current, option);
            state.selection_made = true;
            Transition::stay(state)
        }
        (SessionStage::Question, QuizEvent::Next) => {
            if state.current < reading.last_index() {
                let mut state = state;
                if !state.selection_made {
                    state.ledger.skip(state.current);
                }
                let next = state.current + 1;
                Transition::stay(state.at_question(next))
            } else {
                let confirmation = SubmitConfirmation::new(
                    state.ledger.unanswered_indices(reading.question_count()),
                );
                let mut state = state;
                state.dialog = Some(Dialog::Submit(confirmation.clone()));
                Transition::with(state, QuizEffect::RequestSubmitConfirmation(confirmation))
            }
        }
        (SessionStage::Question, QuizEvent::Back) => {
            if state.current == 0 {
                let mut state = state;
                state.stage = SessionStage::Passage;
                state.selection_made = false;
                state.dialog = None;
                Transition::stay(state)
            } else {
                let previous = state.current - 1;
                Transition::stay(state.at_question(previous))
            }
        }
        (SessionStage::Question, QuizEvent::ConfirmSubmit) => {
            let request = SubmissionRequest {
                score: state.ledger.score(reading.quiz()),
                answers: state.ledger.submitted_answers(reading.question_count()),
            };
            let mut state = state;
            state.submitting = true;
            Transition::with(state, QuizEffect::Submit(request))
        }

        (SessionStage::Passage | SessionStage::Question, QuizEvent::ReviewUnanswered) => {
            match state
                .ledger
                .first_unanswered(reading.question_count())
            {
                Some(index) => Transition::stay(state.at_question(index)),
                None => Transition::stay(state),
            }
        }
        (_, QuizEvent::DismissDialog) => {
            let mut state = state;
            state.dialog = None;
            Transition::stay(state)
        }
        (SessionStage::Passage | SessionStage::Question, QuizEvent::ConfirmLeave) => {
            let mut state = state;
            state.dialog = None;
            Transition::with(state, QuizEffect::Leave)
        }

        (_, _) => Transition::stay(state),
    }
}
