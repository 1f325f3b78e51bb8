use reading_core::Clock;
use reading_core::model::{
    QuizItem, ReadingSession, SubmissionRequest, SubmissionResult, Suggestions,
};
use reading_core::quiz::{Dialog, QuizEffect, QuizEvent, QuizState, SessionStage, transition};
use reading_core::scorer::{self, ScoreReport};

use crate::api::ReadingApi;
use crate::error::{ApiError, SessionError};

/// Owns one quiz run: the reading, the machine state and the clock used to
/// stamp submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    reading: ReadingSession,
    state: QuizState,
    clock: Clock,
}

impl QuizSession {
    #[must_use]
    pub fn new(reading: ReadingSession, clock: Clock) -> Self {
        Self {
            reading,
            state: QuizState::new(),
            clock,
        }
    }

    #[must_use]
    pub fn reading(&self) -> &ReadingSession {
        &self.reading
    }

    #[must_use]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    #[must_use]
    pub fn stage(&self) -> SessionStage {
        self.state.stage()
    }

    #[must_use]
    pub fn dialog(&self) -> Option<&Dialog> {
        self.state.dialog()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    #[must_use]
    pub fn handles_back(&self) -> bool {
        self.state.handles_back()
    }

    /// The question on screen, if the session is in the question stage.
    #[must_use]
    pub fn current_item(&self) -> Option<&QuizItem> {
        match self.stage() {
            SessionStage::Question => self.reading.item(self.state.current()),
            SessionStage::Passage | SessionStage::Submitted => None,
        }
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.stage() == SessionStage::Question && self.state.current() == self.reading.last_index()
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        match self.stage() {
            SessionStage::Question => format!(
                "Question {} of {}",
                self.state.current() + 1,
                self.reading.question_count()
            ),
            SessionStage::Submitted => "Completed".to_string(),
            SessionStage::Passage => "Reading".to_string(),
        }
    }

    /// Label of the forward button.
    #[must_use]
    pub fn primary_label(&self) -> &'static str {
        if self.is_last_question() {
            "Submit"
        } else {
            "Next"
        }
    }

    /// Apply an event and return the effect the caller must carry out.
    pub fn dispatch(&mut self, event: QuizEvent) -> Option<QuizEffect> {
        let before = self.stage();
        let step = transition(&self.reading, self.state.clone(), event);
        self.state = step.state;
        if before != self.stage() {
            log::debug!("quiz stage {before:?} -> {:?}", self.stage());
        }
        step.effect
    }

    /// Mark the session as submitting and return the payload to send.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Submitting` while a submission is in flight,
    /// `SessionError::Completed` after a successful submission, and
    /// `SessionError::NotReady` outside the question stage.
    pub fn begin_submit(&mut self) -> Result<SubmissionRequest, SessionError> {
        if self.is_submitting() {
            return Err(SessionError::Submitting);
        }
        match self.stage() {
            SessionStage::Submitted => return Err(SessionError::Completed),
            SessionStage::Passage => return Err(SessionError::NotReady),
            SessionStage::Question => {}
        }
        match self.dispatch(QuizEvent::ConfirmSubmit) {
            Some(QuizEffect::Submit(request)) => Ok(request),
            _ => Err(SessionError::NotReady),
        }
    }

    /// Record the backend's answer to a submission started by `begin_submit`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SubmitFailed` when `outcome` is an error; the
    /// session stays on its question so the user can retry.
    pub fn complete_submit(
        &mut self,
        request: SubmissionRequest,
        outcome: Result<Suggestions, ApiError>,
    ) -> Result<(), SessionError> {
        match outcome {
            Ok(suggestions) => {
                log::info!(
                    "submitted {} answers, score {}",
                    request.answers.len(),
                    request.score
                );
                let result = SubmissionResult::new(request, suggestions, self.clock.now());
                self.dispatch(QuizEvent::SubmitSucceeded(result));
                Ok(())
            }
            Err(err) => {
                log::warn!("submission failed: {err}");
                self.dispatch(QuizEvent::SubmitFailed);
                Err(SessionError::SubmitFailed(err))
            }
        }
    }

    /// Submit through `api` in one step.
    ///
    /// # Errors
    ///
    /// See [`QuizSession::begin_submit`] and [`QuizSession::complete_submit`].
    pub async fn submit(&mut self, api: &dyn ReadingApi) -> Result<(), SessionError> {
        let request = self.begin_submit()?;
        let outcome = api.submit_result(&request).await;
        self.complete_submit(request, outcome)
    }

    /// Back to the passage with an empty ledger.
    pub fn reset(&mut self) {
        self.dispatch(QuizEvent::Reset);
    }

    #[must_use]
    pub fn result(&self) -> Option<&SubmissionResult> {
        self.state.result()
    }

    /// Scored review, available once submitted.
    #[must_use]
    pub fn review(&self) -> Option<ScoreReport> {
        self.result()?;
        Some(scorer::score(self.state.ledger(), self.reading.quiz()))
    }
}
