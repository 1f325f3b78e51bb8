use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use reqwest::StatusCode;

use reading_core::model::{
    ReadingSession, ResultPage, ResultRecord, SubmissionRequest, Suggestions, TodayResult,
};

use super::ReadingApi;
use crate::error::ApiError;

#[derive(Default)]
struct MemoryState {
    reading: Option<ReadingSession>,
    today: Option<TodayResult>,
    results: Vec<ResultRecord>,
    suggestions: Suggestions,
    submissions: Vec<SubmissionRequest>,
    fail_submit: bool,
}

/// Simple in-memory backend for tests and offline previews.
///
/// Missing data answers with `404`; cursors are the offset of the next page.
#[derive(Clone, Default)]
pub struct InMemoryReadingApi {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryReadingApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn with_reading(self, reading: ReadingSession) -> Self {
        self.lock().reading = Some(reading);
        self
    }

    #[must_use]
    pub fn with_today(self, today: TodayResult) -> Self {
        self.lock().today = Some(today);
        self
    }

    #[must_use]
    pub fn with_results(self, results: Vec<ResultRecord>) -> Self {
        self.lock().results = results;
        self
    }

    #[must_use]
    pub fn with_suggestions(self, suggestions: Suggestions) -> Self {
        self.lock().suggestions = suggestions;
        self
    }

    /// Make every later submission fail with `500`.
    pub fn fail_submissions(&self, fail: bool) {
        self.lock().fail_submit = fail;
    }

    /// Requests received by `submit_result`, oldest first.
    #[must_use]
    pub fn submissions(&self) -> Vec<SubmissionRequest> {
        self.lock().submissions.clone()
    }
}

#[async_trait]
impl ReadingApi for InMemoryReadingApi {
    async fn fetch_reading(&self) -> Result<ReadingSession, ApiError> {
        self.lock()
            .reading
            .clone()
            .ok_or(ApiError::HttpStatus(StatusCode::NOT_FOUND))
    }

    async fn submit_result(&self, request: &SubmissionRequest) -> Result<Suggestions, ApiError> {
        let mut state = self.lock();
        if state.fail_submit {
            return Err(ApiError::HttpStatus(StatusCode::INTERNAL_SERVER_ERROR));
        }
        state.submissions.push(request.clone());
        Ok(state.suggestions.clone())
    }

    async fn today_result(&self) -> Result<TodayResult, ApiError> {
        self.lock()
            .today
            .clone()
            .ok_or(ApiError::HttpStatus(StatusCode::NOT_FOUND))
    }

    async fn list_results(
        &self,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<ResultPage, ApiError> {
        let state = self.lock();
        let start = match cursor {
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|_| ApiError::HttpStatus(StatusCode::BAD_REQUEST))?,
            None => 0,
        };
        let limit = usize::try_from(limit.max(1)).unwrap_or(usize::MAX);
        let end = start.saturating_add(limit).min(state.results.len());
        let items = state.results.get(start..end).unwrap_or_default().to_vec();
        let cursor = (end < state.results.len()).then(|| end.to_string());
        Ok(ResultPage { items, cursor })
    }
}
