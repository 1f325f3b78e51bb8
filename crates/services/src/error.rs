//! Shared error types for the services crate.

use thiserror::Error;

use reading_core::model::ReadingError;

/// Errors emitted by the reading API client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("failed to decode `{field}`")]
    Decode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid API base URL")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("invalid page size: {0:?}")]
    InvalidPageSize(String),
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error(transparent)]
    Reading(#[from] ReadingError),
}

/// Errors emitted by token sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("auth provider unavailable: {0}")]
    Unavailable(String),
    #[error("sign-out failed: {0}")]
    SignOut(String),
}

/// Errors emitted by `ReadingService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReadingServiceError {
    #[error("failed to fetch reading")]
    FetchFailed(#[source] ApiError),
    #[error(transparent)]
    InvalidReading(#[from] ReadingError),
}

/// Errors emitted by the quiz session adapter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("a submission is already in flight")]
    Submitting,
    #[error("session is not ready to submit")]
    NotReady,
    #[error("session already completed")]
    Completed,
    #[error("submission failed")]
    SubmitFailed(#[source] ApiError),
}

/// Errors reported by a speech engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpeechError {
    #[error("speech synthesis is not available")]
    Unavailable,
    #[error("speech engine failed: {0}")]
    Engine(String),
}
