//! Remote reading backend: configuration, wire types and clients.

mod client;
mod config;
mod memory;
mod wire;

use async_trait::async_trait;

use reading_core::model::{
    ReadingSession, ResultPage, SubmissionRequest, Suggestions, TodayResult,
};

pub use crate::error::ApiError;
pub use client::{HttpReadingApi, authorization_value};
pub use config::{ApiConfig, DEFAULT_PAGE_SIZE};
pub use memory::InMemoryReadingApi;

/// Contract for the reading backend.
#[async_trait]
pub trait ReadingApi: Send + Sync {
    /// Fetch today's generated reading, validated into a session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport, status or validation failures.
    async fn fetch_reading(&self) -> Result<ReadingSession, ApiError>;

    /// Submit a finished quiz and receive study suggestions.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport, status or decode failures.
    async fn submit_result(&self, request: &SubmissionRequest) -> Result<Suggestions, ApiError>;

    /// Fetch today's reading together with any stored result.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport, status or decode failures.
    async fn today_result(&self) -> Result<TodayResult, ApiError>;

    /// Fetch one page of past results. `cursor` is `None` for the first page.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport, status or decode failures.
    async fn list_results(&self, limit: u32, cursor: Option<&str>)
    -> Result<ResultPage, ApiError>;
}
