use std::sync::Arc;

use reading_core::model::{ReadingSession, TodayResult};

use crate::api::ReadingApi;
use crate::error::{ApiError, ReadingServiceError};

/// Loads readings for the quiz and home screens.
#[derive(Clone)]
pub struct ReadingService {
    api: Arc<dyn ReadingApi>,
}

impl ReadingService {
    #[must_use]
    pub fn new(api: Arc<dyn ReadingApi>) -> Self {
        Self { api }
    }

    /// Fetch today's reading for a new quiz session.
    ///
    /// # Errors
    ///
    /// Returns `ReadingServiceError::InvalidReading` when the reading fails
    /// validation, or `ReadingServiceError::FetchFailed` for any other API error.
    pub async fn start_session(&self) -> Result<ReadingSession, ReadingServiceError> {
        match self.api.fetch_reading().await {
            Ok(reading) => {
                log::debug!(
                    "loaded reading {:?} with {} questions",
                    reading.title(),
                    reading.question_count()
                );
                Ok(reading)
            }
            Err(ApiError::Reading(err)) => {
                log::warn!("rejected malformed reading: {err}");
                Err(ReadingServiceError::InvalidReading(err))
            }
            Err(err) => {
                log::warn!("failed to fetch reading: {err}");
                Err(ReadingServiceError::FetchFailed(err))
            }
        }
    }

    /// Fetch today's reading and the stored result, if any.
    ///
    /// # Errors
    ///
    /// Returns `ReadingServiceError::FetchFailed` when the request fails.
    pub async fn today(&self) -> Result<TodayResult, ReadingServiceError> {
        self.api.today_result().await.map_err(|err| {
            log::warn!("failed to fetch today's result: {err}");
            ReadingServiceError::FetchFailed(err)
        })
    }
}
