use std::sync::Arc;

use reading_core::model::ReadingSession;

use crate::api::{ApiConfig, DEFAULT_PAGE_SIZE, HttpReadingApi, ReadingApi};
use crate::auth::{AuthContext, TokenSource};
use crate::history::HistoryFeed;
use crate::reading_service::ReadingService;
use crate::sessions::QuizSession;
use crate::Clock;

/// Assembles app-facing services around one backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    page_size: u32,
    auth: Arc<AuthContext>,
    api: Arc<dyn ReadingApi>,
    reading: Arc<ReadingService>,
}

impl AppServices {
    /// Build services talking to the HTTP backend.
    #[must_use]
    pub fn http(config: ApiConfig, tokens: Arc<dyn TokenSource>, clock: Clock) -> Self {
        let page_size = config.page_size();
        let auth = Arc::new(AuthContext::new(tokens));
        let api: Arc<dyn ReadingApi> = Arc::new(HttpReadingApi::new(config, Arc::clone(&auth)));
        Self::from_parts(api, auth, page_size, clock)
    }

    /// Build services over any backend, e.g. `InMemoryReadingApi`.
    #[must_use]
    pub fn with_api(api: Arc<dyn ReadingApi>, tokens: Arc<dyn TokenSource>, clock: Clock) -> Self {
        let auth = Arc::new(AuthContext::new(tokens));
        Self::from_parts(api, auth, DEFAULT_PAGE_SIZE, clock)
    }

    fn from_parts(
        api: Arc<dyn ReadingApi>,
        auth: Arc<AuthContext>,
        page_size: u32,
        clock: Clock,
    ) -> Self {
        let reading = Arc::new(ReadingService::new(Arc::clone(&api)));
        Self {
            clock,
            page_size,
            auth,
            api,
            reading,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthContext> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn api(&self) -> Arc<dyn ReadingApi> {
        Arc::clone(&self.api)
    }

    #[must_use]
    pub fn reading_service(&self) -> Arc<ReadingService> {
        Arc::clone(&self.reading)
    }

    /// Empty history feed sized to the configured page size.
    #[must_use]
    pub fn history_feed(&self) -> HistoryFeed {
        HistoryFeed::new(self.page_size)
    }

    /// Wrap a fetched reading in a fresh quiz session.
    #[must_use]
    pub fn quiz_session(&self, reading: ReadingSession) -> QuizSession {
        QuizSession::new(reading, self.clock)
    }
}
