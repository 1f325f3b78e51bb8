use std::sync::Arc;

use reading_core::Clock;
use services::{AuthContext, HistoryFeed, ReadingApi, ReadingService};

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn history_page_size(&self) -> u32;

    /// Whether the platform speech synthesizer is available to the webview.
    fn speech_enabled(&self) -> bool;

    fn auth(&self) -> Arc<AuthContext>;
    fn api(&self) -> Arc<dyn ReadingApi>;
    fn reading_service(&self) -> Arc<ReadingService>;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    history_page_size: u32,
    speech_enabled: bool,

    auth: Arc<AuthContext>,
    api: Arc<dyn ReadingApi>,
    reading_service: Arc<ReadingService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            history_page_size: app.history_page_size(),
            speech_enabled: app.speech_enabled(),
            auth: app.auth(),
            api: app.api(),
            reading_service: app.reading_service(),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn speech_enabled(&self) -> bool {
        self.speech_enabled
    }

    /// A fresh, unloaded history feed.
    #[must_use]
    pub fn history_feed(&self) -> HistoryFeed {
        HistoryFeed::new(self.history_page_size)
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
        Arc::clone(&self.reading_service)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
