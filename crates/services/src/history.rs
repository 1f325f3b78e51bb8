//! Cursor-paged list of past results.

use reading_core::model::{ResultPage, ResultRecord};

use crate::api::ReadingApi;
use crate::error::ApiError;

/// Parameters of one page fetch, handed back to [`HistoryFeed::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub cursor: Option<String>,
    generation: u64,
}

impl PageRequest {
    #[must_use]
    pub fn is_first_page(&self) -> bool {
        self.cursor.is_none()
    }
}

/// Accumulated history with the cursor of the next page.
///
/// Loads are split into `begin_*` and `finish` so callers never hold the feed
/// across an await. A refresh supersedes any load still in flight.
#[derive(Debug, Clone, Default)]
pub struct HistoryFeed {
    page_size: u32,
    items: Vec<ResultRecord>,
    cursor: Option<String>,
    loading: bool,
    loaded: bool,
    generation: u64,
}

impl HistoryFeed {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn items(&self) -> &[ResultRecord] {
        &self.items
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True once the first page has arrived.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    #[must_use]
    pub fn find(&self, result_id: &str) -> Option<&ResultRecord> {
        self.items
            .iter()
            .find(|record| record.result_id.as_str() == result_id)
    }

    /// Start over from the first page.
    pub fn begin_refresh(&mut self) -> PageRequest {
        self.generation += 1;
        self.cursor = None;
        self.loading = true;
        PageRequest {
            limit: self.page_size,
            cursor: None,
            generation: self.generation,
        }
    }

    /// Request the next page; `None` at the end or while a load is in flight.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        if self.loading {
            return None;
        }
        let cursor = self.cursor.clone()?;
        self.loading = true;
        Some(PageRequest {
            limit: self.page_size,
            cursor: Some(cursor),
            generation: self.generation,
        })
    }

    /// Apply the outcome of `request`. Stale responses are dropped.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` from `outcome`; the feed keeps its items.
    pub fn finish(
        &mut self,
        request: &PageRequest,
        outcome: Result<ResultPage, ApiError>,
    ) -> Result<(), ApiError> {
        if request.generation != self.generation {
            log::debug!("dropping superseded history page");
            return Ok(());
        }
        self.loading = false;
        let page = outcome.inspect_err(|err| log::warn!("failed to load history: {err}"))?;

        if request.is_first_page() {
            self.items = page.items;
        } else {
            self.items.extend(page.items);
        }
        self.cursor = page.cursor;
        self.loaded = true;
        Ok(())
    }

    /// Reload the first page.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the page cannot be fetched.
    pub async fn refresh(&mut self, api: &dyn ReadingApi) -> Result<(), ApiError> {
        let request = self.begin_refresh();
        let outcome = fetch(api, &request).await;
        self.finish(&request, outcome)
    }

    /// Append the next page, if there is one.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the page cannot be fetched.
    pub async fn load_more(&mut self, api: &dyn ReadingApi) -> Result<(), ApiError> {
        let Some(request) = self.begin_load_more() else {
            return Ok(());
        };
        let outcome = fetch(api, &request).await;
        self.finish(&request, outcome)
    }
}

/// Perform the fetch described by `request`.
///
/// # Errors
///
/// Returns `ApiError` from the backend.
pub async fn fetch(api: &dyn ReadingApi, request: &PageRequest) -> Result<ResultPage, ApiError> {
    api.list_results(request.limit, request.cursor.as_deref())
        .await
}
