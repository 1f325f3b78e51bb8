use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use reading_core::model::{
    ReadingSession, ResultPage, SubmissionRequest, Suggestions, TodayResult,
};

use super::config::ApiConfig;
use super::wire::{GeneratedReading, ResultsResponse, SubmitBody, SubmitResponse, TodayResponse};
use super::ReadingApi;
use crate::auth::AuthContext;
use crate::error::ApiError;

const GENERATE_READING: &str = "generateReading";
const SUBMIT_RESULT: &str = "submitResult";
const TODAY_RESULT: &str = "getTodayQuizAndResult";
const ALL_RESULTS: &str = "getAllResults";

/// `Authorization` header value. A missing token is sent as an empty bearer.
#[must_use]
pub fn authorization_value(token: Option<&str>) -> String {
    format!("Bearer {}", token.unwrap_or_default())
}

/// `ReadingApi` backed by the HTTP backend.
#[derive(Clone)]
pub struct HttpReadingApi {
    client: Client,
    config: ApiConfig,
    auth: Arc<AuthContext>,
}

impl HttpReadingApi {
    #[must_use]
    pub fn new(config: ApiConfig, auth: Arc<AuthContext>) -> Self {
        Self {
            client: Client::new(),
            config,
            auth,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.config.endpoint(endpoint)?;
        let token = self.auth.token().await;
        log::debug!("{method} {url}");
        Ok(self
            .client
            .request(method, url)
            .header(AUTHORIZATION, authorization_value(token.as_deref())))
    }
}

fn paged(request: RequestBuilder, limit: u32, cursor: Option<&str>) -> RequestBuilder {
    let request = request.query(&[("limit", limit)]);
    match cursor {
        Some(cursor) => request.query(&[("cursor", cursor)]),
        None => request,
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::HttpStatus(status));
    }
    Ok(response.json().await?)
}

#[async_trait]
impl ReadingApi for HttpReadingApi {
    async fn fetch_reading(&self) -> Result<ReadingSession, ApiError> {
        let request = self.request(Method::GET, GENERATE_READING).await?;
        let body: GeneratedReading = send_json(request).await?;
        Ok(body.into_session()?)
    }

    async fn submit_result(&self, request: &SubmissionRequest) -> Result<Suggestions, ApiError> {
        let builder = self
            .request(Method::POST, SUBMIT_RESULT)
            .await?
            .json(&SubmitBody::from(request));
        let body: SubmitResponse = send_json(builder).await?;
        Ok(body.suggestions)
    }

    async fn today_result(&self) -> Result<TodayResult, ApiError> {
        let request = self.request(Method::GET, TODAY_RESULT).await?;
        let body: TodayResponse = send_json(request).await?;
        body.into_today()
    }

    async fn list_results(
        &self,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<ResultPage, ApiError> {
        let request = self.request(Method::GET, ALL_RESULTS).await?;
        let body: ResultsResponse = send_json(paged(request, limit, cursor)).await?;
        body.into_page()
    }
}
