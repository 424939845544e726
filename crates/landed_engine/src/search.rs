use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use futures_util::StreamExt;
use landed_core::{Query, SearchBatch};
use reqwest::header::ACCEPT;
use url::Url;

use crate::normalize::normalize_all;
use crate::types::ProviderErrorBody;
use crate::{FailureKind, RawSearchResponse, SearchError};

pub const DEFAULT_RESULTS_PER_PAGE: u32 = 21;
const GENERIC_PROVIDER_FAILURE: &str = "Failed to fetch jobs from Adzuna";

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub base_url: String,
    /// Two-letter country segment of the search path.
    pub country: String,
    pub app_id: String,
    pub app_key: String,
    /// 21 tiles evenly into a three-column grid.
    pub results_per_page: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.adzuna.com".to_string(),
            country: "gb".to_string(),
            app_id: String::new(),
            app_key: String::new(),
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetches one 1-based page of results for `query`.
    async fn search(&self, query: &Query, page: u32) -> Result<SearchBatch, SearchError>;
}

#[derive(Debug, Clone)]
pub struct AdzunaClient {
    settings: SearchSettings,
    client: reqwest::Client,
}

impl AdzunaClient {
    pub fn new(settings: SearchSettings) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SearchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// `{base}/v1/api/jobs/{country}/search/{page}` with credentials and query terms.
    pub fn request_url(&self, query: &Query, page: u32) -> Result<Url, SearchError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|err| SearchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| {
                SearchError::new(FailureKind::InvalidUrl, "base url cannot carry a path")
            })?
            .pop_if_empty()
            .extend(["v1", "api", "jobs", self.settings.country.as_str(), "search"])
            .push(&page.to_string());
        url.query_pairs_mut()
            .append_pair("app_id", &self.settings.app_id)
            .append_pair("app_key", &self.settings.app_key)
            .append_pair("what", &query.keyword)
            .append_pair("where", &query.location)
            .append_pair(
                "results_per_page",
                &self.settings.results_per_page.to_string(),
            );
        Ok(url)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, SearchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(SearchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(SearchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl SearchProvider for AdzunaClient {
    async fn search(&self, query: &Query, page: u32) -> Result<SearchBatch, SearchError> {
        let url = self.request_url(query, page)?;
        engine_debug!(
            "Adzuna search page={} what_len={} where={:?}",
            page,
            query.keyword.len(),
            query.location
        );

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = self.read_body(response).await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ProviderErrorBody>(&body)
                .ok()
                .and_then(|error| error.display_message)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| GENERIC_PROVIDER_FAILURE.to_string());
            engine_warn!("Adzuna returned {}: {}", status, message);
            return Err(SearchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let parsed: RawSearchResponse = serde_json::from_slice(&body).map_err(|err| {
            engine_warn!("Adzuna response did not decode: {}", err);
            SearchError::new(FailureKind::Decode, GENERIC_PROVIDER_FAILURE)
        })?;

        Ok(SearchBatch {
            listings: normalize_all(parsed.results),
            total_count: parsed.count,
        })
    }
}

// Request URLs carry the app key, so neither the message nor the log may include them.
fn map_reqwest_error(err: reqwest::Error) -> SearchError {
    let err = err.without_url();
    engine_debug!("Adzuna transport error: {}", err);
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Network
    };
    SearchError::new(kind, GENERIC_PROVIDER_FAILURE)
}
