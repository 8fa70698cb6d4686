use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Duration;

use super::error::FetchError;
use super::payload::ImageRecordPayload;
use crate::config::ApiConfig;
use crate::state::date::CalendarDate;

/// Source of archive entries.
///
/// Calls are idempotent reads with no side effects, so the navigator may
/// fire a new one before an older one has come back.
#[async_trait]
pub trait ApodFetcher: Send + Sync {
    /// Fetch the entry for one day
    async fn fetch(&self, date: CalendarDate) -> Result<ImageRecordPayload, FetchError>;

    /// Download the picture an entry points at
    async fn fetch_picture(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// `ApodFetcher` backed by the NASA APOD HTTP API
pub struct HttpApodFetcher {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpApodFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Full request URL for one day (`?api_key=...&date=YYYY-MM-DD`)
    pub fn request_url(&self, date: CalendarDate) -> Result<Url, FetchError> {
        Url::parse_with_params(
            &self.base_url,
            &[("api_key", self.api_key.as_str()), ("date", date.to_iso().as_str())],
        )
        .map_err(|e| FetchError::Network(format!("invalid API URL {}: {}", self.base_url, e)))
    }
}

#[async_trait]
impl ApodFetcher for HttpApodFetcher {
    async fn fetch(&self, date: CalendarDate) -> Result<ImageRecordPayload, FetchError> {
        let url = self.request_url(date)?;
        tracing::debug!(%date, "Requesting APOD entry");

        let response = self.client.get(url).send().await?;
        check_status(response.status())?;

        let body = response.text().await?;
        ImageRecordPayload::from_json(&body)
    }

    async fn fetch_picture(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(url, "Downloading picture");

        let response = self.client.get(url).send().await?;
        check_status(response.status())?;

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Non-2xx answers are server errors, whatever the body says
fn check_status(status: StatusCode) -> Result<(), FetchError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Server {
            status: status.as_u16(),
        })
    }
}
